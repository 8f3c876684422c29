use serde::Serialize;
use vartype::types::{Endianness, Result, StreamOptions};

/// Print `payload` as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// Stream options from the shared CLI flags.
pub(crate) fn stream_options(big_endian: bool, max_depth: Option<u32>, max_elements: Option<usize>) -> StreamOptions {
	let defaults = StreamOptions::default();
	StreamOptions {
		endianness: if big_endian { Endianness::Big } else { Endianness::Little },
		max_depth: max_depth.unwrap_or(defaults.max_depth),
		max_elements: max_elements.unwrap_or(defaults.max_elements),
		..defaults
	}
}

#[cfg(test)]
mod tests {
	use super::stream_options;
	use vartype::types::Endianness;

	#[test]
	fn flags_override_defaults() {
		let options = stream_options(true, Some(4), None);
		assert_eq!(options.endianness, Endianness::Big);
		assert_eq!(options.max_depth, 4);
		assert_eq!(options.max_elements, u32::MAX as usize);
	}
}
