use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::types::{Result, TypeError};

const MAX_DECOMPRESSED_BYTES: usize = 256 * 1024 * 1024;
const ZSTD_LEVEL: i32 = 3;
/// zstd frame magic marking a compressed stream file.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode of a stream file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
	/// Raw stream bytes.
	#[default]
	None,
	/// zstd-compressed stream bytes.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Detect and undo compression, returning `(mode, stream_bytes)`.
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw)?;
		return Ok((Compression::Zstd, out));
	}
	Ok((Compression::None, raw))
}

/// Apply `compression` to raw stream bytes.
pub fn encode_bytes(bytes: Vec<u8>, compression: Compression) -> Result<Vec<u8>> {
	match compression {
		Compression::None => Ok(bytes),
		Compression::Zstd => Ok(zstd::stream::encode_all(bytes.as_slice(), ZSTD_LEVEL)?),
	}
}

/// Read a stream file, decompressing it when it starts with a zstd frame.
pub fn read_stream_file(path: impl AsRef<Path>) -> Result<(Compression, Vec<u8>)> {
	let path = path.as_ref();
	let raw = std::fs::read(path)?;
	let (compression, bytes) = decode_bytes(raw)?;
	debug!(path = %path.display(), compression = compression.as_str(), len = bytes.len(), "read stream file");
	Ok((compression, bytes))
}

/// Write stream bytes to `path`, compressing them as requested.
pub fn write_stream_file(path: impl AsRef<Path>, bytes: Vec<u8>, compression: Compression) -> Result<()> {
	let path = path.as_ref();
	let out = encode_bytes(bytes, compression)?;
	std::fs::write(path, &out)?;
	debug!(path = %path.display(), compression = compression.as_str(), len = out.len(), "wrote stream file");
	Ok(())
}

fn decode_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(TypeError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}
