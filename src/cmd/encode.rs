use std::path::PathBuf;

use vartype::types::{Compression, DataStream, DataTypeDocument, Result, TypeRegistry, VecChannel, write_stream_file};

use crate::cmd::util::stream_options;

#[derive(clap::Args)]
pub struct Args {
	pub document: PathBuf,
	#[arg(short, long)]
	pub output: PathBuf,
	#[arg(long)]
	pub zstd: bool,
	#[arg(long)]
	pub big_endian: bool,
}

/// Build a data type from a JSON document and write it as a stream file.
pub fn run(args: Args) -> Result<()> {
	let Args {
		document,
		output,
		zstd,
		big_endian,
	} = args;

	let text = std::fs::read_to_string(&document)?;
	let registry = TypeRegistry::global();
	let item = DataTypeDocument::from_json(&text)?.to_data_type(registry)?;

	let mut channel = VecChannel::new();
	let mut stream = DataStream::new(&mut channel)
		.with_registry(registry)
		.with_options(stream_options(big_endian, None, None));
	item.serialize(&mut stream)?;
	let bytes = channel.into_bytes();
	let len = bytes.len();

	let compression = if zstd { Compression::Zstd } else { Compression::None };
	write_stream_file(&output, bytes, compression)?;

	println!("path: {}", output.display());
	println!("kind: {}", item.kind().as_str());
	println!("name: {}", item.name());
	println!("stream_bytes: {len}");
	println!("compression: {}", compression.as_str());
	Ok(())
}
