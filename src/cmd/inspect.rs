use std::path::PathBuf;

use vartype::types::{
	AtomicType, DataStream, DataType, DataTypeDocument, DataTypeVisitor, ListType, Result, StructType, TypeRegistry, VecChannel,
	read_stream_file,
};

use crate::cmd::util::{emit_json, stream_options};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	#[arg(long)]
	pub big_endian: bool,
	#[arg(long)]
	pub max_depth: Option<u32>,
	#[arg(long)]
	pub max_elements: Option<usize>,
}

/// Decode a stream file and print its data type tree.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		json,
		big_endian,
		max_depth,
		max_elements,
	} = args;

	let (compression, bytes) = read_stream_file(&path)?;
	let stream_bytes = bytes.len();
	let registry = TypeRegistry::global();
	let options = stream_options(big_endian, max_depth, max_elements);
	let endianness = options.endianness;

	let mut channel = VecChannel::from_bytes(bytes);
	let item = DataType::deserialize(&mut DataStream::new(&mut channel).with_registry(registry).with_options(options))?;
	let trailing_bytes = channel.remaining();

	let mut census = Census::default();
	item.accept(&mut census);

	if json {
		let payload = InspectJson {
			path: path.display().to_string(),
			compression: compression.as_str(),
			endianness: endianness.as_str(),
			kind: item.kind().as_str(),
			name: item.name(),
			stream_bytes,
			trailing_bytes,
			nodes: census,
			document: DataTypeDocument::from_data_type(&item, registry)?,
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("compression: {}", compression.as_str());
	println!("endianness: {}", endianness.as_str());
	println!("kind: {}", item.kind().as_str());
	println!("name: {}", item.name());
	println!("stream_bytes: {stream_bytes}");
	println!("trailing_bytes: {trailing_bytes}");
	println!(
		"nodes: atomic={} struct={} list={} list_values={} depth={}",
		census.atomic, census.structs, census.list, census.list_values, census.depth
	);
	println!("value:");
	println!("{item}");
	Ok(())
}

/// Node counts gathered by walking the decoded tree.
#[derive(Debug, Default, serde::Serialize)]
struct Census {
	atomic: usize,
	#[serde(rename = "struct")]
	structs: usize,
	list: usize,
	list_values: usize,
	depth: usize,
	#[serde(skip)]
	level: usize,
}

impl Census {
	fn enter(&mut self) {
		self.level += 1;
		self.depth = self.depth.max(self.level);
	}
}

impl DataTypeVisitor for Census {
	fn visit_atomic(&mut self, _item: &AtomicType) {
		self.enter();
		self.atomic += 1;
		self.level -= 1;
	}

	fn visit_struct(&mut self, item: &StructType) {
		self.enter();
		self.structs += 1;
		for (_, child) in item.iter() {
			child.accept(self);
		}
		self.level -= 1;
	}

	fn visit_list(&mut self, item: &ListType) {
		self.enter();
		self.list += 1;
		self.list_values += item.len();
		self.level -= 1;
	}
}

#[derive(serde::Serialize)]
struct InspectJson {
	path: String,
	compression: &'static str,
	endianness: &'static str,
	kind: &'static str,
	name: String,
	stream_bytes: usize,
	trailing_bytes: usize,
	nodes: Census,
	document: DataTypeDocument,
}

#[cfg(test)]
mod tests {
	use super::Census;
	use vartype::types::{AtomicType, DataType, DataTypeVisitor, ListType, StructType, Variant};

	#[test]
	fn census_counts_nodes_and_depth() {
		let list = ListType::from_values([Variant::new(1_u8), Variant::new(2_u8)]).expect("u8 registered");
		let inner = StructType::new("Inner", [("v", DataType::from(list))]).expect("valid struct");
		let outer = StructType::new(
			"Outer",
			[
				("inner", DataType::from(inner)),
				("flag", DataType::from(AtomicType::of(true).expect("bool registered"))),
			],
		)
		.expect("valid struct");

		let mut census = Census::default();
		census.visit_struct(&outer);
		assert_eq!(census.structs, 2);
		assert_eq!(census.atomic, 1);
		assert_eq!(census.list, 1);
		assert_eq!(census.list_values, 2);
		assert_eq!(census.depth, 3);
		assert_eq!(census.level, 0);
	}
}
