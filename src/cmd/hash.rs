use vartype::types::{Result, TypeRegistry};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub name: String,
	#[arg(long)]
	pub json: bool,
}

/// Print the wire identifier derived from a type name.
pub fn run(args: Args) -> Result<()> {
	let Args { name, json } = args;
	let hash = TypeRegistry::hash_name(&name);

	if json {
		return emit_json(&HashJson {
			name,
			hash: hash.to_string(),
			value: hash.value(),
		});
	}

	println!("{hash}");
	Ok(())
}

#[derive(serde::Serialize)]
struct HashJson {
	name: String,
	hash: String,
	value: u64,
}
