use vartype::types::{Result, TypeRegistry};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
}

/// List built-in registered types with their wire identifiers.
pub fn run(args: Args) -> Result<()> {
	let registry = TypeRegistry::new();
	let rows = registry.registered_names();

	if args.json {
		let payload = TypesJson {
			count: rows.len(),
			types: rows
				.iter()
				.map(|(name, hash)| TypeJson {
					name: name.clone(),
					hash: hash.to_string(),
				})
				.collect(),
		};
		return emit_json(&payload);
	}

	println!("types: {}", rows.len());
	println!("name\thash");
	for (name, hash) in rows {
		println!("{name}\t{hash}");
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct TypesJson {
	count: usize,
	types: Vec<TypeJson>,
}

#[derive(serde::Serialize)]
struct TypeJson {
	name: String,
	hash: String,
}
