use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::types::methods::builtin_methods;
use crate::types::{Result, TypeError, TypeHash, TypeKey, TypeMethods, VariantValue};

struct Registered {
	methods: Arc<dyn TypeMethods>,
	hash: TypeHash,
	key: TypeKey,
}

#[derive(Default)]
struct Tables {
	by_type: HashMap<TypeKey, Registered>,
	by_hash: HashMap<TypeHash, TypeKey>,
}

/// Maps value types to their [`TypeMethods`] and wire identifiers.
///
/// Both internal maps sit behind one lock, so a type and its identifier are
/// always added or removed together. Lookups hand out `Arc` clones and never
/// hold the lock while methods run.
pub struct TypeRegistry {
	tables: RwLock<Tables>,
}

impl Default for TypeRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl TypeRegistry {
	/// Registry pre-populated with the built-in scalar and text types.
	pub fn new() -> Self {
		let registry = Self::empty();
		for methods in builtin_methods() {
			if let Err(err) = registry.insert_boxed(methods) {
				// Built-in names are fixed and distinct, this cannot clash.
				warn!(%err, "failed to register built-in type methods");
			}
		}
		debug!(count = registry.len(), "registered built-in type methods");
		registry
	}

	/// Registry without any entries.
	pub fn empty() -> Self {
		Self {
			tables: RwLock::new(Tables::default()),
		}
	}

	/// Process-wide registry, created with built-ins on first access.
	pub fn global() -> &'static Self {
		static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();
		GLOBAL.get_or_init(Self::new)
	}

	/// Wire identifier for a registered name.
	pub fn hash_name(name: &str) -> TypeHash {
		TypeHash::of_name(name)
	}

	/// Register `methods` and return the derived wire identifier.
	pub fn insert<M: TypeMethods + 'static>(&self, methods: M) -> Result<TypeHash> {
		self.insert_boxed(Box::new(methods))
	}

	/// Register boxed `methods` and return the derived wire identifier.
	///
	/// Fails when the value type is already known, or when its name hashes to an
	/// identifier held by another type; the registry is left untouched on error.
	pub fn insert_boxed(&self, methods: Box<dyn TypeMethods>) -> Result<TypeHash> {
		let prototype = methods.create();
		if prototype.is_empty() {
			return Err(TypeError::EmptyVariant);
		}

		let key = prototype.type_key();
		let name = methods.name().to_owned();
		if name.is_empty() {
			return Err(TypeError::EmptyTypeName { type_name: key.name() });
		}
		let hash = TypeHash::of_name(&name);

		let mut tables = self.tables.write();
		match tables.by_type.entry(key) {
			Entry::Occupied(_) => return Err(TypeError::AlreadyRegistered { type_name: key.name() }),
			Entry::Vacant(slot) => {
				slot.insert(Registered {
					methods: Arc::from(methods),
					hash,
					key,
				});
			}
		}

		if let Some(existing_key) = tables.by_hash.get(&hash).copied() {
			tables.by_type.remove(&key);
			let existing = tables
				.by_type
				.get(&existing_key)
				.map(|entry| entry.methods.name().to_owned())
				.unwrap_or_default();
			warn!(%hash, name = %name, existing = %existing, "rejected type methods with colliding hash");
			return Err(TypeError::HashCollision { hash, name, existing });
		}
		tables.by_hash.insert(hash, key);

		debug!(type_name = key.name(), name = %name, %hash, "registered type methods");
		Ok(hash)
	}

	/// Unregister the methods for `T`.
	pub fn remove<T: VariantValue>(&self) -> Result<()> {
		self.remove_key(TypeKey::of::<T>())
	}

	/// Unregister the methods for `key`.
	pub fn remove_key(&self, key: TypeKey) -> Result<()> {
		let mut tables = self.tables.write();
		let entry = tables
			.by_type
			.remove(&key)
			.ok_or(TypeError::UnregisteredType { type_name: key.name() })?;
		tables.by_hash.remove(&entry.hash);
		debug!(type_name = key.name(), hash = %entry.hash, "removed type methods");
		Ok(())
	}

	/// Whether `T` is registered.
	pub fn has<T: VariantValue>(&self) -> bool {
		self.has_key(TypeKey::of::<T>())
	}

	/// Whether `key` is registered.
	pub fn has_key(&self, key: TypeKey) -> bool {
		self.tables.read().by_type.contains_key(&key)
	}

	/// Methods registered for `T`.
	pub fn get<T: VariantValue>(&self) -> Result<Arc<dyn TypeMethods>> {
		self.get_key(TypeKey::of::<T>())
	}

	/// Methods registered for `key`.
	pub fn get_key(&self, key: TypeKey) -> Result<Arc<dyn TypeMethods>> {
		self.tables
			.read()
			.by_type
			.get(&key)
			.map(|entry| Arc::clone(&entry.methods))
			.ok_or(TypeError::UnregisteredType { type_name: key.name() })
	}

	/// Methods registered under wire identifier `hash`.
	pub fn get_by_hash(&self, hash: TypeHash) -> Result<Arc<dyn TypeMethods>> {
		let tables = self.tables.read();
		let key = tables.by_hash.get(&hash).ok_or(TypeError::UnknownHash { hash })?;
		tables
			.by_type
			.get(key)
			.map(|entry| Arc::clone(&entry.methods))
			.ok_or(TypeError::UnknownHash { hash })
	}

	/// Methods registered under `name`.
	pub fn get_by_name(&self, name: &str) -> Result<Arc<dyn TypeMethods>> {
		let methods = self
			.get_by_hash(TypeHash::of_name(name))
			.map_err(|_| TypeError::UnknownTypeName { name: name.to_owned() })?;
		if methods.name() != name {
			return Err(TypeError::UnknownTypeName { name: name.to_owned() });
		}
		Ok(methods)
	}

	/// Wire identifier of registered type `T`.
	pub fn calculate_hash<T: VariantValue>(&self) -> Result<TypeHash> {
		self.calculate_hash_key(TypeKey::of::<T>())
	}

	/// Wire identifier of registered type `key`.
	pub fn calculate_hash_key(&self, key: TypeKey) -> Result<TypeHash> {
		self.tables
			.read()
			.by_type
			.get(&key)
			.map(|entry| entry.hash)
			.ok_or(TypeError::UnregisteredType { type_name: key.name() })
	}

	/// Keys of all registered types, in no particular order.
	pub fn registered_types(&self) -> Vec<TypeKey> {
		self.tables.read().by_type.values().map(|entry| entry.key).collect()
	}

	/// `(name, hash)` of all registered types, sorted by name.
	pub fn registered_names(&self) -> Vec<(String, TypeHash)> {
		let mut out: Vec<_> = self
			.tables
			.read()
			.by_type
			.values()
			.map(|entry| (entry.methods.name().to_owned(), entry.hash))
			.collect();
		out.sort();
		out
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.tables.read().by_type.len()
	}

	/// Whether nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[cfg(test)]
mod tests;
