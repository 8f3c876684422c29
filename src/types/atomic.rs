use std::fmt;

use crate::types::{DataStream, Result, TypeError, TypeHash, TypeRegistry, Variant, VariantValue};

/// Leaf data type wrapping exactly one registered value.
#[derive(Debug, Clone)]
pub struct AtomicType {
	value: Variant,
	name: String,
}

impl AtomicType {
	/// Wrap `value`, resolving its type through the global registry.
	pub fn new(value: Variant) -> Result<Self> {
		Self::new_in(TypeRegistry::global(), value)
	}

	/// Wrap `value`, resolving its type through `registry`.
	pub fn new_in(registry: &TypeRegistry, value: Variant) -> Result<Self> {
		let methods = registry.get_key(value.type_key())?;
		Ok(Self {
			name: methods.name().to_owned(),
			value,
		})
	}

	/// Wrap a plain value, resolving its type through the global registry.
	pub fn of<T: VariantValue>(value: T) -> Result<Self> {
		Self::new(Variant::new(value))
	}

	/// Registered name of the held type.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Held value.
	pub fn get(&self) -> &Variant {
		&self.value
	}

	/// Copy out the held value as `T`.
	pub fn value<T: VariantValue>(&self) -> Result<T> {
		self.value.get::<T>()
	}

	/// Replace the held value; the replacement must hold the same type.
	pub fn set(&mut self, value: Variant) -> Result<()> {
		if !self.value.same_type(&value) {
			return Err(TypeError::TypeMismatch {
				expected: self.value.type_name(),
				got: value.type_name(),
			});
		}
		self.value = value;
		Ok(())
	}

	pub(crate) fn serialize(&self, stream: &mut DataStream<'_>) -> Result<()> {
		let registry = stream.registry();
		let key = self.value.type_key();
		let methods = registry.get_key(key)?;
		stream.write(&registry.calculate_hash_key(key)?)?;
		methods.serialize(stream, &self.value)
	}

	pub(crate) fn deserialize(stream: &mut DataStream<'_>) -> Result<Self> {
		let hash = stream.read::<TypeHash>()?;
		let methods = stream.registry().get_by_hash(hash)?;
		let value = methods.deserialize(stream)?;
		Ok(Self {
			name: methods.name().to_owned(),
			value,
		})
	}
}

impl PartialEq for AtomicType {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value
	}
}

impl fmt::Display for AtomicType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Atomic<{}>({})", self.name, self.value.display_value())
	}
}
