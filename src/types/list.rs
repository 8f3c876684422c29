use std::fmt;

use crate::types::{DataKind, DataStream, Result, TypeError, TypeHash, TypeRegistry, Variant};

/// Homogeneous sequence of values sharing one registered type.
///
/// The prototype value fixes the element type, so even an empty list knows
/// what it holds; two lists of different element types never compare equal.
#[derive(Debug, Clone)]
pub struct ListType {
	prototype: Variant,
	element_name: String,
	values: Vec<Variant>,
}

impl ListType {
	/// Empty list whose element type is that of `prototype`, resolved through
	/// the global registry.
	pub fn new(prototype: Variant) -> Result<Self> {
		Self::new_in(TypeRegistry::global(), prototype)
	}

	/// Empty list whose element type is that of `prototype`, resolved through
	/// `registry`.
	pub fn new_in(registry: &TypeRegistry, prototype: Variant) -> Result<Self> {
		let methods = registry.get_key(prototype.type_key())?;
		Ok(Self {
			prototype: methods.create(),
			element_name: methods.name().to_owned(),
			values: Vec::new(),
		})
	}

	/// List holding `values`; the first value sets the element type.
	pub fn from_values(values: impl IntoIterator<Item = Variant>) -> Result<Self> {
		let mut values = values.into_iter();
		let first = values.next().ok_or(TypeError::NoListValues)?;
		let mut list = Self::new(first.clone())?;
		list.push(first)?;
		for value in values {
			list.push(value)?;
		}
		Ok(list)
	}

	/// `List<elem>` where `elem` is the registered element type name.
	pub fn name(&self) -> String {
		format!("List<{}>", self.element_name)
	}

	/// Registered name of the element type.
	pub fn element_type_name(&self) -> &str {
		&self.element_name
	}

	/// Default value of the element type.
	pub fn prototype(&self) -> &Variant {
		&self.prototype
	}

	/// Append `value`; it must hold the element type.
	pub fn push(&mut self, value: Variant) -> Result<()> {
		self.check_type(&value)?;
		self.values.push(value);
		Ok(())
	}

	/// Element at `index`.
	pub fn get(&self, index: usize) -> Result<&Variant> {
		self.values.get(index).ok_or(TypeError::IndexOutOfRange {
			index,
			len: self.values.len(),
		})
	}

	/// Replace the element at `index`; `value` must hold the element type.
	pub fn set(&mut self, index: usize, value: Variant) -> Result<()> {
		self.check_type(&value)?;
		let len = self.values.len();
		let slot = self.values.get_mut(index).ok_or(TypeError::IndexOutOfRange { index, len })?;
		*slot = value;
		Ok(())
	}

	/// Number of elements.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether the list has no elements.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// All elements in order.
	pub fn values(&self) -> &[Variant] {
		&self.values
	}

	fn check_type(&self, value: &Variant) -> Result<()> {
		if value.same_type(&self.prototype) {
			return Ok(());
		}
		Err(TypeError::TypeMismatch {
			expected: self.prototype.type_name(),
			got: value.type_name(),
		})
	}

	pub(crate) fn serialize(&self, stream: &mut DataStream<'_>) -> Result<()> {
		let registry = stream.registry();
		let key = self.prototype.type_key();
		let methods = registry.get_key(key)?;
		stream.write(&registry.calculate_hash_key(key)?)?;
		stream.write_count("list element", self.values.len())?;
		for value in &self.values {
			methods.serialize(stream, value)?;
		}
		Ok(())
	}

	pub(crate) fn deserialize(stream: &mut DataStream<'_>) -> Result<Self> {
		let hash = stream.read::<TypeHash>()?;
		let methods = stream.registry().get_by_hash(hash)?;
		let prototype = methods.create();
		let count = stream.read_count("list element")?;

		let mut values = Vec::with_capacity(count.min(1024));
		for index in 0..count {
			let value = methods.deserialize(stream)?;
			if !value.same_type(&prototype) {
				return Err(TypeError::corrupt(
					DataKind::List,
					format!(
						"element {index} holds {} instead of {}",
						value.type_name(),
						prototype.type_name()
					),
				));
			}
			values.push(value);
		}

		Ok(Self {
			prototype,
			element_name: methods.name().to_owned(),
			values,
		})
	}
}

impl PartialEq for ListType {
	fn eq(&self, other: &Self) -> bool {
		self.prototype.same_type(&other.prototype) && self.values == other.values
	}
}

impl fmt::Display for ListType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "List[{}](", self.values.len())?;
		for (index, value) in self.values.iter().enumerate() {
			if index > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}", value.display_value())?;
		}
		f.write_str(")")
	}
}
