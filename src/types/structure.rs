use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::sync::Arc;

use crate::types::{DataKind, DataStream, DataType, Result, TypeError};

/// Named composite of named child data types.
///
/// Attributes iterate, serialize, and print in lexicographic name order no
/// matter how they were supplied. Children are reference counted, so one child
/// may be shared by several structs; [`StructType::get_mut`] copies a shared
/// child before handing out a mutable borrow.
#[derive(Debug, Clone)]
pub struct StructType {
	name: String,
	attributes: BTreeMap<String, Arc<DataType>>,
}

impl StructType {
	/// Build a struct from `(attribute name, child)` pairs.
	///
	/// Fails when the name is empty, no attributes are given, or an attribute
	/// name is empty or repeated.
	pub fn new<I, K, V>(name: impl Into<String>, attributes: I) -> Result<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Arc<DataType>>,
	{
		let name = name.into();
		if name.is_empty() {
			return Err(TypeError::EmptyStructName);
		}

		let mut map: BTreeMap<String, Arc<DataType>> = BTreeMap::new();
		for (attribute, child) in attributes {
			let attribute = attribute.into();
			if attribute.is_empty() {
				return Err(TypeError::EmptyAttributeName { struct_name: name });
			}
			match map.entry(attribute) {
				Entry::Occupied(slot) => {
					return Err(TypeError::DuplicateAttribute {
						struct_name: name,
						attribute: slot.key().clone(),
					});
				}
				Entry::Vacant(slot) => {
					slot.insert(child.into());
				}
			}
		}

		if map.is_empty() {
			return Err(TypeError::NoAttributes { name });
		}
		Ok(Self { name, attributes: map })
	}

	/// Struct name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Attribute names in iteration order.
	pub fn attributes(&self) -> Vec<&str> {
		self.attributes.keys().map(String::as_str).collect()
	}

	/// Number of attributes.
	pub fn len(&self) -> usize {
		self.attributes.len()
	}

	/// Always `false`; a struct holds at least one attribute.
	pub fn is_empty(&self) -> bool {
		self.attributes.is_empty()
	}

	/// Whether an attribute called `attribute` exists.
	pub fn has(&self, attribute: &str) -> bool {
		self.attributes.contains_key(attribute)
	}

	/// Child stored under `attribute`.
	pub fn get(&self, attribute: &str) -> Result<&DataType> {
		self.attributes
			.get(attribute)
			.map(Arc::as_ref)
			.ok_or_else(|| self.unknown(attribute))
	}

	/// Shared handle to the child stored under `attribute`.
	pub fn get_shared(&self, attribute: &str) -> Result<Arc<DataType>> {
		self.attributes.get(attribute).cloned().ok_or_else(|| self.unknown(attribute))
	}

	/// Mutable child stored under `attribute`, detached from other holders first.
	pub fn get_mut(&mut self, attribute: &str) -> Result<&mut DataType> {
		let Self { name, attributes } = self;
		attributes
			.get_mut(attribute)
			.map(Arc::make_mut)
			.ok_or_else(|| TypeError::UnknownAttribute {
				struct_name: name.clone(),
				attribute: attribute.to_owned(),
			})
	}

	/// `(attribute, child)` pairs in name order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &DataType)> {
		self.attributes.iter().map(|(name, child)| (name.as_str(), child.as_ref()))
	}

	/// Mutable `(attribute, child)` pairs in name order.
	pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut DataType)> {
		self.attributes.iter_mut().map(|(name, child)| (name.as_str(), Arc::make_mut(child)))
	}

	fn unknown(&self, attribute: &str) -> TypeError {
		TypeError::UnknownAttribute {
			struct_name: self.name.clone(),
			attribute: attribute.to_owned(),
		}
	}

	pub(crate) fn serialize(&self, stream: &mut DataStream<'_>) -> Result<()> {
		stream.write_str(&self.name)?;
		stream.write_count("attribute", self.attributes.len())?;
		for (attribute, child) in &self.attributes {
			stream.write_str(attribute)?;
			child.serialize(stream)?;
		}
		Ok(())
	}

	pub(crate) fn deserialize(stream: &mut DataStream<'_>, depth: u32) -> Result<Self> {
		let name = stream.read::<String>()?;
		if name.is_empty() {
			return Err(TypeError::corrupt(DataKind::Struct, "empty struct name"));
		}

		let count = stream.read_count("attribute")?;
		if count == 0 {
			return Err(TypeError::corrupt(DataKind::Struct, format!("struct {name} has no attributes")));
		}

		let mut attributes = BTreeMap::new();
		for _ in 0..count {
			let attribute = stream.read::<String>()?;
			if attribute.is_empty() {
				return Err(TypeError::corrupt(DataKind::Struct, format!("empty attribute name in struct {name}")));
			}
			let child = DataType::deserialize_at(stream, depth + 1)?;
			match attributes.entry(attribute) {
				Entry::Occupied(slot) => {
					return Err(TypeError::corrupt(
						DataKind::Struct,
						format!("duplicate attribute {} in struct {name}", slot.key()),
					));
				}
				Entry::Vacant(slot) => {
					slot.insert(Arc::new(child));
				}
			}
		}
		Ok(Self { name, attributes })
	}
}

impl PartialEq for StructType {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
			&& self.attributes.len() == other.attributes.len()
			&& self
				.attributes
				.iter()
				.zip(&other.attributes)
				.all(|((lhs_name, lhs), (rhs_name, rhs))| lhs_name == rhs_name && lhs.equals(rhs))
	}
}

impl fmt::Display for StructType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Struct[{}](", self.name)?;
		for (attribute, child) in &self.attributes {
			let child = child.to_string().replace('\n', "\n    ");
			writeln!(f, "    {attribute}={child}")?;
		}
		f.write_str(")")
	}
}
