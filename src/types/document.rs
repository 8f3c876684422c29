use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{AtomicType, DataType, ListType, Result, StructType, TypeRegistry};

/// Text form of a [`DataType`] tree.
///
/// Values are stored as the text produced by the registered
/// [`TypeMethods::to_text`](crate::types::TypeMethods::to_text) of their type,
/// and types are referred to by registered name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataTypeDocument {
	/// Single value.
	Atomic {
		/// Registered type name.
		#[serde(rename = "type")]
		type_name: String,
		/// Value text.
		value: String,
	},
	/// Named composite.
	Struct {
		/// Struct name.
		name: String,
		/// Children by attribute name.
		attributes: BTreeMap<String, DataTypeDocument>,
	},
	/// Homogeneous sequence.
	List {
		/// Registered element type name.
		#[serde(rename = "type")]
		type_name: String,
		/// Element texts in order.
		#[serde(default)]
		values: Vec<String>,
	},
}

impl DataTypeDocument {
	/// Render `item` using the text methods registered in `registry`.
	pub fn from_data_type(item: &DataType, registry: &TypeRegistry) -> Result<Self> {
		Ok(match item {
			DataType::Atomic(atomic) => {
				let methods = registry.get_key(atomic.get().type_key())?;
				Self::Atomic {
					type_name: methods.name().to_owned(),
					value: methods.to_text(atomic.get())?,
				}
			}
			DataType::Struct(structure) => {
				let mut attributes = BTreeMap::new();
				for (attribute, child) in structure.iter() {
					attributes.insert(attribute.to_owned(), Self::from_data_type(child, registry)?);
				}
				Self::Struct {
					name: structure.name().to_owned(),
					attributes,
				}
			}
			DataType::List(list) => {
				let methods = registry.get_key(list.prototype().type_key())?;
				let values = list
					.values()
					.iter()
					.map(|value| methods.to_text(value))
					.collect::<Result<Vec<_>>>()?;
				Self::List {
					type_name: methods.name().to_owned(),
					values,
				}
			}
		})
	}

	/// Build the data type tree, parsing values with the methods in `registry`.
	pub fn to_data_type(&self, registry: &TypeRegistry) -> Result<DataType> {
		Ok(match self {
			Self::Atomic { type_name, value } => {
				let methods = registry.get_by_name(type_name)?;
				DataType::Atomic(AtomicType::new_in(registry, methods.from_text(value)?)?)
			}
			Self::Struct { name, attributes } => {
				let children = attributes
					.iter()
					.map(|(attribute, child)| -> Result<(String, DataType)> { Ok((attribute.clone(), child.to_data_type(registry)?)) })
					.collect::<Result<Vec<_>>>()?;
				DataType::Struct(StructType::new(name.clone(), children)?)
			}
			Self::List { type_name, values } => {
				let methods = registry.get_by_name(type_name)?;
				let mut list = ListType::new_in(registry, methods.create())?;
				for value in values {
					list.push(methods.from_text(value)?)?;
				}
				DataType::List(list)
			}
		})
	}

	/// Pretty-printed JSON text.
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	/// Parse JSON text.
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}
}
