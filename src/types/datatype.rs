use std::fmt;

use tracing::trace;

use crate::types::visit::EqualsVisitor;
use crate::types::{AtomicType, DataStream, DataTypeVisitor, DataTypeVisitorMut, ListType, Result, StructType, TypeError};

/// Discriminator written ahead of every data type. Extend only by appending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DataKind {
	/// [`AtomicType`].
	Atomic = 0,
	/// [`StructType`].
	Struct = 1,
	/// [`ListType`].
	List = 2,
}

impl DataKind {
	/// Raw discriminator.
	pub fn as_u32(self) -> u32 {
		self as u32
	}

	/// Render kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Atomic => "atomic",
			Self::Struct => "struct",
			Self::List => "list",
		}
	}
}

impl TryFrom<u32> for DataKind {
	type Error = TypeError;

	fn try_from(kind: u32) -> Result<Self> {
		match kind {
			0 => Ok(Self::Atomic),
			1 => Ok(Self::Struct),
			2 => Ok(Self::List),
			_ => Err(TypeError::UnknownKind { kind }),
		}
	}
}

/// One node of a type descriptor tree.
#[derive(Debug, Clone)]
pub enum DataType {
	/// Leaf holding a single value.
	Atomic(AtomicType),
	/// Named composite of named children.
	Struct(StructType),
	/// Homogeneous sequence of values.
	List(ListType),
}

impl DataType {
	/// Name of the node: registered type name, struct name, or `List<elem>`.
	pub fn name(&self) -> String {
		match self {
			Self::Atomic(item) => item.name().to_owned(),
			Self::Struct(item) => item.name().to_owned(),
			Self::List(item) => item.name(),
		}
	}

	/// Kind discriminator.
	pub fn kind(&self) -> DataKind {
		match self {
			Self::Atomic(_) => DataKind::Atomic,
			Self::Struct(_) => DataKind::Struct,
			Self::List(_) => DataKind::List,
		}
	}

	/// Dispatch to the visitor method for this node's kind.
	pub fn accept(&self, visitor: &mut dyn DataTypeVisitor) {
		match self {
			Self::Atomic(item) => visitor.visit_atomic(item),
			Self::Struct(item) => visitor.visit_struct(item),
			Self::List(item) => visitor.visit_list(item),
		}
	}

	/// Dispatch to the mutable visitor method for this node's kind.
	pub fn accept_mut(&mut self, visitor: &mut dyn DataTypeVisitorMut) {
		match self {
			Self::Atomic(item) => visitor.visit_atomic(item),
			Self::Struct(item) => visitor.visit_struct(item),
			Self::List(item) => visitor.visit_list(item),
		}
	}

	/// Structural equality; nodes of different kinds are never equal.
	pub fn equals(&self, other: &DataType) -> bool {
		match self {
			Self::Atomic(item) => EqualsVisitor::new(item).equals(other),
			Self::Struct(item) => EqualsVisitor::new(item).equals(other),
			Self::List(item) => EqualsVisitor::new(item).equals(other),
		}
	}

	/// Borrow as an atomic node.
	pub fn as_atomic(&self) -> Option<&AtomicType> {
		match self {
			Self::Atomic(item) => Some(item),
			_ => None,
		}
	}

	/// Borrow as a struct node.
	pub fn as_struct(&self) -> Option<&StructType> {
		match self {
			Self::Struct(item) => Some(item),
			_ => None,
		}
	}

	/// Borrow as a list node.
	pub fn as_list(&self) -> Option<&ListType> {
		match self {
			Self::List(item) => Some(item),
			_ => None,
		}
	}

	/// Write the kind discriminator followed by the kind payload.
	pub fn serialize(&self, stream: &mut DataStream<'_>) -> Result<()> {
		stream.write(&self.kind().as_u32())?;
		match self {
			Self::Atomic(item) => item.serialize(stream),
			Self::Struct(item) => item.serialize(stream),
			Self::List(item) => item.serialize(stream),
		}
	}

	/// Read a node written by [`DataType::serialize`].
	pub fn deserialize(stream: &mut DataStream<'_>) -> Result<Self> {
		Self::deserialize_at(stream, 0)
	}

	pub(crate) fn deserialize_at(stream: &mut DataStream<'_>, depth: u32) -> Result<Self> {
		let max_depth = stream.options().max_depth;
		if depth >= max_depth {
			return Err(TypeError::DepthExceeded { max_depth });
		}

		let kind = DataKind::try_from(stream.read::<u32>()?)?;
		trace!(kind = kind.as_str(), depth, "decoding data type");
		Ok(match kind {
			DataKind::Atomic => Self::Atomic(AtomicType::deserialize(stream)?),
			DataKind::Struct => Self::Struct(StructType::deserialize(stream, depth)?),
			DataKind::List => Self::List(ListType::deserialize(stream)?),
		})
	}
}

impl PartialEq for DataType {
	fn eq(&self, other: &Self) -> bool {
		self.equals(other)
	}
}

impl fmt::Display for DataType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Atomic(item) => fmt::Display::fmt(item, f),
			Self::Struct(item) => fmt::Display::fmt(item, f),
			Self::List(item) => fmt::Display::fmt(item, f),
		}
	}
}

impl From<AtomicType> for DataType {
	fn from(item: AtomicType) -> Self {
		Self::Atomic(item)
	}
}

impl From<StructType> for DataType {
	fn from(item: StructType) -> Self {
		Self::Struct(item)
	}
}

impl From<ListType> for DataType {
	fn from(item: ListType) -> Self {
		Self::List(item)
	}
}
