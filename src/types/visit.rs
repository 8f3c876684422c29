use crate::types::{AtomicType, DataType, ListType, StructType};

/// Read-only traversal over [`DataType`] nodes.
///
/// Children of a struct are not visited automatically; call
/// [`DataType::accept`] on them to descend.
pub trait DataTypeVisitor {
	/// Visit an atomic node.
	fn visit_atomic(&mut self, item: &AtomicType);
	/// Visit a struct node.
	fn visit_struct(&mut self, item: &StructType);
	/// Visit a list node.
	fn visit_list(&mut self, item: &ListType);
}

/// Mutating traversal over [`DataType`] nodes.
pub trait DataTypeVisitorMut {
	/// Visit an atomic node.
	fn visit_atomic(&mut self, item: &mut AtomicType);
	/// Visit a struct node.
	fn visit_struct(&mut self, item: &mut StructType);
	/// Visit a list node.
	fn visit_list(&mut self, item: &mut ListType);
}

/// Left-hand side of an [`EqualsVisitor`] comparison.
///
/// Every method reports "not equal"; each node kind overrides only the one
/// matching itself.
pub trait EqualsTarget {
	/// Compare against an atomic node.
	fn equals_atomic(&self, _other: &AtomicType) -> bool {
		false
	}

	/// Compare against a struct node.
	fn equals_struct(&self, _other: &StructType) -> bool {
		false
	}

	/// Compare against a list node.
	fn equals_list(&self, _other: &ListType) -> bool {
		false
	}
}

impl EqualsTarget for AtomicType {
	fn equals_atomic(&self, other: &AtomicType) -> bool {
		self == other
	}
}

impl EqualsTarget for StructType {
	fn equals_struct(&self, other: &StructType) -> bool {
		self == other
	}
}

impl EqualsTarget for ListType {
	fn equals_list(&self, other: &ListType) -> bool {
		self == other
	}
}

/// Compares a node of known kind `K` with any [`DataType`] by visiting it.
pub struct EqualsVisitor<'a, K> {
	lhs: &'a K,
	equal: bool,
}

impl<'a, K: EqualsTarget> EqualsVisitor<'a, K> {
	/// Comparison with `lhs` on the left.
	pub fn new(lhs: &'a K) -> Self {
		Self { lhs, equal: false }
	}

	/// Whether `other` is structurally equal to the left-hand node.
	pub fn equals(mut self, other: &DataType) -> bool {
		other.accept(&mut self);
		self.equal
	}
}

impl<K: EqualsTarget> DataTypeVisitor for EqualsVisitor<'_, K> {
	fn visit_atomic(&mut self, item: &AtomicType) {
		self.equal = self.lhs.equals_atomic(item);
	}

	fn visit_struct(&mut self, item: &StructType) {
		self.equal = self.lhs.equals_struct(item);
	}

	fn visit_list(&mut self, item: &ListType) {
		self.equal = self.lhs.equals_list(item);
	}
}
