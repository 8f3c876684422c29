use thiserror::Error;

use crate::types::{DataKind, TypeHash, WireTag};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, TypeError>;

/// Coarse classification of every [`TypeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// The caller supplied a value, name, or index that violates a precondition.
	InvalidArgument,
	/// Internal consistency is broken: corrupt stream, empty variant, registry clash.
	InvariantFailed,
}

impl ErrorKind {
	/// Render the kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::InvalidArgument => "invalid_argument",
			Self::InvariantFailed => "invariant_failed",
		}
	}
}

/// Errors produced while building, encoding, and decoding typed values.
#[derive(Debug, Error)]
pub enum TypeError {
	/// Channel or filesystem IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Document text was not valid JSON for the expected shape.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Value access on a variant that holds nothing.
	#[error("cannot access empty variant")]
	EmptyVariant,
	/// Held type differs from the requested type.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Type the operation required.
		expected: &'static str,
		/// Type that was actually present.
		got: &'static str,
	},
	/// No methods are registered for a value type.
	#[error("no type methods registered for {type_name}")]
	UnregisteredType {
		/// Display name of the unregistered type.
		type_name: &'static str,
	},
	/// No methods are registered under a wire identifier.
	#[error("no type methods registered for hash {hash}")]
	UnknownHash {
		/// Wire identifier read or requested.
		hash: TypeHash,
	},
	/// No methods are registered under a type name.
	#[error("no type methods registered under name {name:?}")]
	UnknownTypeName {
		/// Requested registered name.
		name: String,
	},
	/// Value type is already present in the registry.
	#[error("type {type_name} is already registered")]
	AlreadyRegistered {
		/// Display name of the duplicate type.
		type_name: &'static str,
	},
	/// Two registered names derive the same wire identifier.
	#[error("hash collision on {hash}: {name:?} clashes with registered {existing:?}")]
	HashCollision {
		/// Colliding wire identifier.
		hash: TypeHash,
		/// Name being inserted.
		name: String,
		/// Name already holding the identifier.
		existing: String,
	},
	/// Methods reported an empty registered name.
	#[error("type methods for {type_name} report an empty name")]
	EmptyTypeName {
		/// Display name of the offending type.
		type_name: &'static str,
	},
	/// Text could not be converted to a value of the requested type.
	#[error("failed to convert {text:?} to {type_name}")]
	ParseValue {
		/// Input text.
		text: String,
		/// Registered name of the target type.
		type_name: String,
	},
	/// Struct name was empty.
	#[error("struct name must not be empty")]
	EmptyStructName,
	/// Struct was built without any attribute.
	#[error("struct {name} has no attributes")]
	NoAttributes {
		/// Struct name.
		name: String,
	},
	/// Attribute name was empty.
	#[error("attribute name must not be empty in struct {struct_name}")]
	EmptyAttributeName {
		/// Owning struct name.
		struct_name: String,
	},
	/// Attribute name occurs more than once.
	#[error("duplicate attribute {attribute} in struct {struct_name}")]
	DuplicateAttribute {
		/// Owning struct name.
		struct_name: String,
		/// Repeated attribute name.
		attribute: String,
	},
	/// Requested attribute does not exist.
	#[error("no attribute called {attribute:?} in struct {struct_name}")]
	UnknownAttribute {
		/// Owning struct name.
		struct_name: String,
		/// Requested attribute name.
		attribute: String,
	},
	/// List was built from no values, leaving no element type.
	#[error("list needs at least one value to fix its element type")]
	NoListValues,
	/// List index outside of `0..len`.
	#[error("list index {index} out of range (len={len})")]
	IndexOutOfRange {
		/// Requested index.
		index: usize,
		/// Current list length.
		len: usize,
	},
	/// Text is too long for its 32-bit length prefix.
	#[error("text of {len} bytes exceeds the 32-bit length limit")]
	TextTooLong {
		/// Text length in bytes.
		len: usize,
	},
	/// Collection is too large for its 32-bit count prefix.
	#[error("{what} count {count} exceeds the 32-bit limit")]
	CountTooLarge {
		/// Logical collection being written.
		what: &'static str,
		/// Element count.
		count: usize,
	},
	/// Scalar tag byte did not match the expected wire type.
	#[error("invalid stream: expected tag {expected:?}, got {got}")]
	TagMismatch {
		/// Tag for the scalar being read.
		expected: WireTag,
		/// Raw tag byte found in the stream.
		got: u8,
	},
	/// Boolean payload byte was neither 0 nor 1.
	#[error("invalid stream: boolean byte {byte} is neither 0 nor 1")]
	InvalidBool {
		/// Raw payload byte.
		byte: u8,
	},
	/// Text payload was not valid UTF-8.
	#[error("invalid stream: text payload is not valid utf-8")]
	InvalidUtf8,
	/// Kind discriminator is not one of the known data type kinds.
	#[error("no data type with kind discriminator {kind}")]
	UnknownKind {
		/// Raw discriminator value.
		kind: u32,
	},
	/// Decoded data violates a structural rule of its kind.
	#[error("corrupt {kind:?} stream: {reason}")]
	CorruptStream {
		/// Kind whose payload was being decoded.
		kind: DataKind,
		/// Human-readable description of the violation.
		reason: String,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Read offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Decoded length or count exceeded the configured stream limit.
	#[error("decode {what} too large: count={count}, max={max}")]
	LimitExceeded {
		/// Logical quantity being decoded.
		what: &'static str,
		/// Decoded value.
		count: usize,
		/// Configured maximum.
		max: usize,
	},
	/// Nested data types exceeded the configured depth.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Decompression output exceeded the configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
}

impl TypeError {
	/// Classify this error as an argument or invariant failure.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Json(_)
			| Self::TypeMismatch { .. }
			| Self::UnregisteredType { .. }
			| Self::UnknownHash { .. }
			| Self::UnknownTypeName { .. }
			| Self::AlreadyRegistered { .. }
			| Self::EmptyTypeName { .. }
			| Self::ParseValue { .. }
			| Self::EmptyStructName
			| Self::NoAttributes { .. }
			| Self::EmptyAttributeName { .. }
			| Self::DuplicateAttribute { .. }
			| Self::UnknownAttribute { .. }
			| Self::NoListValues
			| Self::IndexOutOfRange { .. }
			| Self::TextTooLong { .. } => ErrorKind::InvalidArgument,
			Self::Io(_)
			| Self::EmptyVariant
			| Self::HashCollision { .. }
			| Self::CountTooLarge { .. }
			| Self::TagMismatch { .. }
			| Self::InvalidBool { .. }
			| Self::InvalidUtf8
			| Self::UnknownKind { .. }
			| Self::CorruptStream { .. }
			| Self::UnexpectedEof { .. }
			| Self::LimitExceeded { .. }
			| Self::DepthExceeded { .. }
			| Self::DecompressedTooLarge { .. } => ErrorKind::InvariantFailed,
		}
	}

	/// Whether this is an [`ErrorKind::InvalidArgument`] failure.
	pub fn is_invalid_argument(&self) -> bool {
		self.kind() == ErrorKind::InvalidArgument
	}

	/// Whether this is an [`ErrorKind::InvariantFailed`] failure.
	pub fn is_invariant_failed(&self) -> bool {
		self.kind() == ErrorKind::InvariantFailed
	}

	pub(crate) fn corrupt(kind: DataKind, reason: impl Into<String>) -> Self {
		Self::CorruptStream { kind, reason: reason.into() }
	}
}
