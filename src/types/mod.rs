mod atomic;
mod channel;
mod compression;
mod datatype;
mod document;
mod error;
mod hash;
mod list;
mod methods;
mod registry;
mod stream;
mod structure;
mod variant;
mod visit;

/// Leaf data type.
pub use atomic::AtomicType;
/// Byte sink and source implementations.
pub use channel::{ByteChannel, IoChannel, ReadOnly, VecChannel, WriteOnly};
/// Stream file helpers and compression detection.
pub use compression::{Compression, ZSTD_MAGIC, decode_bytes, encode_bytes, read_stream_file, write_stream_file};
/// Data type tree root and kind discriminator.
pub use datatype::{DataKind, DataType};
/// Text document form of a data type tree.
pub use document::DataTypeDocument;
/// Error and result aliases.
pub use error::{ErrorKind, Result, TypeError};
/// Name-derived wire identifier.
pub use hash::TypeHash;
/// Homogeneous list data type.
pub use list::ListType;
/// Per-type behavior contract and scalar implementation.
pub use methods::{ScalarMethods, TextValue, TypeMethods};
/// Type methods registry.
pub use registry::TypeRegistry;
/// Tagged scalar codec and its options.
pub use stream::{DataStream, Endianness, StreamOptions, WireTag, WireValue};
/// Named composite data type.
pub use structure::StructType;
/// Type-erased value holder.
pub use variant::{TypeKey, Variant, VariantValue};
/// Visitor traits and the kind-matched equality dispatcher.
pub use visit::{DataTypeVisitor, DataTypeVisitorMut, EqualsTarget, EqualsVisitor};
