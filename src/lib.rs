//! Type-erased values and self-describing data type trees with a tagged,
//! endian-normalized binary codec.

/// Variants, the type methods registry, data type trees, and the stream codec.
pub mod types;
