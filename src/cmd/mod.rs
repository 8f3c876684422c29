/// Stream file encoding from a JSON document.
pub mod encode;
/// Wire identifier command.
pub mod hash;
/// Stream file decoding and display.
pub mod inspect;
/// Registered type listing command.
pub mod types;
/// Shared command helpers.
pub(crate) mod util;
