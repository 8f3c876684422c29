use std::fmt;

use md5::{Digest, Md5};

use crate::types::{DataStream, Result, WireValue};

/// Wire identifier of a registered value type.
///
/// Derived only from the registered name, so every process that registers a
/// type under the same name agrees on its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeHash(u64);

impl TypeHash {
	/// First eight bytes of `MD5(name)`, little-endian.
	pub fn of_name(name: &str) -> Self {
		let mut hasher = Md5::new();
		hasher.update(name.as_bytes());
		let digest = hasher.finalize();
		let mut bytes = [0_u8; 8];
		bytes.copy_from_slice(&digest[..8]);
		Self(u64::from_le_bytes(bytes))
	}

	/// Wrap a raw identifier.
	pub const fn from_value(value: u64) -> Self {
		Self(value)
	}

	/// Raw identifier.
	pub const fn value(self) -> u64 {
		self.0
	}
}

impl fmt::Display for TypeHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{:016x}", self.0)
	}
}

impl WireValue for TypeHash {
	fn write_to(&self, stream: &mut DataStream<'_>) -> Result<()> {
		stream.write(&self.0)
	}

	fn read_from(stream: &mut DataStream<'_>) -> Result<Self> {
		stream.read::<u64>().map(Self)
	}
}
