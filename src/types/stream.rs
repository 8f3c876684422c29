use crate::types::{ByteChannel, Result, TypeError, TypeRegistry};

/// Byte order used for multi-byte scalars on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
	/// Least significant byte first.
	#[default]
	Little,
	/// Most significant byte first.
	Big,
}

impl Endianness {
	/// Render byte order as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Little => "little",
			Self::Big => "big",
		}
	}
}

/// One-byte tag written ahead of every scalar. Values are fixed; never renumber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireTag {
	/// `bool`, payload restricted to 0 or 1.
	Bool = 0,
	/// `u8`.
	UInt8 = 1,
	/// `u16`.
	UInt16 = 2,
	/// `u32`.
	UInt32 = 3,
	/// `u64`.
	UInt64 = 4,
	/// `i8`.
	Int8 = 5,
	/// `i16`.
	Int16 = 6,
	/// `i32`.
	Int32 = 7,
	/// `i64`.
	Int64 = 8,
	/// IEEE-754 single precision.
	Float32 = 9,
	/// IEEE-754 double precision.
	Float64 = 10,
}

impl WireTag {
	/// Raw tag byte.
	pub fn as_u8(self) -> u8 {
		self as u8
	}
}

/// Runtime limits and byte order for a [`DataStream`].
#[derive(Debug, Clone)]
pub struct StreamOptions {
	/// Wire byte order.
	pub endianness: Endianness,
	/// Maximum accepted text length on read.
	pub max_text_len: usize,
	/// Maximum accepted list element or struct attribute count on read.
	pub max_elements: usize,
	/// Maximum data type nesting depth on read.
	pub max_depth: u32,
}

/// Accepts everything a [`DataStream`] can write: the 32-bit length and
/// count prefixes are the only bounds, and nesting is unbounded.
impl Default for StreamOptions {
	fn default() -> Self {
		Self {
			endianness: Endianness::Little,
			max_text_len: u32::MAX as usize,
			max_elements: u32::MAX as usize,
			max_depth: u32::MAX,
		}
	}
}

impl StreamOptions {
	/// Preset with tight limits for decoding input from unknown sources.
	pub fn untrusted() -> Self {
		Self {
			endianness: Endianness::Little,
			max_text_len: 64 * 1024,
			max_elements: 4096,
			max_depth: 16,
		}
	}
}

/// Tagged, endian-normalized codec over a [`ByteChannel`].
///
/// The stream also carries the [`TypeRegistry`] that data types resolve their
/// value methods through; [`DataStream::new`] uses [`TypeRegistry::global`].
pub struct DataStream<'a> {
	channel: &'a mut dyn ByteChannel,
	registry: &'a TypeRegistry,
	options: StreamOptions,
}

impl<'a> DataStream<'a> {
	/// Create a stream with default options over the global registry.
	pub fn new(channel: &'a mut dyn ByteChannel) -> Self {
		Self {
			channel,
			registry: TypeRegistry::global(),
			options: StreamOptions::default(),
		}
	}

	/// Replace stream options.
	pub fn with_options(mut self, options: StreamOptions) -> Self {
		self.options = options;
		self
	}

	/// Resolve value methods through `registry` instead of the global one.
	pub fn with_registry(mut self, registry: &'a TypeRegistry) -> Self {
		self.registry = registry;
		self
	}

	/// Registry used for value methods.
	pub fn registry(&self) -> &'a TypeRegistry {
		self.registry
	}

	/// Active options.
	pub fn options(&self) -> &StreamOptions {
		&self.options
	}

	/// Wire byte order.
	pub fn endianness(&self) -> Endianness {
		self.options.endianness
	}

	/// Write raw bytes without a tag.
	pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
		self.channel.write(bytes)
	}

	/// Read raw bytes without a tag.
	pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
		self.channel.read(buf)
	}

	/// Encode one value.
	pub fn write<T: WireValue>(&mut self, value: &T) -> Result<()> {
		value.write_to(self)
	}

	/// Decode one value.
	pub fn read<T: WireValue>(&mut self) -> Result<T> {
		T::read_from(self)
	}

	/// Write text as a `u32` length scalar followed by its raw bytes.
	pub fn write_str(&mut self, value: &str) -> Result<()> {
		let len = u32::try_from(value.len()).map_err(|_| TypeError::TextTooLong { len: value.len() })?;
		self.write(&len)?;
		self.write_bytes(value.as_bytes())
	}

	/// Write a collection size as a `u32` scalar.
	pub fn write_count(&mut self, what: &'static str, count: usize) -> Result<()> {
		let count = u32::try_from(count).map_err(|_| TypeError::CountTooLarge { what, count })?;
		self.write(&count)
	}

	/// Read a collection size, bounded by [`StreamOptions::max_elements`].
	pub fn read_count(&mut self, what: &'static str) -> Result<usize> {
		let count = self.read::<u32>()? as usize;
		let max = self.options.max_elements;
		if count > max {
			return Err(TypeError::LimitExceeded { what, count, max });
		}
		Ok(count)
	}

	fn write_tag(&mut self, tag: WireTag) -> Result<()> {
		self.channel.write(&[tag.as_u8()])
	}

	fn expect_tag(&mut self, expected: WireTag) -> Result<()> {
		let mut got = [0_u8; 1];
		self.channel.read(&mut got)?;
		if got[0] != expected.as_u8() {
			return Err(TypeError::TagMismatch { expected, got: got[0] });
		}
		Ok(())
	}
}

/// Values with a wire encoding on a [`DataStream`].
pub trait WireValue: Sized {
	/// Encode `self`.
	fn write_to(&self, stream: &mut DataStream<'_>) -> Result<()>;

	/// Decode a value.
	fn read_from(stream: &mut DataStream<'_>) -> Result<Self>;
}

macro_rules! scalar_wire_value {
	($($ty:ty => $tag:ident),* $(,)?) => {
		$(
			impl WireValue for $ty {
				fn write_to(&self, stream: &mut DataStream<'_>) -> Result<()> {
					stream.write_tag(WireTag::$tag)?;
					let bytes = match stream.endianness() {
						Endianness::Little => self.to_le_bytes(),
						Endianness::Big => self.to_be_bytes(),
					};
					stream.write_bytes(&bytes)
				}

				fn read_from(stream: &mut DataStream<'_>) -> Result<Self> {
					stream.expect_tag(WireTag::$tag)?;
					let mut buf = [0_u8; std::mem::size_of::<$ty>()];
					stream.read_bytes(&mut buf)?;
					Ok(match stream.endianness() {
						Endianness::Little => <$ty>::from_le_bytes(buf),
						Endianness::Big => <$ty>::from_be_bytes(buf),
					})
				}
			}
		)*
	};
}

scalar_wire_value! {
	u8 => UInt8,
	u16 => UInt16,
	u32 => UInt32,
	u64 => UInt64,
	i8 => Int8,
	i16 => Int16,
	i32 => Int32,
	i64 => Int64,
	f32 => Float32,
	f64 => Float64,
}

impl WireValue for bool {
	fn write_to(&self, stream: &mut DataStream<'_>) -> Result<()> {
		stream.write_tag(WireTag::Bool)?;
		stream.write_bytes(&[u8::from(*self)])
	}

	fn read_from(stream: &mut DataStream<'_>) -> Result<Self> {
		stream.expect_tag(WireTag::Bool)?;
		let mut buf = [0_u8; 1];
		stream.read_bytes(&mut buf)?;
		match buf[0] {
			0 => Ok(false),
			1 => Ok(true),
			byte => Err(TypeError::InvalidBool { byte }),
		}
	}
}

impl WireValue for String {
	fn write_to(&self, stream: &mut DataStream<'_>) -> Result<()> {
		stream.write_str(self)
	}

	fn read_from(stream: &mut DataStream<'_>) -> Result<Self> {
		let len = stream.read::<u32>()? as usize;
		let max = stream.options().max_text_len;
		if len > max {
			return Err(TypeError::LimitExceeded { what: "text", count: len, max });
		}

		let mut buf = vec![0_u8; len];
		stream.read_bytes(&mut buf)?;
		String::from_utf8(buf).map_err(|_| TypeError::InvalidUtf8)
	}
}
