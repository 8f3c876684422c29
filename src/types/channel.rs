use std::io::{Read, Write};

use crate::types::{Result, TypeError};

/// Raw byte sink and source behind a [`DataStream`](crate::types::DataStream).
///
/// Writes append every byte or fail; reads fill the whole buffer from the current
/// position or fail without partial progress.
pub trait ByteChannel {
	/// Append `bytes`.
	fn write(&mut self, bytes: &[u8]) -> Result<()>;

	/// Fill `buf` completely.
	fn read(&mut self, buf: &mut [u8]) -> Result<()>;
}

impl<C: ByteChannel + ?Sized> ByteChannel for &mut C {
	fn write(&mut self, bytes: &[u8]) -> Result<()> {
		(**self).write(bytes)
	}

	fn read(&mut self, buf: &mut [u8]) -> Result<()> {
		(**self).read(buf)
	}
}

/// In-memory channel with an independent read cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VecChannel {
	bytes: Vec<u8>,
	pos: usize,
}

impl VecChannel {
	/// Create an empty channel.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a channel that reads `bytes` from position 0.
	pub fn from_bytes(bytes: Vec<u8>) -> Self {
		Self { bytes, pos: 0 }
	}

	/// All bytes written so far.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Consume the channel and return its buffer.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}

	/// Current read offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Bytes not yet read.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}
}

impl ByteChannel for VecChannel {
	fn write(&mut self, bytes: &[u8]) -> Result<()> {
		self.bytes.extend_from_slice(bytes);
		Ok(())
	}

	fn read(&mut self, buf: &mut [u8]) -> Result<()> {
		let need = buf.len();
		if need > self.remaining() {
			return Err(TypeError::UnexpectedEof {
				at: self.pos,
				need,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += need;
		buf.copy_from_slice(&self.bytes[start..self.pos]);
		Ok(())
	}
}

/// Channel over any `std::io` reader or writer.
///
/// Only the direction the inner value supports is usable; the other one fails
/// with an unsupported IO error.
#[derive(Debug)]
pub struct IoChannel<T> {
	inner: T,
}

impl<T> IoChannel<T> {
	/// Wrap an IO value.
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Return the wrapped IO value.
	pub fn into_inner(self) -> T {
		self.inner
	}
}

impl<R: Read> IoChannel<ReadOnly<R>> {
	/// Wrap a reader.
	pub fn reader(inner: R) -> Self {
		Self::new(ReadOnly(inner))
	}
}

impl<W: Write> IoChannel<WriteOnly<W>> {
	/// Wrap a writer.
	pub fn writer(inner: W) -> Self {
		Self::new(WriteOnly(inner))
	}
}

/// Marker wrapper for a read-only [`IoChannel`].
#[derive(Debug)]
pub struct ReadOnly<R>(pub R);

/// Marker wrapper for a write-only [`IoChannel`].
#[derive(Debug)]
pub struct WriteOnly<W>(pub W);

impl<R: Read> ByteChannel for IoChannel<ReadOnly<R>> {
	fn write(&mut self, _bytes: &[u8]) -> Result<()> {
		Err(unsupported("write"))
	}

	fn read(&mut self, buf: &mut [u8]) -> Result<()> {
		self.inner.0.read_exact(buf)?;
		Ok(())
	}
}

impl<W: Write> ByteChannel for IoChannel<WriteOnly<W>> {
	fn write(&mut self, bytes: &[u8]) -> Result<()> {
		self.inner.0.write_all(bytes)?;
		Ok(())
	}

	fn read(&mut self, _buf: &mut [u8]) -> Result<()> {
		Err(unsupported("read"))
	}
}

fn unsupported(op: &str) -> TypeError {
	TypeError::Io(std::io::Error::new(
		std::io::ErrorKind::Unsupported,
		format!("{op} is not supported by this channel"),
	))
}

#[cfg(test)]
mod tests {
	use super::{ByteChannel, IoChannel, VecChannel};
	use crate::types::TypeError;

	#[test]
	fn vec_channel_reads_back_written_bytes() {
		let mut channel = VecChannel::new();
		channel.write(&[1, 2, 3]).expect("write succeeds");
		channel.write(&[4]).expect("write succeeds");

		let mut head = [0_u8; 3];
		channel.read(&mut head).expect("read succeeds");
		assert_eq!(head, [1, 2, 3]);
		assert_eq!(channel.pos(), 3);
		assert_eq!(channel.remaining(), 1);
	}

	#[test]
	fn vec_channel_rejects_reads_past_end_without_consuming() {
		let mut channel = VecChannel::from_bytes(vec![9, 9]);
		let mut buf = [0_u8; 3];
		let err = channel.read(&mut buf).expect_err("short read must fail");
		assert!(matches!(err, TypeError::UnexpectedEof { at: 0, need: 3, rem: 2 }));
		assert_eq!(channel.pos(), 0);
	}

	#[test]
	fn io_channel_round_trips_through_std_io() {
		let mut writer = IoChannel::writer(Vec::new());
		writer.write(b"abc").expect("write succeeds");
		let bytes = writer.into_inner().0;

		let mut reader = IoChannel::reader(bytes.as_slice());
		let mut buf = [0_u8; 3];
		reader.read(&mut buf).expect("read succeeds");
		assert_eq!(&buf, b"abc");
		assert!(reader.read(&mut buf).is_err(), "reader is exhausted");
		assert!(reader.write(b"x").is_err(), "reader cannot write");
	}
}
