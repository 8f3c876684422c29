use std::marker::PhantomData;

use crate::types::{DataStream, Result, TypeError, Variant, VariantValue, WireValue};

/// Behavior registered for one value type.
///
/// [`TypeMethods::name`] feeds the wire identifier, so it must be a fixed
/// string chosen by the implementor, never something derived from compiler
/// type metadata.
pub trait TypeMethods: Send + Sync {
	/// Registered name of the type.
	fn name(&self) -> &str;

	/// Default-constructed value.
	fn create(&self) -> Variant;

	/// Render a value as text.
	fn to_text(&self, value: &Variant) -> Result<String>;

	/// Parse a value from text.
	fn from_text(&self, text: &str) -> Result<Variant>;

	/// Write a value to `stream`.
	fn serialize(&self, stream: &mut DataStream<'_>, value: &Variant) -> Result<()>;

	/// Read a value from `stream`.
	fn deserialize(&self, stream: &mut DataStream<'_>) -> Result<Variant>;
}

/// Text conversion used by [`ScalarMethods`].
pub trait TextValue: Sized {
	/// Render as text.
	fn to_text(&self) -> String;

	/// Parse from text, `None` when malformed or out of range.
	fn parse_text(text: &str) -> Option<Self>;
}

macro_rules! numeric_text_value {
	($($ty:ty),* $(,)?) => {
		$(
			impl TextValue for $ty {
				fn to_text(&self) -> String {
					self.to_string()
				}

				fn parse_text(text: &str) -> Option<Self> {
					text.parse::<$ty>().ok()
				}
			}
		)*
	};
}

numeric_text_value!(u8, u16, u32, u64, i8, i16, i32, i64);

macro_rules! float_text_value {
	($($ty:ty),* $(,)?) => {
		$(
			impl TextValue for $ty {
				fn to_text(&self) -> String {
					self.to_string()
				}

				fn parse_text(text: &str) -> Option<Self> {
					let value = text.parse::<$ty>().ok()?;
					if value.is_finite() || names_non_finite(text) {
						return Some(value);
					}
					None
				}
			}
		)*
	};
}

float_text_value!(f32, f64);

/// Whether `text` spells infinity or NaN rather than overflowing to it.
fn names_non_finite(text: &str) -> bool {
	let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
	["inf", "infinity", "nan"].iter().any(|name| unsigned.eq_ignore_ascii_case(name))
}

impl TextValue for bool {
	fn to_text(&self) -> String {
		String::from(if *self { "true" } else { "false" })
	}

	fn parse_text(text: &str) -> Option<Self> {
		match text {
			"true" => Some(true),
			"false" => Some(false),
			_ => None,
		}
	}
}

impl TextValue for String {
	fn to_text(&self) -> String {
		self.clone()
	}

	fn parse_text(text: &str) -> Option<Self> {
		Some(text.to_owned())
	}
}

/// [`TypeMethods`] for any type with wire and text encodings.
pub struct ScalarMethods<T> {
	name: String,
	_marker: PhantomData<fn() -> T>,
}

impl<T> ScalarMethods<T> {
	/// Methods registered under `name`.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			_marker: PhantomData,
		}
	}
}

impl<T: VariantValue + WireValue + TextValue> TypeMethods for ScalarMethods<T> {
	fn name(&self) -> &str {
		&self.name
	}

	fn create(&self) -> Variant {
		Variant::new(T::default())
	}

	fn to_text(&self, value: &Variant) -> Result<String> {
		Ok(value.get_ref::<T>()?.to_text())
	}

	fn from_text(&self, text: &str) -> Result<Variant> {
		T::parse_text(text).map(Variant::new).ok_or_else(|| TypeError::ParseValue {
			text: text.to_owned(),
			type_name: self.name.clone(),
		})
	}

	fn serialize(&self, stream: &mut DataStream<'_>, value: &Variant) -> Result<()> {
		stream.write(value.get_ref::<T>()?)
	}

	fn deserialize(&self, stream: &mut DataStream<'_>) -> Result<Variant> {
		stream.read::<T>().map(Variant::new)
	}
}

/// Methods registered into every registry built with [`TypeRegistry::new`](crate::types::TypeRegistry::new).
pub(crate) fn builtin_methods() -> Vec<Box<dyn TypeMethods>> {
	vec![
		Box::new(ScalarMethods::<bool>::new("bool")),
		Box::new(ScalarMethods::<u8>::new("uint8")),
		Box::new(ScalarMethods::<u16>::new("uint16")),
		Box::new(ScalarMethods::<u32>::new("uint32")),
		Box::new(ScalarMethods::<u64>::new("uint64")),
		Box::new(ScalarMethods::<i8>::new("sint8")),
		Box::new(ScalarMethods::<i16>::new("sint16")),
		Box::new(ScalarMethods::<i32>::new("sint32")),
		Box::new(ScalarMethods::<i64>::new("sint64")),
		Box::new(ScalarMethods::<f32>::new("float")),
		Box::new(ScalarMethods::<f64>::new("double")),
		Box::new(ScalarMethods::<String>::new("string")),
	]
}
