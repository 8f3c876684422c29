use std::any::{Any, TypeId};
use std::fmt;

use crate::types::{Result, TypeError};

/// Value types a [`Variant`] can hold.
///
/// Implementors must be comparable, default constructible, and cloneable; the
/// variant deep-copies on clone. Override [`VariantValue::fmt_value`] to get a
/// readable rendering, otherwise the value prints as `...`.
pub trait VariantValue: Any + Clone + PartialEq + Default + Send + Sync {
	/// Display name of the type.
	fn type_name() -> &'static str {
		std::any::type_name::<Self>()
	}

	/// Write the value for diagnostics.
	fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("...")
	}
}

macro_rules! display_variant_value {
	($($ty:ty => $name:literal),* $(,)?) => {
		$(
			impl VariantValue for $ty {
				fn type_name() -> &'static str {
					$name
				}

				fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
					fmt::Display::fmt(self, f)
				}
			}
		)*
	};
}

display_variant_value! {
	bool => "bool",
	u8 => "u8",
	u16 => "u16",
	u32 => "u32",
	u64 => "u64",
	i8 => "i8",
	i16 => "i16",
	i32 => "i32",
	i64 => "i64",
	f32 => "f32",
	f64 => "f64",
	String => "String",
}

const VOID_NAME: &str = "void";

/// Process-local identity of a value type plus its display name.
///
/// Equality and hashing use the identity only.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
	id: TypeId,
	name: &'static str,
}

impl TypeKey {
	/// Key for `T`.
	pub fn of<T: VariantValue>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: T::type_name(),
		}
	}

	/// Key reported by an empty [`Variant`].
	pub fn void() -> Self {
		Self {
			id: TypeId::of::<()>(),
			name: VOID_NAME,
		}
	}

	/// Process-local type identity.
	pub fn id(self) -> TypeId {
		self.id
	}

	/// Display name.
	pub fn name(self) -> &'static str {
		self.name
	}
}

impl PartialEq for TypeKey {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeKey {}

impl std::hash::Hash for TypeKey {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Display for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

trait Held: Send + Sync {
	fn held_type_id(&self) -> TypeId;
	fn held_type_name(&self) -> &'static str;
	fn clone_box(&self) -> Box<dyn Held>;
	fn equals(&self, other: &dyn Held) -> bool;
	fn output(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
	fn output_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Cell<T>(T);

impl<T: VariantValue> Held for Cell<T> {
	fn held_type_id(&self) -> TypeId {
		TypeId::of::<T>()
	}

	fn held_type_name(&self) -> &'static str {
		T::type_name()
	}

	fn clone_box(&self) -> Box<dyn Held> {
		Box::new(Cell(self.0.clone()))
	}

	fn equals(&self, other: &dyn Held) -> bool {
		other.as_any().downcast_ref::<T>().is_some_and(|value| *value == self.0)
	}

	fn output(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<{}>(", T::type_name())?;
		self.0.fmt_value(f)?;
		f.write_str(")")
	}

	fn output_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt_value(f)
	}

	fn as_any(&self) -> &dyn Any {
		&self.0
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		&mut self.0
	}
}

/// Type-erased holder of zero or one value.
///
/// Once a value is stored its type is fixed: [`Variant::set`] only accepts the
/// held type, and [`Variant::clear`] is the only way back to empty.
#[derive(Default)]
pub struct Variant {
	value: Option<Box<dyn Held>>,
}

impl Variant {
	/// Create a variant holding `value`.
	pub fn new<T: VariantValue>(value: T) -> Self {
		Self {
			value: Some(Box::new(Cell(value))),
		}
	}

	/// Create an empty variant.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Whether no value is held.
	pub fn is_empty(&self) -> bool {
		self.value.is_none()
	}

	/// Drop the held value.
	pub fn clear(&mut self) {
		self.value = None;
	}

	/// Identity of the held type, `()` when empty.
	pub fn type_id(&self) -> TypeId {
		self.value.as_ref().map_or(TypeId::of::<()>(), |value| value.held_type_id())
	}

	/// Display name of the held type, `void` when empty.
	pub fn type_name(&self) -> &'static str {
		self.value.as_ref().map_or(VOID_NAME, |value| value.held_type_name())
	}

	/// Identity and display name of the held type.
	pub fn type_key(&self) -> TypeKey {
		self.value.as_ref().map_or(TypeKey::void(), |value| TypeKey {
			id: value.held_type_id(),
			name: value.held_type_name(),
		})
	}

	/// Whether the held value is a `T`.
	pub fn holds<T: VariantValue>(&self) -> bool {
		self.type_id() == TypeId::of::<T>()
	}

	/// Whether both variants hold the same type (or both are empty).
	pub fn same_type(&self, other: &Variant) -> bool {
		self.type_id() == other.type_id()
	}

	/// Copy out the held value.
	pub fn get<T: VariantValue>(&self) -> Result<T> {
		self.get_ref::<T>().cloned()
	}

	/// Borrow the held value.
	pub fn get_ref<T: VariantValue>(&self) -> Result<&T> {
		let held = self.value.as_ref().ok_or(TypeError::EmptyVariant)?;
		let got = held.held_type_name();
		held.as_any().downcast_ref::<T>().ok_or(TypeError::TypeMismatch {
			expected: T::type_name(),
			got,
		})
	}

	/// Replace the held value with another value of the same type.
	pub fn set<T: VariantValue>(&mut self, value: T) -> Result<()> {
		let held = self.value.as_mut().ok_or(TypeError::EmptyVariant)?;
		let got = held.held_type_name();
		let slot = held.as_any_mut().downcast_mut::<T>().ok_or(TypeError::TypeMismatch {
			expected: T::type_name(),
			got,
		})?;
		*slot = value;
		Ok(())
	}

	/// Render only the held value, without the type name.
	pub fn display_value(&self) -> impl fmt::Display + '_ {
		ValueDisplay(self)
	}
}

struct ValueDisplay<'a>(&'a Variant);

impl fmt::Display for ValueDisplay<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.0.value {
			Some(value) => value.output_value(f),
			None => Ok(()),
		}
	}
}

impl Clone for Variant {
	fn clone(&self) -> Self {
		Self {
			value: self.value.as_ref().map(|value| value.clone_box()),
		}
	}
}

impl PartialEq for Variant {
	fn eq(&self, other: &Self) -> bool {
		match (&self.value, &other.value) {
			(None, None) => true,
			(Some(lhs), Some(rhs)) => lhs.equals(rhs.as_ref()),
			_ => false,
		}
	}
}

impl fmt::Display for Variant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.value {
			Some(value) => value.output(f),
			None => write!(f, "<{VOID_NAME}>()"),
		}
	}
}

impl fmt::Debug for Variant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

#[cfg(test)]
mod tests;
