use std::any::TypeId;

use crate::types::{ErrorKind, Variant, VariantValue};

#[derive(Debug, Clone, Default, PartialEq)]
struct Opaque {
	id: u32,
}

impl VariantValue for Opaque {}

#[test]
fn empty_variant_reports_void() {
	let value = Variant::empty();
	assert!(value.is_empty());
	assert_eq!(value.type_id(), TypeId::of::<()>());
	assert_eq!(value.type_name(), "void");
	assert_eq!(value.to_string(), "<void>()");
}

#[test]
fn get_returns_held_value() {
	let value = Variant::new(10_i32);
	assert!(!value.is_empty());
	assert!(value.holds::<i32>());
	assert_eq!(value.get::<i32>().expect("i32 held"), 10);
	assert_eq!(value.type_name(), "i32");
}

#[test]
fn get_on_empty_is_invariant_failure() {
	let value = Variant::empty();
	let err = value.get::<i32>().expect_err("empty variant must fail");
	assert_eq!(err.kind(), ErrorKind::InvariantFailed);
}

#[test]
fn get_with_wrong_type_is_invalid_argument() {
	let value = Variant::new(10_i32);
	let err = value.get::<f64>().expect_err("type mismatch must fail");
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);
	assert_eq!(err.to_string(), "type mismatch: expected f64, got i32");
}

#[test]
fn set_replaces_same_type_only() {
	let mut value = Variant::new(String::from("a"));
	value.set(String::from("b")).expect("same type set");
	assert_eq!(value.get::<String>().expect("string held"), "b");

	let err = value.set(1_u8).expect_err("different type set must fail");
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);
	assert_eq!(value.get::<String>().expect("value kept"), "b");

	let mut empty = Variant::empty();
	let err = empty.set(1_u8).expect_err("set on empty must fail");
	assert_eq!(err.kind(), ErrorKind::InvariantFailed);
}

#[test]
fn clear_empties_variant() {
	let mut value = Variant::new(true);
	value.clear();
	assert!(value.is_empty());
	assert_eq!(value, Variant::empty());
}

#[test]
fn clone_is_deep() {
	let original = Variant::new(String::from("left"));
	let mut copy = original.clone();
	copy.set(String::from("right")).expect("same type set");
	assert_eq!(original.get::<String>().expect("string held"), "left");
	assert_eq!(copy.get::<String>().expect("string held"), "right");
}

#[test]
fn equality_rules() {
	assert_eq!(Variant::empty(), Variant::empty());
	assert_ne!(Variant::empty(), Variant::new(0_i32));
	assert_ne!(Variant::new(0_i32), Variant::empty());
	assert_eq!(Variant::new(7_u16), Variant::new(7_u16));
	assert_ne!(Variant::new(7_u16), Variant::new(8_u16));
	assert_ne!(Variant::new(7_u16), Variant::new(7_u32));
	assert_ne!(Variant::new(1.0_f32), Variant::new(1.0_f64));
}

#[test]
fn printing_uses_value_rendering_when_available() {
	assert_eq!(Variant::new(10_i32).to_string(), "<i32>(10)");
	assert_eq!(Variant::new(String::from("hi")).to_string(), "<String>(hi)");
	assert_eq!(Variant::new(false).to_string(), "<bool>(false)");
}

#[test]
fn printing_opaque_value_elides_content() {
	let value = Variant::new(Opaque { id: 3 });
	let rendered = value.to_string();
	assert!(rendered.ends_with(">(...)"), "unexpected rendering {rendered}");
	assert_eq!(value.get_ref::<Opaque>().expect("opaque held").id, 3);
}

#[test]
fn display_value_omits_type_name() {
	assert_eq!(Variant::new(2.5_f64).display_value().to_string(), "2.5");
	assert_eq!(Variant::empty().display_value().to_string(), "");
}
