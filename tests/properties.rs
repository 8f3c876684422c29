#![allow(missing_docs)]

use proptest::prelude::*;
use vartype::types::{
	AtomicType, DataStream, DataType, Endianness, ListType, StreamOptions, StructType, TypeRegistry, Variant, VariantValue, VecChannel,
	WireValue,
};

fn options(big: bool) -> StreamOptions {
	StreamOptions {
		endianness: if big { Endianness::Big } else { Endianness::Little },
		..StreamOptions::default()
	}
}

fn binary_round_trip<T: WireValue>(value: &T, big: bool) -> T {
	let mut channel = VecChannel::new();
	DataStream::new(&mut channel)
		.with_options(options(big))
		.write(value)
		.expect("write succeeds");
	let mut channel = VecChannel::from_bytes(channel.into_bytes());
	let mut stream = DataStream::new(&mut channel).with_options(options(big));
	let back = stream.read::<T>().expect("read succeeds");
	assert_eq!(channel.remaining(), 0);
	back
}

fn text_round_trip<T: VariantValue>(value: T) -> Variant {
	let methods = TypeRegistry::global().get::<T>().expect("type registered");
	let text = methods.to_text(&Variant::new(value)).expect("value held");
	methods.from_text(&text).expect("text parses")
}

fn atomic<T: VariantValue>(value: T) -> DataType {
	DataType::from(AtomicType::of(value).expect("type registered"))
}

fn leaf() -> impl Strategy<Value = DataType> {
	prop_oneof![
		any::<i32>().prop_map(atomic),
		any::<u64>().prop_map(atomic),
		any::<bool>().prop_map(atomic),
		prop::num::f64::NORMAL.prop_map(atomic),
		"[a-z ]{0,12}".prop_map(atomic),
		prop::collection::vec(any::<u16>(), 0..6).prop_map(|values| {
			let mut list = ListType::new(Variant::new(0_u16)).expect("u16 registered");
			for value in values {
				list.push(Variant::new(value)).expect("same type");
			}
			DataType::from(list)
		}),
	]
}

fn tree() -> impl Strategy<Value = DataType> {
	leaf().prop_recursive(4, 32, 4, |inner| {
		("[A-Z][a-z]{0,6}", prop::collection::btree_map("[a-z]{1,6}", inner, 1..4))
			.prop_map(|(name, attributes)| DataType::from(StructType::new(name, attributes).expect("valid struct")))
	})
}

macro_rules! scalar_properties {
	($($name:ident: $ty:ty),* $(,)?) => {
		proptest! {
			$(
				#[test]
				fn $name(value in any::<$ty>(), big in any::<bool>()) {
					prop_assert_eq!(binary_round_trip(&value, big), value);
					prop_assert_eq!(text_round_trip(value), Variant::new(value));
				}
			)*
		}
	};
}

scalar_properties! {
	bool_round_trips: bool,
	u8_round_trips: u8,
	u16_round_trips: u16,
	u32_round_trips: u32,
	u64_round_trips: u64,
	i8_round_trips: i8,
	i16_round_trips: i16,
	i32_round_trips: i32,
	i64_round_trips: i64,
}

proptest! {
	#[test]
	fn finite_floats_round_trip(single in prop::num::f32::NORMAL | prop::num::f32::ZERO, double in prop::num::f64::NORMAL | prop::num::f64::ZERO) {
		prop_assert_eq!(binary_round_trip(&single, false).to_bits(), single.to_bits());
		prop_assert_eq!(binary_round_trip(&double, true).to_bits(), double.to_bits());
		prop_assert_eq!(text_round_trip(single), Variant::new(single));
		prop_assert_eq!(text_round_trip(double), Variant::new(double));
	}

	#[test]
	fn text_round_trips(value in ".{0,24}", big in any::<bool>()) {
		prop_assert_eq!(binary_round_trip(&value, big), value.clone());
		prop_assert_eq!(text_round_trip(value.clone()), Variant::new(value));
	}

	#[test]
	fn data_type_trees_round_trip(item in tree(), big in any::<bool>()) {
		let mut channel = VecChannel::new();
		item.serialize(&mut DataStream::new(&mut channel).with_options(options(big))).expect("serialize succeeds");
		let mut channel = VecChannel::from_bytes(channel.into_bytes());
		let back = DataType::deserialize(&mut DataStream::new(&mut channel).with_options(options(big))).expect("deserialize succeeds");
		prop_assert!(back.equals(&item));
		prop_assert_eq!(back.to_string(), item.to_string());
		prop_assert_eq!(channel.remaining(), 0);
	}
}
