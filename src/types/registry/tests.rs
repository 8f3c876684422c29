use std::sync::Arc;

use crate::types::{
	DataStream, ErrorKind, Result, ScalarMethods, TypeError, TypeHash, TypeKey, TypeMethods, TypeRegistry, Variant, VariantValue,
};

#[derive(Debug, Clone, Default, PartialEq)]
struct Celsius(f64);

impl VariantValue for Celsius {}

#[derive(Debug, Clone, Default, PartialEq)]
struct Fahrenheit(f64);

impl VariantValue for Fahrenheit {}

#[derive(Debug, Clone, Default, PartialEq)]
struct Unregistered;

impl VariantValue for Unregistered {}

struct TemperatureMethods<T> {
	name: &'static str,
	make: fn(f64) -> T,
	read: fn(&T) -> f64,
}

impl<T: VariantValue> TypeMethods for TemperatureMethods<T> {
	fn name(&self) -> &str {
		self.name
	}

	fn create(&self) -> Variant {
		Variant::new(T::default())
	}

	fn to_text(&self, value: &Variant) -> Result<String> {
		Ok((self.read)(value.get_ref::<T>()?).to_string())
	}

	fn from_text(&self, text: &str) -> Result<Variant> {
		let degrees = text.parse::<f64>().map_err(|_| TypeError::ParseValue {
			text: text.to_owned(),
			type_name: self.name.to_owned(),
		})?;
		Ok(Variant::new((self.make)(degrees)))
	}

	fn serialize(&self, stream: &mut DataStream<'_>, value: &Variant) -> Result<()> {
		stream.write(&(self.read)(value.get_ref::<T>()?))
	}

	fn deserialize(&self, stream: &mut DataStream<'_>) -> Result<Variant> {
		Ok(Variant::new((self.make)(stream.read::<f64>()?)))
	}
}

fn celsius(name: &'static str) -> TemperatureMethods<Celsius> {
	TemperatureMethods {
		name,
		make: Celsius,
		read: |value| value.0,
	}
}

fn fahrenheit(name: &'static str) -> TemperatureMethods<Fahrenheit> {
	TemperatureMethods {
		name,
		make: Fahrenheit,
		read: |value| value.0,
	}
}

#[test]
fn builtins_are_registered_on_creation() {
	let registry = TypeRegistry::new();
	assert_eq!(registry.len(), 12);
	assert!(registry.has::<bool>());
	assert!(registry.has::<u8>());
	assert!(registry.has::<u64>());
	assert!(registry.has::<i8>());
	assert!(registry.has::<i64>());
	assert!(registry.has::<f32>());
	assert!(registry.has::<f64>());
	assert!(registry.has::<String>());
	assert!(!registry.has::<Unregistered>());

	let names: Vec<String> = registry.registered_names().into_iter().map(|(name, _)| name).collect();
	assert_eq!(
		names,
		["bool", "double", "float", "sint16", "sint32", "sint64", "sint8", "string", "uint16", "uint32", "uint64", "uint8"]
	);
}

#[test]
fn empty_registry_has_nothing() {
	let registry = TypeRegistry::empty();
	assert!(registry.is_empty());
	assert!(registry.registered_types().is_empty());
	let err = registry.get::<i32>().err().expect("nothing registered");
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn hash_is_derived_from_registered_name() {
	let registry = TypeRegistry::new();
	let int_hash = registry.calculate_hash::<i32>().expect("i32 registered");
	let double_hash = registry.calculate_hash::<f64>().expect("f64 registered");
	assert_ne!(int_hash, double_hash);
	assert_eq!(int_hash, TypeHash::of_name("sint32"));
	assert_eq!(TypeRegistry::hash_name("double"), double_hash);
}

#[test]
fn insert_get_and_remove_user_type() {
	let registry = TypeRegistry::new();
	let hash = registry.insert(celsius("celsius")).expect("insert succeeds");
	assert_eq!(hash, TypeHash::of_name("celsius"));
	assert!(registry.has::<Celsius>());
	assert!(registry.has_key(TypeKey::of::<Celsius>()));

	let by_type = registry.get::<Celsius>().expect("lookup by type");
	let by_hash = registry.get_by_hash(hash).expect("lookup by hash");
	let by_name = registry.get_by_name("celsius").expect("lookup by name");
	assert!(Arc::ptr_eq(&by_type, &by_hash));
	assert!(Arc::ptr_eq(&by_type, &by_name));
	assert_eq!(by_type.from_text("21.5").expect("parses"), Variant::new(Celsius(21.5)));

	registry.remove::<Celsius>().expect("remove succeeds");
	assert!(!registry.has::<Celsius>());
	assert!(registry.get_by_hash(hash).is_err());
	let err = registry.remove::<Celsius>().expect_err("second remove fails");
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn duplicate_type_is_rejected() {
	let registry = TypeRegistry::new();
	let err = registry
		.insert(ScalarMethods::<u32>::new("another_uint32"))
		.expect_err("u32 already registered");
	assert!(matches!(err, TypeError::AlreadyRegistered { .. }));
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);
	assert!(registry.get_by_name("another_uint32").is_err());
}

#[test]
fn hash_collision_rolls_back_completely() {
	let registry = TypeRegistry::new();
	registry.insert(celsius("temperature")).expect("first insert succeeds");
	let mut before = registry.registered_names();
	let before_types = registry.len();

	let err = registry.insert(fahrenheit("temperature")).expect_err("same name collides");
	assert!(matches!(err, TypeError::HashCollision { ref existing, .. } if existing == "temperature"));
	assert_eq!(err.kind(), ErrorKind::InvariantFailed);

	assert!(!registry.has::<Fahrenheit>());
	assert_eq!(registry.len(), before_types);
	let mut after = registry.registered_names();
	before.sort();
	after.sort();
	assert_eq!(before, after);

	// The original owner of the hash is still intact.
	let owner = registry.get_by_hash(TypeHash::of_name("temperature")).expect("owner kept");
	assert_eq!(owner.create(), Variant::new(Celsius::default()));

	// And the rejected type can be registered under a distinct name afterwards.
	registry.insert(fahrenheit("fahrenheit")).expect("distinct name succeeds");
}

#[test]
fn empty_name_is_rejected() {
	let registry = TypeRegistry::empty();
	let err = registry.insert(celsius("")).expect_err("empty name fails");
	assert!(matches!(err, TypeError::EmptyTypeName { .. }));
	assert!(registry.is_empty());
}

#[test]
fn unknown_hash_is_invalid_argument() {
	let registry = TypeRegistry::new();
	let err = registry.get_by_hash(TypeHash::from_value(1)).err().expect("unknown hash");
	assert!(matches!(err, TypeError::UnknownHash { .. }));
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn global_registry_is_shared() {
	let first = TypeRegistry::global();
	let second = TypeRegistry::global();
	assert!(std::ptr::eq(first, second));
	assert!(first.has::<String>());
}

#[test]
fn concurrent_lookups_and_mutation() {
	let registry = TypeRegistry::new();
	std::thread::scope(|scope| {
		for _ in 0..4 {
			scope.spawn(|| {
				for _ in 0..200 {
					let methods = registry.get::<i32>().expect("i32 registered");
					assert_eq!(methods.name(), "sint32");
				}
			});
		}
		scope.spawn(|| {
			for _ in 0..50 {
				registry.insert(celsius("celsius")).expect("insert succeeds");
				registry.remove::<Celsius>().expect("remove succeeds");
			}
		});
	});
	assert!(!registry.has::<Celsius>());
}
