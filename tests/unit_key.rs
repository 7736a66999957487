use ferrous_ioc::{Discriminator, ServiceKey};
use std::collections::HashSet;

trait Service: Send + Sync {}

#[test]
fn test_key_equality() {
    assert_eq!(ServiceKey::of::<u32>(None), ServiceKey::of::<u32>(None));
    assert_ne!(ServiceKey::of::<u32>(None), ServiceKey::of::<u64>(None));
    assert_eq!(ServiceKey::keyed::<u32>("a"), ServiceKey::keyed::<u32>("a"));
    assert_ne!(ServiceKey::keyed::<u32>("a"), ServiceKey::keyed::<u32>("b"));
    assert_ne!(ServiceKey::keyed::<u32>("a"), ServiceKey::of::<u32>(None));
}

#[test]
fn test_trait_object_identity_differs_from_concrete() {
    struct Impl;
    impl Service for Impl {}

    assert_ne!(ServiceKey::of::<dyn Service>(None), ServiceKey::of::<Impl>(None));
    assert_eq!(
        ServiceKey::of::<dyn Service>(None).type_name(),
        std::any::type_name::<dyn Service>()
    );
}

#[test]
fn test_keys_hash_consistently() {
    let mut set = HashSet::new();
    set.insert(ServiceKey::keyed::<String>("a"));
    set.insert(ServiceKey::keyed::<String>(String::from("a")));
    set.insert(ServiceKey::keyed::<String>(1u32));
    set.insert(ServiceKey::of::<String>(None));

    assert_eq!(set.len(), 3);
    assert!(set.contains(&ServiceKey::keyed::<String>(1u32)));
}

#[test]
fn test_discriminator_types_never_collide() {
    assert_ne!(Discriminator::from(1u32), Discriminator::from(1u64));
    assert_ne!(Discriminator::from(1u32), Discriminator::from("1"));
    assert_eq!(Discriminator::new("x"), Discriminator::from("x"));
}

#[test]
fn test_discriminator_custom_type() {
    #[derive(Debug, PartialEq, Eq, Hash)]
    enum Tenant {
        Acme,
        Globex,
    }

    let acme = Discriminator::new(Tenant::Acme);
    assert_eq!(acme, Discriminator::new(Tenant::Acme));
    assert_ne!(acme, Discriminator::new(Tenant::Globex));
    assert_eq!(acme.downcast_ref::<Tenant>(), Some(&Tenant::Acme));
    assert_eq!(acme.as_str(), None);
    assert_eq!(acme.to_string(), "Acme");
}

#[test]
fn test_key_display() {
    assert_eq!(ServiceKey::of::<u8>(None).to_string(), "u8");
    assert_eq!(ServiceKey::keyed::<u8>("cache").to_string(), "u8[cache]");
    assert_eq!(ServiceKey::keyed::<u8>(7i32).to_string(), "u8[7]");
}

#[test]
fn test_key_accessors() {
    let key = ServiceKey::keyed::<u16>("east");
    assert_eq!(key.type_id(), std::any::TypeId::of::<u16>());
    assert_eq!(key.discriminator().and_then(Discriminator::as_str), Some("east"));
}
