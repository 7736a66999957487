use ferrous_ioc::{Container, DiError, Resolver};
use std::sync::Arc;

trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;
}

#[derive(Default)]
struct PluginA;
impl Plugin for PluginA {
    fn name(&self) -> &'static str {
        "A"
    }
}

#[derive(Default)]
struct PluginB;
impl Plugin for PluginB {
    fn name(&self) -> &'static str {
        "B"
    }
}

#[derive(Default)]
struct PluginC;
impl Plugin for PluginC {
    fn name(&self) -> &'static str {
        "C"
    }
}

ferrous_ioc::upcast!(PluginA => dyn Plugin, PluginB => dyn Plugin, PluginC => dyn Plugin);
ferrous_ioc::inject_fields!(PluginA, PluginB, PluginC);

fn names(plugins: &[Arc<dyn Plugin>]) -> Vec<&'static str> {
    plugins.iter().map(|p| p.name()).collect()
}

#[test]
fn test_resolve_many_in_registration_order() {
    let container = Container::new();
    container.register_transient::<dyn Plugin, PluginB>();
    container.register_singleton::<dyn Plugin, PluginA>();
    container.register_scoped::<dyn Plugin, PluginC>();

    let plugins = container.resolve_many::<dyn Plugin>().unwrap();
    assert_eq!(names(&plugins), vec!["B", "A", "C"]);
}

#[test]
fn test_single_resolution_is_ambiguous() {
    let container = Container::new();
    container.register_transient::<dyn Plugin, PluginA>();
    container.register_transient::<dyn Plugin, PluginB>();

    match container.resolve::<dyn Plugin>() {
        Err(DiError::AmbiguousRegistration { key, count }) => {
            assert_eq!(count, 2);
            assert!(key.discriminator().is_none());
        }
        Ok(_) => panic!("expected an ambiguity error"),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_single_registration_resolves_both_ways() {
    let container = Container::new();
    container.register_transient::<dyn Plugin, PluginA>();

    assert_eq!(container.resolve::<dyn Plugin>().unwrap().name(), "A");
    assert_eq!(names(&container.resolve_many::<dyn Plugin>().unwrap()), vec!["A"]);
}

#[test]
fn test_resolve_many_without_registration_fails() {
    let container = Container::new();
    assert!(matches!(
        container.resolve_many::<dyn Plugin>(),
        Err(DiError::NoRegistration(_))
    ));
}

#[test]
fn test_resolve_many_respects_cache_policies() {
    let container = Container::new();
    container.register_singleton::<dyn Plugin, PluginA>();
    container.register_transient::<dyn Plugin, PluginB>();

    let first = container.resolve_many::<dyn Plugin>().unwrap();
    let second = container.resolve_many::<dyn Plugin>().unwrap();

    assert!(Arc::ptr_eq(&first[0], &second[0]));
    assert!(!Arc::ptr_eq(&first[1], &second[1]));
}

#[test]
fn test_two_registrations_of_one_implementation_do_not_share_cache() {
    let container = Container::new();
    container.register_singleton::<dyn Plugin, PluginA>();
    container.register_singleton::<dyn Plugin, PluginA>();

    let plugins = container.resolve_many::<dyn Plugin>().unwrap();
    assert_eq!(plugins.len(), 2);
    assert!(!Arc::ptr_eq(&plugins[0], &plugins[1]));
}

#[test]
fn test_keyed_collections_are_separate() {
    let container = Container::new();
    container.register_transient::<dyn Plugin, PluginA>();
    container.bind::<dyn Plugin>().key("extra").to::<PluginB>();
    container.bind::<dyn Plugin>().key("extra").to::<PluginC>();

    assert_eq!(names(&container.resolve_many::<dyn Plugin>().unwrap()), vec!["A"]);
    assert_eq!(
        names(&container.resolve_many_keyed::<dyn Plugin>("extra").unwrap()),
        vec!["B", "C"]
    );
    assert!(container.resolve_keyed::<dyn Plugin>("extra").is_err());
}

#[test]
fn test_collection_constructor_parameter() {
    struct Registry {
        plugins: Vec<Arc<dyn Plugin>>,
    }
    ferrous_ioc::inject_fields!(Registry);

    let container = Container::new();
    container.register_transient::<dyn Plugin, PluginA>();
    container.register_transient::<dyn Plugin, PluginB>();
    container
        .bind::<Registry>()
        .to_constructor(|plugins: Vec<Arc<dyn Plugin>>| Registry { plugins });

    let registry = container.resolve::<Registry>().unwrap();
    assert_eq!(names(&registry.plugins), vec!["A", "B"]);
}

#[test]
fn test_first_failure_aborts_collection() {
    #[derive(Debug, thiserror::Error)]
    #[error("broken plugin")]
    struct Broken;

    let container = Container::new();
    container.register_transient::<dyn Plugin, PluginA>();
    container
        .bind::<dyn Plugin>()
        .to_fallible_constructor(|| -> Result<PluginB, Broken> { Err(Broken) });

    assert!(matches!(
        container.resolve_many::<dyn Plugin>(),
        Err(DiError::Constructor { .. })
    ));
}
