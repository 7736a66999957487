use ferrous_ioc::{Constructor, Container, DiError, Resolver, ScopeCacheMode};
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct A;

struct B {
    a: Arc<A>,
}

ferrous_ioc::inject_fields!(A, B);

#[derive(Debug, thiserror::Error)]
#[error("connection refused on port {0}")]
struct Refused(u16);

#[test]
fn test_constructor_parameters_are_resolved() {
    let container = Container::new();
    container.register_singleton::<A, A>();
    container.bind::<B>().to_constructor(|a: Arc<A>| B { a });

    let b1 = container.resolve::<B>().unwrap();
    let b2 = container.resolve::<B>().unwrap();

    // B is never cached but its global dependency is
    assert!(!Arc::ptr_eq(&b1, &b2));
    assert!(Arc::ptr_eq(&b1.a, &b2.a));
    assert!(Arc::ptr_eq(&b1.a, &container.resolve::<A>().unwrap()));
}

#[test]
fn test_constructor_to_trait_object() {
    trait Repository: Send + Sync {
        fn backend(&self) -> String;
    }
    struct SqlRepository {
        url: Arc<String>,
    }
    impl Repository for SqlRepository {
        fn backend(&self) -> String {
            format!("sql:{}", self.url)
        }
    }
    ferrous_ioc::upcast!(SqlRepository => dyn Repository);
    ferrous_ioc::inject_fields!(SqlRepository);

    let container = Container::new();
    container.register_instance(Arc::new("db.local".to_string()));
    container
        .bind::<dyn Repository>()
        .scoped()
        .to_constructor(|url: Arc<String>| SqlRepository { url });

    let (scope, _closer) = container.open_scope(ScopeCacheMode::Default).unwrap();
    let a = scope.resolve::<dyn Repository>().unwrap();
    let b = scope.resolve::<dyn Repository>().unwrap();
    assert_eq!(a.backend(), "sql:db.local");
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_zero_argument_constructor() {
    let container = Container::new();
    container.bind::<String>().to_constructor(|| "built".to_string());
    assert_eq!(*container.resolve::<String>().unwrap(), "built");
}

#[test]
fn test_many_arguments() {
    struct Wide {
        sum: u64,
    }
    ferrous_ioc::inject_fields!(Wide);

    let container = Container::new();
    container.register_instance(Arc::new(1u8));
    container.register_instance(Arc::new(2u16));
    container.register_instance(Arc::new(3u32));
    container.register_instance(Arc::new(4u64));
    container.register_instance(Arc::new(5i8));
    container.register_instance(Arc::new(6i16));
    container.register_instance(Arc::new(7i32));
    container.register_instance(Arc::new(8i64));
    container.bind::<Wide>().to_constructor(
        |a: Arc<u8>,
         b: Arc<u16>,
         c: Arc<u32>,
         d: Arc<u64>,
         e: Arc<i8>,
         f: Arc<i16>,
         g: Arc<i32>,
         h: Arc<i64>| Wide {
            sum: *a as u64
                + *b as u64
                + *c as u64
                + *d
                + *e as u64
                + *f as u64
                + *g as u64
                + *h as u64,
        },
    );

    assert_eq!(container.resolve::<Wide>().unwrap().sum, 36);
}

#[test]
fn test_arity() {
    fn arity<Args, Out>(ctor: impl Constructor<Args, Out>) -> usize {
        ctor.arity()
    }

    assert_eq!(arity(|| 0u8), 0);
    assert_eq!(arity(|_a: Arc<u8>| 0u8), 1);
    assert_eq!(arity(|_a: Arc<u8>, _b: Vec<Arc<u8>>, _c: Arc<u16>| 0u8), 3);
}

#[test]
fn test_missing_parameter_fails_before_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let container = Container::new();
    container.bind::<B>().to_constructor(move |a: Arc<A>| {
        counter.fetch_add(1, Ordering::SeqCst);
        B { a }
    });

    match container.resolve::<B>() {
        Err(DiError::NoRegistration(key)) => assert_eq!(key.type_name(), std::any::type_name::<A>()),
        Ok(_) => panic!("expected a missing registration"),
        Err(other) => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_fallible_constructor_success() {
    struct Client {
        port: u16,
    }
    ferrous_ioc::inject_fields!(Client);

    let container = Container::new();
    container.register_instance(Arc::new(8080u16));
    container
        .bind::<Client>()
        .global()
        .to_fallible_constructor(|port: Arc<u16>| -> Result<Client, Refused> {
            Ok(Client { port: *port })
        });

    assert_eq!(container.resolve::<Client>().unwrap().port, 8080);
}

#[test]
fn test_fallible_constructor_error() {
    struct Client;
    ferrous_ioc::inject_fields!(Client);

    let container = Container::new();
    container.register_instance(Arc::new(5432u16));
    container
        .bind::<Client>()
        .global()
        .to_fallible_constructor(|port: Arc<u16>| -> Result<Client, Refused> {
            Err(Refused(*port))
        });

    let err = match container.resolve::<Client>() {
        Err(err) => err,
        Ok(_) => panic!("expected a constructor error"),
    };
    match &err {
        DiError::Constructor { service, .. } => {
            assert_eq!(*service, std::any::type_name::<Client>())
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.source().map(|s| s.to_string()),
        Some("connection refused on port 5432".to_string())
    );

    // Failures are not cached
    assert!(container.resolve::<Client>().is_err());
}

#[test]
fn test_nested_errors_surface_unchanged() {
    struct Inner;
    struct Outer {
        _inner: Arc<Inner>,
    }
    ferrous_ioc::inject_fields!(Inner, Outer);

    let container = Container::new();
    container
        .bind::<Inner>()
        .to_fallible_constructor(|| -> Result<Inner, Refused> { Err(Refused(1)) });
    container
        .bind::<Outer>()
        .to_constructor(|inner: Arc<Inner>| Outer { _inner: inner });

    match container.resolve::<Outer>() {
        Err(DiError::Constructor { service, .. }) => {
            assert_eq!(service, std::any::type_name::<Inner>())
        }
        Ok(_) => panic!("expected a constructor error"),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_failed_global_retries_on_next_resolution() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();

    let container = Container::new();
    container
        .bind::<String>()
        .global()
        .to_fallible_constructor(move || -> Result<String, Refused> {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(Refused(80))
            } else {
                Ok("ready".to_string())
            }
        });

    assert!(container.resolve::<String>().is_err());
    let a = container.resolve::<String>().unwrap();
    let b = container.resolve::<String>().unwrap();
    assert_eq!(*a, "ready");
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}
