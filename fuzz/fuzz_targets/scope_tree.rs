#![no_main]

use ferrous_ioc::{Container, DiError, Resolver, Scope, ScopeCacheMode, ScopeCloser};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

#[derive(Default)]
struct Session;
#[derive(Default)]
struct Settings;
ferrous_ioc::inject_fields!(Session, Settings);

fuzz_target!(|data: &[u8]| {
    let container = Container::new();
    container.register_scoped::<Session, Session>();
    container.register_singleton::<Settings, Settings>();
    let settings = container.resolve::<Settings>().unwrap();

    let mut scopes: Vec<Scope> = vec![container.scope().clone()];
    let mut closers: Vec<Option<ScopeCloser>> = vec![None];

    // Each pair of bytes is one operation on a scope picked by the first byte
    for op in data.chunks_exact(2) {
        let index = op[0] as usize % scopes.len();
        let scope = scopes[index].clone();

        match op[1] % 5 {
            0 | 1 | 2 => {
                let mode = match op[1] % 3 {
                    0 => ScopeCacheMode::Default,
                    1 => ScopeCacheMode::Inherit,
                    _ => ScopeCacheMode::Sync,
                };
                match scope.open_scope(mode) {
                    Ok((child, closer)) => {
                        scopes.push(child);
                        closers.push(Some(closer));
                    }
                    Err(DiError::ScopeClosed) => assert!(scope.is_closed()),
                    Err(other) => panic!("unexpected error: {other}"),
                }
            }
            3 => {
                if let Some(closer) = closers[index].take() {
                    closer.close();
                    assert!(scope.is_closed());
                }
            }
            _ => match scope.resolve::<Session>() {
                Ok(_) => {
                    assert!(!scope.is_closed());
                    // Global instances never change
                    let seen = scope.resolve::<Settings>().unwrap();
                    assert!(Arc::ptr_eq(&seen, &settings));
                }
                Err(DiError::ScopeClosed) => assert!(scope.is_closed()),
                Err(other) => panic!("unexpected error: {other}"),
            },
        }
    }

    // The container itself never closes
    assert!(!container.scope().is_closed());
});
