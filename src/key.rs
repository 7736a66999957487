//! Service key types for the activation engine.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Object-safe view of an arbitrary comparable discriminator value.
trait DynKey: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn DynKey) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<K> DynKey for K
where
    K: Eq + Hash + fmt::Debug + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynKey) -> bool {
        other
            .as_any()
            .downcast_ref::<K>()
            .is_some_and(|other| other == self)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<K>().hash(&mut state);
        self.hash(&mut state);
    }

    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Optional value distinguishing several registrations of one service.
///
/// A discriminator wraps any `Eq + Hash + Debug` value. Two discriminators
/// are equal only when they hold the same dynamic type and the values compare
/// equal, so `Discriminator::new(1u32)` and `Discriminator::new(1u64)` never
/// match. String slices are stored as owned `String`s, which makes a key
/// written in an injection marker equal to the same key given in code.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::Discriminator;
///
/// let from_str = Discriminator::from("team-b");
/// let from_string = Discriminator::from(String::from("team-b"));
/// assert_eq!(from_str, from_string);
/// assert_eq!(from_str.as_str(), Some("team-b"));
///
/// #[derive(Debug, PartialEq, Eq, Hash)]
/// enum Region { Eu, Us }
///
/// let eu = Discriminator::new(Region::Eu);
/// assert_ne!(eu, Discriminator::new(Region::Us));
/// assert_eq!(eu.downcast_ref::<Region>(), Some(&Region::Eu));
/// ```
#[derive(Clone)]
pub struct Discriminator(Arc<dyn DynKey>);

impl Discriminator {
    /// Wraps an arbitrary comparable value.
    pub fn new<K>(key: K) -> Self
    where
        K: Eq + Hash + fmt::Debug + Send + Sync + 'static,
    {
        let any: &dyn Any = &key;
        if let Some(text) = any.downcast_ref::<&'static str>() {
            return Self(Arc::new((*text).to_owned()));
        }
        Self(Arc::new(key))
    }

    /// The discriminator as a string slice, if it holds one.
    pub fn as_str(&self) -> Option<&str> {
        self.downcast_ref::<String>().map(String::as_str)
    }

    /// Borrows the wrapped value if it is a `K`.
    pub fn downcast_ref<K: 'static>(&self) -> Option<&K> {
        self.0.as_any().downcast_ref::<K>()
    }
}

impl PartialEq for Discriminator {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(other.0.as_ref())
    }
}

impl Eq for Discriminator {}

impl Hash for Discriminator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.dyn_hash(state);
    }
}

impl fmt::Debug for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.dyn_fmt(f)
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(text) => f.write_str(text),
            None => self.0.dyn_fmt(f),
        }
    }
}

impl From<&str> for Discriminator {
    fn from(key: &str) -> Self {
        Self(Arc::new(key.to_owned()))
    }
}

impl From<String> for Discriminator {
    fn from(key: String) -> Self {
        Self(Arc::new(key))
    }
}

macro_rules! discriminator_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Discriminator {
                fn from(key: $ty) -> Self {
                    Self(Arc::new(key))
                }
            }
        )*
    };
}

discriminator_from_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Key for recipe storage and lookup.
///
/// A key pairs the runtime identity of the requested service (a concrete
/// type or a trait object such as `dyn Logger`) with an optional
/// [`Discriminator`]. Keyed and anonymous registrations of the same service
/// are entirely distinct: there is no fallback from one to the other.
///
/// Equality and hashing ignore the type name, which is kept only for
/// diagnostics.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::ServiceKey;
///
/// let anonymous = ServiceKey::of::<String>(None);
/// let keyed = ServiceKey::keyed::<String>("primary");
///
/// assert_ne!(anonymous, keyed);
/// assert_eq!(keyed, ServiceKey::keyed::<String>(String::from("primary")));
/// assert_eq!(anonymous.to_string(), "alloc::string::String");
/// assert_eq!(keyed.to_string(), "alloc::string::String[primary]");
/// ```
#[derive(Clone)]
pub struct ServiceKey {
    type_id: TypeId,
    type_name: &'static str,
    discriminator: Option<Discriminator>,
}

impl ServiceKey {
    /// Key for service `T` with an optional discriminator.
    #[inline]
    pub fn of<T: ?Sized + 'static>(discriminator: Option<Discriminator>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            discriminator,
        }
    }

    /// Key for service `T` registered under `key`.
    pub fn keyed<T: ?Sized + 'static>(key: impl Into<Discriminator>) -> Self {
        Self::of::<T>(Some(key.into()))
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The `std::any::type_name` of the service.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn discriminator(&self) -> Option<&Discriminator> {
        self.discriminator.as_ref()
    }
}

impl PartialEq for ServiceKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.discriminator == other.discriminator
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.discriminator.hash(state);
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceKey")
            .field("type_name", &self.type_name)
            .field("discriminator", &self.discriminator)
            .finish()
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.discriminator {
            Some(key) => write!(f, "{}[{}]", self.type_name, key),
            None => f.write_str(self.type_name),
        }
    }
}
