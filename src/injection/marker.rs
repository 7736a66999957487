//! Injection marker syntax.

use std::str::FromStr;

use crate::error::{DiError, DiResult};
use crate::key::Discriminator;

const INJECT: &str = "inject";
const KEY_PREFIX: &str = "key=";

/// A parsed field marker such as `"inject,key=team-b"`.
///
/// The syntax is a comma separated token list. `inject` marks the field for
/// injection and `key=<value>` supplies a string discriminator; an empty
/// value (`key=`) leaves any earlier key in place. Empty tokens are ignored and any
/// other token fails with [`DiError::TagParse`].
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Discriminator, Marker};
///
/// let marker = Marker::parse("inject,key=team-b").unwrap();
/// assert!(marker.inject);
/// assert_eq!(marker.key, Some(Discriminator::from("team-b")));
///
/// assert_eq!(Marker::parse("inject,key=").unwrap().key, None);
/// assert!(!Marker::parse("").unwrap().inject);
/// assert!(Marker::parse("inject,lazy").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Marker {
    pub inject: bool,
    pub key: Option<Discriminator>,
}

impl Marker {
    pub fn parse(marker: &str) -> DiResult<Self> {
        let mut parsed = Marker::default();
        for token in marker.split(',') {
            if token.is_empty() {
                continue;
            }
            if token == INJECT {
                parsed.inject = true;
            } else if let Some(value) = token.strip_prefix(KEY_PREFIX) {
                // an empty value leaves the key as it was
                if !value.is_empty() {
                    parsed.key = Some(Discriminator::from(value));
                }
            } else {
                return Err(DiError::TagParse {
                    token: token.to_owned(),
                });
            }
        }
        Ok(parsed)
    }
}

impl FromStr for Marker {
    type Err = DiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Marker::parse(s)
    }
}
