//! Culture tag resolved for a request.

use std::fmt::{Display, Formatter};

/// An IETF-style culture tag such as `"en-US"` or `"da-DK"`.
///
/// The router only carries the tag; applying it to any ambient locale
/// mechanism is the host's responsibility.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Culture(String);

impl Culture {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Culture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Culture {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}
