use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter backing every generated identity. Never rewinds,
/// so a token is never handed out twice even after its object is destroyed.
static NEXT_OBJECT: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a remote native object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Hands out `ObjectId`s of the form `<prefix><n>`.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn next_id(&self) -> ObjectId {
        let n = NEXT_OBJECT.fetch_add(1, Ordering::Relaxed);
        ObjectId(format!("{}{n}", self.prefix))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("$")
    }
}
