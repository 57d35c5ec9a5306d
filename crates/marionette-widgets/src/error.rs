use std::fmt;

use marionette_bridge::BridgeError;
use marionette_common::{MarionetteError, ObjectId};

use crate::WidgetKey;

/// A selector string that cannot be turned into a `Selector`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("selector {0:?} is missing a name after its prefix")]
    MissingName(String),
}

/// A property value the encoder refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid value for {type_name}.{property}: {reason}")]
pub struct PropertyError {
    pub type_name: String,
    pub property: String,
    pub reason: String,
}

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("widget {0:?} has been disposed")]
    Disposed(WidgetKey),

    #[error("no widget for remote object {0}")]
    UnknownObject(ObjectId),

    #[error("{parent} cannot hold children ({type_name} is not a composite)")]
    NotAComposite { parent: ObjectId, type_name: String },

    #[error("appending {child} to {parent} would create a cycle")]
    Cycle { parent: ObjectId, child: ObjectId },

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Per-member failures of a bulk operation. Members that succeeded are not
/// listed; the operation was still attempted on every member.
#[derive(Debug)]
pub struct BulkError {
    pub attempted: usize,
    pub failures: Vec<(WidgetKey, WidgetError)>,
}

impl BulkError {
    /// `Ok` when nothing failed.
    pub(crate) fn check(
        attempted: usize,
        failures: Vec<(WidgetKey, WidgetError)>,
    ) -> Result<(), Self> {
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Self { attempted, failures })
        }
    }
}

impl fmt::Display for BulkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} widgets failed",
            self.failures.len(),
            self.attempted
        )?;
        if let Some((_, first)) = self.failures.first() {
            write!(f, ": {first}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BulkError {}

impl From<SelectorError> for MarionetteError {
    fn from(err: SelectorError) -> Self {
        MarionetteError::Selector(err.to_string())
    }
}

impl From<WidgetError> for MarionetteError {
    fn from(err: WidgetError) -> Self {
        MarionetteError::Widget(err.to_string())
    }
}

impl From<BulkError> for MarionetteError {
    fn from(err: BulkError) -> Self {
        MarionetteError::Widget(err.to_string())
    }
}
