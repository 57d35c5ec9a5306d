use marionette_common::{MarionetteError, ObjectId};

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("no remote object record for {0}")]
    NotFound(ObjectId),

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}

impl From<BridgeError> for MarionetteError {
    fn from(err: BridgeError) -> Self {
        MarionetteError::Bridge(err.to_string())
    }
}
