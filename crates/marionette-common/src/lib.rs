pub mod errors;
pub mod id;

pub use errors::{ConfigError, MarionetteError};
pub use id::{IdGenerator, ObjectId};

pub type Result<T> = std::result::Result<T, MarionetteError>;
