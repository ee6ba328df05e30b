pub mod error;
pub mod ports;
pub mod services;

pub use error::{MutationError, RemoteError};
pub use services::{DeleteOutcome, MutationCoordinator, MutationOptions, SettleHandle};
