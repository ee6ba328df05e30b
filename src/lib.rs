pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod state;

pub use application::{
    DeleteOutcome, MutationCoordinator, MutationError, MutationOptions, RemoteError, SettleHandle,
};
pub use shared::{AppConfig, AppError};
pub use state::AppState;
