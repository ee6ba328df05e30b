pub mod mutation_coordinator;
pub mod reconciliation;

pub use mutation_coordinator::{DeleteOutcome, MutationCoordinator, MutationOptions, SettleHandle};
