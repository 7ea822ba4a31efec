pub mod deadline;
pub mod tracker;

pub use deadline::WaitDeadline;
pub use tracker::{wait_for_update, UpdateSource};
