pub mod desired_state_model;
pub mod desired_state_traits;
pub mod merge;

pub use desired_state_model::*;
pub use desired_state_traits::DesiredStateSourceTrait;
pub use merge::{merge_desired_state, JoinedRow};
