//! Self-play learning engine
//!
//! Positions live in a [`StateRegistry`]; each revision rebuilds a position's
//! policy from its successors' values and backs up a new value one ply.

pub mod policy;
pub mod position;
pub mod registry;
pub mod value;

pub use policy::{
    PolicyScheme, blend, check_explore_factor, greedy_policy, sample_move, uniform_policy,
    validate_distribution, weighted_policy,
};
pub use position::Position;
pub use registry::StateRegistry;
pub use value::{backup_value, reward};
