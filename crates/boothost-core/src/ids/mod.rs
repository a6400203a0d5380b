//!
//! Strongly-typed identifiers: process role tags, invocation switch names and
//! registry path keys.
//!

mod path_key;
mod role;

pub mod switches;

pub use path_key::PathKey;
pub use role::ProcessRole;
