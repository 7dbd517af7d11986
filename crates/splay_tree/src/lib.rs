//! Top-down splay trees.
//!
//! [`SplayTree`] keeps unique keys with a value payload and moves every accessed key to the
//! root. [`SplaySet`] is its key-only shape and [`SplayTreeMap`] layers map semantics
//! (`get`/`put`/`remove`) on top. The [`stress`] module carries the insert/delete/lookup
//! scenario run by the `splay-stress` binary.
pub mod config;
pub mod error;
pub mod map;
pub mod node;
mod splay;
pub mod stress;
pub mod tree;

pub use config::StressConfig;
pub use error::{Result, SplayError};
pub use map::SplayTreeMap;
pub use node::SplayNode;
pub use tree::{SplaySet, SplayTree};
