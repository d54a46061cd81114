//! Memory Match (workspace facade crate).
//!
//! Re-exports the member crates under one roof as
//! `memory_match::{core, engine, store, types}`; the implementation lives in
//! dedicated crates under `crates/`.

pub use memory_match_core as core;
pub use memory_match_engine as engine;
pub use memory_match_store as store;
pub use memory_match_types as types;
