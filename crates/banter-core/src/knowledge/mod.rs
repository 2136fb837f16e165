//! Read-only tables the engine is built from.
//!
//! Both tables are materialized once at startup from line-oriented UTF-8
//! sources and never mutated afterwards. Hosts that want to reload them must
//! build fresh tables and swap the `Arc`s, so in-flight calls keep observing a
//! consistent snapshot.

mod store;

pub use store::{BannedWordSet, KnowledgeBase};
