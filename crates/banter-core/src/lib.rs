//! banter-core: rule-based conversational responder.
//!
//! Given a raw user message, the engine either blocks disallowed content,
//! evaluates a safe arithmetic expression, or looks up a canned response in a
//! knowledge base of trigger/response pairs (exact, substring, then fuzzy).
//! The engine holds two read-only tables loaded once at startup; every call is
//! a pure function of (message, tables).

mod engine;
mod knowledge;
mod shared;

pub use engine::{
    contains_banned, find_response, format_number, looks_like_math, normalize, safe_eval,
    sequence_ratio, Engine, FALLBACK_REPLY, FUZZY_CUTOFF, REFUSAL_REPLY, WELCOME_MESSAGE,
};
pub use knowledge::{BannedWordSet, KnowledgeBase};
pub use shared::CoreConfig;
