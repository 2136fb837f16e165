//! The responder engine: orchestrates filter, evaluator and matcher.

mod eval;
mod filter;
mod matcher;
mod normalize;
mod similarity;

pub use eval::{format_number, looks_like_math, safe_eval};
pub use filter::contains_banned;
pub use matcher::{find_response, FUZZY_CUTOFF};
pub use normalize::normalize;
pub use similarity::sequence_ratio;

use crate::knowledge::{BannedWordSet, KnowledgeBase};
use std::sync::Arc;

/// Reply when the content filter blocks a message.
pub const REFUSAL_REPLY: &str = "I can't respond to that.";
/// Reply when no strategy produced an answer.
pub const FALLBACK_REPLY: &str =
    "I don't have a matching answer. Please rephrase or ask something else.";
/// Greeting shown by hosts when a session opens.
pub const WELCOME_MESSAGE: &str = "Welcome to Banter - say hi!";

/// The engine: two read-only tables and a single entry point.
///
/// `handle_message` is a pure function of (message, tables), so an `Engine`
/// can be shared freely across threads. Hosts that reload tables should build
/// a fresh `Engine` and swap it wholesale.
#[derive(Clone)]
pub struct Engine {
    kb: Arc<KnowledgeBase>,
    banned: Arc<BannedWordSet>,
}

impl Engine {
    pub fn new(kb: Arc<KnowledgeBase>, banned: Arc<BannedWordSet>) -> Self {
        Self { kb, banned }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn banned(&self) -> &BannedWordSet {
        &self.banned
    }

    /// Produces the reply for one message.
    ///
    /// Precedence is deliberate: safety > arithmetic > knowledge lookup >
    /// fallback. The banned check runs on the raw message; the math check on
    /// the message with spaces removed; the matcher normalizes internally.
    pub fn handle_message(&self, msg: &str) -> String {
        if contains_banned(msg, &self.banned) {
            tracing::debug!(target: "banter::engine", "message blocked by content filter");
            return REFUSAL_REPLY.to_string();
        }

        let stripped: String = msg.chars().filter(|c| *c != ' ').collect();
        if looks_like_math(&stripped) {
            if let Some(value) = safe_eval(msg) {
                return format_number(value);
            }
        }

        match find_response(&self.kb, msg) {
            Some(response) => response.to_string(),
            None => FALLBACK_REPLY.to_string(),
        }
    }
}
