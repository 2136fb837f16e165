//! Response lookup: exact, then longest-substring, then fuzzy.

use super::normalize::normalize;
use super::similarity::sequence_ratio;
use crate::knowledge::KnowledgeBase;

/// Minimum similarity for the fuzzy fallback to accept a key.
pub const FUZZY_CUTOFF: f64 = 0.65;

/// Looks up a response for the user's message, stopping at the first hit:
///
/// 1. exact match of the normalized input against a trigger;
/// 2. triggers sorted by descending length (stable, so equal lengths keep
///    insertion order) matched as substrings of the normalized input, so the
///    most specific trigger wins over a shorter one contained in it;
/// 3. best fuzzy similarity across all triggers, accepted at >= 0.65; equal
///    scores prefer the lexicographically greater trigger;
/// 4. no match.
pub fn find_response<'a>(kb: &'a KnowledgeBase, user_text: &str) -> Option<&'a str> {
    let norm = normalize(user_text);
    if let Some(response) = kb.get(&norm) {
        tracing::debug!(target: "banter::engine", trigger = %norm, "exact trigger match");
        return Some(response);
    }

    let mut by_length: Vec<&String> = kb.keys().iter().collect();
    by_length.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    for key in by_length {
        if norm.contains(key.as_str()) {
            tracing::debug!(target: "banter::engine", trigger = %key, "substring trigger match");
            return kb.get(key);
        }
    }

    let mut best: Option<(&String, f64)> = None;
    for key in kb.keys() {
        let score = sequence_ratio(&norm, key);
        if score < FUZZY_CUTOFF {
            continue;
        }
        let better = match best {
            None => true,
            // equal scores: the lexicographically greater trigger wins
            Some((best_key, best_score)) => {
                score > best_score || (score == best_score && key.as_str() > best_key.as_str())
            }
        };
        if better {
            best = Some((key, score));
        }
    }
    if let Some((key, score)) = best {
        tracing::debug!(target: "banter::engine", trigger = %key, score, "fuzzy trigger match");
        return kb.get(key);
    }
    None
}
