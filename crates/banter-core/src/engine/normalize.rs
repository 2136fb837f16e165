//! Text canonicalization applied before knowledge-base matching.

/// Symbols kept alongside word characters so arithmetic survives normalization.
const KEPT_SYMBOLS: &str = "^+-*/%().";

/// Canonicalizes raw text for matching: trim, lower-case, strip everything
/// outside {alphanumeric, `_`, whitespace, `^ + - * / % ( ) .`}, collapse
/// whitespace runs to a single space.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)` for all inputs.
pub fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| {
            c.is_alphanumeric() || *c == '_' || c.is_whitespace() || KEPT_SYMBOLS.contains(*c)
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
