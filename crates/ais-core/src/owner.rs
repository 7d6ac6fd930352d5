//! Owner token matcher.
//!
//! Owner lookups are token-conjunctive: every token must appear in a
//! record's owner names. The predicate itself belongs to the registry
//! executor; this module only produces the tokens.

/// Split an owner query into uppercase, whitespace-delimited tokens,
/// preserving their order. An empty query yields no tokens, which the
/// executor treats as "match nothing".
pub fn owner_tokens(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|token| token.to_uppercase())
        .collect()
}
