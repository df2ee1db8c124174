use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref AT_TOKEN_RE: Regex = Regex::new(r"@(\S*)$").unwrap();
    static ref WITH_TAIL_RE: Regex = Regex::new(r"(?i)\bwith\s+(\S*)$").unwrap();
    static ref WITH_WORD_RE: Regex = Regex::new(r"(?i)\bwith\b").unwrap();
}

/// Splice an invitee into the query at the position the user is typing.
///
/// A trailing "@..." token or "with <partial>" clause is replaced in place;
/// otherwise the invitee is appended, introduced by "with" unless the query
/// already has one. Pure; callers re-parse the returned string.
pub fn insert_invitee(query: &str, invitee: &str) -> String {
    if let Some(at_token) = AT_TOKEN_RE.find(query) {
        let before = &query[..at_token.start()];
        if before.chars().last().is_some_and(|c| !c.is_whitespace()) {
            // The "@" continues a word like "bob@", replace the whole word
            let start_of_word = before.rfind(' ').map(|i| i + 1).unwrap_or(0);
            return format!("{}{}", &query[..start_of_word], invitee);
        }
        return format!("{}{}", before, invitee);
    }

    if let Some(with_tail) = WITH_TAIL_RE.find(query) {
        return format!("{}with {}", &query[..with_tail.start()], invitee);
    }

    let trimmed = query.trim();
    if trimmed.is_empty() {
        invitee.to_string()
    } else if WITH_WORD_RE.is_match(trimmed) {
        format!("{} {}", trimmed, invitee)
    } else {
        format!("{} with {}", trimmed, invitee)
    }
}

/// The partial invitee token being typed at the end of the query, if any
pub fn active_term(query: &str) -> Option<String> {
    if let Some(captures) = AT_TOKEN_RE.captures(query) {
        return Some(captures[1].to_string());
    }
    WITH_TAIL_RE
        .captures(query)
        .map(|captures| captures[1].to_string())
}
