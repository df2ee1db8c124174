use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"(?i)@?[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").unwrap();
    static ref WITH_BLOCK_RE: Regex = Regex::new(r"(?i)\bwith\b[\s,:-]*(.*)$").unwrap();
    static ref WHITESPACE_RUN_RE: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Result of pulling invitee addresses out of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteeExtraction {
    pub invitees: Vec<String>,
    pub residual: String,
}

/// Normalize an invitee token: strip a leading "@", trim, lowercase
pub fn normalize_invitee(value: &str) -> String {
    value.strip_prefix('@').unwrap_or(value).trim().to_lowercase()
}

/// Extract invitee emails from a query.
///
/// A trailing "with ..." clause takes priority; when it holds at least one
/// email the residual is everything before the clause. Otherwise the whole
/// query is scanned and each matched token is cut out of the residual.
pub fn extract_invitees(query: &str) -> InviteeExtraction {
    if let Some(extraction) = extract_from_with_clause(query) {
        return extraction;
    }
    extract_from_anywhere(query)
}

/// Phase 1: emails inside a trailing "with" clause
fn extract_from_with_clause(query: &str) -> Option<InviteeExtraction> {
    let clause = WITH_BLOCK_RE.find(query)?;
    let invitees = collect_emails(clause.as_str());
    if invitees.is_empty() {
        return None;
    }

    Some(InviteeExtraction {
        invitees,
        residual: query[..clause.start()].trim().to_string(),
    })
}

/// Phase 2: emails anywhere in the query, cut out of the residual
fn extract_from_anywhere(query: &str) -> InviteeExtraction {
    let invitees = collect_emails(query);
    if invitees.is_empty() {
        return InviteeExtraction {
            invitees,
            residual: query.to_string(),
        };
    }

    let mut residual = query.to_string();
    for m in EMAIL_RE.find_iter(query) {
        residual = residual.replacen(m.as_str(), "", 1);
    }
    let residual = WHITESPACE_RUN_RE
        .replace_all(residual.trim(), " ")
        .trim()
        .to_string();

    InviteeExtraction { invitees, residual }
}

/// All normalized email tokens in order of first appearance, deduplicated
fn collect_emails(text: &str) -> Vec<String> {
    let mut emails = Vec::new();
    for m in EMAIL_RE.find_iter(text) {
        let normalized = normalize_invitee(m.as_str());
        if !normalized.is_empty() && !emails.contains(&normalized) {
            emails.push(normalized);
        }
    }
    emails
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_email_leaves_query_unchanged() {
        let result = extract_invitees("Movie at 7pm on Friday");
        assert!(result.invitees.is_empty());
        assert_eq!(result.residual, "Movie at 7pm on Friday");
    }

    #[test]
    fn test_with_clause_takes_priority() {
        let result = extract_invitees("Lunch at noon with Alice@X.com, bob@y.com");
        assert_eq!(result.invitees, vec!["alice@x.com", "bob@y.com"]);
        assert_eq!(result.residual, "Lunch at noon");
    }

    #[test]
    fn test_with_clause_strips_at_prefix() {
        let result = extract_invitees("Sync with @alice@x.com");
        assert_eq!(result.invitees, vec!["alice@x.com"]);
        assert_eq!(result.residual, "Sync");
    }

    #[test]
    fn test_scattered_emails_collapse_whitespace() {
        let result = extract_invitees("Call bob@x.com tomorrow");
        assert_eq!(result.invitees, vec!["bob@x.com"]);
        assert_eq!(result.residual, "Call tomorrow");
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let result = extract_invitees("Pairing with bob@x.com and BOB@x.com");
        assert_eq!(result.invitees, vec!["bob@x.com"]);
    }

    #[test]
    fn test_with_clause_without_emails_falls_back_to_scan() {
        // The clause holds no address, so the scan re-finds the one before "with"
        let result = extract_invitees("Review bob@x.com with the team");
        assert_eq!(result.invitees, vec!["bob@x.com"]);
        assert_eq!(result.residual, "Review with the team");
    }

    #[test]
    fn test_with_as_word_only() {
        let result = extract_invitees("withdraw funds alice@x.com");
        assert_eq!(result.invitees, vec!["alice@x.com"]);
        assert_eq!(result.residual, "withdraw funds");
    }
}
