pub mod invitees;
pub mod models;
pub mod natural;
pub mod recurrence;
pub mod time;

pub use invitees::extract_invitees;
pub use models::{EventDraft, ParsedFragment};
pub use natural::{FragmentParser, HeuristicParser};
pub use recurrence::extract_recurrence;

use chrono::{DateTime, Local};
use uuid::Uuid;

/// Title used when nothing else survives extraction
const FALLBACK_TITLE: &str = "New Event";

/// Parse a free-text query into an event draft.
///
/// Invitees are pulled out first, recurrence phrases second; the residual
/// goes to the fragment parser for a title and dates. Returns `None` when
/// nothing parseable remains, which callers treat as "no event yet".
pub fn parse_event(
    query: &str,
    fragment_parser: &dyn FragmentParser,
    now: DateTime<Local>,
    default_duration_minutes: i64,
) -> Option<EventDraft> {
    let extraction = extract_invitees(query);
    let recurrence = extract_recurrence(&extraction.residual);

    let residual = recurrence.residual.trim();
    if residual.is_empty() {
        return None;
    }

    let fragment = fragment_parser.parse(residual, now);

    let title = fragment
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| residual.to_string());
    let title = if title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        title
    };

    let start = fragment.start.unwrap_or_else(|| time::default_start(now));
    let end = fragment
        .end
        .filter(|end| *end >= start)
        .unwrap_or_else(|| time::default_end(start, fragment.is_all_day, default_duration_minutes));

    Some(EventDraft {
        id: Uuid::new_v4().to_string(),
        title,
        start,
        end,
        is_all_day: fragment.is_all_day,
        invitees: extraction.invitees,
        recurrence_rule: recurrence.rule,
        recurrence_description: recurrence.description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sunday_morning() -> DateTime<Local> {
        Local.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_full_pipeline() {
        let draft = parse_event(
            "Team sync with alice@x.com every Mon and Wed",
            &HeuristicParser,
            sunday_morning(),
            60,
        )
        .unwrap();

        assert_eq!(draft.title, "Team sync");
        assert_eq!(draft.invitees, vec!["alice@x.com"]);
        assert_eq!(
            draft.recurrence_rule.as_deref(),
            Some("FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,WE")
        );
        assert_eq!(draft.recurrence_description.as_deref(), Some("Every Mon, Wed"));
        assert!(draft.end >= draft.start);
    }

    #[test]
    fn test_empty_residual_yields_no_event() {
        assert!(parse_event("", &HeuristicParser, sunday_morning(), 60).is_none());
        assert!(parse_event("   ", &HeuristicParser, sunday_morning(), 60).is_none());
        // Only an invitee and a recurrence phrase, nothing left to title
        assert!(parse_event(
            "daily with alice@x.com",
            &HeuristicParser,
            sunday_morning(),
            60
        )
        .is_none());
    }

    #[test]
    fn test_defaults_applied_when_no_dates_found() {
        let draft = parse_event("Plan sprint", &HeuristicParser, sunday_morning(), 45).unwrap();
        assert_eq!(draft.title, "Plan sprint");
        assert_eq!(
            draft.start.format("%Y-%m-%d %H:%M").to_string(),
            "2023-01-01 11:00"
        );
        assert_eq!(draft.end - draft.start, chrono::Duration::minutes(45));
        assert!(draft.recurrence_rule.is_none());
        assert!(draft.recurrence_description.is_none());
    }

    #[test]
    fn test_rule_and_description_travel_together() {
        let draft = parse_event("Pay rent every 2 weeks", &HeuristicParser, sunday_morning(), 60)
            .unwrap();
        assert_eq!(draft.recurrence_rule.as_deref(), Some("FREQ=WEEKLY;INTERVAL=2"));
        assert_eq!(draft.recurrence_description.as_deref(), Some("Every 2 weeks"));
        assert_eq!(draft.title, "Pay rent");
    }

    #[test]
    fn test_fresh_id_per_parse() {
        let a = parse_event("Lunch", &HeuristicParser, sunday_morning(), 60).unwrap();
        let b = parse_event("Lunch", &HeuristicParser, sunday_morning(), 60).unwrap();
        assert_ne!(a.id, b.id);
    }
}
