use chrono::{DateTime, Local};

/// Fully assembled, not-yet-created calendar event
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub id: String,
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub is_all_day: bool,
    /// Normalized email addresses, first appearance order, no duplicates
    pub invitees: Vec<String>,
    /// RFC-5545 style rule, present iff a recurrence phrase matched
    pub recurrence_rule: Option<String>,
    /// Human-readable form of the rule, present iff the rule is
    pub recurrence_description: Option<String>,
}

impl EventDraft {
    /// Short date range for display, e.g. "Fri 14 Mar 13:00 - 14:00"
    pub fn date_display(&self) -> String {
        if self.is_all_day {
            format!("{} (all day)", self.start.format("%a %e %b"))
        } else if self.start.date_naive() == self.end.date_naive() {
            format!(
                "{} - {}",
                self.start.format("%a %e %b %H:%M"),
                self.end.format("%H:%M")
            )
        } else {
            format!(
                "{} - {}",
                self.start.format("%a %e %b %H:%M"),
                self.end.format("%a %e %b %H:%M")
            )
        }
    }
}

/// Best-effort title and dates extracted from the residual query text
#[derive(Debug, Clone, Default)]
pub struct ParsedFragment {
    pub title: Option<String>,
    pub start: Option<DateTime<Local>>,
    pub end: Option<DateTime<Local>>,
    pub is_all_day: bool,
}
