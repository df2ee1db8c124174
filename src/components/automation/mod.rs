use crate::components::parser::EventDraft;
use crate::error::{automation_error, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use tokio::process::Command;
use tracing::info;

/// Seam to the calendar application.
///
/// Creation failures surface to the user; they never affect parsing state.
#[async_trait]
pub trait CalendarAutomation: Send + Sync {
    async fn create_event(&self, draft: &EventDraft, calendar_name: &str) -> AppResult<()>;
    async fn focus_calendar_view(&self, date: DateTime<Local>) -> AppResult<()>;
}

/// Drives Calendar.app through JXA via the osascript binary
#[derive(Debug, Clone, Copy, Default)]
pub struct OsaScriptAutomation;

#[async_trait]
impl CalendarAutomation for OsaScriptAutomation {
    async fn create_event(&self, draft: &EventDraft, calendar_name: &str) -> AppResult<()> {
        info!("Creating event '{}' in calendar '{}'", draft.title, calendar_name);
        let script = create_event_script(draft, calendar_name)?;
        run_jxa(&script).await
    }

    async fn focus_calendar_view(&self, date: DateTime<Local>) -> AppResult<()> {
        let script = format!(
            r#"var app = Application.currentApplication()
app.includeStandardAdditions = true
var Calendar = Application("Calendar")
var date = new Date({})
Calendar.viewCalendar({{at: date}})"#,
            date.timestamp_millis()
        );
        run_jxa(&script).await
    }
}

/// Render the JXA that creates the event with its attendees
fn create_event_script(draft: &EventDraft, calendar_name: &str) -> AppResult<String> {
    let summary = serde_json::to_string(&draft.title)?;
    let calendar = serde_json::to_string(calendar_name)?;
    let recurrence = serde_json::to_string(draft.recurrence_rule.as_deref().unwrap_or(""))?;
    let invitees = serde_json::to_string(&draft.invitees)?;

    Ok(format!(
        r#"var app = Application.currentApplication()
app.includeStandardAdditions = true
var Calendar = Application("Calendar")

var eventStart = new Date({start})
var eventEnd = new Date({end})

var projectCalendars = Calendar.calendars.whose({{name: {calendar}}})
var projectCalendar = projectCalendars[0]
var event = Calendar.Event({{
  summary: {summary},
  startDate: eventStart,
  endDate: eventEnd,
  alldayEvent: {all_day},
  recurrence: {recurrence},
}})
projectCalendar.events.push(event)

var invitees = {invitees}
if (invitees.length > 0) {{
  invitees.forEach(function(email) {{
    try {{
      event.attendees.push(Calendar.Attendee({{email: email}}))
    }} catch (pushError) {{
      try {{
        event.make({{new: 'attendee', withProperties: {{email: email}}}})
      }} catch (_) {{}}
    }}
  }})
}}"#,
        start = draft.start.timestamp_millis(),
        end = draft.end.timestamp_millis(),
        calendar = calendar,
        summary = summary,
        all_day = draft.is_all_day,
        recurrence = recurrence,
        invitees = invitees,
    ))
}

/// Run a JXA script to completion, mapping failure to an automation error
async fn run_jxa(script: &str) -> AppResult<()> {
    let output = Command::new("osascript")
        .arg("-l")
        .arg("JavaScript")
        .arg("-e")
        .arg(script)
        .output()
        .await
        .map_err(|e| automation_error(&format!("Could not run osascript: {}", e)))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = stderr
            .trim()
            .strip_prefix("execution error: Error: ")
            .unwrap_or(stderr.trim());
        Err(automation_error(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> EventDraft {
        EventDraft {
            id: "draft-1".to_string(),
            title: "Team \"sync\"".to_string(),
            start: Local.with_ymd_and_hms(2023, 1, 2, 13, 0, 0).unwrap(),
            end: Local.with_ymd_and_hms(2023, 1, 2, 14, 0, 0).unwrap(),
            is_all_day: false,
            invitees: vec!["alice@x.com".to_string()],
            recurrence_rule: Some("FREQ=WEEKLY;INTERVAL=1;BYDAY=MO".to_string()),
            recurrence_description: Some("Every Mon".to_string()),
        }
    }

    #[test]
    fn test_create_event_script_escapes_strings() {
        let script = create_event_script(&draft(), "Work").unwrap();
        assert!(script.contains(r#"summary: "Team \"sync\"""#));
        assert!(script.contains(r#"whose({name: "Work"})"#));
        assert!(script.contains(r#"recurrence: "FREQ=WEEKLY;INTERVAL=1;BYDAY=MO""#));
        assert!(script.contains(r#"var invitees = ["alice@x.com"]"#));
        assert!(script.contains("alldayEvent: false"));
    }

    #[test]
    fn test_create_event_script_without_recurrence() {
        let mut plain = draft();
        plain.recurrence_rule = None;
        plain.recurrence_description = None;
        let script = create_event_script(&plain, "Home").unwrap();
        assert!(script.contains(r#"recurrence: """#));
    }
}
