use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Weekday};
use lazy_static::lazy_static;
use regex::Regex;

use super::models::ParsedFragment;
use super::time::next_time_of_day;

/// Best-effort date/title extraction over a sanitized text fragment.
///
/// Implementations must tolerate arbitrary free text and never fail; an
/// all-`None` fragment is the correct answer for unparseable input.
pub trait FragmentParser: Send + Sync {
    fn parse(&self, text: &str, now: DateTime<Local>) -> ParsedFragment;
}

lazy_static! {
    static ref AT_TIME_RE: Regex =
        Regex::new(r"(?i)\bat\s+(\d{1,2})(?::(\d{2}))?\s*(am|pm)?\b").unwrap();
    static ref CLOCK_TIME_RE: Regex = Regex::new(r"(?i)\b(\d{1,2}):(\d{2})\s*(am|pm)?\b").unwrap();
    static ref MERIDIEM_TIME_RE: Regex = Regex::new(r"(?i)\b(\d{1,2})\s*(am|pm)\b").unwrap();
    static ref RELATIVE_DAY_RE: Regex = Regex::new(r"(?i)\b(today|tonight|tomorrow)\b").unwrap();
    static ref WEEKDAY_RE: Regex = Regex::new(
        r"(?i)\b(?:(?:on|next)\s+(mon|tue|wed|thu|fri|sat|sun)[a-z]*|(monday|tuesday|wednesday|thursday|friday|saturday|sunday))\b"
    )
    .unwrap();
    static ref WHITESPACE_RUN_RE: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Pattern-based fragment parser covering clock times, today/tomorrow and
/// weekday references. Anything it does not recognize stays in the title.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicParser;

impl FragmentParser for HeuristicParser {
    fn parse(&self, text: &str, now: DateTime<Local>) -> ParsedFragment {
        let mut spans: Vec<(usize, usize)> = Vec::new();

        let time = match_time(text, &mut spans);
        let day = match_day(text, now, &mut spans);

        let (start, is_all_day) = match (day, time) {
            (Some(day), Some((hour, minute))) => {
                let start = day
                    .date
                    .and_hms_opt(hour, minute, 0)
                    .and_then(|naive| Local.from_local_datetime(&naive).single());
                // A weekday reference whose time already passed means next week
                let start = match start {
                    Some(s) if day.from_weekday && s <= now => Some(s + Duration::days(7)),
                    other => other,
                };
                (start, false)
            }
            (Some(day), None) => {
                let start = day
                    .date
                    .and_hms_opt(0, 0, 0)
                    .and_then(|naive| Local.from_local_datetime(&naive).single());
                (start, start.is_some())
            }
            (None, Some((hour, minute))) => (next_time_of_day(now, hour, minute), false),
            (None, None) => (None, false),
        };

        ParsedFragment {
            title: title_without_spans(text, spans),
            start,
            end: None,
            is_all_day,
        }
    }
}

struct DayMatch {
    date: NaiveDate,
    from_weekday: bool,
}

/// First clock-time mention, as (hour, minute) in 24h form
fn match_time(text: &str, spans: &mut Vec<(usize, usize)>) -> Option<(u32, u32)> {
    for re in [&*AT_TIME_RE, &*CLOCK_TIME_RE, &*MERIDIEM_TIME_RE] {
        if let Some(captures) = re.captures(text) {
            let hour: u32 = captures.get(1)?.as_str().parse().ok()?;
            let minute: u32 = captures
                .get(2)
                .filter(|m| !m.as_str().chars().any(|c| c.is_alphabetic()))
                .map(|m| m.as_str().parse().ok())
                .unwrap_or(Some(0))?;
            let meridiem = captures
                .iter()
                .skip(2)
                .flatten()
                .find(|m| m.as_str().chars().all(|c| c.is_alphabetic()))
                .map(|m| m.as_str().to_lowercase());

            let hour = match meridiem.as_deref() {
                Some("pm") if hour < 12 => hour + 12,
                Some("am") if hour == 12 => 0,
                _ => hour,
            };
            if hour > 23 || minute > 59 {
                continue;
            }

            let whole = captures.get(0)?;
            spans.push((whole.start(), whole.end()));
            return Some((hour, minute));
        }
    }
    None
}

/// First day mention: today/tonight/tomorrow, or a weekday reference
fn match_day(text: &str, now: DateTime<Local>, spans: &mut Vec<(usize, usize)>) -> Option<DayMatch> {
    if let Some(captures) = RELATIVE_DAY_RE.captures(text) {
        let whole = captures.get(0)?;
        spans.push((whole.start(), whole.end()));
        let date = match captures[1].to_lowercase().as_str() {
            "tomorrow" => now.date_naive() + Duration::days(1),
            _ => now.date_naive(),
        };
        return Some(DayMatch {
            date,
            from_weekday: false,
        });
    }

    let captures = WEEKDAY_RE.captures(text)?;
    let token = captures
        .get(1)
        .or_else(|| captures.get(2))?
        .as_str()
        .to_lowercase();
    let weekday = weekday_from_prefix(&token)?;

    let whole = captures.get(0)?;
    spans.push((whole.start(), whole.end()));

    let days_ahead = (weekday.num_days_from_monday() + 7 - now.weekday().num_days_from_monday()) % 7;
    Some(DayMatch {
        date: now.date_naive() + Duration::days(i64::from(days_ahead)),
        from_weekday: true,
    })
}

fn weekday_from_prefix(token: &str) -> Option<Weekday> {
    let prefixes = [
        ("mon", Weekday::Mon),
        ("tue", Weekday::Tue),
        ("wed", Weekday::Wed),
        ("thu", Weekday::Thu),
        ("fri", Weekday::Fri),
        ("sat", Weekday::Sat),
        ("sun", Weekday::Sun),
    ];
    prefixes
        .iter()
        .find(|(prefix, _)| token.starts_with(prefix))
        .map(|(_, weekday)| *weekday)
}

/// Remaining text once matched spans are cut out, whitespace-collapsed
fn title_without_spans(text: &str, mut spans: Vec<(usize, usize)>) -> Option<String> {
    let mut title = text.to_string();
    spans.sort_by_key(|(start, _)| std::cmp::Reverse(*start));
    for (start, end) in spans {
        title.replace_range(start..end, "");
    }
    let title = WHITESPACE_RUN_RE
        .replace_all(title.trim(), " ")
        .trim()
        .to_string();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}
