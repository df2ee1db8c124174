use lazy_static::lazy_static;
use regex::Regex;

/// Frequency class of a recurrence rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }
}

/// How a simple pattern derives its interval and description
enum IntervalSpec {
    /// Interval captured from the text, e.g. "every 2 weeks"
    FromCapture { unit: &'static str },
    /// Fixed interval of one with a fixed description, e.g. "weekly"
    One { description: &'static str },
}

/// One row of the ordered fixed-interval/simple pattern table
struct SimplePattern {
    regex: Regex,
    frequency: Frequency,
    interval: IntervalSpec,
}

/// Day-name prefixes mapped to their two-letter codes
const DAY_CODES: [(&str, &str); 7] = [
    ("mon", "MO"),
    ("tue", "TU"),
    ("wed", "WE"),
    ("thu", "TH"),
    ("fri", "FR"),
    ("sat", "SA"),
    ("sun", "SU"),
];

lazy_static! {
    /// "every Mon, Tue and Fri" style day enumerations
    static ref DAY_LIST_RE: Regex = Regex::new(
        r"(?i)\bevery\s+((?:(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*,?\s*(?:and\s+)?)+)\b"
    )
    .unwrap();

    /// Fixed-interval and simple patterns; order is significant, the first
    /// matching row wins and no further rows are tried
    static ref SIMPLE_PATTERNS: Vec<SimplePattern> = vec![
        numeric(r"(?i)\bevery\s+(\d+)\s+days?\b", Frequency::Daily, "day"),
        numeric(r"(?i)\bevery\s+(\d+)\s+weeks?\b", Frequency::Weekly, "week"),
        numeric(r"(?i)\bevery\s+(\d+)\s+months?\b", Frequency::Monthly, "month"),
        numeric(r"(?i)\bevery\s+(\d+)\s+years?\b", Frequency::Yearly, "year"),
        fixed(r"(?i)\bevery\s+day\b", Frequency::Daily, "Daily"),
        fixed(r"(?i)\bdaily\b", Frequency::Daily, "Daily"),
        fixed(r"(?i)\bevery\s+week\b", Frequency::Weekly, "Weekly"),
        fixed(r"(?i)\bweekly\b", Frequency::Weekly, "Weekly"),
        fixed(r"(?i)\bevery\s+month\b", Frequency::Monthly, "Monthly"),
        fixed(r"(?i)\bmonthly\b", Frequency::Monthly, "Monthly"),
        fixed(r"(?i)\bevery\s+year\b", Frequency::Yearly, "Yearly"),
        fixed(r"(?i)\byearly\b", Frequency::Yearly, "Yearly"),
    ];
}

fn numeric(pattern: &str, frequency: Frequency, unit: &'static str) -> SimplePattern {
    SimplePattern {
        regex: Regex::new(pattern).unwrap(),
        frequency,
        interval: IntervalSpec::FromCapture { unit },
    }
}

fn fixed(pattern: &str, frequency: Frequency, description: &'static str) -> SimplePattern {
    SimplePattern {
        regex: Regex::new(pattern).unwrap(),
        frequency,
        interval: IntervalSpec::One { description },
    }
}

/// Result of matching recurrence phrases against a text fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceExtraction {
    pub rule: Option<String>,
    pub description: Option<String>,
    pub residual: String,
}

/// Extract a recurrence phrase from the text.
///
/// Day-of-week enumerations are checked first and short-circuit the
/// fixed-interval table. The matched span is removed from the residual.
pub fn extract_recurrence(text: &str) -> RecurrenceExtraction {
    if let Some(extraction) = extract_day_enumeration(text) {
        return extraction;
    }

    for pattern in SIMPLE_PATTERNS.iter() {
        if let Some(captures) = pattern.regex.captures(text) {
            let (interval, description) = match &pattern.interval {
                IntervalSpec::FromCapture { unit } => {
                    // The capture is \d+, parse cannot fail for practical intervals
                    let n: u32 = captures[1].parse().unwrap_or(1);
                    (n, format!("Every {} {}s", n, unit))
                }
                IntervalSpec::One { description } => (1, description.to_string()),
            };

            return RecurrenceExtraction {
                rule: Some(format!(
                    "FREQ={};INTERVAL={}",
                    pattern.frequency.as_str(),
                    interval
                )),
                description: Some(description),
                residual: pattern.regex.replace(text, "").trim().to_string(),
            };
        }
    }

    RecurrenceExtraction {
        rule: None,
        description: None,
        residual: text.to_string(),
    }
}

/// Phase A: "every <day[, day][ and day]>" enumerations
fn extract_day_enumeration(text: &str) -> Option<RecurrenceExtraction> {
    let captures = DAY_LIST_RE.captures(text)?;

    let days: Vec<String> = captures[1]
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|d| !d.is_empty() && *d != "and")
        .map(str::to_string)
        .collect();

    let by_day: Vec<&str> = days
        .iter()
        .filter_map(|day| {
            DAY_CODES
                .iter()
                .find(|(prefix, _)| day.starts_with(prefix))
                .map(|(_, code)| *code)
        })
        .collect();

    if by_day.is_empty() {
        return None;
    }

    Some(RecurrenceExtraction {
        rule: Some(format!("FREQ=WEEKLY;INTERVAL=1;BYDAY={}", by_day.join(","))),
        description: Some(format!(
            "Every {}",
            days.iter().map(|d| capitalize(d)).collect::<Vec<_>>().join(", ")
        )),
        residual: DAY_LIST_RE.replace(text, "").trim().to_string(),
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
