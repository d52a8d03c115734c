//! Relative-time phrases ("5 mins ago") for the timestamp renderer.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y/%m/%d %H:%M:%S%.f %z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
];

/// Display strings, keyed the way the jQuery timeago settings table is so a
/// page can paste its existing table into the config blob.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeagoStrings {
    pub prefix_ago: Option<String>,
    pub prefix_from_now: Option<String>,
    pub suffix_ago: Option<String>,
    pub suffix_from_now: Option<String>,
    pub seconds: String,
    pub minute: String,
    pub minutes: String,
    pub hour: String,
    pub hours: String,
    pub day: String,
    pub days: String,
    pub month: String,
    pub months: String,
    pub year: String,
    pub years: String,
    pub word_separator: String,
    pub numbers: Vec<String>,
}

impl Default for TimeagoStrings {
    fn default() -> Self {
        TimeagoStrings {
            prefix_ago: None,
            prefix_from_now: None,
            suffix_ago: Some("ago".into()),
            suffix_from_now: Some("from now".into()),
            seconds: "1 min".into(),
            minute: "1 min".into(),
            minutes: "%d mins".into(),
            hour: "1 hour".into(),
            hours: "%d hours".into(),
            day: "1 day".into(),
            days: "%d days".into(),
            month: "1 month".into(),
            months: "%d months".into(),
            year: "1 year".into(),
            years: "%d years".into(),
            word_separator: " ".into(),
            numbers: Vec::new(),
        }
    }
}

impl TimeagoStrings {
    fn substitute(&self, template: &str, number: f64) -> String {
        let number = number as u64;
        let value = self
            .numbers
            .get(number as usize)
            .filter(|localized| !localized.is_empty())
            .cloned()
            .unwrap_or_else(|| number.to_string());

        template.replacen("%d", &value, 1)
    }

    /// Phrase for an instant `distance_millis` in the past (negative means
    /// the future). Future instants only get the "from now" wording when
    /// `allow_future` is set; otherwise they read as "ago" like past ones.
    pub fn in_words(&self, distance_millis: i64, allow_future: bool) -> String {
        let (prefix, suffix) = if allow_future && distance_millis < 0 {
            (&self.prefix_from_now, &self.suffix_from_now)
        } else {
            (&self.prefix_ago, &self.suffix_ago)
        };

        let seconds = distance_millis.unsigned_abs() as f64 / 1000.0;
        let minutes = seconds / 60.0;
        let hours = minutes / 60.0;
        let days = hours / 24.0;
        let years = days / 365.0;

        let words = if seconds < 45.0 {
            self.substitute(&self.seconds, seconds.round())
        } else if seconds < 90.0 {
            self.substitute(&self.minute, 1.0)
        } else if minutes < 45.0 {
            self.substitute(&self.minutes, minutes.round())
        } else if minutes < 90.0 {
            self.substitute(&self.hour, 1.0)
        } else if hours < 24.0 {
            self.substitute(&self.hours, hours.round())
        } else if hours < 42.0 {
            self.substitute(&self.day, 1.0)
        } else if days < 30.0 {
            self.substitute(&self.days, days.round())
        } else if days < 45.0 {
            self.substitute(&self.month, 1.0)
        } else if days < 365.0 {
            self.substitute(&self.months, (days / 30.0).round())
        } else if years < 1.5 {
            self.substitute(&self.year, 1.0)
        } else {
            self.substitute(&self.years, years.round())
        };

        [prefix.as_deref(), Some(words.as_str()), suffix.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(&self.word_separator)
            .trim()
            .to_owned()
    }

    pub fn relative(&self, instant: DateTime<Utc>, now: DateTime<Utc>, allow_future: bool) -> String {
        self.in_words((now - instant).num_milliseconds(), allow_future)
    }
}

/// Parses the machine-readable timestamps forum templates emit. Timestamps
/// without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(raw, format) {
            return Some(instant.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    let midnight = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    const SECOND: i64 = 1000;
    const MINUTE: i64 = 60 * SECOND;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    fn words(distance: i64) -> String {
        TimeagoStrings::default().in_words(distance, false)
    }

    #[test]
    fn thresholds() {
        assert_eq!(words(0), "1 min ago");
        assert_eq!(words(30 * SECOND), "1 min ago");
        assert_eq!(words(80 * SECOND), "1 min ago");
        assert_eq!(words(5 * MINUTE), "5 mins ago");
        assert_eq!(words(44 * MINUTE), "44 mins ago");
        assert_eq!(words(45 * MINUTE), "1 hour ago");
        assert_eq!(words(3 * HOUR), "3 hours ago");
        assert_eq!(words(30 * HOUR), "1 day ago");
        assert_eq!(words(5 * DAY), "5 days ago");
        assert_eq!(words(35 * DAY), "1 month ago");
        assert_eq!(words(100 * DAY), "3 months ago");
        assert_eq!(words(400 * DAY), "1 year ago");
        assert_eq!(words(800 * DAY), "2 years ago");
    }

    #[test]
    fn future_needs_opt_in() {
        let strings = TimeagoStrings::default();
        assert_eq!(strings.in_words(-5 * MINUTE, false), "5 mins ago");
        assert_eq!(strings.in_words(-5 * MINUTE, true), "5 mins from now");
    }

    #[test]
    fn prefixes_numbers_and_separator() {
        let strings = TimeagoStrings {
            prefix_ago: Some("vor".into()),
            suffix_ago: None,
            word_separator: "_".into(),
            numbers: vec!["zero".into(), "one".into(), "two".into()],
            ..TimeagoStrings::default()
        };
        assert_eq!(strings.in_words(2 * HOUR, false), "vor_two hours");
        assert_eq!(strings.in_words(7 * HOUR, false), "vor_7 hours");
    }

    #[test]
    fn reads_jquery_style_keys() {
        let strings: TimeagoStrings =
            serde_json::from_str(r#"{"suffixAgo": "back", "wordSeparator": "", "minutes": "%dm"}"#)
                .unwrap();
        assert_eq!(strings.in_words(3 * MINUTE, false), "3mback");
        assert_eq!(strings.hours, "%d hours");
    }

    #[test]
    fn relative_between_instants() {
        let then = parse_timestamp("2014-03-01T10:00:00Z").unwrap();
        let now = then + Duration::minutes(12);
        assert_eq!(
            TimeagoStrings::default().relative(then, now, false),
            "12 mins ago"
        );
    }

    #[test]
    fn parses_common_formats() {
        let expected = Utc.with_ymd_and_hms(2014, 3, 1, 10, 0, 0).unwrap();
        for raw in [
            "2014-03-01T10:00:00Z",
            "2014-03-01T12:00:00+02:00",
            " 2014-03-01T10:00:00.250Z ",
            "2014-03-01 10:00:00 +0000",
            "2014-03-01 10:00:00",
            "2014-03-01T10:00:00",
        ] {
            let parsed = parse_timestamp(raw).unwrap();
            assert_eq!(parsed.timestamp(), expected.timestamp(), "{}", raw);
        }

        assert_eq!(
            parse_timestamp("2014-03-01"),
            Some(Utc.with_ymd_and_hms(2014, 3, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn rejects_prose() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("5 mins ago"), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
