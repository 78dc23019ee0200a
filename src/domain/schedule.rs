use chrono::{NaiveTime, Timelike};
use thiserror::Error;

/// Default hours of sleep used to place the end-of-day anchors
pub const DEFAULT_SLEEP_HOURS: f64 = 7.5;

/// Line shown in place of the routine when the wake time cannot be parsed
pub const INVALID_TIME_LINE: &str = "Invalid time format";

const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("Invalid time format {0:?}. Use HH:MM (e.g., 09:00)")]
    InvalidTimeFormat(String),
    #[error("Sleep hours must be between 0 and 24, got {0}")]
    InvalidSleepHours(f64),
}

/// Colour hint for a routine line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleTone {
    Wake,
    Sleep,
    Caffeine,
    Plain,
}

/// One activity of the daily routine
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    /// Hours after waking
    pub offset_hours: f64,
    /// Wall-clock time, wrapped past midnight
    pub clock_time: NaiveTime,
    pub activity: &'static str,
}

impl ScheduleEntry {
    /// Render as "{offset}h | HH:MM | activity"
    pub fn display_line(&self) -> String {
        format!(
            "{:4.1}h | {} | {}",
            self.offset_hours,
            self.clock_time.format("%H:%M"),
            self.activity
        )
    }

    pub fn tone(&self) -> ScheduleTone {
        if self.activity.contains("Wake") {
            ScheduleTone::Wake
        } else if self.activity.contains("Sleep") {
            ScheduleTone::Sleep
        } else if self.activity.contains("Caffeine") {
            ScheduleTone::Caffeine
        } else {
            ScheduleTone::Plain
        }
    }
}

/// Parse "HH:MM" (24-hour) into a time of day
pub fn parse_wake_time(input: &str) -> Result<NaiveTime, ScheduleError> {
    let invalid = || ScheduleError::InvalidTimeFormat(input.to_string());

    let (hours, minutes) = input.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;

    // from_hms_opt rejects hour >= 24 and minute >= 60
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid)
}

/// Accept sleep hours in [0, 24); rejects NaN and infinities
pub fn validate_sleep_hours(sleep_hours: f64) -> Result<f64, ScheduleError> {
    if (0.0..24.0).contains(&sleep_hours) {
        Ok(sleep_hours)
    } else {
        Err(ScheduleError::InvalidSleepHours(sleep_hours))
    }
}

/// Build the daily routine anchored to `wake_time`.
///
/// Entries come back in table order, which is also offset order; wrapping
/// past midnight only changes the clock time shown.
pub fn generate(wake_time: &str, sleep_hours: f64) -> Result<Vec<ScheduleEntry>, ScheduleError> {
    let wake = parse_wake_time(wake_time)?;
    let sleep_hours = validate_sleep_hours(sleep_hours)?;
    let wake_minutes = (wake.hour() * 60 + wake.minute()) as i64;
    let wake_window = 24.0 - sleep_hours;

    let table: [(&'static str, f64); 9] = [
        ("Wake up", 0.0),
        ("Cold Shower + 50mg Caffeine", 1.5),
        ("Meal 1", 2.0),
        ("50mg Caffeine", 5.0),
        ("Meal 2", 8.0),
        ("Breakpoint -> AAR -> Snack", 12.0),
        ("Meal 3 -> Stretch", wake_window - 1.5),
        ("Bed time", wake_window - 0.25),
        ("Sleep", wake_window + 0.25),
    ];

    Ok(table
        .into_iter()
        .map(|(activity, offset_hours)| {
            let total = wake_minutes
                .saturating_add((offset_hours * 60.0) as i64)
                .rem_euclid(MINUTES_PER_DAY);
            ScheduleEntry {
                offset_hours,
                clock_time: NaiveTime::from_hms_opt((total / 60) as u32, (total % 60) as u32, 0)
                    .unwrap_or(NaiveTime::MIN),
                activity,
            }
        })
        .collect())
}

/// Line shown in place of the routine for a generation error
pub fn error_line(error: &ScheduleError) -> String {
    match error {
        ScheduleError::InvalidTimeFormat(_) => INVALID_TIME_LINE.to_string(),
        ScheduleError::InvalidSleepHours(_) => error.to_string(),
    }
}

/// Routine as display lines, or a single error line for bad input
pub fn schedule_lines(wake_time: &str, sleep_hours: f64) -> Vec<String> {
    match generate(wake_time, sleep_hours) {
        Ok(entries) => entries.iter().map(ScheduleEntry::display_line).collect(),
        Err(e) => {
            tracing::debug!(error = %e, "schedule not generated");
            vec![error_line(&e)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn clock(entries: &[ScheduleEntry], activity: &str) -> String {
        entries
            .iter()
            .find(|e| e.activity == activity)
            .map(|e| e.clock_time.format("%H:%M").to_string())
            .unwrap()
    }

    #[test]
    fn test_generate_nine_o_clock() {
        let entries = generate("09:00", DEFAULT_SLEEP_HOURS).unwrap();
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[0].activity, "Wake up");
        assert_eq!(entries[0].offset_hours, 0.0);
        assert_eq!(clock(&entries, "Wake up"), "09:00");
        assert_eq!(clock(&entries, "Meal 2"), "17:00");
        assert_eq!(clock(&entries, "Meal 3 -> Stretch"), "00:00");
        assert_eq!(clock(&entries, "Bed time"), "01:15");
        assert_eq!(clock(&entries, "Sleep"), "01:45");
    }

    #[test]
    fn test_generate_wraps_past_midnight() {
        let entries = generate("23:00", DEFAULT_SLEEP_HOURS).unwrap();
        assert_eq!(clock(&entries, "Cold Shower + 50mg Caffeine"), "00:30");
        assert_eq!(clock(&entries, "Meal 1"), "01:00");
    }

    #[test]
    fn test_generate_keeps_table_order() {
        let entries = generate("23:00", DEFAULT_SLEEP_HOURS).unwrap();
        let activities: Vec<&str> = entries.iter().map(|e| e.activity).collect();
        assert_eq!(
            activities,
            vec![
                "Wake up",
                "Cold Shower + 50mg Caffeine",
                "Meal 1",
                "50mg Caffeine",
                "Meal 2",
                "Breakpoint -> AAR -> Snack",
                "Meal 3 -> Stretch",
                "Bed time",
                "Sleep",
            ]
        );
        assert!(entries.windows(2).all(|w| w[0].offset_hours <= w[1].offset_hours));
    }

    #[test]
    fn test_generate_custom_sleep_hours() {
        let entries = generate("06:30", 8.0).unwrap();
        // 16h wake window: sleep at +16.25h
        assert_eq!(entries[8].offset_hours, 16.25);
        assert_eq!(clock(&entries, "Sleep"), "22:45");
    }

    #[test]
    fn test_generate_rejects_bad_input() {
        for input in ["not-a-time", "", "9", "09:", ":30", "25:00", "09:60", "ab:cd", "-1:30"] {
            assert!(
                matches!(generate(input, DEFAULT_SLEEP_HOURS), Err(ScheduleError::InvalidTimeFormat(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_generate_rejects_bad_sleep_hours() {
        for sleep_hours in [f64::NAN, -1e20, 1e20, -0.5, 24.0, f64::INFINITY] {
            assert!(
                matches!(generate("09:00", sleep_hours), Err(ScheduleError::InvalidSleepHours(_))),
                "{sleep_hours} should be rejected"
            );
        }
        assert!(generate("09:00", 0.0).is_ok());
        assert!(generate("09:00", 23.5).is_ok());
    }

    #[test]
    fn test_schedule_lines_bad_sleep_hours() {
        let lines = schedule_lines("09:00", f64::NAN);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Sleep hours must be between 0 and 24"));
        assert!(!lines[0].contains("NaNh"));
    }

    #[test]
    fn test_parse_wake_time() {
        assert_eq!(parse_wake_time("7:05").unwrap(), NaiveTime::from_hms_opt(7, 5, 0).unwrap());
        assert_eq!(parse_wake_time(" 00:00 ").unwrap(), NaiveTime::MIN);
        assert!(parse_wake_time("23:59").is_ok());
        assert!(parse_wake_time("24:00").is_err());
    }

    #[test]
    fn test_display_line() {
        let entries = generate("09:00", DEFAULT_SLEEP_HOURS).unwrap();
        assert_eq!(entries[0].display_line(), " 0.0h | 09:00 | Wake up");
        assert_eq!(entries[4].display_line(), " 8.0h | 17:00 | Meal 2");
        assert_eq!(entries[5].display_line(), "12.0h | 21:00 | Breakpoint -> AAR -> Snack");
    }

    #[test]
    fn test_schedule_lines_sentinel() {
        assert_eq!(schedule_lines("not-a-time", DEFAULT_SLEEP_HOURS), vec![INVALID_TIME_LINE.to_string()]);
        assert_eq!(schedule_lines("09:00", DEFAULT_SLEEP_HOURS).len(), 9);
    }

    #[test]
    fn test_tone() {
        let entries = generate("09:00", DEFAULT_SLEEP_HOURS).unwrap();
        let tones: Vec<ScheduleTone> = entries.iter().map(ScheduleEntry::tone).collect();
        assert_eq!(tones[0], ScheduleTone::Wake);
        assert_eq!(tones[1], ScheduleTone::Caffeine);
        assert_eq!(tones[2], ScheduleTone::Plain);
        assert_eq!(tones[3], ScheduleTone::Caffeine);
        assert_eq!(tones[8], ScheduleTone::Sleep);
    }
}
