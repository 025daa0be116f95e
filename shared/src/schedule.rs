//! # Course Schedule Parsing and Overlap Detection
//!
//! Courses store their meeting pattern as free text of the form
//! `DAYS HH:MM-HH:MM`, e.g. `"MWF 09:00-10:00"` or `"TTH 14:00-15:30"`.
//! `DAYS` is a concatenation of day tokens drawn from
//! `{M, T, W, TH, F, S, SU}` — note `TH` (Thursday) is two characters and
//! must be tokenized greedily before the single-character `T` (Tuesday),
//! or "TTH" parses as Tuesday+Tuesday+Hm instead of Tuesday+Thursday.
//!
//! Two schedules conflict iff their day sets share at least one day *and*
//! their time intervals overlap using a half-open comparison
//! (`start1 < end2 && start2 < end1`) — courses that merely touch
//! endpoints (one ends exactly when the other starts) do not conflict.

use std::collections::HashSet;
use std::fmt;

/// A single day of the week a course meets on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Day::Monday => "M",
            Day::Tuesday => "T",
            Day::Wednesday => "W",
            Day::Thursday => "TH",
            Day::Friday => "F",
            Day::Saturday => "S",
            Day::Sunday => "SU",
        };
        write!(f, "{token}")
    }
}

/// A parsed course schedule: the set of days it meets, plus a single
/// start/end time shared across all of them (minutes since midnight).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub days: HashSet<Day>,
    pub start_minutes: u32,
    pub end_minutes: u32,
}

/// Error returned when a schedule string doesn't match `DAYS HH:MM-HH:MM`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid schedule string: {0}")]
pub struct ScheduleParseError(pub String);

impl Schedule {
    /// Parses a schedule string such as `"MWF 09:00-10:00"`.
    pub fn parse(raw: &str) -> Result<Self, ScheduleParseError> {
        let raw = raw.trim();
        let (days_part, time_part) = raw
            .split_once(' ')
            .ok_or_else(|| ScheduleParseError(raw.to_string()))?;

        let days = parse_days(days_part).ok_or_else(|| ScheduleParseError(raw.to_string()))?;
        if days.is_empty() {
            return Err(ScheduleParseError(raw.to_string()));
        }

        let (start_str, end_str) = time_part
            .split_once('-')
            .ok_or_else(|| ScheduleParseError(raw.to_string()))?;

        let start_minutes =
            parse_time(start_str).ok_or_else(|| ScheduleParseError(raw.to_string()))?;
        let end_minutes = parse_time(end_str).ok_or_else(|| ScheduleParseError(raw.to_string()))?;

        if end_minutes <= start_minutes {
            return Err(ScheduleParseError(raw.to_string()));
        }

        Ok(Schedule {
            days,
            start_minutes,
            end_minutes,
        })
    }

    /// Returns `true` if `self` and `other` share at least one meeting day
    /// and their time intervals overlap (half-open, touching endpoints
    /// don't count as a conflict).
    pub fn conflicts_with(&self, other: &Schedule) -> bool {
        let shares_day = self.days.intersection(&other.days).next().is_some();
        if !shares_day {
            return false;
        }

        self.start_minutes < other.end_minutes && other.start_minutes < self.end_minutes
    }
}

fn parse_days(days_part: &str) -> Option<HashSet<Day>> {
    let mut days = HashSet::new();
    let chars: Vec<char> = days_part.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        // Greedily match the two-character "TH" token before falling back
        // to single-character tokens; otherwise "TTH" (Tue+Thu) parses as
        // three bogus single-char days.
        if chars[i] == 'T' && chars.get(i + 1) == Some(&'H') {
            days.insert(Day::Thursday);
            i += 2;
            continue;
        }
        if chars[i] == 'S' && chars.get(i + 1) == Some(&'U') {
            days.insert(Day::Sunday);
            i += 2;
            continue;
        }

        let day = match chars[i] {
            'M' => Day::Monday,
            'T' => Day::Tuesday,
            'W' => Day::Wednesday,
            'F' => Day::Friday,
            'S' => Day::Saturday,
            _ => return None,
        };
        days.insert(day);
        i += 1;
    }

    Some(days)
}

fn parse_time(value: &str) -> Option<u32> {
    let (hh, mm) = value.split_once(':')?;
    let hh: u32 = hh.parse().ok()?;
    let mm: u32 = mm.parse().ok()?;
    if hh > 23 || mm > 59 {
        return None;
    }
    Some(hh * 60 + mm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mwf() {
        let schedule = Schedule::parse("MWF 09:00-10:00").unwrap();
        assert_eq!(
            schedule.days,
            HashSet::from([Day::Monday, Day::Wednesday, Day::Friday])
        );
        assert_eq!(schedule.start_minutes, 540);
        assert_eq!(schedule.end_minutes, 600);
    }

    #[test]
    fn test_parse_greedily_tokenizes_th_before_t() {
        let schedule = Schedule::parse("TTH 09:00-10:00").unwrap();
        assert_eq!(schedule.days, HashSet::from([Day::Tuesday, Day::Thursday]));
    }

    #[test]
    fn test_parse_rejects_end_before_start() {
        assert!(Schedule::parse("MWF 10:00-09:00").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_string() {
        assert!(Schedule::parse("garbage").is_err());
        assert!(Schedule::parse("MWF 9-10").is_err());
    }

    #[test]
    fn test_overlapping_days_and_times_conflict() {
        let a = Schedule::parse("MWF 09:00-10:00").unwrap();
        let b = Schedule::parse("MW 09:30-10:30").unwrap();
        assert!(a.conflicts_with(&b));
    }

    #[test]
    fn test_disjoint_days_do_not_conflict() {
        let a = Schedule::parse("TTH 09:00-10:00").unwrap();
        let b = Schedule::parse("MWF 09:00-10:00").unwrap();
        assert!(!a.conflicts_with(&b));
    }

    #[test]
    fn test_touching_endpoints_do_not_conflict() {
        let a = Schedule::parse("MWF 09:00-10:00").unwrap();
        let b = Schedule::parse("MWF 10:00-11:00").unwrap();
        assert!(!a.conflicts_with(&b));
    }
}
