//! Decoding of a single line of a WDC formatted Kp file.
//!
//! Each line holds one calendar day. The columns used, 0-indexed and half open, are
//!
//! | Columns  | Field                      |
//! |----------|----------------------------|
//! | [0, 2)   | year, 2 digits after 2000  |
//! | [2, 4)   | month                      |
//! | [4, 6)   | day                        |
//! | [12, 28) | 8 Kp values, 2 chars each  |
//! | [31, 55) | 8 ap values, 3 chars each  |
//!
//! Everything else on the line (Bartels rotation, daily sums, Cp, sunspot numbers in old files)
//! is ignored.

use crate::{
    errors::{Field, RecordErr},
    reading::Reading,
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::ops::Range;
use tracing::warn;

/// The fixed column layout.
pub(crate) struct Layout;

impl Layout {
    const YEAR: Range<usize> = 0..2;
    const MONTH: Range<usize> = 2..4;
    const DAY: Range<usize> = 4..6;
    const KP_START: usize = 12;
    const KP_WIDTH: usize = 2;
    const AP_START: usize = 31;
    const AP_WIDTH: usize = 3;

    /// Number of three hour slots on a line.
    pub(crate) const SLOTS: usize = 8;
    const SLOT_HOURS: i64 = 3;

    const KP_SENTINEL: &'static str = "99";
    const AP_SENTINEL: &'static str = "   ";
    const KP_MAX: u32 = 90;

    // Two digit years have no century, assume this one.
    const CENTURY: i32 = 2000;

    fn kp_columns(slot: usize) -> Range<usize> {
        let start = Self::KP_START + slot * Self::KP_WIDTH;
        start..(start + Self::KP_WIDTH)
    }

    fn ap_columns(slot: usize) -> Range<usize> {
        let start = Self::AP_START + slot * Self::AP_WIDTH;
        start..(start + Self::AP_WIDTH)
    }
}

/// Get the columns in `range`, cut short if the line ends first.
///
/// Columns count characters, not bytes.
fn columns(line: &str, range: Range<usize>) -> &str {
    let byte_at = |col: usize| {
        line.char_indices()
            .nth(col)
            .map(|(idx, _)| idx)
            .unwrap_or_else(|| line.len())
    };

    let start = byte_at(range.start);
    let end = byte_at(range.end);
    &line[start..end]
}

/// Parse an unsigned decimal number, surrounding blanks allowed.
fn parse_number(text: &str, field: Field, slot: Option<usize>) -> Result<u32, RecordErr> {
    let not_a_number = || RecordErr::NotANumber {
        field,
        slot,
        text: text.to_owned(),
    };

    let digits = text.trim();

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_a_number());
    }

    digits.parse::<u32>().map_err(|_| not_a_number())
}

/// Decode the date of the day a line describes.
fn parse_anchor(line: &str) -> Result<NaiveDate, RecordErr> {
    let year = parse_number(columns(line, Layout::YEAR), Field::Year, None)? as i32;
    let year = year + Layout::CENTURY;
    let month = parse_number(columns(line, Layout::MONTH), Field::Month, None)?;
    let day = parse_number(columns(line, Layout::DAY), Field::Day, None)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(RecordErr::InvalidDate { year, month, day })
}

/// Decode the date and all the readings on a line.
///
/// Decoding stops at the first slot holding either sentinel, later slots are never looked at.
/// Each reading is stamped 3 hours after the one before it, the first 3 hours after midnight.
pub(crate) fn parse_line(line: &str) -> Result<(NaiveDate, Vec<Reading>), RecordErr> {
    let anchor = parse_anchor(line)?;

    let mut readings = Vec::with_capacity(Layout::SLOTS);
    let mut timestamp: NaiveDateTime = anchor.and_time(NaiveTime::MIN);

    for slot in 0..Layout::SLOTS {
        let kp_text = columns(line, Layout::kp_columns(slot));
        let ap_text = columns(line, Layout::ap_columns(slot));

        let kp_missing = kp_text == Layout::KP_SENTINEL;
        let ap_missing = ap_text == Layout::AP_SENTINEL;

        if kp_missing || ap_missing {
            if kp_missing != ap_missing {
                warn!(
                    %anchor,
                    slot,
                    kp = kp_text,
                    ap = ap_text,
                    "only one of Kp and ap marked missing, ending line"
                );
            }
            break;
        }

        timestamp += Duration::hours(Layout::SLOT_HOURS);

        let kp = parse_number(kp_text, Field::Kp, Some(slot))?;
        if kp > Layout::KP_MAX {
            return Err(RecordErr::KpOutOfRange { slot, value: kp });
        }
        let ap = parse_number(ap_text, Field::Ap, Some(slot))?;

        readings.push(Reading {
            timestamp,
            kp: kp as u8,
            ap: ap as u16,
        });
    }

    Ok((anchor, readings))
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    const FULL_DAY: &str = "1607012497 12717202013070003107 12  6  7  7  5  3  0  2  5 0.2 1";
    const PARTIAL_DAY: &str = "1607042497 41399999999999999     5                              ";

    fn instant(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_full_day() {
        let (anchor, readings) = parse_line(FULL_DAY).expect("Error parsing line.");
        assert_eq!(anchor, NaiveDate::from_ymd_opt(2016, 7, 1).unwrap());

        assert_eq!(readings.len(), Layout::SLOTS);

        let kp: Vec<u8> = readings.iter().map(|r| r.kp).collect();
        let ap: Vec<u16> = readings.iter().map(|r| r.ap).collect();
        assert_eq!(kp, vec![27, 17, 20, 20, 13, 7, 0, 3]);
        assert_eq!(ap, vec![12, 6, 7, 7, 5, 3, 0, 2]);

        assert_eq!(readings[0].timestamp, instant(2016, 7, 1, 3));
        assert_eq!(readings[6].timestamp, instant(2016, 7, 1, 21));
        // The last slot rolls into the next day.
        assert_eq!(readings[7].timestamp, instant(2016, 7, 2, 0));

        for pair in readings.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(3));
        }
    }

    #[test]
    fn test_sentinel_ends_line() {
        let (_, readings) = parse_line(PARTIAL_DAY).expect("Error parsing line.");
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].timestamp, instant(2016, 7, 4, 3));
        assert_eq!(readings[0].kp, 13);
        assert_eq!(readings[0].ap, 5);
    }

    #[test]
    fn test_garbage_after_sentinel_is_ignored() {
        // Slot 2 has the Kp sentinel, slots after it are junk.
        let line = "1607012497 12717xxzzyyqqwwvv107 12  6  7 ab cd ef gh ij  5 0.2 1";
        let line = line.replacen("xx", "99", 1);
        let (_, readings) = parse_line(&line).expect("Error parsing line.");
        assert_eq!(readings.len(), 2);

        // Slot 3 has the ap sentinel only.
        let line = "1607012497 12717202013070003107 12  6  7     5  3  0  2  5 0.2 1";
        let (_, readings) = parse_line(line).expect("Error parsing line.");
        assert_eq!(readings.len(), 3);
    }

    #[test]
    fn test_first_slot_sentinel() {
        let line = "1607052497 59999999999999999                                    ";
        assert!(parse_line(line).expect("Error parsing line.").1.is_empty());
    }

    #[test]
    fn test_old_file_columns_ignored() {
        let line = "0101012287 80003101003030707 43  0  2  4  4  2  2  3  3  3 0.0105";
        let (_, readings) = parse_line(line).expect("Error parsing line.");
        assert_eq!(readings.len(), 8);
        assert_eq!(readings[0].timestamp, instant(2001, 1, 1, 3));
        assert_eq!(readings[7].kp, 7);
        assert_eq!(readings[7].ap, 3);
    }

    #[test]
    fn test_columns_count_characters() {
        // A two byte character in the ignored Bartels rotation columns.
        let line = FULL_DAY.replacen("2497", "é497", 1);
        assert_eq!(line.chars().count(), FULL_DAY.chars().count());
        assert_ne!(line.len(), FULL_DAY.len());

        let (anchor, readings) = parse_line(&line).expect("Error parsing line.");
        let (_, expected) = parse_line(FULL_DAY).expect("Error parsing line.");
        assert_eq!(anchor, NaiveDate::from_ymd_opt(2016, 7, 1).unwrap());
        assert_eq!(readings, expected);

        // Inside a field it is just not a number.
        let line = FULL_DAY.replacen("2717", "2é17", 1);
        match parse_line(&line) {
            Err(RecordErr::NotANumber {
                field: Field::Kp,
                slot: Some(0),
                text,
            }) => assert_eq!(text, "2é"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_trailing_blank_ap_is_sentinel() {
        // Line ends with a blank ap field in the last slot, trailing blanks are kept.
        let line = format!("{}   ", &FULL_DAY[..52]);
        let (_, readings) = parse_line(&line).expect("Error parsing line.");
        assert_eq!(readings.len(), 7);
        assert_eq!(readings[6].timestamp, instant(2016, 7, 1, 21));
    }

    #[test]
    fn test_bad_date() {
        let line = FULL_DAY.replacen("160701", "161301", 1);
        assert_eq!(
            parse_line(&line),
            Err(RecordErr::InvalidDate {
                year: 2016,
                month: 13,
                day: 1
            })
        );

        let line = FULL_DAY.replacen("160701", "16a701", 1);
        match parse_line(&line) {
            Err(RecordErr::NotANumber {
                field: Field::Month,
                slot: None,
                ..
            }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_bad_values() {
        let line = FULL_DAY.replacen("2717", "27x7", 1);
        match parse_line(&line) {
            Err(RecordErr::NotANumber {
                field: Field::Kp,
                slot: Some(1),
                text,
            }) => assert_eq!(text, "x7"),
            other => panic!("unexpected result {:?}", other),
        }

        let line = FULL_DAY.replacen(" 12  6", " 12 -6", 1);
        match parse_line(&line) {
            Err(RecordErr::NotANumber {
                field: Field::Ap,
                slot: Some(1),
                ..
            }) => {}
            other => panic!("unexpected result {:?}", other),
        }

        let line = FULL_DAY.replacen("2717", "9517", 1);
        assert_eq!(
            parse_line(&line),
            Err(RecordErr::KpOutOfRange { slot: 0, value: 95 })
        );
    }

    #[test]
    fn test_short_lines() {
        assert!(parse_line("").is_err());
        assert!(parse_line("1607").is_err());

        // A date but no readings at all.
        match parse_line("160701") {
            Err(RecordErr::NotANumber {
                field: Field::Kp,
                slot: Some(0),
                text,
            }) => assert!(text.is_empty()),
            other => panic!("unexpected result {:?}", other),
        }

        // Line ends right after a Kp sentinel.
        let (_, readings) = parse_line("1607012497 199").expect("Error parsing line.");
        assert!(readings.is_empty());

        // Line ends before the ap values, sentinel for ap needs three blanks.
        match parse_line("1607012497 127") {
            Err(RecordErr::NotANumber {
                field: Field::Ap,
                slot: Some(0),
                ..
            }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
}
