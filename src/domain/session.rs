//! Exchange session clock (HOSE trading hours, Indochina Time).
//!
//! Mon-Fri: 09:00 ATO, 09:15 continuous, 11:30 lunch, 13:00 continuous,
//! 14:30 ATC, 14:45 put-through, 15:00 close.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike, Utc, Weekday};
use std::fmt;

/// UTC+7.
pub const MARKET_UTC_OFFSET_SECS: i32 = 7 * 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Weekend,
    PreOpen,
    OpeningAuction,
    Continuous,
    LunchBreak,
    ClosingAuction,
    PutThrough,
    Closed,
}

impl SessionPhase {
    pub fn at(time: NaiveDateTime) -> Self {
        if matches!(time.weekday(), Weekday::Sat | Weekday::Sun) {
            return SessionPhase::Weekend;
        }
        match hhmm(time) {
            t if t < 900 => SessionPhase::PreOpen,
            t if t < 915 => SessionPhase::OpeningAuction,
            t if t < 1130 => SessionPhase::Continuous,
            t if t < 1300 => SessionPhase::LunchBreak,
            t if t < 1430 => SessionPhase::Continuous,
            t if t < 1445 => SessionPhase::ClosingAuction,
            t if t < 1500 => SessionPhase::PutThrough,
            _ => SessionPhase::Closed,
        }
    }

    pub fn is_closed(self) -> bool {
        matches!(
            self,
            SessionPhase::Weekend
                | SessionPhase::PreOpen
                | SessionPhase::LunchBreak
                | SessionPhase::Closed
        )
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionPhase::Weekend => "Market closed (weekend)",
            SessionPhase::PreOpen => "Not yet open",
            SessionPhase::OpeningAuction => "ATO session",
            SessionPhase::Continuous => "Continuous matching",
            SessionPhase::LunchBreak => "Lunch break",
            SessionPhase::ClosingAuction => "ATC session",
            SessionPhase::PutThrough => "After-hours matching",
            SessionPhase::Closed => "Session closed",
        };
        f.write_str(s)
    }
}

fn hhmm(time: NaiveDateTime) -> u32 {
    time.hour() * 100 + time.minute()
}

/// Whether prices are live and a refresh should run; both bounds inclusive.
pub fn is_trading_window(time: NaiveDateTime) -> bool {
    if matches!(time.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }
    let t = hhmm(time);
    (900..=1130).contains(&t) || (1300..=1500).contains(&t)
}

pub fn market_now() -> NaiveDateTime {
    to_market_time(Utc::now())
}

pub fn to_market_time(instant: DateTime<Utc>) -> NaiveDateTime {
    match FixedOffset::east_opt(MARKET_UTC_OFFSET_SECS) {
        Some(offset) => instant.with_timezone(&offset).naive_local(),
        None => instant.naive_utc(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // 2024-01-15 is a Monday.
    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn weekday_phases() {
        assert_eq!(SessionPhase::at(at(15, 8, 59)), SessionPhase::PreOpen);
        assert_eq!(SessionPhase::at(at(15, 9, 0)), SessionPhase::OpeningAuction);
        assert_eq!(SessionPhase::at(at(15, 9, 15)), SessionPhase::Continuous);
        assert_eq!(SessionPhase::at(at(15, 11, 30)), SessionPhase::LunchBreak);
        assert_eq!(SessionPhase::at(at(15, 13, 0)), SessionPhase::Continuous);
        assert_eq!(SessionPhase::at(at(15, 14, 30)), SessionPhase::ClosingAuction);
        assert_eq!(SessionPhase::at(at(15, 14, 45)), SessionPhase::PutThrough);
        assert_eq!(SessionPhase::at(at(15, 15, 0)), SessionPhase::Closed);
    }

    #[test]
    fn weekend_is_closed() {
        assert_eq!(SessionPhase::at(at(13, 10, 0)), SessionPhase::Weekend);
        assert_eq!(SessionPhase::at(at(14, 10, 0)), SessionPhase::Weekend);
        assert!(SessionPhase::Weekend.is_closed());
        assert!(!is_trading_window(at(13, 10, 0)));
    }

    #[test]
    fn trading_window_bounds_inclusive() {
        assert!(is_trading_window(at(15, 9, 0)));
        assert!(is_trading_window(at(15, 11, 30)));
        assert!(!is_trading_window(at(15, 11, 31)));
        assert!(!is_trading_window(at(15, 12, 59)));
        assert!(is_trading_window(at(15, 15, 0)));
        assert!(!is_trading_window(at(15, 15, 1)));
    }

    #[test]
    fn market_time_is_utc_plus_seven() {
        let utc = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(2, 0, 0)
            .unwrap()
            .and_utc();
        assert_eq!(to_market_time(utc), at(15, 9, 0));
    }
}
