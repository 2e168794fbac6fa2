//! Link lifecycle state machine.
//!
//! Every resolution attempt runs [`evaluate`] against the record just read
//! from the store. The function is pure: it decides the outcome and returns
//! the mutated record, the caller persists it.
//!
//! # States
//!
//! ```text
//! ACTIVE(ETERNAL)     --hit-->  ACTIVE(ETERNAL), count+1
//! ACTIVE(EXPDATE)     --hit-->  ACTIVE(EXPDATE), count+1     (before the date)
//! ACTIVE(EXPDATE)     --hit-->  expired, nothing written      (after the date)
//! ACTIVE(EXPCOUNTER)  --hit-->  ACTIVE, count+1               (count < timesToExpire)
//! ACTIVE(EXPCOUNTER)  --hit-->  BURNT, count+1                (count == timesToExpire)
//! BURNT               --hit-->  inactive, nothing written
//! ```
//!
//! Date expiry is re-evaluated on each call and never persisted as `BURNT`.

use chrono::{DateTime, Utc};

use crate::domain::entities::{LinkMode, LinkRecord, LinkStatus};

/// Result of evaluating one resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// The link is not `ACTIVE`; the record is left untouched.
    Inactive,
    /// An `EXPDATE` link whose day has started, or whose date is unreadable.
    Expired,
    /// The hit counts. `record` carries the incremented count and, for a
    /// counter link reaching its limit, the `BURNT` status.
    Advance { record: LinkRecord, burnt: bool },
}

/// Evaluates a resolution of `record` at instant `now`.
pub fn evaluate(record: &LinkRecord, now: DateTime<Utc>) -> Evaluation {
    if !record.is_active() {
        return Evaluation::Inactive;
    }

    if record.mode == LinkMode::ExpDate {
        match record.expires_at() {
            Some(expires_at) if now <= expires_at => {}
            _ => return Evaluation::Expired,
        }
    }

    let mut next = record.clone();
    next.count = next.count.saturating_add(1);

    let burnt = next.mode == LinkMode::ExpCounter && next.count == next.times_to_expire;
    if burnt {
        next.status = LinkStatus::Burnt;
    }

    Evaluation::Advance {
        record: next,
        burnt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NewLink, RedirectType};
    use chrono::{Duration, TimeZone};

    fn record(mode: LinkMode) -> LinkRecord {
        LinkRecord::new(
            "abc123".to_string(),
            NewLink::new("https://example.com", RedirectType::Found).with_mode(mode),
        )
    }

    fn advance(record: &LinkRecord) -> LinkRecord {
        match evaluate(record, Utc::now()) {
            Evaluation::Advance { record, .. } => record,
            other => panic!("expected Advance, got {:?}", other),
        }
    }

    #[test]
    fn test_eternal_counts_and_never_burns() {
        let mut current = record(LinkMode::Eternal);

        for expected in 1..=50 {
            current = advance(&current);
            assert_eq!(current.count, expected);
            assert_eq!(current.status, LinkStatus::Active);
        }
    }

    #[test]
    fn test_counter_burns_on_reaching_limit() {
        let mut current = record(LinkMode::ExpCounter);
        current.times_to_expire = 3;

        current = advance(&current);
        assert_eq!((current.count, current.status), (1, LinkStatus::Active));

        current = advance(&current);
        assert_eq!((current.count, current.status), (2, LinkStatus::Active));

        match evaluate(&current, Utc::now()) {
            Evaluation::Advance { record, burnt } => {
                assert!(burnt);
                assert_eq!(record.count, 3);
                assert_eq!(record.status, LinkStatus::Burnt);
                current = record;
            }
            other => panic!("expected Advance, got {:?}", other),
        }

        assert_eq!(evaluate(&current, Utc::now()), Evaluation::Inactive);
        assert_eq!(current.count, 3);
    }

    #[test]
    fn test_counter_with_zero_limit_never_burns() {
        let mut current = record(LinkMode::ExpCounter);

        for _ in 0..5 {
            current = advance(&current);
        }

        assert_eq!(current.count, 5);
        assert_eq!(current.status, LinkStatus::Active);
    }

    #[test]
    fn test_burnt_link_is_inactive_in_every_mode() {
        for mode in [LinkMode::Eternal, LinkMode::ExpDate, LinkMode::ExpCounter] {
            let mut burnt = record(mode);
            burnt.status = LinkStatus::Burnt;
            burnt.expired_date = Some("01/01/2099".to_string());

            assert_eq!(evaluate(&burnt, Utc::now()), Evaluation::Inactive);
        }
    }

    #[test]
    fn test_past_date_expires_without_mutation() {
        let mut dated = record(LinkMode::ExpDate);
        dated.expired_date = Some("01/01/2020".to_string());
        dated.count = 7;

        assert_eq!(evaluate(&dated, Utc::now()), Evaluation::Expired);
        assert_eq!(dated.count, 7);
        assert_eq!(dated.status, LinkStatus::Active);
    }

    #[test]
    fn test_future_date_counts() {
        let mut dated = record(LinkMode::ExpDate);
        dated.expired_date = Some("01/01/2099".to_string());

        let next = advance(&dated);
        assert_eq!(next.count, 1);
        assert_eq!(next.status, LinkStatus::Active);
    }

    #[test]
    fn test_date_boundary_is_start_of_day() {
        let mut dated = record(LinkMode::ExpDate);
        dated.expired_date = Some("10/06/2030".to_string());
        let midnight = Utc.with_ymd_and_hms(2030, 6, 10, 0, 0, 0).unwrap();

        assert!(matches!(
            evaluate(&dated, midnight),
            Evaluation::Advance { .. }
        ));
        assert_eq!(
            evaluate(&dated, midnight + Duration::seconds(1)),
            Evaluation::Expired
        );
    }

    #[test]
    fn test_date_mode_without_date_is_expired() {
        let dated = record(LinkMode::ExpDate);
        assert_eq!(evaluate(&dated, Utc::now()), Evaluation::Expired);
    }

    #[test]
    fn test_date_is_ignored_outside_date_mode() {
        let mut eternal = record(LinkMode::Eternal);
        eternal.expired_date = Some("01/01/2000".to_string());

        assert_eq!(advance(&eternal).count, 1);
    }
}
