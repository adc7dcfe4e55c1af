//! Cancellable one-shot timers driven by an external clock.
//!
//! A timer is only a deadline. Whoever owns it checks it against the current
//! time, so a wake-up scheduled for an earlier arming finds the deadline
//! moved and does nothing.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OneShotTimer {
    deadline: Option<DateTime<Utc>>,
}

impl OneShotTimer {
    /// Starts (or restarts) the timer
    pub fn arm(&mut self, now: DateTime<Utc>, duration: Duration) {
        self.deadline = Some(now + duration);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// True while armed and not yet expired at `now`
    pub fn is_armed_at(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    /// Disarms the timer if its deadline has passed. Returns true when this
    /// call expired it.
    pub fn expire_if_due(&mut self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap()
    }

    #[test]
    fn test_armed_until_deadline() {
        let mut timer = OneShotTimer::default();
        assert!(!timer.is_armed_at(t0()));

        timer.arm(t0(), Duration::seconds(5));
        assert!(timer.is_armed_at(t0() + Duration::milliseconds(4_999)));
        assert!(!timer.is_armed_at(t0() + Duration::seconds(5)));
    }

    #[test]
    fn test_expire_only_once_due() {
        let mut timer = OneShotTimer::default();
        timer.arm(t0(), Duration::seconds(2));
        assert!(!timer.expire_if_due(t0() + Duration::seconds(1)));
        assert!(timer.expire_if_due(t0() + Duration::seconds(2)));
        assert!(!timer.expire_if_due(t0() + Duration::seconds(3)));
        assert_eq!(timer.deadline(), None);
    }

    #[test]
    fn test_rearm_moves_deadline() {
        let mut timer = OneShotTimer::default();
        timer.arm(t0(), Duration::seconds(2));
        timer.arm(t0() + Duration::seconds(1), Duration::seconds(2));
        // The wake-up for the first arming arrives and finds nothing due.
        assert!(!timer.expire_if_due(t0() + Duration::seconds(2)));
        assert!(timer.is_armed_at(t0() + Duration::milliseconds(2_500)));
    }

    #[test]
    fn test_cancel() {
        let mut timer = OneShotTimer::default();
        timer.arm(t0(), Duration::seconds(5));
        timer.cancel();
        assert!(!timer.is_armed_at(t0()));
        assert!(!timer.expire_if_due(t0() + Duration::seconds(10)));
    }
}
