//! Expiry classifier - maps an expiry date to a freshness tier.
//!
//! A pure function of the expiry date and an injected "now", so views can
//! re-derive freshness on every read and tests can pin the clock.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// How close to expiry still counts as urgent ("expiring").
pub const EXPIRING_MAX_DAYS: i64 = 3;

/// Upper bound of the "warning" tier; anything later is fresh.
pub const WARNING_MAX_DAYS: i64 = 7;

/// Freshness bucket for an inventory ingredient.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FreshnessTier {
    Expired,
    Expiring,
    Warning,
    Fresh,
}

/// Classification result: the tier plus the whole-day count it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpiryStatus {
    pub tier: FreshnessTier,
    pub days_remaining: i64,
}

/// Whole days from `now` until midnight of the expiry date, rounding any
/// partial day up. An item expiring later today reports 0 days left rather
/// than a negative count.
pub fn days_until_expiry(expiry: NaiveDate, now: NaiveDateTime) -> i64 {
    let seconds = (expiry.and_time(NaiveTime::MIN) - now).num_seconds();
    // Ceiling division that stays correct for dates already in the past.
    seconds.div_euclid(SECONDS_PER_DAY) + i64::from(seconds.rem_euclid(SECONDS_PER_DAY) != 0)
}

/// Classifies an expiry date relative to `now`.
///
/// Tier boundaries are closed: exactly 0 through 3 days is expiring,
/// 4 through 7 is warning, 8 or more is fresh, negative is expired.
pub fn classify(expiry: NaiveDate, now: NaiveDateTime) -> ExpiryStatus {
    let days_remaining = days_until_expiry(expiry, now);
    let tier = if days_remaining < 0 {
        FreshnessTier::Expired
    } else if days_remaining <= EXPIRING_MAX_DAYS {
        FreshnessTier::Expiring
    } else if days_remaining <= WARNING_MAX_DAYS {
        FreshnessTier::Warning
    } else {
        FreshnessTier::Fresh
    };
    ExpiryStatus {
        tier,
        days_remaining,
    }
}
