//! Request allowance of signed-in accounts.
//!
//! The server decides whether an analysis is counted (see the backend's
//! `update-requests` route); the browser only uses [`Allowance`] to show how
//! many analyses are left. A counted analysis that then fails is handed back
//! through `release-request`.

use crate::config::Limits;
use crate::requests::UpdateRequestsResponse;
use std::fmt;

/// What happened when a request was reserved before an analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum Reservation {
    /// Nobody is signed in; nothing is counted here.
    Anonymous,
    Counted(UpdateRequestsResponse),
    /// The analysis must not be sent.
    Refused,
}

impl Reservation {
    /// Whether the slot has to be given back once the analysis finished.
    /// Only a counted request for an analysis that did not succeed is.
    pub fn must_release(&self, analysis_succeeded: bool) -> bool {
        matches!(self, Reservation::Counted(_)) && !analysis_succeeded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allowance {
    Unlimited,
    Remaining(u32),
}

impl Allowance {
    pub fn for_user(request_count: u32, is_premium: bool, limits: &Limits) -> Self {
        if is_premium {
            Allowance::Unlimited
        } else {
            Allowance::Remaining(limits.free_requests.saturating_sub(request_count))
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Allowance::Remaining(0))
    }

    pub fn remaining(&self) -> Option<u32> {
        match self {
            Allowance::Unlimited => None,
            Allowance::Remaining(n) => Some(*n),
        }
    }
}

impl fmt::Display for Allowance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Allowance::Unlimited => f.write_str("Unlimited"),
            Allowance::Remaining(1) => f.write_str("1 request left"),
            Allowance::Remaining(n) => write!(f, "{} requests left", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(free: u32) -> Limits {
        Limits {
            free_requests: free,
            max_file_size_mb: 10,
        }
    }

    #[test]
    fn premium_is_unlimited() {
        let allowance = Allowance::for_user(500, true, &limits(5));
        assert_eq!(allowance, Allowance::Unlimited);
        assert!(!allowance.is_exhausted());
        assert_eq!(allowance.to_string(), "Unlimited");
    }

    #[test]
    fn remaining_never_underflows() {
        assert_eq!(Allowance::for_user(2, false, &limits(5)), Allowance::Remaining(3));
        let spent = Allowance::for_user(9, false, &limits(5));
        assert!(spent.is_exhausted());
        assert_eq!(spent.remaining(), Some(0));
        assert_eq!(Allowance::Remaining(1).to_string(), "1 request left");
    }

    #[test]
    fn last_free_request_is_not_exhausted() {
        assert!(!Allowance::for_user(4, false, &limits(5)).is_exhausted());
        assert!(Allowance::for_user(5, false, &limits(5)).is_exhausted());
    }

    #[test]
    fn only_failed_counted_analyses_are_released() {
        let counted = Reservation::Counted(UpdateRequestsResponse {
            message: "Request count updated".into(),
            request_count: 5,
            is_premium: false,
            remaining: Some(0),
        });
        assert!(counted.must_release(false));
        assert!(!counted.must_release(true));
        assert!(!Reservation::Anonymous.must_release(false));
        assert!(!Reservation::Refused.must_release(false));
    }
}
