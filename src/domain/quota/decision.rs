//! Admission decision types

use serde::{Deserialize, Serialize};

/// The binary outcome of a quota check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionDecision {
    Allow,
    Deny,
}

impl AdmissionDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl std::fmt::Display for AdmissionDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Deny => write!(f, "deny"),
        }
    }
}

/// Result of one enforcement pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaCheck {
    /// Records already counted in the current window when the decision was made
    pub used: u64,
    /// The credential's configured daily limit
    pub limit: u32,
    /// Requests left after this one; 0 on deny
    pub remaining: u32,
    /// Allow or deny
    pub decision: AdmissionDecision,
}

impl QuotaCheck {
    /// Render the decision for an observed count against a limit
    ///
    /// `used == limit` denies: the limit is the maximum number of allowed
    /// requests, not the first denied count minus one. On allow, `remaining`
    /// accounts for the record about to be written.
    pub fn decide(used: u64, limit: u32) -> Self {
        if used < u64::from(limit) {
            Self {
                used,
                limit,
                remaining: limit - used as u32 - 1,
                decision: AdmissionDecision::Allow,
            }
        } else {
            Self {
                used,
                limit,
                remaining: 0,
                decision: AdmissionDecision::Deny,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_under_limit() {
        let check = QuotaCheck::decide(0, 3);
        assert_eq!(check.decision, AdmissionDecision::Allow);
        assert_eq!(check.used, 0);
        assert_eq!(check.remaining, 2);
    }

    #[test]
    fn test_last_allowed_request_has_zero_remaining() {
        let check = QuotaCheck::decide(2, 3);
        assert_eq!(check.decision, AdmissionDecision::Allow);
        assert_eq!(check.remaining, 0);
    }

    #[test]
    fn test_deny_at_limit() {
        let check = QuotaCheck::decide(3, 3);
        assert_eq!(check.decision, AdmissionDecision::Deny);
        assert_eq!(check.used, 3);
        assert_eq!(check.remaining, 0);
    }

    #[test]
    fn test_deny_over_limit() {
        // Can only happen if records were written outside the enforcer, but
        // the decision must still be a deny with zero remaining.
        let check = QuotaCheck::decide(10, 3);
        assert_eq!(check.decision, AdmissionDecision::Deny);
        assert_eq!(check.remaining, 0);
    }

    #[test]
    fn test_limit_of_one() {
        assert!(QuotaCheck::decide(0, 1).decision.is_allow());
        assert!(!QuotaCheck::decide(1, 1).decision.is_allow());
    }

    #[test]
    fn test_decision_serialization() {
        assert_eq!(
            serde_json::to_string(&AdmissionDecision::Allow).unwrap(),
            "\"allow\""
        );
        assert_eq!(
            serde_json::to_string(&AdmissionDecision::Deny).unwrap(),
            "\"deny\""
        );
    }
}
