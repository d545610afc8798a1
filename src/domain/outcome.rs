//! Tagged stage result
//!
//! Distinguishes a good answer, a usable fallback answer, and no answer,
//! instead of inferring the difference from nested error handling.

use std::fmt;

use serde::Serialize;

/// Result of a pipeline stage that may degrade instead of failing outright
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Complete result
    Ok(T),
    /// Usable but partial result, with the reason it is partial
    Degraded { value: T, reason: String },
    /// No usable result
    Failed { reason: String },
}

/// Discriminant of an `Outcome`, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Ok,
    Degraded,
    Failed,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Degraded => write!(f, "degraded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl<T> Outcome<T> {
    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Self::Degraded {
            value,
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Ok(_) => OutcomeKind::Ok,
            Self::Degraded { .. } => OutcomeKind::Degraded,
            Self::Failed { .. } => OutcomeKind::Failed,
        }
    }

    /// The value, if any was produced
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(value) | Self::Degraded { value, .. } => Some(value),
            Self::Failed { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Ok(value) | Self::Degraded { value, .. } => Some(value),
            Self::Failed { .. } => None,
        }
    }

    /// Why the outcome is not `Ok`
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Degraded { reason, .. } | Self::Failed { reason } => Some(reason),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value)),
            Self::Degraded { value, reason } => Outcome::Degraded {
                value: f(value),
                reason,
            },
            Self::Failed { reason } => Outcome::Failed { reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_outcome() {
        let outcome = Outcome::Ok(3);
        assert!(outcome.is_ok());
        assert_eq!(outcome.value(), Some(&3));
        assert_eq!(outcome.reason(), None);
        assert_eq!(outcome.kind(), OutcomeKind::Ok);
    }

    #[test]
    fn test_degraded_outcome_keeps_value() {
        let outcome = Outcome::degraded(vec![1, 2], "1 document failed");
        assert!(!outcome.is_ok());
        assert!(!outcome.is_failed());
        assert_eq!(outcome.value(), Some(&vec![1, 2]));
        assert_eq!(outcome.reason(), Some("1 document failed"));
    }

    #[test]
    fn test_failed_outcome() {
        let outcome: Outcome<u32> = Outcome::failed("nothing produced");
        assert!(outcome.is_failed());
        assert_eq!(outcome.into_value(), None);
    }

    #[test]
    fn test_map_preserves_tag() {
        let outcome = Outcome::degraded(2, "partial").map(|v| v * 10);
        assert_eq!(outcome, Outcome::degraded(20, "partial"));
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&OutcomeKind::Degraded).unwrap(),
            "\"degraded\""
        );
    }
}
