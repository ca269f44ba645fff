// Error types shared by every operation on the store.
//
// Two kinds matter to callers: malformed input (rejected with 400 / a
// re-prompt) and missing references (rejected with 404 / a console message).
// The variants stay specific so messages read well; `is_not_found` gives the
// presentation layers the split they need.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// Timing string is not one of daily / adhoc / weekly
    #[error("invalid timing: {0:?}")]
    InvalidTiming(String),

    /// Chore price must be a finite number >= 0
    #[error("invalid price: {0}")]
    InvalidPrice(f64),

    /// Reconcile amount must be a finite number > 0
    #[error("invalid amount: {0}")]
    InvalidAmount(f64),

    /// No user with this exact name has logged in yet
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// The referenced chore id is not in the catalog
    #[error("chore not found: {0}")]
    ChoreNotFound(u32),

    /// The named user exists but is a parent, not a child
    #[error("not a child: {0}")]
    NotAChild(String),
}

impl TrackerError {
    /// True for missing-reference errors (HTTP 404); false for malformed
    /// input (HTTP 400). A parent addressed as a child counts as not found,
    /// same as an unknown name.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TrackerError::UserNotFound(_)
                | TrackerError::ChoreNotFound(_)
                | TrackerError::NotAChild(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(TrackerError::UserNotFound("Sam".to_string()).is_not_found());
        assert!(TrackerError::ChoreNotFound(3).is_not_found());
        assert!(TrackerError::NotAChild("aaron".to_string()).is_not_found());

        assert!(!TrackerError::InvalidTiming("monthly".to_string()).is_not_found());
        assert!(!TrackerError::InvalidPrice(-1.0).is_not_found());
        assert!(!TrackerError::InvalidAmount(0.0).is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = TrackerError::InvalidTiming("monthly".to_string());
        assert_eq!(err.to_string(), "invalid timing: \"monthly\"");

        let err = TrackerError::UserNotFound("Sam".to_string());
        assert_eq!(err.to_string(), "user not found: Sam");
    }
}
