//! # Application Status
//!
//! The lifecycle states of an organization application, from the
//! applicant's request for a certifying official through municipal
//! review to registry approval and eventual dissolution.

use serde::{Deserialize, Serialize};

/// The lifecycle state of an organization application.
///
/// ## Transition Graph
///
/// ```text
/// WaitingMinistroRequest ──▶ MinistroScheduled ──▶ MinistroApproved
///                                                        │
///                                                        ▼
///      ┌──────────────── Rejected ◀────────────── PendingReview
///      │ resubmit            ▲                           │
///      └─────────────────────┼──────────▶ InReview ◀─────┘
///                            │               │
///                            │               ▼
///                            └──────── SentToRegistry ──▶ Approved ──▶ Dissolved
/// ```
///
/// `Rejected` is re-enterable: a corrected application resubmits
/// directly to `PendingReview`. `Dissolved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Waiting for the applicant's official-scheduling request to be served.
    WaitingMinistroRequest,
    /// A certifying official is booked for the assembly slot.
    MinistroScheduled,
    /// The official completed the certification protocol.
    MinistroApproved,
    /// Submitted by the applicant, waiting for an administrator.
    PendingReview,
    /// An administrator is reviewing the application.
    InReview,
    /// Rejected with corrections; the applicant may fix and resubmit.
    Rejected,
    /// Forwarded to the civil registry.
    SentToRegistry,
    /// Registered and legally constituted.
    Approved,
    /// Dissolved after approval. Terminal state.
    Dissolved,
}

impl ApplicationStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WaitingMinistroRequest => "WAITING_MINISTRO_REQUEST",
            Self::MinistroScheduled => "MINISTRO_SCHEDULED",
            Self::MinistroApproved => "MINISTRO_APPROVED",
            Self::PendingReview => "PENDING_REVIEW",
            Self::InReview => "IN_REVIEW",
            Self::Rejected => "REJECTED",
            Self::SentToRegistry => "SENT_TO_REGISTRY",
            Self::Approved => "APPROVED",
            Self::Dissolved => "DISSOLVED",
        }
    }

    /// Whether this state is terminal (no further transitions allowed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Dissolved)
    }

    /// Valid target states from this state.
    pub fn valid_transitions(&self) -> &'static [ApplicationStatus] {
        match self {
            Self::WaitingMinistroRequest => &[Self::MinistroScheduled],
            Self::MinistroScheduled => &[Self::MinistroApproved],
            Self::MinistroApproved => &[Self::PendingReview],
            Self::PendingReview => &[Self::InReview],
            Self::InReview => &[Self::Rejected, Self::SentToRegistry],
            Self::SentToRegistry => &[Self::Approved, Self::Rejected],
            Self::Rejected => &[Self::PendingReview],
            Self::Approved => &[Self::Dissolved],
            Self::Dissolved => &[],
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dissolved_is_the_only_terminal_state() {
        for status in [
            ApplicationStatus::WaitingMinistroRequest,
            ApplicationStatus::MinistroScheduled,
            ApplicationStatus::MinistroApproved,
            ApplicationStatus::PendingReview,
            ApplicationStatus::InReview,
            ApplicationStatus::Rejected,
            ApplicationStatus::SentToRegistry,
            ApplicationStatus::Approved,
        ] {
            assert!(!status.is_terminal(), "{status}");
            assert!(!status.valid_transitions().is_empty(), "{status}");
        }
        assert!(ApplicationStatus::Dissolved.is_terminal());
        assert!(ApplicationStatus::Dissolved.valid_transitions().is_empty());
    }

    #[test]
    fn rejected_re_enters_pending_review_only() {
        assert_eq!(
            ApplicationStatus::Rejected.valid_transitions(),
            &[ApplicationStatus::PendingReview]
        );
    }

    #[test]
    fn display_uses_screaming_snake_names() {
        assert_eq!(
            ApplicationStatus::WaitingMinistroRequest.to_string(),
            "WAITING_MINISTRO_REQUEST"
        );
        assert_eq!(ApplicationStatus::SentToRegistry.to_string(), "SENT_TO_REGISTRY");
    }
}
