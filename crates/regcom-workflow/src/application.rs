//! # Organization Application Lifecycle
//!
//! The top-level state machine routing an application through citizen,
//! certifying official, and municipal administrator. Consumes scheduling
//! outcomes and the finalized certification record as transition
//! triggers, and administrator review decisions (approve /
//! reject-with-corrections / forward).
//!
//! ## Design Choice: Validated Enum over Typestate
//!
//! Applications are persisted and reloaded constantly; their status is
//! not known at compile time. A validated enum with guarded transition
//! methods — each taking the typed data that authorizes it — serializes
//! directly and rejects invalid transitions with structured errors.
//!
//! ## Audit Invariant
//!
//! Every transition appends a [`StatusChange`] to `status_history` and
//! bumps `version`. The history is append-only and never edited; the
//! version is checked by repositories to reject stale writes.

use serde::{Deserialize, Serialize};

use regcom_assembly::CertificationRecord;
use regcom_core::{
    ApplicationId, ArtifactRef, AssignmentId, CivilDate, FoundingMember, OfficialId,
    OrganizationCategory, TimeOfDay, Timestamp,
};

use crate::corrections::CorrectionSet;
use crate::error::WorkflowError;
use crate::status::ApplicationStatus;

// ── Slot and Assignment Data ───────────────────────────────────────────

/// The assembly slot the applicant requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedSlot {
    /// Requested election date.
    pub election_date: CivilDate,
    /// Requested election time (canonical `HH:MM`).
    pub election_time: TimeOfDay,
    /// Where the assembly will be held.
    pub assembly_address: String,
}

/// The confirmed official booking attached when scheduling completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinistroAssignment {
    /// The booked official.
    pub official_id: OfficialId,
    /// The booking record in the assignment store.
    pub assignment_id: AssignmentId,
    /// Confirmed assembly date.
    pub date: CivilDate,
    /// Confirmed assembly slot.
    pub time: TimeOfDay,
    /// Confirmed location.
    pub location: String,
}

// ── History ────────────────────────────────────────────────────────────

/// One entry of the append-only status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// The status entered.
    pub status: ApplicationStatus,
    /// When the transition occurred.
    pub at: Timestamp,
    /// Operator comment, when one was recorded.
    pub comment: Option<String>,
}

/// Context every transition carries: an injected timestamp plus the
/// acting user and an optional comment for the history trail.
#[derive(Debug, Clone)]
pub struct TransitionContext {
    /// When the transition occurs. Injected — the state machine never
    /// reads the wall clock.
    pub at: Timestamp,
    /// Who performed the transition, when known.
    pub actor: Option<String>,
    /// Free-text comment for the history entry.
    pub comment: Option<String>,
}

impl TransitionContext {
    /// Context with only a timestamp.
    pub fn at(at: Timestamp) -> Self {
        Self {
            at,
            actor: None,
            comment: None,
        }
    }

    /// Attach a comment for the history entry.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach the acting user.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }
}

// ── Review Outcome ─────────────────────────────────────────────────────

/// The administrator's decision that concludes an `IN_REVIEW` cycle.
///
/// The two preconditions — rejection requires a non-empty correction
/// set, forwarding requires an empty one — are two arms of this single
/// invariant, enforced in one place
/// ([`OrganizationApplication::conclude_review`]).
#[derive(Debug, Clone)]
pub enum ReviewOutcome {
    /// Reject, returning the corrections to the applicant.
    Reject {
        /// The snapshot of marked corrections. Must be non-empty.
        corrections: CorrectionSet,
        /// General comment accompanying the rejection.
        general_comment: Option<String>,
    },
    /// Forward the application to the civil registry.
    Forward {
        /// Corrections still marked in the reviewer's working set.
        /// Must be zero.
        outstanding_corrections: usize,
    },
}

// ── The Application ────────────────────────────────────────────────────

/// An organization application with its lifecycle state, founding
/// roster, scheduling data, certification output, and audit history.
///
/// Mutated only through the transition methods below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationApplication {
    /// Unique application identifier.
    pub id: ApplicationId,
    /// Organization name.
    pub name: String,
    /// Organization category.
    pub category: OrganizationCategory,
    /// Identifier of the citizen who created the application.
    pub creator: String,
    /// Current lifecycle status.
    pub status: ApplicationStatus,
    /// Founding members declared by the applicant.
    pub members: Vec<FoundingMember>,
    /// The slot the applicant requested.
    pub requested_slot: RequestedSlot,
    /// The confirmed booking, once an official is scheduled.
    pub ministro: Option<MinistroAssignment>,
    /// The finalized certification record, once the protocol completes.
    pub certification: Option<CertificationRecord>,
    /// Reference to the generated certificate document, if any.
    pub certificate_artifact: Option<ArtifactRef>,
    /// Corrections attached at the latest rejection, cleared on resubmit.
    pub corrections: Option<CorrectionSet>,
    /// Append-only status history.
    pub status_history: Vec<StatusChange>,
    /// Monotonic version for optimistic concurrency.
    pub version: u64,
    /// When the application was created.
    pub created_at: Timestamp,
    /// When the application last changed.
    pub updated_at: Timestamp,
}

impl OrganizationApplication {
    /// Create a new application in `WAITING_MINISTRO_REQUEST`.
    pub fn new(
        id: ApplicationId,
        name: String,
        category: OrganizationCategory,
        creator: String,
        members: Vec<FoundingMember>,
        requested_slot: RequestedSlot,
        at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            category,
            creator,
            status: ApplicationStatus::WaitingMinistroRequest,
            members,
            requested_slot,
            ministro: None,
            certification: None,
            certificate_artifact: None,
            corrections: None,
            status_history: vec![StatusChange {
                status: ApplicationStatus::WaitingMinistroRequest,
                at,
                comment: Some("application created".to_string()),
            }],
            version: 1,
            created_at: at,
            updated_at: at,
        }
    }

    // ── Scheduling ─────────────────────────────────────────────────────

    /// Attach a confirmed booking (`WAITING_MINISTRO_REQUEST` →
    /// `MINISTRO_SCHEDULED`).
    ///
    /// Availability and collision preconditions are the scheduling
    /// engine's concern and run before the booking is committed; this
    /// transition records the outcome.
    pub fn schedule_official(
        &mut self,
        ministro: MinistroAssignment,
        ctx: TransitionContext,
    ) -> Result<(), WorkflowError> {
        self.require_status(
            ApplicationStatus::WaitingMinistroRequest,
            ApplicationStatus::MinistroScheduled,
        )?;
        self.ministro = Some(ministro);
        self.do_transition(ApplicationStatus::MinistroScheduled, ctx);
        Ok(())
    }

    // ── Certification ──────────────────────────────────────────────────

    /// Store the finalized certification record (`MINISTRO_SCHEDULED` →
    /// `MINISTRO_APPROVED`).
    ///
    /// The record is re-validated against the assembly date before it is
    /// accepted — selection-time checks in the capturing UI are not
    /// trusted.
    pub fn complete_certification(
        &mut self,
        record: CertificationRecord,
        artifact: Option<ArtifactRef>,
        ctx: TransitionContext,
    ) -> Result<(), WorkflowError> {
        self.require_status(
            ApplicationStatus::MinistroScheduled,
            ApplicationStatus::MinistroApproved,
        )?;
        record.validate(self.assembly_date())?;
        self.certification = Some(record);
        self.certificate_artifact = artifact;
        self.do_transition(ApplicationStatus::MinistroApproved, ctx);
        Ok(())
    }

    // ── Review Cycle ───────────────────────────────────────────────────

    /// Applicant submits for municipal review (`MINISTRO_APPROVED` →
    /// `PENDING_REVIEW`).
    pub fn submit_for_review(&mut self, ctx: TransitionContext) -> Result<(), WorkflowError> {
        self.require_status(
            ApplicationStatus::MinistroApproved,
            ApplicationStatus::PendingReview,
        )?;
        self.do_transition(ApplicationStatus::PendingReview, ctx);
        Ok(())
    }

    /// An administrator takes the application (`PENDING_REVIEW` →
    /// `IN_REVIEW`).
    pub fn start_review(&mut self, ctx: TransitionContext) -> Result<(), WorkflowError> {
        self.require_status(ApplicationStatus::PendingReview, ApplicationStatus::InReview)?;
        self.do_transition(ApplicationStatus::InReview, ctx);
        Ok(())
    }

    /// Conclude the review with the administrator's decision.
    ///
    /// This is the single enforcement point for the mutually exclusive
    /// review preconditions: rejecting with an empty correction set is
    /// [`WorkflowError::EmptyCorrections`]; forwarding with outstanding
    /// corrections is [`WorkflowError::OutstandingCorrections`].
    pub fn conclude_review(
        &mut self,
        outcome: ReviewOutcome,
        ctx: TransitionContext,
    ) -> Result<(), WorkflowError> {
        match outcome {
            ReviewOutcome::Reject {
                corrections,
                general_comment,
            } => {
                self.require_status(ApplicationStatus::InReview, ApplicationStatus::Rejected)?;
                self.attach_rejection(corrections)?;
                let comment = general_comment.or(ctx.comment);
                self.do_transition(
                    ApplicationStatus::Rejected,
                    TransitionContext {
                        at: ctx.at,
                        actor: ctx.actor,
                        comment,
                    },
                );
            }
            ReviewOutcome::Forward {
                outstanding_corrections,
            } => {
                self.require_status(
                    ApplicationStatus::InReview,
                    ApplicationStatus::SentToRegistry,
                )?;
                if outstanding_corrections > 0 {
                    return Err(WorkflowError::OutstandingCorrections {
                        count: outstanding_corrections,
                    });
                }
                self.do_transition(ApplicationStatus::SentToRegistry, ctx);
            }
        }
        Ok(())
    }

    /// Convenience wrapper: reject with corrections.
    pub fn reject_with_corrections(
        &mut self,
        corrections: CorrectionSet,
        general_comment: Option<String>,
        ctx: TransitionContext,
    ) -> Result<(), WorkflowError> {
        self.conclude_review(
            ReviewOutcome::Reject {
                corrections,
                general_comment,
            },
            ctx,
        )
    }

    /// Convenience wrapper: forward to the registry.
    pub fn send_to_registry(
        &mut self,
        outstanding_corrections: usize,
        ctx: TransitionContext,
    ) -> Result<(), WorkflowError> {
        self.conclude_review(
            ReviewOutcome::Forward {
                outstanding_corrections,
            },
            ctx,
        )
    }

    // ── Registry Outcome ───────────────────────────────────────────────

    /// Registry approves the organization (`SENT_TO_REGISTRY` →
    /// `APPROVED`).
    pub fn approve(&mut self, ctx: TransitionContext) -> Result<(), WorkflowError> {
        self.require_status(ApplicationStatus::SentToRegistry, ApplicationStatus::Approved)?;
        self.do_transition(ApplicationStatus::Approved, ctx);
        Ok(())
    }

    /// Registry rejects the organization (`SENT_TO_REGISTRY` →
    /// `REJECTED`), with observations for the applicant.
    pub fn reject_from_registry(
        &mut self,
        corrections: CorrectionSet,
        ctx: TransitionContext,
    ) -> Result<(), WorkflowError> {
        self.require_status(ApplicationStatus::SentToRegistry, ApplicationStatus::Rejected)?;
        self.attach_rejection(corrections)?;
        self.do_transition(ApplicationStatus::Rejected, ctx);
        Ok(())
    }

    // ── Resubmission ───────────────────────────────────────────────────

    /// Applicant resubmits after correcting (`REJECTED` →
    /// `PENDING_REVIEW`). The attached corrections are cleared; the
    /// rejection itself survives in the history.
    pub fn resubmit(&mut self, ctx: TransitionContext) -> Result<(), WorkflowError> {
        self.require_status(ApplicationStatus::Rejected, ApplicationStatus::PendingReview)?;
        self.corrections = None;
        self.do_transition(ApplicationStatus::PendingReview, ctx);
        Ok(())
    }

    // ── Dissolution ────────────────────────────────────────────────────

    /// Dissolve an approved organization (`APPROVED` → `DISSOLVED`).
    /// Irreversible.
    pub fn dissolve(
        &mut self,
        reason: &str,
        actor: &str,
        ctx: TransitionContext,
    ) -> Result<(), WorkflowError> {
        self.require_status(ApplicationStatus::Approved, ApplicationStatus::Dissolved)?;
        let ctx = TransitionContext {
            comment: Some(format!("dissolved by {actor}: {reason}")),
            actor: Some(actor.to_string()),
            ..ctx
        };
        self.do_transition(ApplicationStatus::Dissolved, ctx);
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// The assembly date governing the certification: the confirmed
    /// booking's date, falling back to the requested slot.
    pub fn assembly_date(&self) -> CivilDate {
        self.ministro
            .as_ref()
            .map(|m| m.date)
            .unwrap_or(self.requested_slot.election_date)
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// Attach a rejection's correction set, enforcing non-emptiness.
    fn attach_rejection(&mut self, corrections: CorrectionSet) -> Result<(), WorkflowError> {
        if corrections.is_empty() {
            return Err(WorkflowError::EmptyCorrections);
        }
        self.corrections = Some(corrections);
        Ok(())
    }

    /// Validate that the application is in the expected status.
    fn require_status(
        &self,
        expected: ApplicationStatus,
        target: ApplicationStatus,
    ) -> Result<(), WorkflowError> {
        if self.status.is_terminal() {
            return Err(WorkflowError::Terminal {
                id: self.id.to_string(),
            });
        }
        if self.status != expected {
            return Err(WorkflowError::InvalidTransition {
                from: self.status.to_string(),
                to: target.to_string(),
                reason: format!("expected status {expected}"),
            });
        }
        Ok(())
    }

    /// Record a transition: set the status, append to the history, bump
    /// the version.
    fn do_transition(&mut self, to: ApplicationStatus, ctx: TransitionContext) {
        self.status = to;
        self.status_history.push(StatusChange {
            status: to,
            at: ctx.at,
            comment: ctx.comment,
        });
        self.updated_at = ctx.at;
        self.version += 1;
    }
}
