//! # Notification Sink
//!
//! Fire-and-forget notifications toward applicants and officials. The
//! core requires no delivery guarantee; the sink is a seam the service
//! writes into and forgets.

use serde::{Deserialize, Serialize};

/// What a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// An official was booked for an assembly.
    MinistroAssigned,
    /// The certification protocol completed.
    CertificationCompleted,
    /// The application was rejected with corrections.
    ApplicationRejected,
    /// The application was forwarded to the registry.
    ApplicationForwarded,
    /// The organization was registered.
    ApplicationApproved,
    /// The organization was dissolved.
    OrganizationDissolved,
}

impl NotificationKind {
    /// The canonical string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MinistroAssigned => "ministro_assigned",
            Self::CertificationCompleted => "certification_completed",
            Self::ApplicationRejected => "application_rejected",
            Self::ApplicationForwarded => "application_forwarded",
            Self::ApplicationApproved => "application_approved",
            Self::OrganizationDissolved => "organization_dissolved",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification toward one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Recipient identifier (citizen or official id).
    pub recipient: String,
    /// What happened.
    pub kind: NotificationKind,
    /// Short title.
    pub title: String,
    /// Human-readable message.
    pub message: String,
    /// Structured payload for the delivering frontend.
    pub data: serde_json::Value,
}

/// Fire-and-forget delivery seam.
pub trait NotificationSink {
    /// Deliver a notification. No delivery guarantee is required.
    fn deliver(&mut self, notification: Notification);
}

/// Sink that records everything, for tests and the CLI registry file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordingSink {
    /// Every notification delivered so far, in order.
    pub delivered: Vec<Notification>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationSink for RecordingSink {
    fn deliver(&mut self, notification: Notification) {
        self.delivered.push(notification);
    }
}

/// Sink that emits notifications as structured log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn deliver(&mut self, notification: Notification) {
        tracing::info!(
            recipient = %notification.recipient,
            kind = %notification.kind,
            title = %notification.title,
            "notification delivered"
        );
    }
}
