use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::allocation::domain::{HostelId, RoomId, StudentId};

/// Identifier wrapper for filed complaints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplaintId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComplaintSeverity {
    Low,
    Medium,
    High,
}

/// Ticket lifecycle. `Pending` is the only entry state; `Closed` is
/// terminal. A resolved ticket can still be reopened-adjacent via
/// escalation review, but never edited back to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Escalated,
    Resolved,
    Closed,
}

impl ComplaintStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "PENDING",
            ComplaintStatus::InProgress => "IN_PROGRESS",
            ComplaintStatus::Escalated => "ESCALATED",
            ComplaintStatus::Resolved => "RESOLVED",
            ComplaintStatus::Closed => "CLOSED",
        }
    }

    pub const fn can_transition(self, next: ComplaintStatus) -> bool {
        matches!(
            (self, next),
            (ComplaintStatus::Pending, ComplaintStatus::InProgress)
                | (ComplaintStatus::Pending, ComplaintStatus::Escalated)
                | (ComplaintStatus::InProgress, ComplaintStatus::Escalated)
                | (ComplaintStatus::InProgress, ComplaintStatus::Resolved)
                | (ComplaintStatus::Escalated, ComplaintStatus::InProgress)
                | (ComplaintStatus::Escalated, ComplaintStatus::Resolved)
                | (ComplaintStatus::Resolved, ComplaintStatus::Closed)
        )
    }
}

/// What a student submits; room and hostel are inherited from their active
/// allocation, never trusted from the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintSubmission {
    pub student_id: StudentId,
    pub issue_type: String,
    pub description: String,
    pub severity: ComplaintSeverity,
    pub category: String,
}

/// Stored ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: ComplaintId,
    pub student_id: StudentId,
    pub hostel_id: HostelId,
    pub room_id: RoomId,
    pub issue_type: String,
    pub description: String,
    pub severity: ComplaintSeverity,
    pub category: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_permits_only_forward_motion() {
        assert!(ComplaintStatus::Pending.can_transition(ComplaintStatus::InProgress));
        assert!(ComplaintStatus::Pending.can_transition(ComplaintStatus::Escalated));
        assert!(ComplaintStatus::InProgress.can_transition(ComplaintStatus::Resolved));
        assert!(ComplaintStatus::Escalated.can_transition(ComplaintStatus::InProgress));
        assert!(ComplaintStatus::Resolved.can_transition(ComplaintStatus::Closed));

        assert!(!ComplaintStatus::Pending.can_transition(ComplaintStatus::Resolved));
        assert!(!ComplaintStatus::Resolved.can_transition(ComplaintStatus::Pending));
        assert!(!ComplaintStatus::Closed.can_transition(ComplaintStatus::InProgress));
        assert!(!ComplaintStatus::InProgress.can_transition(ComplaintStatus::InProgress));
    }
}
