use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::workflows::allocation::domain::HostelId;
use crate::workflows::allocation::repository::{DirectoryStore, StoreError};

use super::domain::{Complaint, ComplaintId, ComplaintStatus, ComplaintSubmission};
use super::repository::{ComplaintRepository, ComplaintRepositoryError};

static COMPLAINT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_complaint_id() -> ComplaintId {
    let id = COMPLAINT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ComplaintId(format!("cmp-{id:06}"))
}

/// Ticketing service. Filing requires an active allocation, from which the
/// ticket inherits its room and hostel; status changes must follow the
/// lifecycle in [`ComplaintStatus`].
pub struct ComplaintService<S, C> {
    directory: Arc<S>,
    tickets: Arc<C>,
}

impl<S, C> ComplaintService<S, C>
where
    S: DirectoryStore + 'static,
    C: ComplaintRepository + 'static,
{
    pub fn new(directory: Arc<S>, tickets: Arc<C>) -> Self {
        Self { directory, tickets }
    }

    pub fn file(
        &self,
        submission: ComplaintSubmission,
        now: DateTime<Utc>,
    ) -> Result<Complaint, ComplaintError> {
        let allocation = self
            .directory
            .find_active_allocation(&submission.student_id)?
            .ok_or(ComplaintError::NotAllocated)?;

        let complaint = Complaint {
            id: next_complaint_id(),
            student_id: submission.student_id,
            hostel_id: allocation.hostel_id,
            room_id: allocation.room_id,
            issue_type: submission.issue_type,
            description: submission.description,
            severity: submission.severity,
            category: submission.category,
            status: ComplaintStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let stored = self.tickets.insert(complaint)?;
        info!(complaint = %stored.id.0, hostel = %stored.hostel_id.0, "complaint filed");
        Ok(stored)
    }

    pub fn update_status(
        &self,
        id: &ComplaintId,
        next: ComplaintStatus,
        now: DateTime<Utc>,
    ) -> Result<Complaint, ComplaintError> {
        let mut complaint = self
            .tickets
            .fetch(id)?
            .ok_or(ComplaintError::Repository(ComplaintRepositoryError::NotFound))?;

        if !complaint.status.can_transition(next) {
            return Err(ComplaintError::InvalidTransition {
                from: complaint.status,
                to: next,
            });
        }

        complaint.status = next;
        complaint.updated_at = now;
        self.tickets.update(complaint.clone())?;
        Ok(complaint)
    }

    pub fn for_hostel(&self, hostel: &HostelId) -> Result<Vec<Complaint>, ComplaintError> {
        Ok(self.tickets.for_hostel(hostel)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ComplaintError {
    #[error("student holds no active allocation")]
    NotAllocated,
    #[error("cannot move complaint from {} to {}", from.label(), to.label())]
    InvalidTransition {
        from: ComplaintStatus,
        to: ComplaintStatus,
    },
    #[error(transparent)]
    Directory(#[from] StoreError),
    #[error(transparent)]
    Repository(#[from] ComplaintRepositoryError),
}
