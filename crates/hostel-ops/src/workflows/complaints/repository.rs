use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::workflows::allocation::domain::HostelId;

use super::domain::{Complaint, ComplaintId};

/// Storage abstraction for tickets so the service can run against the
/// in-memory log or a database adapter.
pub trait ComplaintRepository: Send + Sync {
    fn insert(&self, complaint: Complaint) -> Result<Complaint, ComplaintRepositoryError>;
    fn fetch(&self, id: &ComplaintId) -> Result<Option<Complaint>, ComplaintRepositoryError>;
    fn update(&self, complaint: Complaint) -> Result<(), ComplaintRepositoryError>;
    /// Tickets for one hostel, newest first.
    fn for_hostel(&self, hostel: &HostelId) -> Result<Vec<Complaint>, ComplaintRepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ComplaintRepositoryError {
    #[error("complaint already exists")]
    Conflict,
    #[error("complaint not found")]
    NotFound,
    #[error("complaint store unavailable: {0}")]
    Unavailable(String),
}

/// Mutex-backed reference implementation.
#[derive(Default, Clone)]
pub struct InMemoryComplaintLog {
    tickets: Arc<Mutex<HashMap<ComplaintId, Complaint>>>,
}

impl ComplaintRepository for InMemoryComplaintLog {
    fn insert(&self, complaint: Complaint) -> Result<Complaint, ComplaintRepositoryError> {
        let mut guard = self.tickets.lock().expect("complaint mutex poisoned");
        if guard.contains_key(&complaint.id) {
            return Err(ComplaintRepositoryError::Conflict);
        }
        guard.insert(complaint.id.clone(), complaint.clone());
        Ok(complaint)
    }

    fn fetch(&self, id: &ComplaintId) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let guard = self.tickets.lock().expect("complaint mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, complaint: Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut guard = self.tickets.lock().expect("complaint mutex poisoned");
        if guard.contains_key(&complaint.id) {
            guard.insert(complaint.id.clone(), complaint);
            Ok(())
        } else {
            Err(ComplaintRepositoryError::NotFound)
        }
    }

    fn for_hostel(&self, hostel: &HostelId) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let guard = self.tickets.lock().expect("complaint mutex poisoned");
        let mut tickets: Vec<Complaint> = guard
            .values()
            .filter(|complaint| &complaint.hostel_id == hostel)
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets)
    }
}
