//! Complaint ticketing tied to active room allocations.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Complaint, ComplaintId, ComplaintSeverity, ComplaintStatus, ComplaintSubmission,
};
pub use repository::{ComplaintRepository, ComplaintRepositoryError, InMemoryComplaintLog};
pub use router::complaint_router;
pub use service::{ComplaintError, ComplaintService};
