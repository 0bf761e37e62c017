use chrono::{DateTime, Utc};

use super::domain::{
    AllocationRecord, HostelId, HostelSummary, RoomId, RoomState, StudentId, StudentProfile,
};

/// Directory Store seam. The engine depends only on this trait, never on a
/// concrete database client, so runs can be exercised against in-memory
/// fakes and the production adapter interchangeably.
pub trait DirectoryStore: Send + Sync {
    /// Students with no active allocation, in no particular order; the
    /// engine applies the configured priority order itself.
    fn find_unallocated_students(&self) -> Result<Vec<StudentProfile>, StoreError>;

    fn find_hostels(&self) -> Result<Vec<HostelSummary>, StoreError>;

    /// Current room states for one hostel, including occupancy counters.
    fn find_rooms_by_hostel(&self, hostel: &HostelId) -> Result<Vec<RoomState>, StoreError>;

    fn find_active_allocation(
        &self,
        student: &StudentId,
    ) -> Result<Option<AllocationRecord>, StoreError>;

    /// The atomic commit unit: check the room still has spare capacity and
    /// the student still has no active allocation, then increment occupancy,
    /// insert the allocation row, and flip the student's allocated flag as
    /// one all-or-nothing operation. A conditional update that finds the
    /// room full (or the student taken) reports [`CommitError::RaceLost`]
    /// and must leave no partial state behind.
    fn commit_allocation(
        &self,
        student: &StudentId,
        room: &RoomId,
        at: DateTime<Utc>,
    ) -> Result<AllocationRecord, CommitError>;
}

/// Read-path failures from the Directory Store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("directory store unavailable: {0}")]
    Unavailable(String),
}

/// Commit-path failures. `RaceLost` is an expected outcome under concurrent
/// runs, not a fault; the engine converts it into another selection attempt.
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error("capacity check rejected the commit")]
    RaceLost,
    #[error("directory store unavailable: {0}")]
    Unavailable(String),
}
