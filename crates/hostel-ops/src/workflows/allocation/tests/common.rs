use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::workflows::allocation::config::AllocationPolicy;
use crate::workflows::allocation::domain::{
    AllocationRecord, Gender, HostelId, HostelSummary, RoomId, RoomState, StudentId,
    StudentProfile,
};
use crate::workflows::allocation::engine::AllocationEngine;
use crate::workflows::allocation::memory::InMemoryDirectory;
use crate::workflows::allocation::repository::{CommitError, DirectoryStore, StoreError};

pub(super) fn registered(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 1, 9, minute, 0)
        .single()
        .expect("valid registration instant")
}

pub(super) fn run_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 15, 10, 0, 0)
        .single()
        .expect("valid run instant")
}

pub(super) fn student(
    id: &str,
    gender: Gender,
    preferred: Option<&str>,
    minute: u32,
) -> StudentProfile {
    StudentProfile {
        id: StudentId(id.to_string()),
        name: id.to_string(),
        email: format!("{id}@campus.test"),
        gender,
        branch: "CSE".to_string(),
        year: 1,
        preferred_hostel: preferred.map(str::to_string),
        registered_at: registered(minute),
        discipline_score: 0,
    }
}

pub(super) fn engine(store: Arc<InMemoryDirectory>) -> AllocationEngine<InMemoryDirectory> {
    AllocationEngine::new(store, AllocationPolicy::default())
}

/// Store that is down for everything; drives run-level failure paths.
pub(super) struct UnavailableDirectory;

impl DirectoryStore for UnavailableDirectory {
    fn find_unallocated_students(&self) -> Result<Vec<StudentProfile>, StoreError> {
        Err(StoreError::Unavailable("directory offline".to_string()))
    }

    fn find_hostels(&self) -> Result<Vec<HostelSummary>, StoreError> {
        Err(StoreError::Unavailable("directory offline".to_string()))
    }

    fn find_rooms_by_hostel(&self, _hostel: &HostelId) -> Result<Vec<RoomState>, StoreError> {
        Err(StoreError::Unavailable("directory offline".to_string()))
    }

    fn find_active_allocation(
        &self,
        _student: &StudentId,
    ) -> Result<Option<AllocationRecord>, StoreError> {
        Err(StoreError::Unavailable("directory offline".to_string()))
    }

    fn commit_allocation(
        &self,
        _student: &StudentId,
        _room: &RoomId,
        _at: DateTime<Utc>,
    ) -> Result<AllocationRecord, CommitError> {
        Err(CommitError::Unavailable("directory offline".to_string()))
    }
}

/// Delegating store whose commit path fails a configured number of times
/// before recovering; reads always pass through.
pub(super) struct FlakyCommitDirectory {
    pub(super) inner: InMemoryDirectory,
    remaining_failures: Mutex<u32>,
}

impl FlakyCommitDirectory {
    pub(super) fn failing(times: u32) -> Self {
        Self {
            inner: InMemoryDirectory::default(),
            remaining_failures: Mutex::new(times),
        }
    }
}

impl DirectoryStore for FlakyCommitDirectory {
    fn find_unallocated_students(&self) -> Result<Vec<StudentProfile>, StoreError> {
        self.inner.find_unallocated_students()
    }

    fn find_hostels(&self) -> Result<Vec<HostelSummary>, StoreError> {
        self.inner.find_hostels()
    }

    fn find_rooms_by_hostel(&self, hostel: &HostelId) -> Result<Vec<RoomState>, StoreError> {
        self.inner.find_rooms_by_hostel(hostel)
    }

    fn find_active_allocation(
        &self,
        student: &StudentId,
    ) -> Result<Option<AllocationRecord>, StoreError> {
        self.inner.find_active_allocation(student)
    }

    fn commit_allocation(
        &self,
        student: &StudentId,
        room: &RoomId,
        at: DateTime<Utc>,
    ) -> Result<AllocationRecord, CommitError> {
        {
            let mut remaining = self
                .remaining_failures
                .lock()
                .expect("failure counter mutex poisoned");
            if *remaining > 0 {
                *remaining -= 1;
                return Err(CommitError::Unavailable("write path flapping".to_string()));
            }
        }
        self.inner.commit_allocation(student, room, at)
    }
}
