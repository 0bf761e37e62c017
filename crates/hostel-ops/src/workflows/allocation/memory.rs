use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::domain::{
    AllocationRecord, Gender, GenderPolicy, HostelId, HostelSummary, RoomId, RoomState, StudentId,
    StudentProfile,
};
use super::repository::{CommitError, DirectoryStore, StoreError};

/// Reference Directory Store backed by a single mutex. The commit path runs
/// its capacity check, occupancy increment, allocation insert, and student
/// flag flip under one lock acquisition, which gives the conditional
/// check-and-increment semantics the engine relies on.
///
/// Production deployments swap in a database-backed adapter; this one serves
/// the bundled API server, the CLI demo, and tests.
#[derive(Default)]
pub struct InMemoryDirectory {
    inner: Mutex<DirectoryInner>,
}

#[derive(Default)]
struct DirectoryInner {
    students: Vec<StudentProfile>,
    allocated: HashSet<StudentId>,
    hostels: Vec<HostelSummary>,
    rooms: Vec<RoomState>,
    allocations: Vec<AllocationRecord>,
}

impl InMemoryDirectory {
    pub fn add_hostel(&self, name: &str, gender_policy: GenderPolicy, distance_km: u32) -> HostelId {
        let mut inner = self.inner.lock().expect("directory mutex poisoned");
        let id = HostelId(format!("h-{:02}", inner.hostels.len() + 1));
        inner.hostels.push(HostelSummary {
            id: id.clone(),
            name: name.to_string(),
            gender_policy,
            distance_km,
        });
        id
    }

    pub fn add_room(&self, hostel: &HostelId, room_number: &str, capacity: u32) -> RoomId {
        let mut inner = self.inner.lock().expect("directory mutex poisoned");
        let id = RoomId(format!("r-{}-{room_number}", hostel.0));
        inner.rooms.push(RoomState {
            id: id.clone(),
            hostel_id: hostel.clone(),
            room_number: room_number.to_string(),
            capacity,
            occupancy: 0,
        });
        id
    }

    pub fn register_student(&self, profile: StudentProfile) -> StudentId {
        let mut inner = self.inner.lock().expect("directory mutex poisoned");
        let id = profile.id.clone();
        inner.students.push(profile);
        id
    }

    pub fn register_students<I: IntoIterator<Item = StudentProfile>>(&self, profiles: I) {
        let mut inner = self.inner.lock().expect("directory mutex poisoned");
        inner.students.extend(profiles);
    }

    pub fn allocations(&self) -> Vec<AllocationRecord> {
        let inner = self.inner.lock().expect("directory mutex poisoned");
        inner.allocations.clone()
    }

    pub fn rooms(&self) -> Vec<RoomState> {
        let inner = self.inner.lock().expect("directory mutex poisoned");
        inner.rooms.clone()
    }

    pub fn student_gender(&self, student: &StudentId) -> Option<Gender> {
        let inner = self.inner.lock().expect("directory mutex poisoned");
        inner
            .students
            .iter()
            .find(|profile| &profile.id == student)
            .map(|profile| profile.gender)
    }
}

impl DirectoryStore for InMemoryDirectory {
    fn find_unallocated_students(&self) -> Result<Vec<StudentProfile>, StoreError> {
        let inner = self.inner.lock().expect("directory mutex poisoned");
        Ok(inner
            .students
            .iter()
            .filter(|profile| !inner.allocated.contains(&profile.id))
            .cloned()
            .collect())
    }

    fn find_hostels(&self) -> Result<Vec<HostelSummary>, StoreError> {
        let inner = self.inner.lock().expect("directory mutex poisoned");
        Ok(inner.hostels.clone())
    }

    fn find_rooms_by_hostel(&self, hostel: &HostelId) -> Result<Vec<RoomState>, StoreError> {
        let inner = self.inner.lock().expect("directory mutex poisoned");
        Ok(inner
            .rooms
            .iter()
            .filter(|room| &room.hostel_id == hostel)
            .cloned()
            .collect())
    }

    fn find_active_allocation(
        &self,
        student: &StudentId,
    ) -> Result<Option<AllocationRecord>, StoreError> {
        let inner = self.inner.lock().expect("directory mutex poisoned");
        Ok(inner
            .allocations
            .iter()
            .find(|record| &record.student_id == student && record.active)
            .cloned())
    }

    fn commit_allocation(
        &self,
        student: &StudentId,
        room: &RoomId,
        at: DateTime<Utc>,
    ) -> Result<AllocationRecord, CommitError> {
        let mut inner = self.inner.lock().expect("directory mutex poisoned");

        if inner.allocated.contains(student) {
            return Err(CommitError::RaceLost);
        }

        let state = inner
            .rooms
            .iter_mut()
            .find(|state| &state.id == room)
            .ok_or_else(|| CommitError::Unavailable(format!("unknown room {}", room.0)))?;
        if state.occupancy >= state.capacity {
            return Err(CommitError::RaceLost);
        }

        state.occupancy += 1;
        let hostel_id = state.hostel_id.clone();

        let record = AllocationRecord {
            student_id: student.clone(),
            room_id: room.clone(),
            hostel_id,
            active: true,
            allocated_at: at,
        };
        inner.allocations.push(record.clone());
        inner.allocated.insert(student.clone());
        Ok(record)
    }
}
