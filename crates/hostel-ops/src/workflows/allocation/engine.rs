use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::config::AllocationPolicy;
use super::domain::{
    AllocationRecord, RoomId, RunSummary, SkipReason, StudentId, StudentOutcome, StudentProfile,
};
use super::policy::EligibilityPolicy;
use super::report::{self, HostelOccupancyView};
use super::repository::{CommitError, DirectoryStore, StoreError};
use super::selector;

/// Batch allocator. Each invocation re-reads the unallocated snapshot and
/// current occupancy, so running it again after a partial or interrupted run
/// simply picks up the students still waiting; already-allocated students
/// never reappear in the snapshot.
pub struct AllocationEngine<R> {
    store: Arc<R>,
    policy: AllocationPolicy,
}

impl<R: DirectoryStore> AllocationEngine<R> {
    pub fn new(store: Arc<R>, policy: AllocationPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }

    /// Process every unallocated student once, in priority order. A student
    /// who finds no room is recorded as skipped and the run continues; only
    /// a store that is down for the initial loads (or for every single
    /// commit attempt) escalates to a run-level error.
    pub fn run(&self, now: DateTime<Utc>) -> Result<RunSummary, RunError> {
        let mut students = self.store.find_unallocated_students()?;
        self.policy.sort_students(&mut students);

        let hostels = self.store.find_hostels()?;
        let eligibility = EligibilityPolicy::new(&self.policy, &hostels);

        let mut details = Vec::with_capacity(students.len());
        let mut assigned = 0usize;
        let mut store_failures = 0usize;

        for student in &students {
            let outcome = self.place_student(student, &eligibility, now);
            match (&outcome.room_id, outcome.reason) {
                (Some(_), _) => assigned += 1,
                (None, Some(SkipReason::StoreUnavailable)) => store_failures += 1,
                _ => {}
            }
            details.push(outcome);
        }

        if !students.is_empty() && store_failures == students.len() {
            return Err(RunError::StoreUnavailable(
                "every commit attempt failed".to_string(),
            ));
        }

        let summary = RunSummary {
            assigned,
            unassigned: details.len() - assigned,
            details,
        };
        info!(
            assigned = summary.assigned,
            unassigned = summary.unassigned,
            "allocation run finished"
        );
        Ok(summary)
    }

    /// Current per-hostel occupancy aggregation. Read-only and safe to call
    /// while a run is in flight; a dashboard tolerates slightly stale counts.
    pub fn occupancy_report(&self) -> Result<Vec<HostelOccupancyView>, StoreError> {
        report::occupancy_snapshot(self.store.as_ref())
    }

    fn place_student(
        &self,
        student: &StudentProfile,
        eligibility: &EligibilityPolicy<'_>,
        now: DateTime<Utc>,
    ) -> StudentOutcome {
        let candidates =
            eligibility.candidate_hostels(student.gender, student.preferred_hostel.as_deref());
        if candidates.is_empty() {
            debug!(student = %student.id.0, "no hostel admits this student");
            return StudentOutcome::skipped(student.id.clone(), SkipReason::NoEligibleHostel);
        }

        let mut race_lost = false;
        for hostel_id in &candidates {
            let mut rooms = match self.store.find_rooms_by_hostel(hostel_id) {
                Ok(rooms) => rooms,
                Err(StoreError::NotFound) => continue,
                Err(StoreError::Unavailable(message)) => {
                    warn!(student = %student.id.0, %message, "room lookup failed");
                    return StudentOutcome::skipped(
                        student.id.clone(),
                        SkipReason::StoreUnavailable,
                    );
                }
            };

            // Selection and commit are separate steps, so a room can fill up
            // in between. On a lost race we drop that room and re-select
            // within the same hostel before falling through to the next one.
            loop {
                let Some(room) = selector::select_room(&rooms) else {
                    break;
                };
                let room_id = room.id.clone();
                match self.commit_with_retry(&student.id, &room_id, now) {
                    Ok(record) => {
                        info!(
                            student = %student.id.0,
                            room = %record.room_id.0,
                            hostel = %record.hostel_id.0,
                            "student allocated"
                        );
                        return StudentOutcome::assigned(student.id.clone(), record.room_id);
                    }
                    Err(CommitError::RaceLost) => {
                        race_lost = true;
                        rooms.retain(|candidate| candidate.id != room_id);
                    }
                    Err(CommitError::Unavailable(message)) => {
                        warn!(student = %student.id.0, %message, "commit failed twice");
                        return StudentOutcome::skipped(
                            student.id.clone(),
                            SkipReason::StoreUnavailable,
                        );
                    }
                }
            }
        }

        let reason = if race_lost {
            SkipReason::RaceLost
        } else {
            SkipReason::NoCapacityAvailable
        };
        debug!(student = %student.id.0, reason = reason.label(), "student skipped");
        StudentOutcome::skipped(student.id.clone(), reason)
    }

    /// One retry per student/room pair when the store itself is down;
    /// a rejected capacity check is final for that room.
    fn commit_with_retry(
        &self,
        student: &StudentId,
        room: &RoomId,
        now: DateTime<Utc>,
    ) -> Result<AllocationRecord, CommitError> {
        match self.store.commit_allocation(student, room, now) {
            Err(CommitError::Unavailable(_)) => self.store.commit_allocation(student, room, now),
            other => other,
        }
    }
}

/// Run-level failure: the Directory Store could not serve the run at all.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("allocation run aborted, directory store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for RunError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => RunError::StoreUnavailable("snapshot incomplete".to_string()),
            StoreError::Unavailable(message) => RunError::StoreUnavailable(message),
        }
    }
}
