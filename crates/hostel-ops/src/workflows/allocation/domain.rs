use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered students.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Identifier wrapper for hostels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostelId(pub String);

/// Identifier wrapper for rooms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

/// Which genders a hostel admits. Authoritative for eligibility; the
/// preferred-hostel string on a student never overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GenderPolicy {
    Male,
    Female,
    Both,
}

impl GenderPolicy {
    pub const fn admits(self, gender: Gender) -> bool {
        match self {
            GenderPolicy::Both => true,
            GenderPolicy::Male => matches!(gender, Gender::Male),
            GenderPolicy::Female => matches!(gender, Gender::Female),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            GenderPolicy::Male => "MALE",
            GenderPolicy::Female => "FEMALE",
            GenderPolicy::Both => "BOTH",
        }
    }
}

/// Snapshot of an unallocated student as the engine sees it.
/// Branch and year are informational; year doubles as a priority tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub branch: String,
    pub year: u8,
    pub preferred_hostel: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub discipline_score: i32,
}

/// Static reference data for one hostel. The engine never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostelSummary {
    pub id: HostelId,
    pub name: String,
    pub gender_policy: GenderPolicy,
    /// Distance from campus center, used as the secondary ordering key when
    /// no explicit fallback chain covers a student.
    pub distance_km: u32,
}

/// Room-level occupancy state. `occupancy <= capacity` always holds; the
/// only mutator is the store's allocation commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomState {
    pub id: RoomId,
    pub hostel_id: HostelId,
    pub room_number: String,
    pub capacity: u32,
    pub occupancy: u32,
}

impl RoomState {
    pub fn has_vacancy(&self) -> bool {
        self.occupancy < self.capacity
    }

    pub fn available_beds(&self) -> u32 {
        self.capacity.saturating_sub(self.occupancy)
    }
}

/// One student-to-room assignment. At most one active record per student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub student_id: StudentId,
    pub room_id: RoomId,
    pub hostel_id: HostelId,
    pub active: bool,
    pub allocated_at: DateTime<Utc>,
}

/// Why a student came out of a run without a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoEligibleHostel,
    NoCapacityAvailable,
    RaceLost,
    StoreUnavailable,
}

impl SkipReason {
    pub const fn label(self) -> &'static str {
        match self {
            SkipReason::NoEligibleHostel => "no_eligible_hostel",
            SkipReason::NoCapacityAvailable => "no_capacity_available",
            SkipReason::RaceLost => "race_lost",
            SkipReason::StoreUnavailable => "store_unavailable",
        }
    }
}

/// Per-student result within a run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentOutcome {
    pub student_id: StudentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
}

impl StudentOutcome {
    pub fn assigned(student_id: StudentId, room_id: RoomId) -> Self {
        Self {
            student_id,
            room_id: Some(room_id),
            reason: None,
        }
    }

    pub fn skipped(student_id: StudentId, reason: SkipReason) -> Self {
        Self {
            student_id,
            room_id: None,
            reason: Some(reason),
        }
    }
}

/// Outcome of one allocation run over the full unallocated snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub assigned: usize,
    pub unassigned: usize,
    pub details: Vec<StudentOutcome>,
}
