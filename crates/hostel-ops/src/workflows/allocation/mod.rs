//! Room allocation for campus hostels.
//!
//! The engine walks the current snapshot of unallocated students in a
//! configured priority order, asks the eligibility policy for each student's
//! candidate hostels, picks rooms deterministically, and commits each
//! assignment through the Directory Store's atomic check-and-increment so
//! overlapping runs can never over-pack a room.

pub mod config;
pub mod domain;
pub mod engine;
pub mod memory;
pub mod policy;
pub mod report;
pub mod repository;
pub mod router;
pub mod selector;

#[cfg(test)]
mod tests;

pub use config::{AllocationPolicy, FallbackPreference, PolicyError, PriorityOrder};
pub use domain::{
    AllocationRecord, Gender, GenderPolicy, HostelId, HostelSummary, RoomId, RoomState,
    RunSummary, SkipReason, StudentId, StudentOutcome, StudentProfile,
};
pub use engine::{AllocationEngine, RunError};
pub use memory::InMemoryDirectory;
pub use policy::EligibilityPolicy;
pub use report::{occupancy_snapshot, HostelOccupancyView};
pub use repository::{CommitError, DirectoryStore, StoreError};
pub use router::allocation_router;
pub use selector::select_room;
