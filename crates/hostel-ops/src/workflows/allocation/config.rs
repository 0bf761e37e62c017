use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{Gender, StudentProfile};

/// Which students get first pick when capacity is scarce. Housing offices
/// disagree on this (registration date vs. discipline score), so the order
/// is configuration, never an in-code default branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOrder {
    /// Earliest `registered_at` first; ties by ascending year, then id.
    RegistrationDate,
    /// Highest `discipline_score` first; ties by ascending year, then id.
    DisciplineScore,
}

/// Explicit fallback chain for students of one gender who asked for one
/// hostel by name. Loaded as data so housing staff can rework the graph
/// without a deploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPreference {
    pub gender: Gender,
    pub preferred: String,
    pub fallbacks: Vec<String>,
}

/// Full allocation policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    pub priority: PriorityOrder,
    #[serde(default)]
    pub fallbacks: Vec<FallbackPreference>,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            priority: PriorityOrder::RegistrationDate,
            fallbacks: Vec::new(),
        }
    }
}

impl AllocationPolicy {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PolicyError> {
        let policy = serde_json::from_reader(reader)?;
        Ok(policy)
    }

    /// Sort an unallocated snapshot into the priority order used for a run.
    /// Deterministic for identical snapshots regardless of store ordering.
    pub fn sort_students(&self, students: &mut [StudentProfile]) {
        match self.priority {
            PriorityOrder::RegistrationDate => students.sort_by(|a, b| {
                a.registered_at
                    .cmp(&b.registered_at)
                    .then_with(|| a.year.cmp(&b.year))
                    .then_with(|| a.id.cmp(&b.id))
            }),
            PriorityOrder::DisciplineScore => students.sort_by(|a, b| {
                b.discipline_score
                    .cmp(&a.discipline_score)
                    .then_with(|| a.year.cmp(&b.year))
                    .then_with(|| a.id.cmp(&b.id))
            }),
        }
    }

    /// Configured fallback chain for a (gender, preferred hostel) pair.
    pub fn fallback_chain(&self, gender: Gender, preferred: &str) -> &[String] {
        self.fallbacks
            .iter()
            .find(|rule| rule.gender == gender && rule.preferred == preferred)
            .map(|rule| rule.fallbacks.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to read allocation policy: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid allocation policy document: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::workflows::allocation::domain::StudentId;

    fn student(id: &str, year: u8, registered_day: u32, score: i32) -> StudentProfile {
        StudentProfile {
            id: StudentId(id.to_string()),
            name: id.to_string(),
            email: format!("{id}@campus.test"),
            gender: Gender::Female,
            branch: "CSE".to_string(),
            year,
            preferred_hostel: None,
            registered_at: Utc
                .with_ymd_and_hms(2025, 7, registered_day, 9, 0, 0)
                .unwrap(),
            discipline_score: score,
        }
    }

    #[test]
    fn registration_order_prefers_earliest_then_year() {
        let policy = AllocationPolicy::default();
        let mut students = vec![
            student("s-3", 2, 5, 10),
            student("s-1", 3, 1, 40),
            student("s-2", 1, 5, 90),
        ];
        policy.sort_students(&mut students);
        let ids: Vec<&str> = students.iter().map(|s| s.id.0.as_str()).collect();
        assert_eq!(ids, vec!["s-1", "s-2", "s-3"]);
    }

    #[test]
    fn discipline_order_prefers_highest_score() {
        let policy = AllocationPolicy {
            priority: PriorityOrder::DisciplineScore,
            fallbacks: Vec::new(),
        };
        let mut students = vec![
            student("s-1", 1, 1, 50),
            student("s-2", 4, 2, 80),
            student("s-3", 2, 3, 80),
        ];
        policy.sort_students(&mut students);
        let ids: Vec<&str> = students.iter().map(|s| s.id.0.as_str()).collect();
        // equal scores fall back to ascending year
        assert_eq!(ids, vec!["s-3", "s-2", "s-1"]);
    }

    #[test]
    fn policy_document_round_trips_from_json() {
        let raw = r#"{
            "priority": "discipline_score",
            "fallbacks": [
                { "gender": "FEMALE", "preferred": "Alpha", "fallbacks": ["Gamma"] }
            ]
        }"#;
        let policy = AllocationPolicy::from_reader(raw.as_bytes()).expect("valid policy");
        assert_eq!(policy.priority, PriorityOrder::DisciplineScore);
        assert_eq!(policy.fallback_chain(Gender::Female, "Alpha"), ["Gamma"]);
        assert!(policy.fallback_chain(Gender::Male, "Alpha").is_empty());
    }

    #[test]
    fn rejects_malformed_policy_document() {
        let raw = r#"{ "priority": "coin_flip" }"#;
        let err = AllocationPolicy::from_reader(raw.as_bytes()).expect_err("invalid priority");
        assert!(matches!(err, PolicyError::Json(_)));
    }
}
