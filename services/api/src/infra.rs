use chrono::{TimeZone, Utc};
use hostel_ops::workflows::allocation::{
    Gender, GenderPolicy, InMemoryDirectory, StudentId, StudentProfile,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Default campus layout: Alpha houses women closest to campus, Beta houses
/// men, Gamma takes both genders with smaller rooms.
pub(crate) fn seed_standard_campus(store: &InMemoryDirectory) {
    let alpha = store.add_hostel("Alpha", GenderPolicy::Female, 1);
    for number in 1..=30 {
        store.add_room(&alpha, &format!("{number:03}"), 3);
    }

    let beta = store.add_hostel("Beta", GenderPolicy::Male, 2);
    for number in 1..=40 {
        store.add_room(&beta, &format!("{number:03}"), 3);
    }

    let gamma = store.add_hostel("Gamma", GenderPolicy::Both, 3);
    for number in 1..=50 {
        store.add_room(&gamma, &format!("{number:03}"), 2);
    }
}

/// Built-in sample cohort for the CLI paths that run without a roster file.
pub(crate) fn sample_students() -> Vec<StudentProfile> {
    let registered = |day: u32| {
        Utc.with_ymd_and_hms(2025, 6, day, 10, 0, 0)
            .single()
            .expect("valid registration instant")
    };

    vec![
        StudentProfile {
            id: StudentId("stu-0001".to_string()),
            name: "John Doe".to_string(),
            email: "john@student.com".to_string(),
            gender: Gender::Male,
            branch: "CSE".to_string(),
            year: 2,
            preferred_hostel: Some("Beta".to_string()),
            registered_at: registered(1),
            discipline_score: 80,
        },
        StudentProfile {
            id: StudentId("stu-0002".to_string()),
            name: "Jane Smith".to_string(),
            email: "jane@student.com".to_string(),
            gender: Gender::Female,
            branch: "ECE".to_string(),
            year: 1,
            preferred_hostel: Some("Alpha".to_string()),
            registered_at: registered(2),
            discipline_score: 70,
        },
        StudentProfile {
            id: StudentId("stu-0003".to_string()),
            name: "Asha Rao".to_string(),
            email: "asha@student.com".to_string(),
            gender: Gender::Female,
            branch: "CSE".to_string(),
            year: 3,
            preferred_hostel: Some("Gamma".to_string()),
            registered_at: registered(3),
            discipline_score: 95,
        },
    ]
}
