use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use hostel_ops::workflows::allocation::{
    AllocationEngine, AllocationPolicy, Gender, GenderPolicy, InMemoryDirectory, StudentId,
    StudentProfile,
};
use hostel_ops::workflows::complaints::{
    ComplaintError, ComplaintService, ComplaintSeverity, ComplaintStatus, ComplaintSubmission,
    InMemoryComplaintLog,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0)
        .single()
        .expect("valid instant")
}

fn submission(student: &str) -> ComplaintSubmission {
    ComplaintSubmission {
        student_id: StudentId(student.to_string()),
        issue_type: "Water leakage".to_string(),
        description: "Ceiling drips over the study desk".to_string(),
        severity: ComplaintSeverity::High,
        category: "MAINTENANCE".to_string(),
    }
}

fn allocated_campus() -> Arc<InMemoryDirectory> {
    let store = Arc::new(InMemoryDirectory::default());
    let hostel = store.add_hostel("Gamma", GenderPolicy::Both, 1);
    store.add_room(&hostel, "001", 2);
    store.register_student(StudentProfile {
        id: StudentId("asha".to_string()),
        name: "Asha Rao".to_string(),
        email: "asha@student.com".to_string(),
        gender: Gender::Female,
        branch: "CSE".to_string(),
        year: 3,
        preferred_hostel: Some("Gamma".to_string()),
        registered_at: now(),
        discipline_score: 95,
    });
    AllocationEngine::new(store.clone(), AllocationPolicy::default())
        .run(now())
        .expect("allocation run");
    store
}

#[test]
fn filed_complaint_inherits_room_and_hostel_from_allocation() {
    let store = allocated_campus();
    let service = ComplaintService::new(store.clone(), Arc::new(InMemoryComplaintLog::default()));

    let complaint = service.file(submission("asha"), now()).expect("filed");

    let allocation = store
        .allocations()
        .into_iter()
        .next()
        .expect("asha is allocated");
    assert_eq!(complaint.student_id.0, "asha");
    assert_eq!(complaint.room_id, allocation.room_id);
    assert_eq!(complaint.hostel_id, allocation.hostel_id);
    assert_eq!(complaint.status, ComplaintStatus::Pending);

    let per_hostel = service
        .for_hostel(&complaint.hostel_id)
        .expect("hostel listing");
    assert_eq!(per_hostel.len(), 1);
}

#[test]
fn unallocated_student_cannot_file() {
    let store = Arc::new(InMemoryDirectory::default());
    let service = ComplaintService::new(store, Arc::new(InMemoryComplaintLog::default()));

    let err = service
        .file(submission("ghost"), now())
        .expect_err("no allocation on file");
    assert!(matches!(err, ComplaintError::NotAllocated));
}

#[test]
fn status_walks_the_lifecycle_and_rejects_shortcuts() {
    let store = allocated_campus();
    let service = ComplaintService::new(store, Arc::new(InMemoryComplaintLog::default()));
    let complaint = service.file(submission("asha"), now()).expect("filed");

    // Resolving straight from pending skips triage and must fail.
    let err = service
        .update_status(&complaint.id, ComplaintStatus::Resolved, now())
        .expect_err("shortcut rejected");
    assert!(matches!(err, ComplaintError::InvalidTransition { .. }));

    let in_progress = service
        .update_status(&complaint.id, ComplaintStatus::InProgress, now())
        .expect("triaged");
    assert_eq!(in_progress.status, ComplaintStatus::InProgress);

    let resolved = service
        .update_status(&complaint.id, ComplaintStatus::Resolved, now())
        .expect("resolved");
    let closed = service
        .update_status(&resolved.id, ComplaintStatus::Closed, now())
        .expect("closed");
    assert_eq!(closed.status, ComplaintStatus::Closed);

    let err = service
        .update_status(&closed.id, ComplaintStatus::InProgress, now())
        .expect_err("closed is terminal");
    assert!(matches!(err, ComplaintError::InvalidTransition { .. }));
}
