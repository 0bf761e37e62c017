use crate::infra::{sample_students, seed_standard_campus};
use chrono::Utc;
use clap::Args;
use hostel_ops::error::AppError;
use hostel_ops::workflows::allocation::{
    AllocationEngine, AllocationPolicy, HostelOccupancyView, InMemoryDirectory, RunError,
    RunSummary,
};
use hostel_ops::workflows::complaints::{
    ComplaintService, ComplaintSeverity, ComplaintStatus, ComplaintSubmission,
    InMemoryComplaintLog,
};
use hostel_ops::workflows::roster::RosterImporter;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AllocationRunArgs {
    /// Roster CSV of students to allocate (defaults to the built-in samples)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Allocation policy JSON overriding the default priority and fallback rules
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Include per-room occupancy in the demo output.
    #[arg(long)]
    pub(crate) show_rooms: bool,
    /// Skip the complaint portion of the demo.
    #[arg(long)]
    pub(crate) skip_complaint: bool,
}

pub(crate) fn run_allocation(args: AllocationRunArgs) -> Result<(), AppError> {
    let AllocationRunArgs { roster, policy } = args;

    let policy = match policy {
        Some(path) => AllocationPolicy::from_path(path)?,
        None => AllocationPolicy::default(),
    };

    let store = Arc::new(InMemoryDirectory::default());
    seed_standard_campus(&store);
    let imported = roster.is_some();
    match roster {
        Some(path) => store.register_students(RosterImporter::from_path(path)?),
        None => store.register_students(sample_students()),
    }

    if imported {
        println!("Student source: roster CSV import");
    } else {
        println!("Student source: built-in samples (no roster provided)");
    }

    let engine = AllocationEngine::new(store, policy);
    let summary = engine.run(Utc::now())?;
    render_summary(&summary);

    let report = engine.occupancy_report().map_err(RunError::from)?;
    render_occupancy(&report);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        show_rooms,
        skip_complaint,
    } = args;

    println!("Hostel operations demo");
    println!("Seeding the standard campus and sample cohort");

    let store = Arc::new(InMemoryDirectory::default());
    seed_standard_campus(&store);
    store.register_students(sample_students());

    let engine = AllocationEngine::new(store.clone(), AllocationPolicy::default());
    let summary = engine.run(Utc::now())?;
    render_summary(&summary);

    let report = engine.occupancy_report().map_err(RunError::from)?;
    render_occupancy(&report);

    if show_rooms {
        println!("\nRooms with residents");
        for room in store.rooms() {
            if room.occupancy > 0 {
                println!(
                    "- {} room {}: {}/{} beds",
                    room.hostel_id.0, room.room_number, room.occupancy, room.capacity
                );
            }
        }
    }

    if skip_complaint {
        return Ok(());
    }

    let Some(student_id) = summary
        .details
        .iter()
        .find(|outcome| outcome.room_id.is_some())
        .map(|outcome| outcome.student_id.clone())
    else {
        println!("\nNo allocated student available for the complaint demo");
        return Ok(());
    };

    println!("\nComplaint walk-through");
    let complaints = ComplaintService::new(store, Arc::new(InMemoryComplaintLog::default()));
    let submission = ComplaintSubmission {
        student_id,
        issue_type: "Water leakage".to_string(),
        description: "Ceiling drips near the window after rain".to_string(),
        severity: ComplaintSeverity::High,
        category: "MAINTENANCE".to_string(),
    };
    let filed = match complaints.file(submission, Utc::now()) {
        Ok(filed) => filed,
        Err(err) => {
            println!("  Complaint rejected: {}", err);
            return Ok(());
        }
    };
    println!(
        "- filed {} against room {} in hostel {} -> status {}",
        filed.id.0,
        filed.room_id.0,
        filed.hostel_id.0,
        filed.status.label()
    );

    match complaints.update_status(&filed.id, ComplaintStatus::InProgress, Utc::now()) {
        Ok(updated) => println!("- moved {} to {}", updated.id.0, updated.status.label()),
        Err(err) => println!("  Status update rejected: {}", err),
    }

    match complaints.for_hostel(&filed.hostel_id) {
        Ok(open) => println!("- hostel {} now has {} ticket(s) on file", filed.hostel_id.0, open.len()),
        Err(err) => println!("  Ticket listing unavailable: {}", err),
    }

    Ok(())
}

fn render_summary(summary: &RunSummary) {
    println!("\nAllocation summary");
    println!(
        "- {} assigned, {} left unassigned",
        summary.assigned, summary.unassigned
    );
    for outcome in &summary.details {
        match (&outcome.room_id, outcome.reason) {
            (Some(room), _) => println!("- {} -> room {}", outcome.student_id.0, room.0),
            (None, Some(reason)) => {
                println!("- {} skipped ({})", outcome.student_id.0, reason.label())
            }
            (None, None) => {}
        }
    }
}

fn render_occupancy(report: &[HostelOccupancyView]) {
    println!("\nOccupancy by hostel");
    for row in report {
        println!(
            "- {} [{}]: {}/{} beds taken, {} free ({}%)",
            row.name,
            row.gender_policy.label(),
            row.total_occupied,
            row.total_capacity,
            row.available_spots,
            row.occupancy_rate_percent
        );
    }
}
