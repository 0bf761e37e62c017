use crate::workflows::allocation::config::{
    AllocationPolicy, FallbackPreference, PriorityOrder,
};
use crate::workflows::allocation::domain::{
    Gender, GenderPolicy, HostelId, HostelSummary, RoomId, RoomState,
};
use crate::workflows::allocation::policy::EligibilityPolicy;
use crate::workflows::allocation::selector::select_room;

fn hostel(id: &str, name: &str, policy: GenderPolicy, distance_km: u32) -> HostelSummary {
    HostelSummary {
        id: HostelId(id.to_string()),
        name: name.to_string(),
        gender_policy: policy,
        distance_km,
    }
}

fn campus() -> Vec<HostelSummary> {
    vec![
        hostel("h-01", "Alpha", GenderPolicy::Female, 2),
        hostel("h-02", "Beta", GenderPolicy::Male, 1),
        hostel("h-03", "Gamma", GenderPolicy::Both, 3),
    ]
}

#[test]
fn gender_policy_filters_candidates() {
    let policy = AllocationPolicy::default();
    let hostels = campus();
    let eligibility = EligibilityPolicy::new(&policy, &hostels);

    let male = eligibility.candidate_hostels(Gender::Male, None);
    assert_eq!(male, vec![HostelId("h-02".into()), HostelId("h-03".into())]);

    let female = eligibility.candidate_hostels(Gender::Female, None);
    assert_eq!(
        female,
        vec![HostelId("h-01".into()), HostelId("h-03".into())]
    );
}

#[test]
fn preferred_hostel_leads_when_eligible() {
    let policy = AllocationPolicy::default();
    let hostels = campus();
    let eligibility = EligibilityPolicy::new(&policy, &hostels);

    let candidates = eligibility.candidate_hostels(Gender::Female, Some("Gamma"));
    assert_eq!(
        candidates,
        vec![HostelId("h-03".into()), HostelId("h-01".into())]
    );
}

#[test]
fn ineligible_preference_is_ignored_not_fatal() {
    let policy = AllocationPolicy::default();
    let hostels = campus();
    let eligibility = EligibilityPolicy::new(&policy, &hostels);

    // A male student asking for the female-only hostel just falls back to
    // the eligible list.
    let candidates = eligibility.candidate_hostels(Gender::Male, Some("Alpha"));
    assert_eq!(candidates, vec![HostelId("h-02".into()), HostelId("h-03".into())]);
}

#[test]
fn configured_fallback_chain_outranks_distance_order() {
    let policy = AllocationPolicy {
        priority: PriorityOrder::RegistrationDate,
        fallbacks: vec![FallbackPreference {
            gender: Gender::Female,
            preferred: "Alpha".to_string(),
            fallbacks: vec!["Gamma".to_string()],
        }],
    };
    let mut hostels = campus();
    hostels.push(hostel("h-04", "Delta", GenderPolicy::Female, 0));
    let eligibility = EligibilityPolicy::new(&policy, &hostels);

    // Without the chain Delta (distance 0) would come second; the data-driven
    // fallback puts Gamma there instead.
    let candidates = eligibility.candidate_hostels(Gender::Female, Some("Alpha"));
    assert_eq!(
        candidates,
        vec![
            HostelId("h-01".into()),
            HostelId("h-03".into()),
            HostelId("h-04".into()),
        ]
    );
}

#[test]
fn no_eligible_hostel_yields_empty_list() {
    let policy = AllocationPolicy::default();
    let hostels = vec![hostel("h-01", "Alpha", GenderPolicy::Female, 2)];
    let eligibility = EligibilityPolicy::new(&policy, &hostels);

    assert!(eligibility
        .candidate_hostels(Gender::Male, Some("Alpha"))
        .is_empty());
}

fn room(number: &str, capacity: u32, occupancy: u32) -> RoomState {
    RoomState {
        id: RoomId(format!("r-{number}")),
        hostel_id: HostelId("h-01".to_string()),
        room_number: number.to_string(),
        capacity,
        occupancy,
    }
}

#[test]
fn selector_picks_lowest_numbered_room_with_space() {
    let rooms = vec![room("003", 2, 0), room("001", 2, 2), room("002", 2, 1)];
    let selected = select_room(&rooms).expect("a room has space");
    assert_eq!(selected.room_number, "002");
}

#[test]
fn selector_returns_none_when_hostel_is_full() {
    let rooms = vec![room("001", 1, 1), room("002", 2, 2)];
    assert!(select_room(&rooms).is_none());
}
