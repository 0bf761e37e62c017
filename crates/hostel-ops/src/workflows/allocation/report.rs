use serde::Serialize;

use super::domain::{GenderPolicy, HostelId};
use super::repository::{DirectoryStore, StoreError};

/// Per-hostel occupancy row for dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostelOccupancyView {
    pub hostel_id: HostelId,
    pub name: String,
    pub gender_policy: GenderPolicy,
    pub total_capacity: u32,
    pub total_occupied: u32,
    pub available_spots: u32,
    pub occupancy_rate_percent: u8,
}

/// Pure aggregation over the store's current room counters, ordered by
/// hostel name. No side effects; concurrent with a run it may read counts
/// that are a commit or two stale, which is fine for reporting.
pub fn occupancy_snapshot<R: DirectoryStore + ?Sized>(
    store: &R,
) -> Result<Vec<HostelOccupancyView>, StoreError> {
    let mut hostels = store.find_hostels()?;
    hostels.sort_by(|a, b| a.name.cmp(&b.name));

    let mut views = Vec::with_capacity(hostels.len());
    for hostel in hostels {
        let rooms = store.find_rooms_by_hostel(&hostel.id)?;
        let total_capacity: u32 = rooms.iter().map(|room| room.capacity).sum();
        let total_occupied: u32 = rooms.iter().map(|room| room.occupancy).sum();

        views.push(HostelOccupancyView {
            hostel_id: hostel.id,
            name: hostel.name,
            gender_policy: hostel.gender_policy,
            total_capacity,
            total_occupied,
            available_spots: total_capacity.saturating_sub(total_occupied),
            occupancy_rate_percent: rate_percent(total_occupied, total_capacity),
        });
    }

    Ok(views)
}

/// Rounded percentage, 0 for a hostel with no rooms yet.
fn rate_percent(occupied: u32, capacity: u32) -> u8 {
    if capacity == 0 {
        return 0;
    }
    let rate = (u64::from(occupied) * 100 + u64::from(capacity) / 2) / u64::from(capacity);
    rate as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_rounds_to_nearest_and_handles_empty() {
        assert_eq!(rate_percent(0, 0), 0);
        assert_eq!(rate_percent(0, 10), 0);
        assert_eq!(rate_percent(1, 3), 33);
        assert_eq!(rate_percent(2, 3), 67);
        assert_eq!(rate_percent(3, 3), 100);
    }
}
