use super::config::AllocationPolicy;
use super::domain::{Gender, HostelId, HostelSummary};

/// Orders candidate hostels for a student: preferred hostel first when its
/// gender policy admits the student, then the configured fallback chain,
/// then every remaining eligible hostel by ascending `(distance_km, id)`.
///
/// An empty candidate list is a normal answer, not an error; the engine
/// records such students as unallocatable for the run.
pub struct EligibilityPolicy<'a> {
    policy: &'a AllocationPolicy,
    /// Base list pre-sorted by `(distance_km, id)`.
    hostels: Vec<&'a HostelSummary>,
}

impl<'a> EligibilityPolicy<'a> {
    pub fn new(policy: &'a AllocationPolicy, hostels: &'a [HostelSummary]) -> Self {
        let mut sorted: Vec<&HostelSummary> = hostels.iter().collect();
        sorted.sort_by(|a, b| {
            a.distance_km
                .cmp(&b.distance_km)
                .then_with(|| a.id.cmp(&b.id))
        });
        Self {
            policy,
            hostels: sorted,
        }
    }

    pub fn candidate_hostels(&self, gender: Gender, preferred_name: Option<&str>) -> Vec<HostelId> {
        let mut named: Vec<&str> = Vec::new();
        if let Some(preferred) = preferred_name {
            named.push(preferred);
            named.extend(
                self.policy
                    .fallback_chain(gender, preferred)
                    .iter()
                    .map(String::as_str),
            );
        }

        let mut candidates: Vec<HostelId> = Vec::new();
        for name in named {
            if let Some(hostel) = self.hostels.iter().find(|hostel| hostel.name == name) {
                if hostel.gender_policy.admits(gender) && !candidates.contains(&hostel.id) {
                    candidates.push(hostel.id.clone());
                }
            }
        }

        for hostel in &self.hostels {
            if hostel.gender_policy.admits(gender) && !candidates.contains(&hostel.id) {
                candidates.push(hostel.id.clone());
            }
        }

        candidates
    }
}
