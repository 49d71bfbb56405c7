use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::activity::{compare_capacity_then_name, ActivityDefinition};
use super::camper::Camper;
use super::ActivityId;

/// One ranked wish: rank 1 is the favorite, rank 4 the least favorite. An
/// empty rank (no request) carries no activity reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRequest {
    pub rank: u8,
    pub activity: Option<ActivityId>,
}

impl ActivityRequest {
    /// Requests order by rank alone; any further tie-break is imposed by the
    /// caller.
    pub fn cmp_by_rank(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// A camper's ranked activity wishes plus the single alternate fallback and
/// the optional cabin-mate wish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CamperRequests {
    pub camper: Camper,
    /// Cabin mate wish, last name only. Used for display grouping, never
    /// enforced by the scheduler.
    pub cabin_mate: Option<String>,
    pub activity_requests: Vec<ActivityRequest>,
    pub alternate_activity: Option<ActivityId>,
}

impl CamperRequests {
    pub fn new(
        camper: Camper,
        cabin_mate: Option<String>,
        mut activity_requests: Vec<ActivityRequest>,
        alternate_activity: Option<ActivityId>,
    ) -> Self {
        activity_requests.sort_by(|a, b| a.cmp_by_rank(b));
        CamperRequests {
            camper,
            cabin_mate,
            activity_requests,
            alternate_activity,
        }
    }

    /// Ranked requests not yet reflected in the camper's scheduled blocks,
    /// recomputed from current state on every call. Once the alternate has
    /// been used the last outstanding entry is dropped, on the assumption
    /// that the alternate stood in for the hardest-ranked one.
    pub fn unscheduled_activities(&self) -> Vec<ActivityRequest> {
        let mut unscheduled: Vec<ActivityRequest> = self
            .activity_requests
            .iter()
            .filter(|request| match request.activity {
                Some(activity) => !self
                    .camper
                    .scheduled_blocks
                    .iter()
                    .any(|block| block.activity == activity),
                None => true,
            })
            .cloned()
            .collect();
        if self.scheduled_alternate_activity() {
            unscheduled.pop();
        }
        unscheduled
    }

    /// Whether any of the camper's placed blocks belongs to the alternate.
    pub fn scheduled_alternate_activity(&self) -> bool {
        match self.alternate_activity {
            Some(alternate) => self
                .camper
                .scheduled_blocks
                .iter()
                .any(|block| block.activity == alternate),
            None => false,
        }
    }
}

/// Difficulty-first ordering for camper requests: campers with longer or
/// more constrained preference lists are placed while the most slots are
/// still open.
///
/// Ranked requests compare pairwise by rank; ties break toward the camper
/// with MORE requests, then toward the camper WITHOUT an alternate. Two
/// alternates compare by capacity then name.
pub fn compare_placement_difficulty(
    a: &CamperRequests,
    b: &CamperRequests,
    activities: &[ActivityDefinition],
) -> Ordering {
    let shared = a.activity_requests.len().min(b.activity_requests.len());
    for index in 0..shared {
        let by_rank = a.activity_requests[index].cmp_by_rank(&b.activity_requests[index]);
        if by_rank != Ordering::Equal {
            return by_rank;
        }
    }

    // More requests are harder to satisfy, so they sort first.
    let by_count = b.activity_requests.len().cmp(&a.activity_requests.len());
    if by_count != Ordering::Equal {
        return by_count;
    }

    match (a.alternate_activity, b.alternate_activity) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(first), Some(second)) => {
            compare_capacity_then_name(&activities[first], &activities[second])
        }
    }
}
