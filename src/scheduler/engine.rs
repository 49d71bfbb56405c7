use tracing::{debug, info, warn};

use super::activity::ActivityDefinition;
use super::requests::{compare_placement_difficulty, CamperRequests};
use super::ActivityId;

/// Ranks 1 and 2 are non-negotiable: when neither an existing nor a fresh
/// block can take them, the camper hard-fails for the pass. Lower ranks are
/// substitutable by the alternate.
const LOWEST_NON_NEGOTIABLE_RANK: u8 = 2;

/// Runs a full scheduling run: sorts the requests in place so the
/// hardest-to-place campers go first, sweeps everyone at optimal capacity,
/// then retries the leftovers at maximum capacity.
///
/// Activity definitions and campers are mutated in place; the return value
/// is the set of indices (into the now-sorted request list) that could not
/// be fully satisfied. Capacity exhaustion is never an error here, only a
/// membership in that list.
pub fn schedule_activities(
    requests: &mut Vec<CamperRequests>,
    activities: &mut [ActivityDefinition],
) -> Vec<usize> {
    requests.sort_by(|a, b| compare_placement_difficulty(a, b, activities));

    let everyone: Vec<usize> = (0..requests.len()).collect();
    info!(
        campers = requests.len(),
        activities = activities.len(),
        "starting placement sweep at optimal capacity"
    );
    let unplaced = placement_sweep(&everyone, requests, activities, true);
    if unplaced.is_empty() {
        return unplaced;
    }

    info!(
        campers = unplaced.len(),
        "retrying unplaced campers at maximum capacity"
    );
    placement_sweep(&unplaced, requests, activities, false)
}

/// One placement pass over the given campers. `use_optimal_as_limit` selects
/// the capacity ceiling for existing-block placement: the optimal capacity
/// spreads campers evenly on the first pass, the true maximum is the second
/// pass's last resort.
fn placement_sweep(
    indices: &[usize],
    requests: &mut [CamperRequests],
    activities: &mut [ActivityDefinition],
    use_optimal_as_limit: bool,
) -> Vec<usize> {
    let mut unsuccessful = Vec::new();

    for &index in indices {
        let request = &mut requests[index];
        let camper_name = request.camper.full_name();

        // Step 1: try each outstanding ranked request against existing
        // blocks; failures become candidates for a fresh block.
        let mut new_block_candidates: Vec<(u8, ActivityId)> = Vec::new();
        for ranked in request.unscheduled_activities() {
            let Some(activity) = ranked.activity else {
                debug!(
                    camper = %camper_name,
                    rank = ranked.rank,
                    "request has no activity reference, skipping"
                );
                continue;
            };
            let placed = activities[activity]
                .try_assign_camper_to_existing_block(&mut request.camper, use_optimal_as_limit);
            if !placed {
                new_block_candidates.push((ranked.rank, activity));
            }
        }

        // Step 2: open fresh blocks for the leftovers. A failed top-2 choice
        // has no recovery path; failed lower choices wait for the alternate.
        let mut no_fit: Vec<(u8, ActivityId)> = Vec::new();
        let mut hard_failed = false;
        for (rank, activity) in new_block_candidates {
            if activities[activity].try_assign_camper_to_new_block(&mut request.camper) {
                continue;
            }
            if rank <= LOWEST_NON_NEGOTIABLE_RANK {
                warn!(
                    camper = %camper_name,
                    activity = %activities[activity].name,
                    rank,
                    "could not place top-ranked request, giving up on camper for this pass"
                );
                unsuccessful.push(index);
                hard_failed = true;
                break;
            }
            no_fit.push((rank, activity));
        }
        if hard_failed {
            continue;
        }
        if no_fit.is_empty() {
            continue;
        }

        // Steps 4-5: a single low-ranked leftover may be replaced by the
        // alternate, once.
        if request.scheduled_alternate_activity() || no_fit.len() > 1 {
            warn!(
                camper = %camper_name,
                leftover_requests = no_fit.len(),
                "no alternate left to cover unplaced requests"
            );
            unsuccessful.push(index);
            continue;
        }
        let Some(alternate) = request.alternate_activity else {
            warn!(camper = %camper_name, "camper has no alternate activity to fall back on");
            unsuccessful.push(index);
            continue;
        };
        let placed = activities[alternate]
            .try_assign_camper_to_existing_block(&mut request.camper, use_optimal_as_limit)
            || activities[alternate].try_assign_camper_to_new_block(&mut request.camper);
        if placed {
            info!(
                camper = %camper_name,
                alternate = %activities[alternate].name,
                "placed camper in alternate activity"
            );
        } else {
            warn!(
                camper = %camper_name,
                alternate = %activities[alternate].name,
                "alternate activity could not take camper"
            );
            unsuccessful.push(index);
        }
    }

    unsuccessful
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::camper::Camper;
    use crate::scheduler::requests::ActivityRequest;

    fn definitions(capacities: &[(u32, Option<u32>)]) -> Vec<ActivityDefinition> {
        capacities
            .iter()
            .enumerate()
            .map(|(id, &(optimal, maximum))| {
                ActivityDefinition::new(id, &format!("Activity {id}"), 0, optimal, maximum)
            })
            .collect()
    }

    fn camper_with_requests(
        first_name: &str,
        wishes: &[ActivityId],
        alternate: Option<ActivityId>,
    ) -> CamperRequests {
        let ranked = wishes
            .iter()
            .enumerate()
            .map(|(index, &activity)| ActivityRequest {
                rank: index as u8 + 1,
                activity: Some(activity),
            })
            .collect();
        CamperRequests::new(Camper::new(first_name, "Camper"), None, ranked, alternate)
    }

    #[test]
    fn second_pass_fills_to_maximum_capacity() {
        // One block's worth of room at optimal, two campers after it: the
        // second camper overflows into a new block at first, but a camper
        // with nowhere to overflow is rescued by the maximum-capacity pass.
        let mut activities = definitions(&[(1, Some(2))]);
        let mut requests = vec![
            camper_with_requests("Alice", &[0], None),
            camper_with_requests("Bobby", &[0], None),
        ];
        // Alice claims slot 0; Bobby is blocked from every other slot so the
        // only way in is sharing Alice's block beyond its optimal size.
        requests[1].camper.available_slots = [true, false, false, false];

        let unsatisfied = schedule_activities(&mut requests, &mut activities);

        assert!(unsatisfied.is_empty());
        assert_eq!(activities[0].blocks.len(), 1);
        assert_eq!(activities[0].blocks[0].assigned_campers.len(), 2);
    }

    #[test]
    fn rank_one_failure_abandons_the_rest_of_the_pass() {
        // Activity 0 cannot take anyone (maximum zero), so the rank-1
        // request hard-fails and the camper's remaining wishes are left
        // untouched for that pass; pass 2 replays and fails the same way.
        let mut activities = definitions(&[(0, Some(0)), (4, Some(4))]);
        let mut requests = vec![camper_with_requests("Alice", &[0, 1], None)];

        let unsatisfied = schedule_activities(&mut requests, &mut activities);

        assert_eq!(unsatisfied, vec![0]);
    }

    #[test]
    fn null_activity_requests_are_skipped_not_fatal() {
        let mut activities = definitions(&[(4, Some(4)), (4, Some(4))]);
        let mut requests = vec![CamperRequests::new(
            Camper::new("Alice", "Camper"),
            None,
            vec![
                ActivityRequest { rank: 1, activity: Some(0) },
                ActivityRequest { rank: 2, activity: None },
                ActivityRequest { rank: 3, activity: Some(1) },
            ],
            None,
        )];

        let unsatisfied = schedule_activities(&mut requests, &mut activities);

        assert!(unsatisfied.is_empty());
        assert_eq!(requests[0].camper.scheduled_blocks.len(), 2);
    }
}
