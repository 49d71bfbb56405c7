use std::collections::{HashMap, HashSet};

use super::requests::CamperRequests;
use super::ActivityId;

/// Builds cabin groups as connected components over the "wants to be with"
/// relation. Cabin mates are named by last name only, so last names are the
/// node identity; campers who asked for nobody join no group.
///
/// Plain linear union-find over a list of disjoint sets: for each request
/// with a mate, locate the set holding the camper and the set holding the
/// mate, then seed, extend or merge as needed. Only membership matters to
/// callers, not set or member order.
pub fn generate_camper_mate_groups(requests: &[CamperRequests]) -> Vec<HashSet<String>> {
    let mut groups: Vec<HashSet<String>> = Vec::new();

    for request in requests {
        let Some(mate) = &request.cabin_mate else {
            continue;
        };
        let camper = request.camper.last_name.clone();
        let camper_group = groups.iter().position(|group| group.contains(&camper));
        let mate_group = groups.iter().position(|group| group.contains(mate));

        match (camper_group, mate_group) {
            (None, None) => {
                let mut group = HashSet::new();
                group.insert(mate.clone());
                group.insert(camper);
                groups.push(group);
            }
            (Some(index), None) => {
                groups[index].insert(mate.clone());
            }
            (None, Some(index)) => {
                groups[index].insert(camper);
            }
            (Some(camper_index), Some(mate_index)) if camper_index != mate_index => {
                let merged = groups.remove(camper_index.max(mate_index));
                groups[camper_index.min(mate_index)].extend(merged);
            }
            _ => {}
        }
    }

    groups
}

/// Per-camper preference list used for display annotation (star ratings):
/// the ranked requests in order, the alternate appended last, empty ranks
/// filtered out. The scheduler itself never consumes this.
pub fn generate_camper_activity_preferences(
    requests: &[CamperRequests],
) -> HashMap<String, Vec<ActivityId>> {
    let mut preferences = HashMap::new();
    for request in requests {
        let mut activities: Vec<ActivityId> = request
            .activity_requests
            .iter()
            .filter_map(|ranked| ranked.activity)
            .collect();
        if let Some(alternate) = request.alternate_activity {
            activities.push(alternate);
        }
        preferences.insert(request.camper.full_name(), activities);
    }
    preferences
}
