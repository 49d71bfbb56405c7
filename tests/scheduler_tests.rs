use camp_scheduler::scheduler::{
    compare_placement_difficulty, schedule_activities, ActivityDefinition, ActivityId,
    ActivityRequest, Camper, CamperRequests, TIME_SLOT_COUNT,
};

fn definition(
    id: usize,
    name: &str,
    optimal: u32,
    maximum: Option<u32>,
) -> ActivityDefinition {
    ActivityDefinition::new(id, name, 0, optimal, maximum)
}

fn requests_for(
    first_name: &str,
    last_name: &str,
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
    CamperRequests::new(Camper::new(first_name, last_name), None, ranked, alternate)
}

fn find_request<'a>(requests: &'a [CamperRequests], full_name: &str) -> &'a CamperRequests {
    requests
        .iter()
        .find(|request| request.camper.full_name() == full_name)
        .unwrap()
}

/// Every camper's scheduled blocks occupy distinct time slots, and every
/// placement is mirrored in the owning block's roster.
fn assert_schedule_consistent(requests: &[CamperRequests], activities: &[ActivityDefinition]) {
    for request in requests {
        let mut seen_slots = [false; TIME_SLOT_COUNT];
        for scheduled in &request.camper.scheduled_blocks {
            assert!(
                !seen_slots[scheduled.time_slot],
                "{} is double-booked in slot {}",
                request.camper.full_name(),
                scheduled.time_slot
            );
            seen_slots[scheduled.time_slot] = true;

            let block = activities[scheduled.activity]
                .blocks
                .iter()
                .find(|block| block.time_slot == scheduled.time_slot)
                .expect("camper points at a block that does not exist");
            assert!(
                block.assigned_campers.contains(&request.camper.full_name()),
                "{} missing from the roster of {} slot {}",
                request.camper.full_name(),
                activities[scheduled.activity].name,
                scheduled.time_slot
            );
        }
    }

    for definition in activities {
        for block in &definition.blocks {
            if let Some(maximum) = definition.maximum_capacity {
                assert!(
                    block.assigned_campers.len() as u32 <= maximum,
                    "{} slot {} holds more than its maximum",
                    definition.name,
                    block.time_slot
                );
            }
        }
    }
}

#[test]
fn lone_camper_fills_every_time_slot() {
    let mut activities = vec![
        definition(0, "Archery", 8, Some(10)),
        definition(1, "Boating", 8, Some(10)),
        definition(2, "Crafts", 8, Some(10)),
        definition(3, "Drama", 8, Some(10)),
    ];
    let mut requests = vec![requests_for("Alice", "Ant", &[0, 1, 2, 3], None)];

    let unsatisfied = schedule_activities(&mut requests, &mut activities);

    assert!(unsatisfied.is_empty());
    assert_eq!(requests[0].camper.scheduled_blocks.len(), TIME_SLOT_COUNT);
    for (id, definition) in activities.iter().enumerate() {
        assert_eq!(definition.blocks.len(), 1);
        assert_eq!(definition.blocks[0].time_slot, id);
        assert_eq!(definition.blocks[0].assigned_campers, vec!["Alice Ant"]);
    }
    assert_schedule_consistent(&requests, &activities);
}

#[test]
fn overflow_opens_a_second_block_for_the_contested_activity_only() {
    // Boating only has room for one camper per block at optimal, so the
    // second camper cannot share the first block and gets a fresh one in a
    // different slot instead.
    let mut activities = vec![
        definition(0, "Archery", 2, Some(2)),
        definition(1, "Boating", 1, Some(2)),
        definition(2, "Crafts", 2, Some(2)),
    ];
    let mut requests = vec![
        requests_for("Bobby", "Bear", &[0, 1, 2], None),
        requests_for("Cathy", "Cat", &[0, 1, 2], None),
    ];

    let unsatisfied = schedule_activities(&mut requests, &mut activities);

    assert!(unsatisfied.is_empty());
    assert_eq!(activities[0].blocks.len(), 1);
    assert_eq!(activities[2].blocks.len(), 1);

    assert_eq!(activities[1].blocks.len(), 2);
    let mut boating_slots: Vec<usize> = activities[1]
        .blocks
        .iter()
        .map(|block| block.time_slot)
        .collect();
    boating_slots.sort_unstable();
    assert_eq!(boating_slots, vec![1, 3]);
    for block in &activities[1].blocks {
        assert_eq!(block.assigned_campers.len(), 1);
    }

    for request in &requests {
        assert_eq!(request.camper.scheduled_blocks.len(), 3);
    }
    assert_schedule_consistent(&requests, &activities);
}

/// Boating at capacity one per block, every slot already holding a camper
/// from an earlier intake, except one. The first camper through takes that
/// last opening; whoever follows has no block to join, no slot to open a
/// block in, and no rescue from the maximum-capacity pass.
fn saturated_boating_fixture() -> Vec<ActivityDefinition> {
    let mut activities = vec![
        definition(0, "Archery", 2, Some(2)),
        definition(1, "Boating", 1, Some(1)),
        definition(2, "Crafts", 2, Some(2)),
        definition(3, "Drama", 2, Some(2)),
    ];
    activities[1].preload_blocks();
    let fillers = [
        Camper::new("Fred", "Fox"),
        Camper::new("Gina", "Goat"),
        Camper::new("Hank", "Hare"),
    ];
    let maximum = activities[1].maximum_capacity;
    for (slot, filler) in fillers.into_iter().enumerate() {
        let mut filler = filler;
        assert!(filler.try_assign_block(&mut activities[1].blocks[slot], maximum));
    }
    activities
}

#[test]
fn saturated_low_rank_request_without_alternate_fails() {
    let mut activities = saturated_boating_fixture();
    let mut requests = vec![
        requests_for("Dana", "Deer", &[0, 2, 1], None),
        requests_for("Evan", "Elk", &[0, 2, 1], None),
    ];

    let unsatisfied = schedule_activities(&mut requests, &mut activities);

    assert_eq!(unsatisfied.len(), 1);
    let loser = &requests[unsatisfied[0]];
    assert_eq!(loser.camper.full_name(), "Evan Elk");
    assert_eq!(loser.camper.scheduled_blocks.len(), 2);

    // The first camper through claimed the one open Boating block.
    let dana = find_request(&requests, "Dana Deer");
    assert!(dana
        .camper
        .scheduled_blocks
        .iter()
        .any(|block| block.activity == 1));
    assert_schedule_consistent(&requests, &activities);
}

#[test]
fn alternate_rescues_a_saturated_low_rank_request() {
    let mut activities = saturated_boating_fixture();
    let mut requests = vec![
        requests_for("Dana", "Deer", &[0, 2, 1], None),
        requests_for("Evan", "Elk", &[0, 2, 1], Some(3)),
    ];

    let unsatisfied = schedule_activities(&mut requests, &mut activities);

    assert!(unsatisfied.is_empty());
    let evan = find_request(&requests, "Evan Elk");
    assert!(evan.scheduled_alternate_activity());
    assert_eq!(evan.camper.scheduled_blocks.len(), 3);
    assert!(evan.unscheduled_activities().is_empty());

    assert_eq!(activities[3].blocks.len(), 1);
    assert_eq!(activities[3].blocks[0].assigned_campers, vec!["Evan Elk"]);
    assert_schedule_consistent(&requests, &activities);
}

#[test]
fn difficulty_ordering_is_stable_under_resorting() {
    let activities = vec![
        definition(0, "Archery", 4, Some(8)),
        definition(1, "Boating", 4, Some(20)),
    ];
    let mut requests = vec![
        requests_for("Alice", "Ant", &[0, 1], Some(1)),
        requests_for("Bobby", "Bear", &[0], None),
        requests_for("Cathy", "Cat", &[0, 1], None),
        requests_for("Dana", "Deer", &[0, 1], Some(0)),
    ];

    requests.sort_by(|a, b| compare_placement_difficulty(a, b, &activities));
    let first_order: Vec<String> = requests
        .iter()
        .map(|request| request.camper.full_name())
        .collect();

    requests.sort_by(|a, b| compare_placement_difficulty(a, b, &activities));
    let second_order: Vec<String> = requests
        .iter()
        .map(|request| request.camper.full_name())
        .collect();

    assert_eq!(first_order, second_order);
    // No alternate before small-capacity alternate before large one; the
    // shorter wish list goes last.
    assert_eq!(
        first_order,
        vec!["Cathy Cat", "Dana Deer", "Alice Ant", "Bobby Bear"]
    );
}

#[test]
fn preloaded_grid_keeps_one_block_per_slot() {
    let mut definition = definition(0, "Archery", 4, None);
    definition.preload_blocks();
    definition.preload_blocks();

    assert_eq!(definition.blocks.len(), TIME_SLOT_COUNT);
    let mut slots: Vec<usize> = definition.blocks.iter().map(|block| block.time_slot).collect();
    slots.sort_unstable();
    assert_eq!(slots, (0..TIME_SLOT_COUNT).collect::<Vec<_>>());
}
