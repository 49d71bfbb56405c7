use std::fs::File;
use std::io::Write;

use crate::scheduler::{
    generate_camper_activity_preferences, generate_camper_mate_groups, ActivityDefinition,
    CamperRequests, TIME_SLOT_COUNT,
};

/// Human-facing label for a time slot (slots are 0-based internally)
pub fn slot_label(time_slot: usize) -> String {
    format!("Period {}", time_slot + 1)
}

fn capacity_label(definition: &ActivityDefinition) -> String {
    match definition.maximum_capacity {
        Some(maximum) => format!(
            "min {} / optimal {} / max {}",
            definition.minimum_capacity, definition.optimal_capacity, maximum
        ),
        None => format!(
            "min {} / optimal {} / unbounded",
            definition.minimum_capacity, definition.optimal_capacity
        ),
    }
}

/// Prints the full schedule: the per-activity grid, each camper's placements
/// annotated with preference stars (favorite = most stars), cabin-mate
/// groups and the campers whose requests could not be satisfied.
pub fn print_schedule(
    activities: &[ActivityDefinition],
    requests: &[CamperRequests],
    unsatisfied: &[usize],
) {
    println!("\n=== Activity Schedule ===");
    for definition in activities {
        println!("{} ({})", definition.name, capacity_label(definition));
        for time_slot in 0..TIME_SLOT_COUNT {
            match definition
                .blocks
                .iter()
                .find(|block| block.time_slot == time_slot)
            {
                Some(block) if !block.assigned_campers.is_empty() => {
                    println!(
                        "  {}: {} ({})",
                        slot_label(time_slot),
                        block.assigned_campers.join(", "),
                        block.assigned_campers.len()
                    );
                }
                Some(_) => println!("  {}: [EMPTY]", slot_label(time_slot)),
                None => {}
            }
        }
    }

    let preferences = generate_camper_activity_preferences(requests);
    println!("\n=== Camper placements ===");
    for request in requests {
        let name = request.camper.full_name();
        println!("{}:", name);
        let mut blocks = request.camper.scheduled_blocks.clone();
        blocks.sort_by_key(|block| block.time_slot);
        for block in blocks {
            let stars = preferences
                .get(&name)
                .and_then(|wishes| wishes.iter().position(|&wish| wish == block.activity))
                .map(|position| {
                    let count = preferences[&name].len();
                    "*".repeat(count.saturating_sub(position))
                })
                .unwrap_or_default();
            println!(
                "  {}: {} {}",
                slot_label(block.time_slot),
                activities[block.activity].name,
                stars
            );
        }
    }

    let groups = generate_camper_mate_groups(requests);
    if !groups.is_empty() {
        println!("\n=== Cabin groups ===");
        for group in &groups {
            let mut members: Vec<&str> = group.iter().map(String::as_str).collect();
            members.sort_unstable();
            println!("  {}", members.join(", "));
        }
    }

    if unsatisfied.is_empty() {
        println!("\nAll campers fully placed.");
    } else {
        println!("\n⚠️  Campers with unsatisfied requests ({}):", unsatisfied.len());
        for &index in unsatisfied {
            let request = &requests[index];
            let outstanding: Vec<&str> = request
                .unscheduled_activities()
                .iter()
                .filter_map(|ranked| ranked.activity)
                .map(|activity| activities[activity].name.as_str())
                .collect();
            println!(
                "  - {} (missing: {})",
                request.camper.full_name(),
                outstanding.join(", ")
            );
        }
    }
}

/// Writes the per-activity schedule grid to a text file, one block per line
pub fn write_schedule_to_file(
    activities: &[ActivityDefinition],
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;

    writeln!(file, "** Camp Activity Schedule **")?;
    writeln!(
        file,
        "Generated {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    )?;

    for definition in activities {
        writeln!(file, "\n{} ({})", definition.name, capacity_label(definition))?;
        for time_slot in 0..TIME_SLOT_COUNT {
            match definition
                .blocks
                .iter()
                .find(|block| block.time_slot == time_slot)
            {
                Some(block) if !block.assigned_campers.is_empty() => {
                    writeln!(
                        file,
                        "{} {}",
                        slot_label(time_slot),
                        block.assigned_campers.join(", ")
                    )?;
                }
                Some(_) => writeln!(file, "{} [EMPTY]", slot_label(time_slot))?,
                None => {}
            }
        }
    }

    Ok(())
}
