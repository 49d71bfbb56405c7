use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::camper::Camper;
use super::{ActivityId, TIME_SLOT_COUNT};

/// One time-slot instance of an activity with its own camper roster. The
/// capacity ceiling is not stored here; the owning definition passes its
/// current maximum on every insertion so later changes are honored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityBlock {
    pub activity: ActivityId,
    pub time_slot: usize,
    pub assigned_campers: Vec<String>,
}

impl ActivityBlock {
    pub fn new(activity: ActivityId, time_slot: usize) -> Self {
        ActivityBlock {
            activity,
            time_slot,
            assigned_campers: Vec::new(),
        }
    }

    /// Adds the camper to the roster while the count is strictly below
    /// `maximum_capacity` (`None` = unbounded). No mutation on failure.
    pub fn try_add_camper(&mut self, camper: &Camper, maximum_capacity: Option<u32>) -> bool {
        if let Some(limit) = maximum_capacity {
            if self.assigned_campers.len() >= limit as usize {
                return false;
            }
        }
        self.assigned_campers.push(camper.full_name());
        true
    }
}

/// An activity's capacity policy plus the blocks created for it across the
/// four slots, at most one block per slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDefinition {
    pub id: ActivityId,
    pub name: String,
    pub minimum_capacity: u32,
    pub optimal_capacity: u32,
    /// None means unbounded
    pub maximum_capacity: Option<u32>,
    pub blocks: Vec<ActivityBlock>,
}

impl ActivityDefinition {
    pub fn new(
        id: ActivityId,
        name: &str,
        minimum_capacity: u32,
        optimal_capacity: u32,
        maximum_capacity: Option<u32>,
    ) -> Self {
        ActivityDefinition {
            id,
            name: name.to_string(),
            minimum_capacity,
            optimal_capacity,
            maximum_capacity,
            blocks: Vec::new(),
        }
    }

    fn has_block_in_slot(&self, time_slot: usize) -> bool {
        self.blocks.iter().any(|block| block.time_slot == time_slot)
    }

    /// Pass 1 of scheduling treats the optimal capacity as a hard ceiling;
    /// pass 2 relaxes to the true maximum.
    fn capacity_ceiling(&self, limit_by_optimal: bool) -> Option<u32> {
        if limit_by_optimal {
            Some(self.optimal_capacity)
        } else {
            self.maximum_capacity
        }
    }

    /// Creates one block in every slot that does not have one yet, so a full
    /// grid exists before campers arrive. Used when rehydrating a persisted
    /// schedule or preparing a grid for manual editing; the scheduling sweep
    /// itself creates blocks lazily.
    pub fn preload_blocks(&mut self) {
        for time_slot in 0..TIME_SLOT_COUNT {
            if !self.has_block_in_slot(time_slot) {
                self.blocks.push(ActivityBlock::new(self.id, time_slot));
            }
        }
    }

    /// Places the camper into the first existing block (in creation order)
    /// whose slot the camper is free in and whose roster is below the pass
    /// ceiling. Never creates a block.
    pub fn try_assign_camper_to_existing_block(
        &mut self,
        camper: &mut Camper,
        limit_by_optimal: bool,
    ) -> bool {
        let ceiling = self.capacity_ceiling(limit_by_optimal);
        let maximum_capacity = self.maximum_capacity;
        let target = self.blocks.iter().position(|block| {
            camper.is_available_in_time_slot(block.time_slot)
                && ceiling.map_or(true, |limit| block.assigned_campers.len() < limit as usize)
        });
        match target {
            Some(index) => {
                let placed = camper.try_assign_block(&mut self.blocks[index], maximum_capacity);
                if placed {
                    debug!(
                        activity = %self.name,
                        time_slot = self.blocks[index].time_slot,
                        camper = %camper.full_name(),
                        "placed camper in existing block"
                    );
                }
                placed
            }
            None => false,
        }
    }

    /// Creates a block in the first slot (0..3) the camper is free in that
    /// has no block yet and assigns the camper to it. Capacity is not
    /// consulted: a brand-new block is always empty. Stops at first success.
    pub fn try_assign_camper_to_new_block(&mut self, camper: &mut Camper) -> bool {
        let maximum_capacity = self.maximum_capacity;
        for time_slot in 0..TIME_SLOT_COUNT {
            if !camper.is_available_in_time_slot(time_slot) || self.has_block_in_slot(time_slot) {
                continue;
            }
            self.blocks.push(ActivityBlock::new(self.id, time_slot));
            let index = self.blocks.len() - 1;
            if camper.try_assign_block(&mut self.blocks[index], maximum_capacity) {
                debug!(
                    activity = %self.name,
                    time_slot,
                    camper = %camper.full_name(),
                    "created new block for camper"
                );
                return true;
            }
        }
        false
    }
}

/// Capacity-then-name ordering of activity definitions, used to break ties
/// between two campers' alternate activities. Unbounded capacity sorts last.
pub fn compare_capacity_then_name(a: &ActivityDefinition, b: &ActivityDefinition) -> Ordering {
    let capacity_a = a.maximum_capacity.unwrap_or(u32::MAX);
    let capacity_b = b.maximum_capacity.unwrap_or(u32::MAX);
    capacity_a
        .cmp(&capacity_b)
        .then_with(|| a.name.cmp(&b.name))
}
