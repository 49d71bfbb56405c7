use serde::{Deserialize, Serialize};

use super::activity::ActivityBlock;
use super::{ActivityId, TIME_SLOT_COUNT};

/// Camper-side record of a placement, the camper's half of the
/// camper<->block link maintained by `try_assign_block`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledBlock {
    pub activity: ActivityId,
    pub time_slot: usize,
}

/// A schedulable camper: display identity, one availability flag per time
/// slot (all true until a placement claims the slot) and the blocks the
/// camper occupies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camper {
    pub first_name: String,
    pub last_name: String,
    pub available_slots: [bool; TIME_SLOT_COUNT],
    pub scheduled_blocks: Vec<ScheduledBlock>,
}

impl Camper {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Camper {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            available_slots: [true; TIME_SLOT_COUNT],
            scheduled_blocks: Vec::new(),
        }
    }

    /// Display name used in block rosters, log records and reports
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_available_in_time_slot(&self, time_slot: usize) -> bool {
        self.available_slots.get(time_slot).copied().unwrap_or(false)
    }

    /// Single choke point for placing a camper into a block. Fails with no
    /// mutation when the camper's slot is already taken or the block rejects
    /// the camper; on success both sides of the camper<->block link are
    /// updated together and the slot flag is cleared.
    ///
    /// `maximum_capacity` is the owning definition's current ceiling,
    /// handed in live by the caller (`None` = unbounded).
    pub fn try_assign_block(
        &mut self,
        block: &mut ActivityBlock,
        maximum_capacity: Option<u32>,
    ) -> bool {
        if !self.is_available_in_time_slot(block.time_slot) {
            return false;
        }
        if !block.try_add_camper(self, maximum_capacity) {
            return false;
        }
        self.scheduled_blocks.push(ScheduledBlock {
            activity: block.activity,
            time_slot: block.time_slot,
        });
        self.available_slots[block.time_slot] = false;
        true
    }
}
