pub mod activity;
pub mod camper;
pub mod engine;
pub mod groups;
pub mod requests;

/// Number of daily activity periods. The engine assumes exactly four.
pub const TIME_SLOT_COUNT: usize = 4;

/// Index of an activity definition within the list a scheduling run operates
/// on. Blocks and requests refer to activities through these indices instead
/// of shared pointers.
pub type ActivityId = usize;

pub use activity::{ActivityBlock, ActivityDefinition};
pub use camper::{Camper, ScheduledBlock};
pub use engine::schedule_activities;
pub use groups::{generate_camper_activity_preferences, generate_camper_mate_groups};
pub use requests::{compare_placement_difficulty, ActivityRequest, CamperRequests};
