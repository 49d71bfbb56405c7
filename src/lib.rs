pub mod display;
pub mod logging;
pub mod parser;
pub mod scheduler;
pub mod web;

pub use parser::{load_activity_definitions, load_camper_requests, ParserError};
pub use scheduler::{
    schedule_activities, ActivityBlock, ActivityDefinition, ActivityRequest, Camper,
    CamperRequests,
};
