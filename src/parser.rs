use std::collections::HashMap;
use std::path::Path;

use csv::Reader;
use thiserror::Error;
use tracing::debug;

use crate::scheduler::{ActivityDefinition, ActivityId, ActivityRequest, Camper, CamperRequests};

/// Number of ranked choices every camper submits.
const RANKED_CHOICE_COUNT: u8 = 4;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("duplicate activity name \"{name}\"")]
    DuplicateActivity { name: String },

    #[error("activity \"{name}\" has an invalid capacity range")]
    InvalidCapacity { name: String },

    #[error("camper \"{camper}\" requested unknown activity \"{activity}\"")]
    UnknownActivity { camper: String, activity: String },
}

/// Parses a number, returning 0 if empty or invalid
fn parse_number(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

/// Finds a column whose header contains `label`, falling back to `default`
fn column_index(headers: &csv::StringRecord, label: &str, default: usize) -> usize {
    headers
        .iter()
        .position(|header| header.to_lowercase().contains(label))
        .unwrap_or(default)
}

/// Loads activity definitions from a CSV file with columns
/// `name,minimum,optimal,maximum`. An empty maximum means unbounded.
/// Rejects duplicate names and capacity triples that are not
/// `minimum <= optimal <= maximum`; the scheduler assumes both hold.
pub fn load_activity_definitions<P: AsRef<Path>>(
    csv_path: P,
) -> Result<Vec<ActivityDefinition>, ParserError> {
    let mut reader = Reader::from_path(csv_path)?;
    let headers = reader.headers()?.clone();

    let name_col = column_index(&headers, "name", 0);
    let minimum_col = column_index(&headers, "minimum", 1);
    let optimal_col = column_index(&headers, "optimal", 2);
    let maximum_col = column_index(&headers, "maximum", 3);

    let mut definitions: Vec<ActivityDefinition> = Vec::new();
    for result in reader.records() {
        let record = result?;

        let name = record.get(name_col).unwrap_or("").trim().to_string();
        if name.is_empty() {
            continue;
        }
        if definitions
            .iter()
            .any(|definition| definition.name.eq_ignore_ascii_case(&name))
        {
            return Err(ParserError::DuplicateActivity { name });
        }

        let minimum = parse_number(record.get(minimum_col).unwrap_or(""));
        let optimal = parse_number(record.get(optimal_col).unwrap_or(""));
        let maximum_field = record.get(maximum_col).unwrap_or("").trim();
        let maximum = if maximum_field.is_empty() {
            None
        } else {
            Some(parse_number(maximum_field))
        };

        if minimum > optimal || maximum.map_or(false, |maximum| optimal > maximum) {
            return Err(ParserError::InvalidCapacity { name });
        }

        let id = definitions.len();
        definitions.push(ActivityDefinition::new(id, &name, minimum, optimal, maximum));
    }

    debug!(activities = definitions.len(), "loaded activity definitions");
    Ok(definitions)
}

/// Loads camper requests from a CSV file with columns
/// `first name,last name,cabin mate,choice 1..choice 4,alternate`.
///
/// Activity names are resolved against the definitions list here, before
/// the scheduler ever sees them: an empty choice cell becomes a request
/// with no activity reference, a name with no match is an error.
pub fn load_camper_requests<P: AsRef<Path>>(
    csv_path: P,
    activities: &[ActivityDefinition],
) -> Result<Vec<CamperRequests>, ParserError> {
    let mut reader = Reader::from_path(csv_path)?;
    let headers = reader.headers()?.clone();

    let first_name_col = column_index(&headers, "first", 0);
    let last_name_col = column_index(&headers, "last", 1);
    let cabin_mate_col = column_index(&headers, "cabin", 2);
    let choice_cols: Vec<usize> = (1..=RANKED_CHOICE_COUNT)
        .map(|rank| column_index(&headers, &format!("choice {rank}"), 2 + rank as usize))
        .collect();
    let alternate_col = column_index(&headers, "alternate", 7);

    let activity_ids: HashMap<String, ActivityId> = activities
        .iter()
        .map(|definition| (definition.name.to_lowercase(), definition.id))
        .collect();

    let mut requests: Vec<CamperRequests> = Vec::new();
    for result in reader.records() {
        let record = result?;

        let first_name = record.get(first_name_col).unwrap_or("").trim().to_string();
        let last_name = record.get(last_name_col).unwrap_or("").trim().to_string();
        // Skip if essential fields are missing
        if first_name.is_empty() && last_name.is_empty() {
            continue;
        }
        let camper = Camper::new(&first_name, &last_name);

        let cabin_mate = match record.get(cabin_mate_col).unwrap_or("").trim() {
            "" => None,
            mate => Some(mate.to_string()),
        };

        let resolve = |field: &str| -> Result<Option<ActivityId>, ParserError> {
            let name = field.trim();
            if name.is_empty() {
                return Ok(None);
            }
            match activity_ids.get(&name.to_lowercase()) {
                Some(&id) => Ok(Some(id)),
                None => Err(ParserError::UnknownActivity {
                    camper: camper.full_name(),
                    activity: name.to_string(),
                }),
            }
        };

        let mut ranked = Vec::new();
        for (index, &column) in choice_cols.iter().enumerate() {
            ranked.push(ActivityRequest {
                rank: index as u8 + 1,
                activity: resolve(record.get(column).unwrap_or(""))?,
            });
        }
        let alternate = resolve(record.get(alternate_col).unwrap_or(""))?;

        requests.push(CamperRequests::new(camper, cabin_mate, ranked, alternate));
    }

    debug!(campers = requests.len(), "loaded camper requests");
    Ok(requests)
}
