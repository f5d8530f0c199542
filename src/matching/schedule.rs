use std::collections::HashMap;

use crate::error::Result;
use crate::models::gig_agent::{DimensionScore, DimensionStatus};
use crate::models::schedule::{Availability, DayWindow, Weekday};
use crate::utils::time::parse_hhmm;

/// Weekly coverage check. Every required weekday must be present in the
/// agent's schedule; a single absent day zeroes the whole dimension. For
/// present days the agent's window must fully contain the gig's window.
pub fn score_availability(
    availability: Option<&Availability>,
    required: &[DayWindow],
) -> Result<DimensionScore> {
    if required.is_empty() {
        return Ok(DimensionScore {
            score: 0.0,
            status: DimensionStatus::NoMatch,
            detail: "no schedule requirements".to_string(),
            ..DimensionScore::default()
        });
    }

    let offered = normalize(availability)?;

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut insufficient = Vec::new();

    for window in required {
        let gig_start = parse_hhmm(&window.start)?;
        let gig_end = parse_hhmm(&window.end)?;
        let day = window.day.as_str().to_string();

        match offered.get(&window.day) {
            None => missing.push(day),
            Some(&(agent_start, agent_end)) => {
                if agent_start <= gig_start && agent_end >= gig_end {
                    matched.push(day);
                } else {
                    insufficient.push(day);
                }
            }
        }
    }

    // No partial credit when a required day is absent entirely.
    let score = if missing.is_empty() {
        matched.len() as f64 / required.len() as f64
    } else {
        0.0
    };
    let status = if score == 1.0 {
        DimensionStatus::PerfectMatch
    } else if score > 0.0 {
        DimensionStatus::PartialMatch
    } else {
        DimensionStatus::NoMatch
    };
    let detail = format!(
        "{} of {} required days fully covered",
        matched.len(),
        required.len()
    );

    Ok(DimensionScore {
        score,
        status,
        matched,
        missing,
        insufficient,
        detail,
    })
}

fn normalize(availability: Option<&Availability>) -> Result<HashMap<Weekday, (u16, u16)>> {
    let mut windows = HashMap::new();
    let Some(availability) = availability else {
        return Ok(windows);
    };
    for window in availability.windows() {
        let start = parse_hhmm(&window.start)?;
        let end = parse_hhmm(&window.end)?;
        windows.insert(window.day, (start, end));
    }
    Ok(windows)
}
