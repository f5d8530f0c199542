use crate::models::gig_agent::{DimensionScore, DimensionStatus};
use crate::models::reference::{resolve, EntityRef};

/// Exact timezone match scores 1.0; a mismatch scores a fixed 0.7 as
/// "different but potentially compatible". Real offset math is pending.
pub fn score_timezone(
    agent_timezone: Option<&EntityRef>,
    gig_timezone: Option<&EntityRef>,
) -> DimensionScore {
    let held = resolve(agent_timezone);
    let wanted = resolve(gig_timezone);

    if held.key.is_empty() || wanted.key.is_empty() {
        return DimensionScore {
            score: 0.5,
            status: DimensionStatus::NoMatch,
            detail: "missing timezone data".to_string(),
            ..DimensionScore::default()
        };
    }

    if held.key == wanted.key {
        DimensionScore {
            score: 1.0,
            status: DimensionStatus::PerfectMatch,
            matched: vec![wanted.label()],
            detail: "timezones match".to_string(),
            ..DimensionScore::default()
        }
    } else {
        DimensionScore {
            score: 0.7,
            status: DimensionStatus::PartialMatch,
            detail: format!(
                "different but potentially compatible timezones ({} vs {})",
                held.label(),
                wanted.label()
            ),
            ..DimensionScore::default()
        }
    }
}

/// Placeholder pending real geographic compatibility logic.
pub fn score_region(destination: Option<&EntityRef>) -> DimensionScore {
    match destination {
        Some(region) => {
            let resolved = resolve(Some(region));
            DimensionScore {
                score: 0.8,
                status: DimensionStatus::PartialMatch,
                detail: format!(
                    "destination region '{}' assumed compatible",
                    resolved.label()
                ),
                ..DimensionScore::default()
            }
        }
        None => DimensionScore {
            score: 0.5,
            status: DimensionStatus::NoMatch,
            detail: "no destination region specified".to_string(),
            ..DimensionScore::default()
        },
    }
}
