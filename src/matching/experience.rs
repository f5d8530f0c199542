use crate::models::gig_agent::{DimensionScore, DimensionStatus};

/// Tiered experience comparison. Overshooting the requirement is slightly
/// discounted (overqualification), undershooting decays in 0.2 steps.
/// Missing data on either side falls back to a neutral 0.5.
pub fn score_experience(
    agent_years: Option<f64>,
    required_years: Option<f64>,
) -> DimensionScore {
    let (Some(agent), Some(required)) = (agent_years, required_years) else {
        return DimensionScore {
            score: 0.5,
            status: DimensionStatus::NoMatch,
            detail: "missing experience data".to_string(),
            ..DimensionScore::default()
        };
    };

    if required <= 0.0 {
        return DimensionScore {
            score: 1.0,
            status: DimensionStatus::PerfectMatch,
            detail: "no experience required".to_string(),
            ..DimensionScore::default()
        };
    }

    let ratio = agent / required;
    let score = if agent >= required {
        if agent == required {
            1.0
        } else if ratio <= 1.5 {
            0.9
        } else if ratio <= 2.0 {
            0.8
        } else {
            0.7
        }
    } else if ratio >= 0.8 {
        0.6
    } else if ratio >= 0.6 {
        0.4
    } else if ratio >= 0.4 {
        0.2
    } else {
        0.0
    };

    let status = if score >= 0.8 {
        DimensionStatus::PerfectMatch
    } else if score > 0.0 {
        DimensionStatus::PartialMatch
    } else {
        DimensionStatus::NoMatch
    };

    DimensionScore {
        score,
        status,
        detail: format!(
            "{:.1} years of experience against {:.1} required",
            agent, required
        ),
        ..DimensionScore::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_table_for_ten_required_years() {
        let cases = [
            (10.0, 1.0),
            (12.0, 0.9),
            (18.0, 0.8),
            (25.0, 0.7),
            (9.0, 0.6),
            (7.0, 0.4),
            (5.0, 0.2),
            (2.0, 0.0),
        ];
        for (agent, expected) in cases {
            let result = score_experience(Some(agent), Some(10.0));
            assert_eq!(
                result.score, expected,
                "agent with {} years against 10 required",
                agent
            );
        }
    }

    #[test]
    fn statuses_follow_the_tiers() {
        assert_eq!(
            score_experience(Some(10.0), Some(10.0)).status,
            DimensionStatus::PerfectMatch
        );
        assert_eq!(
            score_experience(Some(18.0), Some(10.0)).status,
            DimensionStatus::PerfectMatch
        );
        assert_eq!(
            score_experience(Some(9.0), Some(10.0)).status,
            DimensionStatus::PartialMatch
        );
        assert_eq!(
            score_experience(Some(2.0), Some(10.0)).status,
            DimensionStatus::NoMatch
        );
    }

    #[test]
    fn missing_data_scores_neutrally() {
        let result = score_experience(None, Some(5.0));
        assert_eq!(result.score, 0.5);
        assert_eq!(result.status, DimensionStatus::NoMatch);
        assert!(result.detail.contains("missing"));

        let other = score_experience(Some(5.0), None);
        assert_eq!(other.score, 0.5);
    }

    #[test]
    fn zero_required_years_is_no_requirement() {
        let result = score_experience(Some(3.0), Some(0.0));
        assert_eq!(result.score, 1.0);
        assert_eq!(result.status, DimensionStatus::PerfectMatch);
    }
}
