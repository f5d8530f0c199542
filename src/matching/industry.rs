use crate::models::gig_agent::{DimensionScore, DimensionStatus};
use crate::models::reference::{resolve, EntityRef};

/// Equality or bidirectional substring containment over canonical keys.
/// "software" covers "softwaredevelopment" and vice versa.
pub fn keys_overlap(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a == b || a.contains(b) || b.contains(a))
}

/// Binary industry check: the gig's single category against any of the
/// agent's industries.
pub fn score_industry(
    agent_industries: &[EntityRef],
    gig_industry: Option<&EntityRef>,
) -> DimensionScore {
    let wanted = resolve(gig_industry);
    if wanted.key.is_empty() {
        return DimensionScore {
            score: 0.0,
            status: DimensionStatus::NoMatch,
            detail: "no industry category on the gig".to_string(),
            ..DimensionScore::default()
        };
    }

    let label = wanted.label();
    let hit = agent_industries
        .iter()
        .map(|industry| resolve(Some(industry)))
        .find(|candidate| keys_overlap(&candidate.key, &wanted.key));

    match hit {
        Some(candidate) => DimensionScore {
            score: 1.0,
            status: DimensionStatus::PerfectMatch,
            matched: vec![candidate.label()],
            detail: format!("industry '{}' covered", label),
            ..DimensionScore::default()
        },
        None => DimensionScore {
            score: 0.0,
            status: DimensionStatus::NoMatch,
            missing: vec![label.clone()],
            detail: format!("industry '{}' not covered", label),
            ..DimensionScore::default()
        },
    }
}

/// Per-activity containment: all required activities covered scores 1.0,
/// some 0.5, none 0.0.
pub fn score_activities(
    agent_activities: &[EntityRef],
    required: &[EntityRef],
) -> DimensionScore {
    if required.is_empty() {
        return DimensionScore {
            score: 0.0,
            status: DimensionStatus::NoMatch,
            detail: "no required activities".to_string(),
            ..DimensionScore::default()
        };
    }

    let held: Vec<_> = agent_activities
        .iter()
        .map(|activity| resolve(Some(activity)))
        .collect();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for requirement in required {
        let wanted = resolve(Some(requirement));
        if held.iter().any(|candidate| keys_overlap(&candidate.key, &wanted.key)) {
            matched.push(wanted.label());
        } else {
            missing.push(wanted.label());
        }
    }

    let (score, status) = if missing.is_empty() {
        (1.0, DimensionStatus::PerfectMatch)
    } else if !matched.is_empty() {
        (0.5, DimensionStatus::PartialMatch)
    } else {
        (0.0, DimensionStatus::NoMatch)
    };
    let detail = format!(
        "{} of {} required activities covered",
        matched.len(),
        required.len()
    );

    DimensionScore {
        score,
        status,
        matched,
        missing,
        insufficient: Vec::new(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_works_both_directions() {
        assert!(keys_overlap("software", "softwaredevelopment"));
        assert!(keys_overlap("softwaredevelopment", "software"));
        assert!(!keys_overlap("finance", "software"));
        assert!(!keys_overlap("", "software"));
    }

    #[test]
    fn industry_match_is_binary() {
        let agent = vec![EntityRef::named("Software Development"), EntityRef::named("Finance")];

        let hit = score_industry(&agent, Some(&EntityRef::named("Software")));
        assert_eq!(hit.score, 1.0);
        assert_eq!(hit.status, DimensionStatus::PerfectMatch);

        let miss = score_industry(&agent, Some(&EntityRef::named("Healthcare")));
        assert_eq!(miss.score, 0.0);
        assert_eq!(miss.status, DimensionStatus::NoMatch);
        assert_eq!(miss.missing, vec!["Healthcare".to_string()]);
    }

    #[test]
    fn gig_without_category_cannot_match() {
        let result = score_industry(&[EntityRef::named("Finance")], None);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn activities_score_in_three_tiers() {
        let agent = vec![EntityRef::named("Customer Support")];
        let all = score_activities(&agent, &[EntityRef::named("Support")]);
        assert_eq!(all.score, 1.0);

        let some = score_activities(
            &agent,
            &[EntityRef::named("Support"), EntityRef::named("Sales")],
        );
        assert_eq!(some.score, 0.5);
        assert_eq!(some.status, DimensionStatus::PartialMatch);

        let none = score_activities(&agent, &[EntityRef::named("Sales")]);
        assert_eq!(none.score, 0.0);
        assert_eq!(none.status, DimensionStatus::NoMatch);
    }
}
