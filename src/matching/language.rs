use crate::models::agent::LanguageSkill;
use crate::models::gig::LanguageRequirement;
use crate::models::gig_agent::{DimensionScore, DimensionStatus};
use crate::models::reference::{canonical_key, resolve};

/// Ordinal proficiency scale. `Native` sits above C2 but both count as
/// native-class when a gig asks for a native speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LanguageLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
    Native,
}

impl LanguageLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match canonical_key(raw).as_str() {
            "a1" | "beginner" => Some(LanguageLevel::A1),
            "a2" | "elementary" => Some(LanguageLevel::A2),
            "b1" | "intermediate" => Some(LanguageLevel::B1),
            "b2" | "upperintermediate" => Some(LanguageLevel::B2),
            "c1" | "advanced" => Some(LanguageLevel::C1),
            "c2" | "proficient" | "proficiency" => Some(LanguageLevel::C2),
            "native" | "mothertongue" | "bilingual" => Some(LanguageLevel::Native),
            _ => None,
        }
    }

    pub fn is_native_class(self) -> bool {
        matches!(self, LanguageLevel::C2 | LanguageLevel::Native)
    }
}

pub fn score_languages(
    agent_languages: &[LanguageSkill],
    required: &[LanguageRequirement],
) -> DimensionScore {
    if required.is_empty() {
        return DimensionScore {
            score: 0.0,
            status: DimensionStatus::NoMatch,
            detail: "no required languages".to_string(),
            ..DimensionScore::default()
        };
    }

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut insufficient = Vec::new();

    for requirement in required {
        let wanted = resolve(Some(&requirement.language));
        let label = wanted.label();

        let held = agent_languages.iter().find(|skill| {
            let key = resolve(Some(&skill.language)).key;
            !key.is_empty() && key == wanted.key
        });
        let Some(held) = held else {
            missing.push(label);
            continue;
        };

        let required_level = requirement.min_level.as_deref().and_then(LanguageLevel::parse);
        let agent_level = held.level.as_deref().and_then(LanguageLevel::parse);
        let sufficient = match required_level {
            // Unknown requirement level: presence suffices.
            None => true,
            Some(LanguageLevel::Native) => {
                agent_level.is_some_and(LanguageLevel::is_native_class)
            }
            Some(min) => agent_level.is_some_and(|level| level >= min),
        };

        if sufficient {
            matched.push(label);
        } else {
            insufficient.push(label);
        }
    }

    let score = matched.len() as f64 / required.len() as f64;
    let status = if matched.len() == required.len() {
        DimensionStatus::PerfectMatch
    } else if !matched.is_empty() {
        DimensionStatus::PartialMatch
    } else {
        DimensionStatus::NoMatch
    };
    let detail = format!(
        "{} of {} required languages matched",
        matched.len(),
        required.len()
    );

    DimensionScore {
        score,
        status,
        matched,
        missing,
        insufficient,
        detail,
    }
}
