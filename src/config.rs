use crate::error::{Error, Result};
use crate::matching::weights::Weights;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Runtime knobs for the matching core. Everything has a default so the
/// crate works without any environment at all; a deployment overrides
/// individual values through the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Weight vector applied by the aggregation engine. Must sum to 1.0.
    pub weights: Weights,
    /// How long an invitation stays acceptable.
    pub invitation_ttl_hours: i64,
    /// Whether stale invitations are pushed to `expired` on access.
    pub enforce_invitation_expiry: bool,
    /// Per-operation deadline for store round-trips.
    pub store_deadline: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: Weights::DEFAULT,
            invitation_ttl_hours: 72,
            enforce_invitation_expiry: true,
            store_deadline: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = Weights::DEFAULT;
        let weights = Weights {
            language: get_env_parse_or("MATCH_WEIGHT_LANGUAGE", defaults.language)?,
            skills: get_env_parse_or("MATCH_WEIGHT_SKILLS", defaults.skills)?,
            industry: get_env_parse_or("MATCH_WEIGHT_INDUSTRY", defaults.industry)?,
            activity: get_env_parse_or("MATCH_WEIGHT_ACTIVITY", defaults.activity)?,
            experience: get_env_parse_or("MATCH_WEIGHT_EXPERIENCE", defaults.experience)?,
            timezone: get_env_parse_or("MATCH_WEIGHT_TIMEZONE", defaults.timezone)?,
            region: get_env_parse_or("MATCH_WEIGHT_REGION", defaults.region)?,
            availability: get_env_parse_or("MATCH_WEIGHT_AVAILABILITY", defaults.availability)?,
        };
        weights.ensure_normalized()?;

        Ok(Self {
            weights,
            invitation_ttl_hours: get_env_parse_or("INVITATION_TTL_HOURS", 72)?,
            enforce_invitation_expiry: get_env_parse_or("ENFORCE_INVITATION_EXPIRY", true)?,
            store_deadline: Duration::from_secs(get_env_parse_or("STORE_DEADLINE_SECS", 10)?),
        })
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
