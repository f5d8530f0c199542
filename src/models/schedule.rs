use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

/// One weekday with an open/close window in "HH:MM".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayWindow {
    pub day: Weekday,
    pub start: String,
    pub end: String,
}

impl DayWindow {
    pub fn new(day: Weekday, start: &str, end: &str) -> Self {
        Self {
            day,
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// Agent availability as submitted: either a day-by-day window list or a
/// uniform days+hours pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Availability {
    Weekly(Vec<DayWindow>),
    Uniform {
        days: Vec<Weekday>,
        start: String,
        end: String,
    },
}

impl Availability {
    /// Expand into per-day windows. Uniform availability clones the same
    /// window onto every listed day.
    pub fn windows(&self) -> Vec<DayWindow> {
        match self {
            Availability::Weekly(windows) => windows.clone(),
            Availability::Uniform { days, start, end } => days
                .iter()
                .map(|day| DayWindow::new(*day, start, end))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_availability_expands_to_every_day() {
        let availability = Availability::Uniform {
            days: vec![Weekday::Monday, Weekday::Friday],
            start: "09:00".into(),
            end: "17:00".into(),
        };
        let windows = availability.windows();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[1].day, Weekday::Friday);
        assert_eq!(windows[1].start, "09:00");
    }

    #[test]
    fn both_shapes_deserialize() {
        let weekly: Availability = serde_json::from_str(
            r#"[{"day":"monday","start":"08:00","end":"18:00"}]"#,
        )
        .unwrap();
        assert_eq!(weekly.windows().len(), 1);

        let uniform: Availability = serde_json::from_str(
            r#"{"days":["monday","tuesday"],"start":"10:00","end":"16:00"}"#,
        )
        .unwrap();
        assert_eq!(uniform.windows().len(), 2);
    }
}
