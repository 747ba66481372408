use crate::utils::error::{Result, UpkeepError};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Delay applied to due-less cards when neither the card nor its list matches a rule.
pub const DEFAULT_DELAY_DAYS: i64 = 3;

/// Format of the `due` field as the board service reports it. `%.f` alone would also
/// accept a value without a fraction, so [`Card::due_at`] checks for one first.
pub const DUE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardList {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub due: Option<String>,
    pub pos: f64,
    #[serde(rename = "idMembers", default)]
    pub id_members: Vec<String>,
}

impl Card {
    /// Parses `due`. `Ok(None)` when the card has no due date.
    pub fn due_at(&self) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = self.due.as_deref() else {
            return Ok(None);
        };

        let parse_error = |reason: String| UpkeepError::DueDateParse {
            card_id: self.id.clone(),
            value: raw.to_string(),
            reason,
        };

        if !has_fractional_seconds(raw) {
            return Err(parse_error("expected fractional seconds before 'Z'".to_string()));
        }

        NaiveDateTime::parse_from_str(raw, DUE_FORMAT)
            .map(|naive| Some(naive.and_utc()))
            .map_err(|e| parse_error(e.to_string()))
    }
}

/// True when `raw` ends in `.<digits>Z`.
fn has_fractional_seconds(raw: &str) -> bool {
    let Some(rest) = raw.strip_suffix('Z') else {
        return false;
    };
    match rest.rsplit_once('.') {
        Some((_, digits)) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Partial card update. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdate {
    pub due: Option<DateTime<Utc>>,
    pub pos: Option<usize>,
    pub id_members: Option<Vec<String>>,
}

impl CardUpdate {
    pub fn due(due: DateTime<Utc>) -> Self {
        Self {
            due: Some(due),
            ..Self::default()
        }
    }

    pub fn position(pos: usize) -> Self {
        Self {
            pos: Some(pos),
            ..Self::default()
        }
    }

    pub fn members(id_members: Vec<String>) -> Self {
        Self {
            id_members: Some(id_members),
            ..Self::default()
        }
    }

    /// Query-string pairs understood by the card update endpoint.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(due) = self.due {
            params.push(("due", due.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        if let Some(pos) = self.pos {
            params.push(("pos", pos.to_string()));
        }
        if let Some(members) = &self.id_members {
            params.push(("idMembers", members.join(",")));
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRule {
    pub pattern: String,
    pub days: i64,
}

/// Substring rules in declaration order; the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DelayRules(Vec<DelayRule>);

impl DelayRules {
    pub fn first_match(&self, text: &str) -> Option<&DelayRule> {
        self.0.iter().find(|rule| text.contains(rule.pattern.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DelayRule> {
        self.0.iter()
    }
}

impl<P: Into<String>> FromIterator<(P, i64)> for DelayRules {
    fn from_iter<I: IntoIterator<Item = (P, i64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(pattern, days)| DelayRule {
                    pattern: pattern.into(),
                    days,
                })
                .collect(),
        )
    }
}
