use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

/// Project item as returned by the CRM smart-process endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawProject {
    #[serde(default)]
    pub(crate) id: Option<Value>,
    #[serde(default)]
    pub(crate) title: Option<Value>,
    #[serde(rename = "stageId", default)]
    pub(crate) stage_id: Option<Value>,
    #[serde(rename = "ufCrm9_1740930205", default)]
    pub(crate) free_all: Option<Value>,
    #[serde(rename = "ufCrm9_1740930322", default)]
    pub(crate) free_male_provided: Option<Value>,
    #[serde(rename = "ufCrm9_1740930346", default)]
    pub(crate) free_female_provided: Option<Value>,
    #[serde(rename = "ufCrm9_1740930371", default)]
    pub(crate) free_couple_provided: Option<Value>,
    #[serde(rename = "ufCrm9_1740930392", default)]
    pub(crate) free_male_own: Option<Value>,
    #[serde(rename = "ufCrm9_1740930427", default)]
    pub(crate) free_female_own: Option<Value>,
    #[serde(rename = "ufCrm9_1740930439", default)]
    pub(crate) free_couple_own: Option<Value>,
    #[serde(rename = "ufCrm9_1740930520", default)]
    pub(crate) age_limit: Option<Value>,
    #[serde(rename = "ufCrm9_1740930537", default)]
    pub(crate) training_date: Option<Value>,
    #[serde(rename = "ufCrm9_1740931899", default)]
    pub(crate) arrival_from: Option<Value>,
    #[serde(rename = "ufCrm9_1740931913", default)]
    pub(crate) arrival_to: Option<Value>,
    #[serde(rename = "ufCrm9_1740930561", default)]
    pub(crate) priority_1: Option<Value>,
    #[serde(rename = "ufCrm9_1740930829", default)]
    pub(crate) priority_2: Option<Value>,
    #[serde(rename = "ufCrm9_1740930917", default)]
    pub(crate) priority_3: Option<Value>,
    #[serde(rename = "ufCrm9_1747740109", default)]
    pub(crate) genderless: Option<Value>,
}

/// Deal record as returned by the CRM deal list endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawCandidate {
    #[serde(rename = "ID", default)]
    pub(crate) id: Option<Value>,
    #[serde(rename = "TITLE", default)]
    pub(crate) title: Option<Value>,
    #[serde(rename = "STAGE_ID", default)]
    pub(crate) stage_id: Option<Value>,
    #[serde(rename = "PARENT_ID_1032", default)]
    pub(crate) parent_project: Option<Value>,
    #[serde(rename = "UF_CRM_1740931330", default)]
    pub(crate) linked_project: Option<Value>,
    #[serde(rename = "UF_CRM_1743329864", default)]
    pub(crate) priority: Option<Value>,
    #[serde(rename = "UF_CRM_1740931105", default)]
    pub(crate) gender: Option<Value>,
    #[serde(rename = "UF_CRM_1740931164", default)]
    pub(crate) housing: Option<Value>,
    #[serde(rename = "UF_CRM_1669643033481", default)]
    pub(crate) age: Option<Value>,
    #[serde(rename = "UF_CRM_1740931256", default)]
    pub(crate) arrival_date: Option<Value>,
    #[serde(rename = "UF_CRM_1741856527", default)]
    pub(crate) queued_since: Option<Value>,
}

/// Scalar as a trimmed, non-empty string. Numbers are rendered without a fraction when whole.
pub(crate) fn text(value: Option<&Value>) -> Option<String> {
    let rendered = match value? {
        Value::String(raw) => raw.trim().to_string(),
        Value::Number(number) => match number.as_i64() {
            Some(whole) => whole.to_string(),
            None => number.to_string(),
        },
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };

    Some(rendered).filter(|value| !value.is_empty())
}

/// Integer from a number or numeric string; fractional values are truncated.
pub(crate) fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.trunc() as i64)),
        Value::String(raw) => {
            let trimmed = raw.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|float| float.trunc() as i64))
        }
        _ => None,
    }
}

/// `true` when the field holds something other than null or an empty string.
pub(crate) fn is_filled(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(raw)) => !raw.trim().is_empty(),
        Some(_) => true,
    }
}

pub(crate) fn datetime(value: Option<&Value>) -> Option<NaiveDateTime> {
    match value? {
        Value::String(raw) => parse_datetime(raw),
        _ => None,
    }
}

/// Wall-clock value of an RFC 3339 timestamp; date-only values map to midnight.
pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}
