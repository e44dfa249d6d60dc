//! Conversion of CRM JSON payloads (smart-process project items and deal records) into the
//! promotion domain model.

mod mapping;
mod parser;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::workflows::promotion::domain::{
    Candidate, CandidateId, CandidateStage, CategorySlots, PrioritySignal, Project, ProjectId,
    ProjectStage, SlotCategory,
};

use parser::{RawCandidate, RawProject};

#[derive(Debug, thiserror::Error)]
pub enum CrmImportError {
    #[error("failed to read CRM snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CRM JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CRM record is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("CRM field `{field}` has unusable value `{value}`")]
    InvalidField { field: &'static str, value: String },
}

/// Builds a [`Project`] from a smart-process item, wrapped as `{"item": {...}}` or bare.
pub fn project_from_value(value: &Value) -> Result<Project, CrmImportError> {
    let item = value.get("item").filter(|item| item.is_object()).unwrap_or(value);
    let raw: RawProject = serde_json::from_value(item.clone())?;

    let id = parser::text(raw.id.as_ref()).ok_or(CrmImportError::MissingField("id"))?;
    let title = parser::text(raw.title.as_ref()).ok_or(CrmImportError::MissingField("title"))?;
    let stage =
        parser::text(raw.stage_id.as_ref()).ok_or(CrmImportError::MissingField("stageId"))?;
    let global_free_slots = required_count("ufCrm9_1740930205", raw.free_all.as_ref())?;

    let mut category_slots = CategorySlots::default();
    for (category, field, value) in [
        (SlotCategory::MaleProvided, "ufCrm9_1740930322", &raw.free_male_provided),
        (SlotCategory::FemaleProvided, "ufCrm9_1740930346", &raw.free_female_provided),
        (SlotCategory::CoupleProvided, "ufCrm9_1740930371", &raw.free_couple_provided),
        (SlotCategory::MaleOwn, "ufCrm9_1740930392", &raw.free_male_own),
        (SlotCategory::FemaleOwn, "ufCrm9_1740930427", &raw.free_female_own),
        (SlotCategory::CoupleOwn, "ufCrm9_1740930439", &raw.free_couple_own),
    ] {
        category_slots.set(category, optional_count(field, value.as_ref())?);
    }

    let priority_signals = [&raw.priority_1, &raw.priority_2, &raw.priority_3]
        .into_iter()
        .zip(1u8..)
        .filter_map(|(value, position)| {
            let kind = mapping::priority_signal(parser::integer(value.as_ref())?)?;
            Some(PrioritySignal { position, kind })
        })
        .collect();

    Ok(Project {
        id: ProjectId(id),
        title,
        stage: ProjectStage::from_code(&stage),
        global_free_slots,
        category_slots,
        genderless: parser::integer(raw.genderless.as_ref()) == Some(mapping::GENDERLESS_ORDER),
        age_limit: positive(parser::integer(raw.age_limit.as_ref())),
        training_date: parser::datetime(raw.training_date.as_ref()),
        arrival_window_start: parser::datetime(raw.arrival_from.as_ref()),
        arrival_window_end: parser::datetime(raw.arrival_to.as_ref()),
        priority_signals,
    })
}

/// Builds a [`Candidate`] from a deal record.
pub fn candidate_from_value(value: &Value) -> Result<Candidate, CrmImportError> {
    let raw: RawCandidate = serde_json::from_value(value.clone())?;

    let id = parser::text(raw.id.as_ref()).ok_or(CrmImportError::MissingField("ID"))?;
    let title = parser::text(raw.title.as_ref()).ok_or(CrmImportError::MissingField("TITLE"))?;
    let stage =
        parser::text(raw.stage_id.as_ref()).ok_or(CrmImportError::MissingField("STAGE_ID"))?;

    let project_id = parser::text(raw.parent_project.as_ref())
        .or_else(|| parser::text(raw.linked_project.as_ref()))
        .map(ProjectId);
    let code = |value: &Option<Value>| parser::text(value.as_ref());

    Ok(Candidate {
        id: CandidateId(id),
        title,
        stage: CandidateStage::from_code(&stage),
        project_id,
        priority_tier: code(&raw.priority).and_then(|code| mapping::priority_tier(&code)),
        gender: code(&raw.gender).and_then(|code| mapping::gender(&code)),
        housing: code(&raw.housing).and_then(|code| mapping::housing(&code)),
        age: positive(parser::integer(raw.age.as_ref())),
        arrival_date: parser::datetime(raw.arrival_date.as_ref()),
        queued_since: parser::datetime(raw.queued_since.as_ref()),
    })
}

/// Offline copy of CRM records: `{"projects": [...], "candidates": [...]}`.
#[derive(Debug, Clone, Default)]
pub struct CrmSnapshot {
    pub projects: Vec<Project>,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    projects: Vec<Value>,
    #[serde(default)]
    candidates: Vec<Value>,
}

impl CrmSnapshot {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CrmImportError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CrmImportError> {
        let raw: RawSnapshot = serde_json::from_reader(reader)?;

        let projects = raw
            .projects
            .iter()
            .map(project_from_value)
            .collect::<Result<Vec<_>, _>>()?;
        let candidates = raw
            .candidates
            .iter()
            .map(candidate_from_value)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            projects,
            candidates,
        })
    }
}

fn required_count(field: &'static str, value: Option<&Value>) -> Result<i64, CrmImportError> {
    if !parser::is_filled(value) {
        return Err(CrmImportError::MissingField(field));
    }
    optional_count(field, value)
}

/// Empty counts default to zero; anything present must be numeric.
fn optional_count(field: &'static str, value: Option<&Value>) -> Result<i64, CrmImportError> {
    if !parser::is_filled(value) {
        return Ok(0);
    }

    parser::integer(value).ok_or_else(|| CrmImportError::InvalidField {
        field,
        value: value.map(Value::to_string).unwrap_or_default(),
    })
}

/// Zero or negative means "not set" in the CRM.
fn positive(value: Option<i64>) -> Option<u32> {
    value
        .filter(|value| *value > 0)
        .and_then(|value| u32::try_from(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::promotion::domain::{
        Gender, Housing, PrioritySignalKind, PriorityTier,
    };
    use chrono::NaiveDate;
    use serde_json::json;

    fn project_item() -> Value {
        json!({
            "item": {
                "id": 112,
                "title": "Warehouse Poznan",
                "stageId": "DT1032_17:PREPARATION",
                "ufCrm9_1740930205": "5",
                "ufCrm9_1740930322": 2,
                "ufCrm9_1740930346": "",
                "ufCrm9_1740930392": "-1",
                "ufCrm9_1740930520": "45",
                "ufCrm9_1740930537": "2025-06-10T00:00:00+03:00",
                "ufCrm9_1740931899": "2025-06-01",
                "ufCrm9_1740931913": null,
                "ufCrm9_1740930561": 1875,
                "ufCrm9_1740930829": "1879",
                "ufCrm9_1740930917": 42,
                "ufCrm9_1747740109": "1991"
            }
        })
    }

    #[test]
    fn maps_wrapped_project_item() {
        let project = project_from_value(&project_item()).expect("project parses");

        assert_eq!(project.id, ProjectId::from("112"));
        assert_eq!(project.title, "Warehouse Poznan");
        assert_eq!(project.global_free_slots, 5);
        assert_eq!(project.category_slots.male_provided, 2);
        assert_eq!(project.category_slots.female_provided, 0);
        assert_eq!(project.category_slots.male_own, -1);
        assert_eq!(project.age_limit, Some(45));
        assert!(project.genderless);
        assert_eq!(
            project.training_date,
            NaiveDate::from_ymd_opt(2025, 6, 10).and_then(|date| date.and_hms_opt(0, 0, 0))
        );
        assert_eq!(
            project.arrival_window_start,
            NaiveDate::from_ymd_opt(2025, 6, 1).and_then(|date| date.and_hms_opt(0, 0, 0))
        );
        assert!(project.arrival_window_end.is_none());
        assert_eq!(
            project.priority_signals,
            vec![
                PrioritySignal {
                    position: 1,
                    kind: PrioritySignalKind::ArrivalDate
                },
                PrioritySignal {
                    position: 2,
                    kind: PrioritySignalKind::Age
                },
            ]
        );
    }

    #[test]
    fn bare_project_without_global_slots_is_rejected() {
        let payload = json!({ "id": "7", "title": "Bare", "stageId": "DT1032_17:NEW" });
        let err = project_from_value(&payload).expect_err("missing free slots");
        assert!(matches!(
            err,
            CrmImportError::MissingField("ufCrm9_1740930205")
        ));
    }

    #[test]
    fn non_numeric_category_count_is_invalid() {
        let payload = json!({
            "id": "7",
            "title": "Bad counts",
            "stageId": "DT1032_17:NEW",
            "ufCrm9_1740930205": 3,
            "ufCrm9_1740930427": "many"
        });
        let err = project_from_value(&payload).expect_err("invalid count");
        assert!(matches!(
            err,
            CrmImportError::InvalidField {
                field: "ufCrm9_1740930427",
                ..
            }
        ));
    }

    #[test]
    fn zero_age_limit_means_unset() {
        let mut payload = project_item();
        payload["item"]["ufCrm9_1740930520"] = json!(0);
        let project = project_from_value(&payload).expect("project parses");
        assert!(project.age_limit.is_none());
    }

    #[test]
    fn maps_candidate_codes_and_lenient_scalars() {
        let payload = json!({
            "ID": "501",
            "TITLE": "Anna K.",
            "STAGE_ID": "C25:UC_1PZLBX",
            "PARENT_ID_1032": "",
            "UF_CRM_1740931330": "112",
            "UF_CRM_1743329864": "1953",
            "UF_CRM_1740931105": 1907,
            "UF_CRM_1740931164": "1917",
            "UF_CRM_1669643033481": "31.7",
            "UF_CRM_1740931256": "2025-06-03T09:30:00+02:00",
            "UF_CRM_1741856527": "not a date"
        });

        let candidate = candidate_from_value(&payload).expect("candidate parses");

        assert_eq!(candidate.id, CandidateId::from("501"));
        assert_eq!(candidate.project_id, Some(ProjectId::from("112")));
        assert_eq!(candidate.priority_tier, Some(PriorityTier::Tier2));
        assert_eq!(candidate.gender, Some(Gender::Female));
        assert_eq!(candidate.housing, Some(Housing::Own));
        assert_eq!(candidate.age, Some(31));
        assert_eq!(
            candidate.arrival_date,
            NaiveDate::from_ymd_opt(2025, 6, 3).and_then(|date| date.and_hms_opt(9, 30, 0))
        );
        assert!(candidate.queued_since.is_none());
    }

    #[test]
    fn unknown_gender_code_leaves_category_empty() {
        let payload = json!({
            "ID": 9,
            "TITLE": "Unknown",
            "STAGE_ID": "C25:NEW",
            "UF_CRM_1740931105": "1234",
            "UF_CRM_1740931164": "1919"
        });
        let candidate = candidate_from_value(&payload).expect("candidate parses");
        assert!(candidate.gender.is_none());
        assert_eq!(candidate.housing, Some(Housing::Provided));
        assert!(candidate.category().is_none());
    }

    #[test]
    fn candidate_without_stage_is_rejected() {
        let payload = json!({ "ID": "1", "TITLE": "No stage" });
        let err = candidate_from_value(&payload).expect_err("missing stage");
        assert!(matches!(err, CrmImportError::MissingField("STAGE_ID")));
    }

    #[test]
    fn snapshot_reads_projects_and_candidates() {
        let body = json!({
            "projects": [project_item()],
            "candidates": [
                { "ID": "1", "TITLE": "A", "STAGE_ID": "C25:NEW", "PARENT_ID_1032": 112 }
            ]
        })
        .to_string();

        let snapshot = CrmSnapshot::from_reader(body.as_bytes()).expect("snapshot parses");
        assert_eq!(snapshot.projects.len(), 1);
        assert_eq!(snapshot.candidates.len(), 1);
        assert_eq!(
            snapshot.candidates[0].project_id,
            Some(ProjectId::from("112"))
        );
    }
}
