use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::promotion::domain::{
    Candidate, CandidateId, CandidateStage, Gender, Housing, PriorityTier, Project, ProjectId,
    SlotCategory, Timestamp,
};
use crate::workflows::promotion::repository::{
    RecordSink, RecordSinkError, RecordSource, RecordSourceError,
};
use crate::workflows::promotion::{promotion_router, PromotionService};

pub(super) const PROJECT_ID: &str = "112";

pub(super) fn at(year: i32, month: u32, day: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

pub(super) fn gendered_project(global_free_slots: i64) -> Project {
    Project::new(PROJECT_ID, "Warehouse Poznan", global_free_slots)
}

pub(super) fn genderless_project(global_free_slots: i64) -> Project {
    let mut project = gendered_project(global_free_slots);
    project.genderless = true;
    project
}

pub(super) fn with_slots(mut project: Project, slots: &[(SlotCategory, i64)]) -> Project {
    for (category, free) in slots {
        project.category_slots.set(*category, *free);
    }
    project
}

pub(super) fn candidate(id: &str) -> Candidate {
    let mut candidate = Candidate::new(id, format!("Candidate {id}"), CandidateStage::Sorting);
    candidate.project_id = Some(ProjectId::from(PROJECT_ID));
    candidate
}

pub(super) fn candidate_in(id: &str, category: SlotCategory) -> Candidate {
    let mut candidate = candidate(id);
    candidate.gender = Some(category.gender());
    candidate.housing = Some(category.housing());
    candidate
}

pub(super) fn male(id: &str) -> Candidate {
    candidate_in(id, SlotCategory::new(Gender::Male, Housing::Provided))
}

pub(super) fn female(id: &str) -> Candidate {
    candidate_in(id, SlotCategory::new(Gender::Female, Housing::Provided))
}

pub(super) fn ranked(
    mut candidate: Candidate,
    tier: Option<PriorityTier>,
    queued: Option<Timestamp>,
) -> Candidate {
    candidate.priority_tier = tier;
    candidate.queued_since = queued;
    candidate
}

pub(super) fn ids(candidates: &[Candidate]) -> Vec<&str> {
    candidates
        .iter()
        .map(|candidate| candidate.id.0.as_str())
        .collect()
}

/// In-memory CRM acting as both record source and sink.
#[derive(Default)]
pub(super) struct MemoryCrm {
    projects: HashMap<ProjectId, Project>,
    candidates: Vec<Candidate>,
    moves: Mutex<Vec<(CandidateId, CandidateStage)>>,
    ignored: HashSet<CandidateId>,
    failing: HashSet<CandidateId>,
}

impl MemoryCrm {
    pub(super) fn new(project: Project, candidates: Vec<Candidate>) -> Self {
        let mut projects = HashMap::new();
        projects.insert(project.id.clone(), project);
        Self {
            projects,
            candidates,
            ..Self::default()
        }
    }

    /// Updates for `id` are answered with "not applied".
    pub(super) fn ignoring(mut self, id: &str) -> Self {
        self.ignored.insert(CandidateId::from(id));
        self
    }

    /// Updates for `id` fail with a transport error.
    pub(super) fn failing(mut self, id: &str) -> Self {
        self.failing.insert(CandidateId::from(id));
        self
    }

    pub(super) fn moves(&self) -> Vec<(String, CandidateStage)> {
        self.moves
            .lock()
            .expect("moves mutex poisoned")
            .iter()
            .map(|(id, stage)| (id.0.clone(), stage.clone()))
            .collect()
    }
}

impl RecordSource for MemoryCrm {
    fn project(&self, id: &ProjectId) -> Result<Project, RecordSourceError> {
        self.projects
            .get(id)
            .cloned()
            .ok_or_else(|| RecordSourceError::NotFound(id.clone()))
    }

    fn candidates(
        &self,
        project_id: &ProjectId,
        stages: &[CandidateStage],
    ) -> Result<Vec<Candidate>, RecordSourceError> {
        Ok(self
            .candidates
            .iter()
            .filter(|candidate| candidate.is_linked_to(project_id))
            .filter(|candidate| stages.contains(&candidate.stage))
            .cloned()
            .collect())
    }
}

impl RecordSink for MemoryCrm {
    fn move_to_stage(
        &self,
        candidate_id: &CandidateId,
        stage: &CandidateStage,
    ) -> Result<bool, RecordSinkError> {
        if self.failing.contains(candidate_id) {
            return Err(RecordSinkError::Unavailable("connection reset".to_string()));
        }
        if self.ignored.contains(candidate_id) {
            return Ok(false);
        }
        self.moves
            .lock()
            .expect("moves mutex poisoned")
            .push((candidate_id.clone(), stage.clone()));
        Ok(true)
    }
}

pub(super) struct UnavailableSource;

impl RecordSource for UnavailableSource {
    fn project(&self, _id: &ProjectId) -> Result<Project, RecordSourceError> {
        Err(RecordSourceError::Unavailable("crm offline".to_string()))
    }

    fn candidates(
        &self,
        _project_id: &ProjectId,
        _stages: &[CandidateStage],
    ) -> Result<Vec<Candidate>, RecordSourceError> {
        Err(RecordSourceError::Unavailable("crm offline".to_string()))
    }
}

pub(super) fn build_service(
    project: Project,
    candidates: Vec<Candidate>,
) -> (PromotionService<MemoryCrm, MemoryCrm>, Arc<MemoryCrm>) {
    with_crm(MemoryCrm::new(project, candidates))
}

pub(super) fn with_crm(
    crm: MemoryCrm,
) -> (PromotionService<MemoryCrm, MemoryCrm>, Arc<MemoryCrm>) {
    let crm = Arc::new(crm);
    let service = PromotionService::new(crm.clone(), crm.clone());
    (service, crm)
}

pub(super) fn router_with_service(
    service: PromotionService<MemoryCrm, MemoryCrm>,
) -> axum::Router {
    promotion_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
