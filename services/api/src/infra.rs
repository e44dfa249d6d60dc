use metrics_exporter_prometheus::PrometheusHandle;
use recruit_slots::error::AppError;
use recruit_slots::workflows::crm::CrmSnapshot;
use recruit_slots::workflows::promotion::{
    Candidate, CandidateId, CandidateStage, Project, ProjectId, RecordSink, RecordSinkError,
    RecordSource, RecordSourceError,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// CRM stand-in holding projects and candidates in memory. Stage moves are applied in place
/// and logged so callers can report them.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCrm {
    projects: Arc<Mutex<HashMap<ProjectId, Project>>>,
    candidates: Arc<Mutex<Vec<Candidate>>>,
    moves: Arc<Mutex<Vec<(CandidateId, CandidateStage)>>>,
}

impl InMemoryCrm {
    pub(crate) fn from_snapshot(snapshot: CrmSnapshot) -> Self {
        let projects = snapshot
            .projects
            .into_iter()
            .map(|project| (project.id.clone(), project))
            .collect();

        Self {
            projects: Arc::new(Mutex::new(projects)),
            candidates: Arc::new(Mutex::new(snapshot.candidates)),
            moves: Arc::default(),
        }
    }

    pub(crate) fn moves(&self) -> Vec<(CandidateId, CandidateStage)> {
        self.moves.lock().expect("moves mutex poisoned").clone()
    }

    pub(crate) fn stage_of(&self, id: &CandidateId) -> Option<CandidateStage> {
        self.candidates
            .lock()
            .expect("candidate mutex poisoned")
            .iter()
            .find(|candidate| &candidate.id == id)
            .map(|candidate| candidate.stage.clone())
    }

    pub(crate) fn project_count(&self) -> usize {
        self.projects.lock().expect("project mutex poisoned").len()
    }
}

impl RecordSource for InMemoryCrm {
    fn project(&self, id: &ProjectId) -> Result<Project, RecordSourceError> {
        let guard = self.projects.lock().expect("project mutex poisoned");
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| RecordSourceError::NotFound(id.clone()))
    }

    fn candidates(
        &self,
        project_id: &ProjectId,
        stages: &[CandidateStage],
    ) -> Result<Vec<Candidate>, RecordSourceError> {
        let guard = self.candidates.lock().expect("candidate mutex poisoned");
        Ok(guard
            .iter()
            .filter(|candidate| candidate.is_linked_to(project_id))
            .filter(|candidate| stages.iter().any(|stage| candidate.is_in_stage(stage)))
            .cloned()
            .collect())
    }
}

impl RecordSink for InMemoryCrm {
    fn move_to_stage(
        &self,
        candidate_id: &CandidateId,
        stage: &CandidateStage,
    ) -> Result<bool, RecordSinkError> {
        let mut guard = self.candidates.lock().expect("candidate mutex poisoned");
        let Some(candidate) = guard.iter_mut().find(|candidate| &candidate.id == candidate_id)
        else {
            return Ok(false);
        };

        candidate.stage = stage.clone();
        self.moves
            .lock()
            .expect("moves mutex poisoned")
            .push((candidate_id.clone(), stage.clone()));
        Ok(true)
    }
}

/// Store seeded from `path` when given, empty otherwise.
pub(crate) fn load_store(path: Option<&Path>) -> Result<InMemoryCrm, AppError> {
    let Some(path) = path else {
        return Ok(InMemoryCrm::default());
    };

    let snapshot = CrmSnapshot::from_path(path)?;
    info!(
        path = %path.display(),
        projects = snapshot.projects.len(),
        candidates = snapshot.candidates.len(),
        "CRM snapshot loaded"
    );
    Ok(InMemoryCrm::from_snapshot(snapshot))
}
