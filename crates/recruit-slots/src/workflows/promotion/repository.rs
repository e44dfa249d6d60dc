use super::domain::{Candidate, CandidateId, CandidateStage, Project, ProjectId};

/// Read side of the CRM: one project and the candidates waiting on it.
pub trait RecordSource: Send + Sync {
    fn project(&self, id: &ProjectId) -> Result<Project, RecordSourceError>;

    /// Candidates in any of `stages` that are linked to `project_id`.
    fn candidates(
        &self,
        project_id: &ProjectId,
        stages: &[CandidateStage],
    ) -> Result<Vec<Candidate>, RecordSourceError>;
}

/// Write side of the CRM: move a candidate to a pipeline stage.
///
/// `Ok(false)` means the CRM answered but did not apply the change.
pub trait RecordSink: Send + Sync {
    fn move_to_stage(
        &self,
        candidate_id: &CandidateId,
        stage: &CandidateStage,
    ) -> Result<bool, RecordSinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecordSourceError {
    #[error("project {0} not found")]
    NotFound(ProjectId),
    #[error("record source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RecordSinkError {
    #[error("update rejected: {0}")]
    Rejected(String),
    #[error("record sink unavailable: {0}")]
    Unavailable(String),
}
