use serde::{Deserialize, Serialize};

use super::domain::{
    Candidate, CandidateId, CandidateStage, PriorityTier, Project, ProjectId, ProjectType,
    SlotCategory,
};
use super::summary::PromotionStats;

/// Whether a run writes stage changes back to the CRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Apply,
    DryRun,
}

/// Outward view of a candidate in a run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateView {
    pub id: CandidateId,
    pub title: String,
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_tier: Option<PriorityTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<SlotCategory>,
}

impl CandidateView {
    pub(crate) fn from_candidate(candidate: &Candidate, stats: &PromotionStats) -> Self {
        Self {
            id: candidate.id.clone(),
            title: candidate.title.clone(),
            stage: candidate.stage.label().to_string(),
            priority_tier: candidate.priority_tier,
            category: stats.assignments.get(&candidate.id).copied(),
        }
    }
}

/// A stage update that did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFailure {
    pub candidate_id: CandidateId,
    pub target_stage: String,
    pub reason: String,
}

impl UpdateFailure {
    pub(crate) fn new(
        candidate_id: &CandidateId,
        target_stage: &CandidateStage,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            candidate_id: candidate_id.clone(),
            target_stage: target_stage.label().to_string(),
            reason: reason.into(),
        }
    }
}

/// Everything a caller needs to know about one promotion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionReport {
    pub project_id: ProjectId,
    pub project_title: String,
    pub project_type: ProjectType,
    pub global_free_slots: i64,
    pub mode: RunMode,
    pub stats: PromotionStats,
    pub promoted: Vec<CandidateView>,
    pub reserve: Vec<CandidateView>,
    pub updates_executed: usize,
    pub failed_updates: Vec<UpdateFailure>,
    pub summary: String,
}

impl PromotionReport {
    pub(crate) fn new(project: &Project, mode: RunMode, stats: PromotionStats) -> Self {
        let summary = stats.summary();
        Self {
            project_id: project.id.clone(),
            project_title: project.title.clone(),
            project_type: project.project_type(),
            global_free_slots: project.global_free_slots,
            mode,
            stats,
            promoted: Vec::new(),
            reserve: Vec::new(),
            updates_executed: 0,
            failed_updates: Vec::new(),
            summary,
        }
    }

    pub fn is_partial(&self) -> bool {
        !self.failed_updates.is_empty()
    }
}
