use std::sync::Arc;

use tracing::{error, info, warn};

use super::domain::{Candidate, CandidateStage, ProjectId};
use super::promoter::PromotionEngine;
use super::report::{CandidateView, PromotionReport, RunMode, UpdateFailure};
use super::repository::{RecordSink, RecordSource, RecordSourceError};

/// Fetch, process and persist one project's promotion run.
pub struct PromotionService<S, K> {
    source: Arc<S>,
    sink: Arc<K>,
    engine: Arc<PromotionEngine>,
}

impl<S, K> PromotionService<S, K>
where
    S: RecordSource + 'static,
    K: RecordSink + 'static,
{
    pub fn new(source: Arc<S>, sink: Arc<K>) -> Self {
        Self::with_engine(source, sink, PromotionEngine::new())
    }

    pub fn with_engine(source: Arc<S>, sink: Arc<K>, engine: PromotionEngine) -> Self {
        Self {
            source,
            sink,
            engine: Arc::new(engine),
        }
    }

    pub fn run(
        &self,
        project_id: &ProjectId,
        mode: RunMode,
    ) -> Result<PromotionReport, PromotionServiceError> {
        info!(project = %project_id, ?mode, "promotion run started");

        let project = self.source.project(project_id)?;
        info!(
            project = %project.id,
            title = %project.title,
            global_free_slots = project.global_free_slots,
            project_type = project.project_type().label(),
            "project loaded"
        );

        let candidates = self
            .source
            .candidates(project_id, &CandidateStage::SOURCE_STAGES)?;
        info!(project = %project.id, candidates = candidates.len(), "candidates loaded");

        let outcome = self.engine.process(&project, &candidates);
        info!(
            project = %project.id,
            qualified = outcome.stats.qualified,
            promoted = outcome.stats.promoted,
            reserve = outcome.stats.reserve,
            rejected = outcome.stats.rejected,
            "candidates processed"
        );

        let mut report = PromotionReport::new(&project, mode, outcome.stats.clone());
        report.promoted = outcome
            .promoted
            .iter()
            .map(|candidate| CandidateView::from_candidate(candidate, &outcome.stats))
            .collect();
        report.reserve = outcome
            .reserve
            .iter()
            .map(|candidate| CandidateView::from_candidate(candidate, &outcome.stats))
            .collect();

        if mode == RunMode::Apply {
            for candidate in &outcome.promoted {
                self.apply_stage(candidate, &CandidateStage::MainList, &mut report);
            }
            for candidate in outcome
                .reserve
                .iter()
                .filter(|candidate| !candidate.is_in_stage(&CandidateStage::Reserve))
            {
                self.apply_stage(candidate, &CandidateStage::Reserve, &mut report);
            }
        }

        info!(
            project = %project.id,
            updates = report.updates_executed,
            failed = report.failed_updates.len(),
            "promotion run finished"
        );

        Ok(report)
    }

    fn apply_stage(
        &self,
        candidate: &Candidate,
        stage: &CandidateStage,
        report: &mut PromotionReport,
    ) {
        match self.sink.move_to_stage(&candidate.id, stage) {
            Ok(true) => {
                report.updates_executed += 1;
                info!(candidate = %candidate.id, stage = stage.label(), "stage updated");
            }
            Ok(false) => {
                warn!(candidate = %candidate.id, stage = stage.label(), "update not applied");
                report.failed_updates.push(UpdateFailure::new(
                    &candidate.id,
                    stage,
                    "update not applied",
                ));
            }
            Err(err) => {
                error!(
                    candidate = %candidate.id,
                    stage = stage.label(),
                    error = %err,
                    "update failed"
                );
                report
                    .failed_updates
                    .push(UpdateFailure::new(&candidate.id, stage, err.to_string()));
            }
        }
    }
}

/// Error raised by the promotion service. Sink failures are reported, never raised.
#[derive(Debug, thiserror::Error)]
pub enum PromotionServiceError {
    #[error(transparent)]
    Source(#[from] RecordSourceError),
}
