mod rules;

use serde::Serialize;
use tracing::debug;

use super::domain::{Candidate, Project, SlotCategory};

/// Why a candidate did not qualify for a project. Used for logging and reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum RejectionReason {
    ArrivalBeforeWindow,
    ArrivalAfterWindow,
    ArrivalNotBeforeTraining,
    OverAgeLimit { age: u32, limit: u32 },
    MissingGender,
    MissingHousing,
    UnknownCategory,
    NoCategoryCapacity { category: SlotCategory },
}

impl RejectionReason {
    pub fn describe(&self) -> String {
        match self {
            Self::ArrivalBeforeWindow => "arrival before the project's arrival window".to_string(),
            Self::ArrivalAfterWindow => "arrival after the project's arrival window".to_string(),
            Self::ArrivalNotBeforeTraining => "arrival on or after the training date".to_string(),
            Self::OverAgeLimit { age, limit } => format!("age {age} exceeds limit {limit}"),
            Self::MissingGender => "gender missing on a gendered order".to_string(),
            Self::MissingHousing => "housing preference missing on a gendered order".to_string(),
            Self::UnknownCategory => "unrecognized gender/housing combination".to_string(),
            Self::NoCategoryCapacity { category } => {
                format!("no free slots in {} or its alternative", category.key())
            }
        }
    }
}

/// Stateless qualification check applied to every candidate before sorting.
///
/// The three rules are independent; a candidate must pass all of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityFilter;

impl EligibilityFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn qualifies(&self, candidate: &Candidate, project: &Project) -> bool {
        match self.rejection_reason(candidate, project) {
            None => true,
            Some(reason) => {
                debug!(
                    candidate = %candidate.id,
                    project = %project.id,
                    reason = %reason.describe(),
                    "candidate rejected"
                );
                false
            }
        }
    }

    /// First failing rule in evaluation order, or `None` when the candidate qualifies.
    pub fn rejection_reason(
        &self,
        candidate: &Candidate,
        project: &Project,
    ) -> Option<RejectionReason> {
        rules::arrival_date(candidate, project)
            .or_else(|| rules::age(candidate, project))
            .or_else(|| rules::category_availability(candidate, project))
    }

    pub fn check_arrival_date(&self, candidate: &Candidate, project: &Project) -> bool {
        rules::arrival_date(candidate, project).is_none()
    }

    pub fn check_age(&self, candidate: &Candidate, project: &Project) -> bool {
        rules::age(candidate, project).is_none()
    }

    pub fn check_category_availability(&self, candidate: &Candidate, project: &Project) -> bool {
        rules::category_availability(candidate, project).is_none()
    }
}
