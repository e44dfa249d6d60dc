//! Candidate promotion for recruitment projects.
//!
//! [`PromotionEngine`] is the pure core: eligibility filter, priority sorter and slot
//! allocator composed into one pass over an in-memory candidate set. [`PromotionService`]
//! wraps it with the CRM collaborators and [`promotion_router`] exposes it over HTTP.

pub mod allocation;
pub mod domain;
pub mod eligibility;
pub mod priority;
pub mod promoter;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod summary;

#[cfg(test)]
mod tests;

pub use allocation::{AllocationOutcome, SlotAllocator};
pub use domain::{
    Candidate, CandidateId, CandidateStage, CategorySlots, Gender, Housing, PrioritySignal,
    PrioritySignalKind, PriorityTier, Project, ProjectId, ProjectStage, ProjectType,
    SlotCategory, Timestamp,
};
pub use eligibility::{EligibilityFilter, RejectionReason};
pub use priority::{PriorityPolicy, PrioritySorter, QueueOrder, SortKey};
pub use promoter::{PromotionEngine, PromotionOutcome, RESERVE_MULTIPLIER};
pub use report::{CandidateView, PromotionReport, RunMode, UpdateFailure};
pub use repository::{RecordSink, RecordSinkError, RecordSource, RecordSourceError};
pub use router::promotion_router;
pub use service::{PromotionService, PromotionServiceError};
pub use summary::PromotionStats;
