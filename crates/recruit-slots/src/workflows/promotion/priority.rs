use std::fmt;

use chrono::NaiveDateTime;

use super::domain::{Candidate, Project, Timestamp};

/// Rank given to candidates without a priority tier; worse than every real tier.
pub const UNRANKED_PRIORITY: u16 = 999;

/// Tie-break value for candidates without a queue timestamp; sorts after every real timestamp.
pub const UNQUEUED_SINCE: Timestamp = NaiveDateTime::MAX;

/// Ascending sort key: lower sorts first.
pub type SortKey = (u16, Timestamp);

/// Ordering strategy applied to qualified candidates.
///
/// Projects carry up to three dynamic priority signals that a future policy may weigh;
/// the shipped [`QueueOrder`] policy ignores them.
pub trait PriorityPolicy: Send + Sync + fmt::Debug {
    fn sort_key(&self, candidate: &Candidate, project: &Project) -> SortKey;
}

/// Priority tier first, then the earliest time the candidate entered the queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueOrder;

impl PriorityPolicy for QueueOrder {
    fn sort_key(&self, candidate: &Candidate, _project: &Project) -> SortKey {
        let queued = candidate.queued_since.unwrap_or(UNQUEUED_SINCE);
        (candidate.priority_rank(), queued)
    }
}

/// Produces a new, stably sorted sequence; the input slice is left untouched.
#[derive(Debug)]
pub struct PrioritySorter {
    policy: Box<dyn PriorityPolicy>,
}

impl Default for PrioritySorter {
    fn default() -> Self {
        Self::new()
    }
}

impl PrioritySorter {
    pub fn new() -> Self {
        Self::with_policy(QueueOrder)
    }

    pub fn with_policy<P: PriorityPolicy + 'static>(policy: P) -> Self {
        Self {
            policy: Box::new(policy),
        }
    }

    /// Genderless and gendered orders currently share the same policy.
    pub fn sort(&self, candidates: &[Candidate], project: &Project) -> Vec<Candidate> {
        let mut sorted = candidates.to_vec();
        sorted.sort_by_key(|candidate| self.policy.sort_key(candidate, project));
        sorted
    }

    pub fn sort_key(&self, candidate: &Candidate, project: &Project) -> SortKey {
        self.policy.sort_key(candidate, project)
    }
}
