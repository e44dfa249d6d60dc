use std::collections::HashSet;

use tracing::debug;

use super::allocation::SlotAllocator;
use super::domain::{Candidate, CandidateId, Project};
use super::eligibility::EligibilityFilter;
use super::priority::PrioritySorter;
use super::summary::PromotionStats;

/// Reserve list length as a multiple of the project's global capacity.
pub const RESERVE_MULTIPLIER: usize = 2;

/// Output of one promotion run: who moves to the main list, who stays in reserve, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionOutcome {
    pub promoted: Vec<Candidate>,
    pub reserve: Vec<Candidate>,
    pub stats: PromotionStats,
}

/// Filter, sort, allocate and split the remainder into a bounded reserve list.
#[derive(Debug, Default)]
pub struct PromotionEngine {
    filter: EligibilityFilter,
    sorter: PrioritySorter,
    allocator: SlotAllocator,
}

impl PromotionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sorter(sorter: PrioritySorter) -> Self {
        Self {
            filter: EligibilityFilter::new(),
            sorter,
            allocator: SlotAllocator::new(),
        }
    }

    pub fn process(&self, project: &Project, candidates: &[Candidate]) -> PromotionOutcome {
        let mut stats = PromotionStats::new(project.project_type(), candidates.len());

        let qualified: Vec<Candidate> = candidates
            .iter()
            .filter(|candidate| self.filter.qualifies(candidate, project))
            .cloned()
            .collect();

        stats.qualified = qualified.len();
        stats.rejected = candidates.len() - qualified.len();

        if qualified.is_empty() {
            debug!(project = %project.id, "no qualified candidates");
            return PromotionOutcome {
                promoted: Vec::new(),
                reserve: Vec::new(),
                stats,
            };
        }

        let sorted = self.sorter.sort(&qualified, project);
        let allocation = self.allocator.allocate(&sorted, project);

        stats.category_allocation = allocation.used_slots().clone();
        stats.assignments = allocation.assignments().clone();
        let promoted = allocation.into_promoted();

        let promoted_ids: HashSet<&CandidateId> =
            promoted.iter().map(|candidate| &candidate.id).collect();
        let reserve_limit = project.global_capacity().saturating_mul(RESERVE_MULTIPLIER);
        let reserve: Vec<Candidate> = sorted
            .iter()
            .filter(|candidate| !promoted_ids.contains(&candidate.id))
            .take(reserve_limit)
            .cloned()
            .collect();

        stats.promoted = promoted.len();
        stats.reserve = reserve.len();

        PromotionOutcome {
            promoted,
            reserve,
            stats,
        }
    }
}
