use std::collections::BTreeMap;

use tracing::debug;

use super::domain::{Candidate, CandidateId, Project, ProjectType, SlotCategory};

/// Assigns sorted, qualified candidates to the project's capacity.
///
/// The allocator keeps no state between calls: counters and the assignment map live in a
/// per-call [`AllocationOutcome`], so one instance can serve any number of projects,
/// sequentially or from several threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotAllocator;

/// Result of a single [`SlotAllocator::allocate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome {
    promoted: Vec<Candidate>,
    used_slots: BTreeMap<SlotCategory, usize>,
    assignments: BTreeMap<CandidateId, SlotCategory>,
    allocated: usize,
}

impl AllocationOutcome {
    fn empty() -> Self {
        Self {
            promoted: Vec::new(),
            used_slots: SlotCategory::ordered()
                .into_iter()
                .map(|category| (category, 0))
                .collect(),
            assignments: BTreeMap::new(),
            allocated: 0,
        }
    }

    /// Promoted candidates in iteration (sort) order.
    pub fn promoted(&self) -> &[Candidate] {
        &self.promoted
    }

    pub fn into_promoted(self) -> Vec<Candidate> {
        self.promoted
    }

    /// Used slots for every category; all six keys are always present.
    pub fn used_slots(&self) -> &BTreeMap<SlotCategory, usize> {
        &self.used_slots
    }

    pub fn used(&self, category: SlotCategory) -> usize {
        self.used_slots.get(&category).copied().unwrap_or(0)
    }

    /// Candidate id to the category it was placed in. Empty for genderless orders.
    pub fn assignments(&self) -> &BTreeMap<CandidateId, SlotCategory> {
        &self.assignments
    }

    pub fn allocated_count(&self) -> usize {
        self.allocated
    }

    fn has_room(&self, category: SlotCategory, project: &Project) -> bool {
        let used = i64::try_from(self.used(category)).unwrap_or(i64::MAX);
        used < project.free_slots(category)
    }

    fn accept(&mut self, candidate: &Candidate) {
        self.promoted.push(candidate.clone());
        self.allocated += 1;
    }

    fn assign(&mut self, candidate: &Candidate, category: SlotCategory) {
        *self.used_slots.entry(category).or_insert(0) += 1;
        self.assignments.insert(candidate.id.clone(), category);
        self.accept(candidate);
    }
}

impl SlotAllocator {
    pub fn new() -> Self {
        Self
    }

    /// `candidates` must already be filtered and sorted; they are consumed in order.
    pub fn allocate(&self, candidates: &[Candidate], project: &Project) -> AllocationOutcome {
        let mut outcome = AllocationOutcome::empty();

        let global_limit = project.global_capacity();
        if global_limit == 0 {
            debug!(
                project = %project.id,
                global_free_slots = project.global_free_slots,
                "no global capacity; nothing to allocate"
            );
            return outcome;
        }

        match project.project_type() {
            ProjectType::Genderless => fill_first(&mut outcome, candidates, global_limit),
            ProjectType::Gendered => {
                fill_by_category(&mut outcome, candidates, project, global_limit)
            }
        }

        outcome
    }
}

fn fill_first(outcome: &mut AllocationOutcome, candidates: &[Candidate], global_limit: usize) {
    for candidate in candidates {
        if outcome.allocated >= global_limit {
            break;
        }
        outcome.accept(candidate);
    }
}

fn fill_by_category(
    outcome: &mut AllocationOutcome,
    candidates: &[Candidate],
    project: &Project,
    global_limit: usize,
) {
    for candidate in candidates {
        if outcome.allocated >= global_limit {
            debug!(project = %project.id, global_limit, "global capacity reached");
            break;
        }

        let Some(primary) = candidate.category() else {
            continue;
        };

        match choose_category(outcome, primary, project) {
            Some(category) => {
                if category != primary {
                    debug!(
                        candidate = %candidate.id,
                        from = primary.key(),
                        to = category.key(),
                        "overflow to alternative category"
                    );
                }
                outcome.assign(candidate, category);
            }
            None => {
                debug!(
                    candidate = %candidate.id,
                    category = primary.key(),
                    "category and alternative full"
                );
            }
        }
    }
}

/// Primary bucket first, then its paired alternative within the same gender group.
fn choose_category(
    outcome: &AllocationOutcome,
    primary: SlotCategory,
    project: &Project,
) -> Option<SlotCategory> {
    [primary, primary.alternative()]
        .into_iter()
        .find(|category| outcome.has_room(*category, project))
}
