use super::common::*;

use crate::workflows::promotion::domain::{Candidate, PriorityTier, ProjectType, SlotCategory};
use crate::workflows::promotion::promoter::PromotionEngine;

#[test]
fn no_qualified_candidates_short_circuits() {
    let project = with_slots(gendered_project(5), &[(SlotCategory::MaleProvided, 0)]);
    let candidates = vec![male("m1"), candidate("anonymous")];

    let outcome = PromotionEngine::new().process(&project, &candidates);

    assert!(outcome.promoted.is_empty());
    assert!(outcome.reserve.is_empty());
    assert_eq!(outcome.stats.total_input, 2);
    assert_eq!(outcome.stats.qualified, 0);
    assert_eq!(outcome.stats.rejected, 2);
    assert!(outcome.stats.category_allocation.is_empty());
}

#[test]
fn reserve_is_capped_at_twice_global_capacity() {
    let project = genderless_project(2);
    let candidates: Vec<Candidate> = (0..10).map(|index| candidate(&format!("c{index}"))).collect();

    let outcome = PromotionEngine::new().process(&project, &candidates);

    assert_eq!(ids(&outcome.promoted), vec!["c0", "c1"]);
    assert_eq!(ids(&outcome.reserve), vec!["c2", "c3", "c4", "c5"]);
    assert_eq!(outcome.stats.promoted, 2);
    assert_eq!(outcome.stats.reserve, 4);
    assert_eq!(outcome.stats.project_type, ProjectType::Genderless);
}

#[test]
fn reserve_keeps_sort_order_and_skipped_candidates() {
    let project = with_slots(
        gendered_project(3),
        &[(SlotCategory::MaleProvided, 1), (SlotCategory::FemaleProvided, 1)],
    );
    let candidates = vec![
        ranked(female("f1"), Some(PriorityTier::Tier2), None),
        ranked(male("m1"), Some(PriorityTier::Tier1), Some(at(2025, 1, 1))),
        ranked(male("m2"), Some(PriorityTier::Tier1), Some(at(2025, 1, 2))),
        ranked(female("f2"), Some(PriorityTier::Tier3), None),
    ];

    let outcome = PromotionEngine::new().process(&project, &candidates);

    assert_eq!(ids(&outcome.promoted), vec!["m1", "f1"]);
    assert_eq!(ids(&outcome.reserve), vec!["m2", "f2"]);
    assert_eq!(
        outcome.stats.category_allocation.get(&SlotCategory::MaleProvided),
        Some(&1)
    );
    assert_eq!(outcome.stats.category_allocation.len(), 6);
}

#[test]
fn negative_capacity_yields_empty_reserve() {
    let project = genderless_project(-4);
    let candidates: Vec<Candidate> = (0..3).map(|index| candidate(&format!("c{index}"))).collect();

    let outcome = PromotionEngine::new().process(&project, &candidates);

    assert_eq!(outcome.stats.qualified, 3);
    assert!(outcome.promoted.is_empty());
    assert!(outcome.reserve.is_empty());
}

#[test]
fn qualified_and_rejected_add_up_to_input() {
    let mut project = with_slots(
        gendered_project(4),
        &[(SlotCategory::FemaleOwn, 2), (SlotCategory::CoupleProvided, 1)],
    );
    project.age_limit = Some(40);

    let mut too_old = candidate_in("f-old", SlotCategory::FemaleOwn);
    too_old.age = Some(55);
    let candidates = vec![
        candidate_in("f1", SlotCategory::FemaleProvided),
        too_old,
        male("m1"),
        candidate_in("couple", SlotCategory::CoupleOwn),
        candidate("anonymous"),
    ];

    let stats = PromotionEngine::new().process(&project, &candidates).stats;

    assert_eq!(stats.qualified + stats.rejected, stats.total_input);
    assert_eq!(stats.qualified, 2);
    assert_eq!(stats.promoted, 2);
}

#[test]
fn summary_lists_non_zero_categories() {
    let project = with_slots(gendered_project(2), &[(SlotCategory::CoupleOwn, 2)]);
    let candidates = vec![candidate_in("c1", SlotCategory::CoupleOwn)];

    let summary = PromotionEngine::new()
        .process(&project, &candidates)
        .stats
        .summary();

    assert!(summary.starts_with("Project type: gendered"));
    assert!(summary.contains("Promoted: 1"));
    assert!(summary.contains("Allocation by category:\n  couple_own: 1"));
    assert!(!summary.contains("male_provided"));
}
