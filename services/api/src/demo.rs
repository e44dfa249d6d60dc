use crate::infra::{load_store, InMemoryCrm};
use chrono::{Duration, Local, NaiveDateTime};
use clap::Args;
use recruit_slots::error::AppError;
use recruit_slots::workflows::crm::CrmSnapshot;
use recruit_slots::workflows::promotion::{
    Candidate, CandidateStage, CandidateView, Gender, Housing, PriorityTier, Project, ProjectId,
    PromotionReport, PromotionService, RunMode, SlotCategory,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct PromoteArgs {
    /// CRM snapshot file: {"projects": [...], "candidates": [...]}
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Project id to run the promotion for
    #[arg(long)]
    pub(crate) project: String,
    /// Write stage changes back to the snapshot store (dry run otherwise)
    #[arg(long)]
    pub(crate) apply: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Treat the synthetic project as a genderless order
    #[arg(long)]
    pub(crate) genderless: bool,
    /// Override the reference time (YYYY-MM-DDTHH:MM:SS). Defaults to now.
    #[arg(long)]
    pub(crate) now: Option<NaiveDateTime>,
}

pub(crate) fn run_promote(args: PromoteArgs) -> Result<(), AppError> {
    let PromoteArgs {
        snapshot,
        project,
        apply,
    } = args;

    let store = Arc::new(load_store(Some(snapshot.as_path()))?);
    let mode = if apply { RunMode::Apply } else { RunMode::DryRun };
    let report = run_against(&store, &ProjectId(project), mode)?;

    for line in render_report(&report) {
        println!("{line}");
    }

    if apply {
        println!("\nStage moves");
        for (candidate_id, stage) in store.moves() {
            let current = store
                .stage_of(&candidate_id)
                .map_or_else(|| "unknown".to_string(), |stage| stage.code().to_string());
            println!("  - {candidate_id} -> {} ({current})", stage.label());
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let now = args.now.unwrap_or_else(|| Local::now().naive_local());
    let snapshot = demo_snapshot(now, args.genderless);
    let project_id = snapshot.projects[0].id.clone();
    let store = Arc::new(InMemoryCrm::from_snapshot(snapshot));

    println!("Recruitment slot promotion demo");
    let report = run_against(&store, &project_id, RunMode::DryRun)?;
    for line in render_report(&report) {
        println!("{line}");
    }

    Ok(())
}

fn run_against(
    store: &Arc<InMemoryCrm>,
    project_id: &ProjectId,
    mode: RunMode,
) -> Result<PromotionReport, AppError> {
    let service = PromotionService::new(store.clone(), store.clone());
    Ok(service.run(project_id, mode)?)
}

pub(crate) fn render_report(report: &PromotionReport) -> Vec<String> {
    let mode = match report.mode {
        RunMode::Apply => "apply",
        RunMode::DryRun => "dry run",
    };

    let mut lines = vec![
        format!(
            "Project {} \"{}\" ({mode}), global free slots {}",
            report.project_id, report.project_title, report.global_free_slots
        ),
        String::new(),
    ];
    lines.extend(report.summary.lines().map(str::to_string));

    lines.push(String::new());
    lines.push(format!("Promoted to main list ({})", report.promoted.len()));
    lines.extend(report.promoted.iter().map(candidate_line));

    lines.push(format!("Kept in reserve ({})", report.reserve.len()));
    lines.extend(report.reserve.iter().map(candidate_line));

    if report.mode == RunMode::Apply {
        lines.push(format!("Stage updates applied: {}", report.updates_executed));
        for failure in &report.failed_updates {
            lines.push(format!(
                "  ! {} -> {}: {}",
                failure.candidate_id, failure.target_stage, failure.reason
            ));
        }
    }

    lines
}

fn candidate_line(view: &CandidateView) -> String {
    let tier = view.priority_tier.map_or("no priority", PriorityTier::label);
    match view.category {
        Some(category) => format!(
            "  - {} {} [{tier}] -> {}",
            view.id,
            view.title,
            category.label()
        ),
        None => format!("  - {} {} [{tier}]", view.id, view.title),
    }
}

fn demo_snapshot(now: NaiveDateTime, genderless: bool) -> CrmSnapshot {
    let mut project = Project::new("DEMO-1", "Warehouse Poznan, night shift", 5);
    project.genderless = genderless;
    project.age_limit = Some(50);
    project.training_date = Some(now + Duration::days(21));
    project.arrival_window_start = Some(now + Duration::days(2));
    project.arrival_window_end = Some(now + Duration::days(14));
    for (category, free) in [
        (SlotCategory::MaleProvided, 2),
        (SlotCategory::MaleOwn, 1),
        (SlotCategory::FemaleProvided, 1),
        (SlotCategory::FemaleOwn, 0),
        (SlotCategory::CoupleProvided, 0),
        (SlotCategory::CoupleOwn, 0),
    ] {
        project.category_slots.set(category, free);
    }

    let roster = [
        ("D-101", "Andrii", Gender::Male, Housing::Provided, Some(PriorityTier::Tier1), 34, 5),
        ("D-102", "Oksana", Gender::Female, Housing::Own, Some(PriorityTier::Tier1), 29, 4),
        ("D-103", "Mykola", Gender::Male, Housing::Provided, Some(PriorityTier::Tier2), 41, 6),
        ("D-104", "Serhii", Gender::Male, Housing::Provided, Some(PriorityTier::Tier2), 56, 3),
        ("D-105", "Iryna", Gender::Female, Housing::Provided, Some(PriorityTier::Tier3), 38, 7),
        ("D-106", "Taras", Gender::Male, Housing::Own, None, 27, 9),
        ("D-107", "O. & P.", Gender::Couple, Housing::Provided, Some(PriorityTier::Tier1), 33, 8),
        ("D-108", "Vasyl", Gender::Male, Housing::Provided, Some(PriorityTier::Tier4), 45, 30),
        ("D-109", "Dmytro", Gender::Male, Housing::Provided, Some(PriorityTier::Tier3), 31, 10),
    ];

    let candidates = roster
        .into_iter()
        .enumerate()
        .map(|(index, (id, title, gender, housing, tier, age, arrives_in))| {
            let stage = if index % 3 == 2 {
                CandidateStage::Reserve
            } else {
                CandidateStage::Sorting
            };
            let mut candidate = Candidate::new(id, title, stage);
            candidate.project_id = Some(project.id.clone());
            candidate.gender = Some(gender);
            candidate.housing = Some(housing);
            candidate.priority_tier = tier;
            candidate.age = Some(age);
            candidate.arrival_date = Some(now + Duration::days(arrives_in));
            candidate.queued_since = Some(now - Duration::days(20 - index as i64));
            candidate
        })
        .collect();

    CrmSnapshot {
        projects: vec![project],
        candidates,
    }
}
