use crate::workflows::promotion::domain::{Candidate, Project};
use super::RejectionReason;

/// Arrival must fall inside the project's window and strictly before training day.
/// A candidate without an arrival date passes; undefined bounds are not checked.
pub(crate) fn arrival_date(candidate: &Candidate, project: &Project) -> Option<RejectionReason> {
    let arrival = candidate.arrival_date?;

    if let Some(start) = project.arrival_window_start {
        if arrival < start {
            return Some(RejectionReason::ArrivalBeforeWindow);
        }
    }

    if let Some(end) = project.arrival_window_end {
        if arrival > end {
            return Some(RejectionReason::ArrivalAfterWindow);
        }
    }

    if let Some(training) = project.training_date {
        if arrival >= training {
            return Some(RejectionReason::ArrivalNotBeforeTraining);
        }
    }

    None
}

/// Inclusive upper age bound; missing limit or missing age passes.
pub(crate) fn age(candidate: &Candidate, project: &Project) -> Option<RejectionReason> {
    match (project.age_limit, candidate.age) {
        (Some(limit), Some(age)) if age > limit => {
            Some(RejectionReason::OverAgeLimit { age, limit })
        }
        _ => None,
    }
}

/// Availability only: the primary bucket or its paired alternative must show a free slot.
/// Nothing is reserved here.
pub(crate) fn category_availability(
    candidate: &Candidate,
    project: &Project,
) -> Option<RejectionReason> {
    if project.is_genderless_order() {
        return None;
    }

    if candidate.gender.is_none() {
        return Some(RejectionReason::MissingGender);
    }
    if candidate.housing.is_none() {
        return Some(RejectionReason::MissingHousing);
    }

    let Some(category) = candidate.category() else {
        return Some(RejectionReason::UnknownCategory);
    };

    if project.free_slots(category) > 0 || project.free_slots(category.alternative()) > 0 {
        None
    } else {
        Some(RejectionReason::NoCategoryCapacity { category })
    }
}
