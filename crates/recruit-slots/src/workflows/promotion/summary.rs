use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, ProjectType, SlotCategory};

/// Counters and category breakdown collected during one promotion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionStats {
    pub total_input: usize,
    pub qualified: usize,
    pub rejected: usize,
    pub promoted: usize,
    pub reserve: usize,
    pub project_type: ProjectType,
    /// Empty when no candidate qualified; otherwise one entry per category.
    pub category_allocation: BTreeMap<SlotCategory, usize>,
    pub assignments: BTreeMap<CandidateId, SlotCategory>,
}

impl PromotionStats {
    pub(crate) fn new(project_type: ProjectType, total_input: usize) -> Self {
        Self {
            total_input,
            qualified: 0,
            rejected: 0,
            promoted: 0,
            reserve: 0,
            project_type,
            category_allocation: BTreeMap::new(),
            assignments: BTreeMap::new(),
        }
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Project type: {}", self.project_type.label()),
            format!("Input candidates: {}", self.total_input),
            format!("Qualified: {}", self.qualified),
            format!("Rejected: {}", self.rejected),
            format!("Promoted: {}", self.promoted),
            format!("Reserve: {}", self.reserve),
        ];

        let breakdown: Vec<String> = self
            .category_allocation
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(category, count)| format!("  {}: {}", category.key(), count))
            .collect();

        if !breakdown.is_empty() {
            lines.push(String::new());
            lines.push("Allocation by category:".to_string());
            lines.extend(breakdown);
        }

        lines
    }

    pub fn summary(&self) -> String {
        self.summary_lines().join("\n")
    }
}
