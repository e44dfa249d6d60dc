//! Slot allocation and promotion engine for recruitment projects.
//!
//! Candidates pulled from the CRM are filtered against a project's eligibility rules, ordered
//! by priority tier and queue time, and assigned to the project's global and per-category
//! capacity. The remainder is kept as a bounded reserve list.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
