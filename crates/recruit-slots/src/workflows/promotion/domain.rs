use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::priority::UNRANKED_PRIORITY;

/// Wall-clock timestamp as recorded by the CRM (offset dropped on import).
pub type Timestamp = NaiveDateTime;

/// Identifier wrapper for a recruitment project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier wrapper for a candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Couple,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Couple => "Couple",
        }
    }
}

/// Housing arrangement requested by the candidate. `Provided` is the preferred
/// company-arranged housing, `Own` the candidate's own accommodation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Housing {
    Provided,
    Own,
}

impl Housing {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Provided => "Provided housing",
            Self::Own => "Own housing",
        }
    }

    pub const fn other(self) -> Self {
        match self {
            Self::Provided => Self::Own,
            Self::Own => Self::Provided,
        }
    }
}

/// One of the six capacity buckets a project tracks (gender group x housing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotCategory {
    MaleProvided,
    MaleOwn,
    FemaleProvided,
    FemaleOwn,
    CoupleProvided,
    CoupleOwn,
}

impl SlotCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::MaleProvided,
            Self::MaleOwn,
            Self::FemaleProvided,
            Self::FemaleOwn,
            Self::CoupleProvided,
            Self::CoupleOwn,
        ]
    }

    pub const fn new(gender: Gender, housing: Housing) -> Self {
        match (gender, housing) {
            (Gender::Male, Housing::Provided) => Self::MaleProvided,
            (Gender::Male, Housing::Own) => Self::MaleOwn,
            (Gender::Female, Housing::Provided) => Self::FemaleProvided,
            (Gender::Female, Housing::Own) => Self::FemaleOwn,
            (Gender::Couple, Housing::Provided) => Self::CoupleProvided,
            (Gender::Couple, Housing::Own) => Self::CoupleOwn,
        }
    }

    pub const fn gender(self) -> Gender {
        match self {
            Self::MaleProvided | Self::MaleOwn => Gender::Male,
            Self::FemaleProvided | Self::FemaleOwn => Gender::Female,
            Self::CoupleProvided | Self::CoupleOwn => Gender::Couple,
        }
    }

    pub const fn housing(self) -> Housing {
        match self {
            Self::MaleProvided | Self::FemaleProvided | Self::CoupleProvided => Housing::Provided,
            Self::MaleOwn | Self::FemaleOwn | Self::CoupleOwn => Housing::Own,
        }
    }

    /// The paired bucket within the same gender group, used for overflow.
    pub const fn alternative(self) -> Self {
        Self::new(self.gender(), self.housing().other())
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::MaleProvided => "male_provided",
            Self::MaleOwn => "male_own",
            Self::FemaleProvided => "female_provided",
            Self::FemaleOwn => "female_own",
            Self::CoupleProvided => "couple_provided",
            Self::CoupleOwn => "couple_own",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MaleProvided => "Male / provided housing",
            Self::MaleOwn => "Male / own housing",
            Self::FemaleProvided => "Female / provided housing",
            Self::FemaleOwn => "Female / own housing",
            Self::CoupleProvided => "Couple / provided housing",
            Self::CoupleOwn => "Couple / own housing",
        }
    }
}

impl fmt::Display for SlotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Free-slot counts per category as configured on the project. Values may be zero or negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySlots {
    pub male_provided: i64,
    pub male_own: i64,
    pub female_provided: i64,
    pub female_own: i64,
    pub couple_provided: i64,
    pub couple_own: i64,
}

impl CategorySlots {
    pub const fn get(&self, category: SlotCategory) -> i64 {
        match category {
            SlotCategory::MaleProvided => self.male_provided,
            SlotCategory::MaleOwn => self.male_own,
            SlotCategory::FemaleProvided => self.female_provided,
            SlotCategory::FemaleOwn => self.female_own,
            SlotCategory::CoupleProvided => self.couple_provided,
            SlotCategory::CoupleOwn => self.couple_own,
        }
    }

    pub fn set(&mut self, category: SlotCategory, free: i64) {
        let slot = match category {
            SlotCategory::MaleProvided => &mut self.male_provided,
            SlotCategory::MaleOwn => &mut self.male_own,
            SlotCategory::FemaleProvided => &mut self.female_provided,
            SlotCategory::FemaleOwn => &mut self.female_own,
            SlotCategory::CoupleProvided => &mut self.couple_provided,
            SlotCategory::CoupleOwn => &mut self.couple_own,
        };
        *slot = free;
    }
}

/// Candidate priority tier; tier 1 ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl PriorityTier {
    pub const fn rank(self) -> u16 {
        match self {
            Self::Tier1 => 1,
            Self::Tier2 => 2,
            Self::Tier3 => 3,
            Self::Tier4 => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tier1 => "Priority 1 (highest)",
            Self::Tier2 => "Priority 2",
            Self::Tier3 => "Priority 3",
            Self::Tier4 => "Priority 4 (lowest)",
        }
    }
}

/// Recruitment pipeline stages a candidate moves through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStage {
    Sorting,
    Reserve,
    MainList,
    InProgress,
    PlannedArrival,
    ReadyToWork,
    NotArrived,
    NotHiring,
    ArrivedLeft,
    Other(String),
}

impl CandidateStage {
    /// Stages a promotion run draws candidates from.
    pub const SOURCE_STAGES: [CandidateStage; 2] =
        [CandidateStage::Sorting, CandidateStage::Reserve];

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "C25:UC_10QO3W" => Self::Sorting,
            "C25:UC_5I8UBF" => Self::Reserve,
            "C25:UC_0LRPVJ" => Self::MainList,
            "C25:FINAL_INVOICE" => Self::InProgress,
            "C25:UC_1U3ODN" => Self::PlannedArrival,
            "C25:UC_MRU2SY" => Self::ReadyToWork,
            "C25:LOSE" => Self::NotArrived,
            "C25:UC_BS2Y58" => Self::NotHiring,
            "C25:APOLOGY" => Self::ArrivedLeft,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Sorting => "C25:UC_10QO3W",
            Self::Reserve => "C25:UC_5I8UBF",
            Self::MainList => "C25:UC_0LRPVJ",
            Self::InProgress => "C25:FINAL_INVOICE",
            Self::PlannedArrival => "C25:UC_1U3ODN",
            Self::ReadyToWork => "C25:UC_MRU2SY",
            Self::NotArrived => "C25:LOSE",
            Self::NotHiring => "C25:UC_BS2Y58",
            Self::ArrivedLeft => "C25:APOLOGY",
            Self::Other(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Sorting => "Sorting",
            Self::Reserve => "Reserve",
            Self::MainList => "Main list",
            Self::InProgress => "In progress",
            Self::PlannedArrival => "Planned arrival",
            Self::ReadyToWork => "Arrived / ready to work",
            Self::NotArrived => "Did not arrive",
            Self::NotHiring => "Not hiring",
            Self::ArrivedLeft => "Arrived and left",
            Self::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStage {
    New,
    InProgress,
    Success,
    Other(String),
}

impl ProjectStage {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "DT1032_17:NEW" => Self::New,
            "DT1032_17:UC_CU0OTZ" => Self::InProgress,
            "DT1032_17:SUCCESS" => Self::Success,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::New => "DT1032_17:NEW",
            Self::InProgress => "DT1032_17:UC_CU0OTZ",
            Self::Success => "DT1032_17:SUCCESS",
            Self::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Genderless,
    Gendered,
}

impl ProjectType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Genderless => "genderless",
            Self::Gendered => "gendered",
        }
    }
}

/// Attribute a project may ask to weigh when ranking candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrioritySignalKind {
    SanitaryClearance,
    ArrivalDate,
    HousingProvided,
    HousingOwn,
    Recommendation,
    ReturningWorker,
    Experience,
    GenderFemale,
    GenderMale,
    Coordinator,
    DateAdded,
    Age,
}

/// Dynamic priority configured in one of the project's three priority fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritySignal {
    /// 1, 2 or 3: which of the project's priority fields carried the signal.
    pub position: u8,
    pub kind: PrioritySignalKind,
}

/// A recruitment drive with capacity limits and qualification criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub stage: ProjectStage,
    /// Overall capacity; negative means over-booked.
    pub global_free_slots: i64,
    pub category_slots: CategorySlots,
    pub genderless: bool,
    pub age_limit: Option<u32>,
    pub training_date: Option<Timestamp>,
    pub arrival_window_start: Option<Timestamp>,
    pub arrival_window_end: Option<Timestamp>,
    #[serde(default)]
    pub priority_signals: Vec<PrioritySignal>,
}

impl Project {
    pub fn new(id: impl Into<String>, title: impl Into<String>, global_free_slots: i64) -> Self {
        Self {
            id: ProjectId(id.into()),
            title: title.into(),
            stage: ProjectStage::InProgress,
            global_free_slots,
            category_slots: CategorySlots::default(),
            genderless: false,
            age_limit: None,
            training_date: None,
            arrival_window_start: None,
            arrival_window_end: None,
            priority_signals: Vec::new(),
        }
    }

    pub fn is_genderless_order(&self) -> bool {
        self.genderless
    }

    pub fn project_type(&self) -> ProjectType {
        if self.genderless {
            ProjectType::Genderless
        } else {
            ProjectType::Gendered
        }
    }

    /// Remaining global capacity with over-booking clamped to zero.
    pub fn global_capacity(&self) -> usize {
        usize::try_from(self.global_free_slots.max(0)).unwrap_or(usize::MAX)
    }

    pub fn has_free_slots(&self) -> bool {
        self.global_free_slots > 0
    }

    pub fn free_slots(&self, category: SlotCategory) -> i64 {
        self.category_slots.get(category)
    }
}

/// A person awaiting a slot-assignment decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub title: String,
    pub stage: CandidateStage,
    pub project_id: Option<ProjectId>,
    pub priority_tier: Option<PriorityTier>,
    pub gender: Option<Gender>,
    pub housing: Option<Housing>,
    pub age: Option<u32>,
    pub arrival_date: Option<Timestamp>,
    /// When the candidate entered the active pipeline stage.
    pub queued_since: Option<Timestamp>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, title: impl Into<String>, stage: CandidateStage) -> Self {
        Self {
            id: CandidateId(id.into()),
            title: title.into(),
            stage,
            project_id: None,
            priority_tier: None,
            gender: None,
            housing: None,
            age: None,
            arrival_date: None,
            queued_since: None,
        }
    }

    /// Capacity bucket requested by the candidate; `None` when gender or housing is unknown.
    pub fn category(&self) -> Option<SlotCategory> {
        Some(SlotCategory::new(self.gender?, self.housing?))
    }

    /// Tier ordinal, or [`UNRANKED_PRIORITY`] when no tier is set.
    pub fn priority_rank(&self) -> u16 {
        self.priority_tier.map_or(UNRANKED_PRIORITY, PriorityTier::rank)
    }

    pub fn is_linked_to(&self, project_id: &ProjectId) -> bool {
        self.project_id.as_ref() == Some(project_id)
    }

    pub fn is_in_stage(&self, stage: &CandidateStage) -> bool {
        &self.stage == stage
    }
}
