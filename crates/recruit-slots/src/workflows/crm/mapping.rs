use crate::workflows::promotion::domain::{Gender, Housing, PriorityTier, PrioritySignalKind};

/// Value of the project's genderless-order flag meaning "skip gender rules".
pub(crate) const GENDERLESS_ORDER: i64 = 1991;

pub(crate) fn gender(code: &str) -> Option<Gender> {
    match code {
        "1907" => Some(Gender::Female),
        "1909" => Some(Gender::Male),
        "1911" => Some(Gender::Couple),
        _ => None,
    }
}

pub(crate) fn housing(code: &str) -> Option<Housing> {
    match code {
        "1919" => Some(Housing::Provided),
        "1917" => Some(Housing::Own),
        _ => None,
    }
}

pub(crate) fn priority_tier(code: &str) -> Option<PriorityTier> {
    match code {
        "1951" => Some(PriorityTier::Tier1),
        "1953" => Some(PriorityTier::Tier2),
        "1955" => Some(PriorityTier::Tier3),
        "1957" => Some(PriorityTier::Tier4),
        _ => None,
    }
}

/// Dynamic priority option codes. Each of the three project priority fields has its own
/// option list, but a code identifies its kind regardless of the field it appears in.
pub(crate) fn priority_signal(code: i64) -> Option<PrioritySignalKind> {
    use PrioritySignalKind::*;

    let kind = match code {
        1867 | 2025 | 2037 => SanitaryClearance,
        1875 | 1881 | 1899 => ArrivalDate,
        1873 | 1885 | 1897 => HousingProvided,
        1871 | 1883 | 1895 => HousingOwn,
        1877 | 1889 | 1901 => Recommendation,
        2013 | 1887 | 1893 => ReturningWorker,
        2015 | 2023 | 2035 => Experience,
        2017 | 2027 | 2039 => GenderFemale,
        2019 | 2029 | 2041 => GenderMale,
        2021 | 2031 | 2043 => Coordinator,
        1869 | 2033 | 2045 => DateAdded,
        1879 | 1891 => Age,
        _ => return None,
    };

    Some(kind)
}
