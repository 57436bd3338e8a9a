use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupplierId(pub String);

impl fmt::Display for SupplierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed supplier classification. Display names match the catalog spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Venues,
    Entertainment,
    Catering,
    Cakes,
    Decorations,
    Activities,
    #[serde(rename = "Party Bags")]
    PartyBags,
    Photography,
    #[serde(rename = "Face Painting")]
    FacePainting,
    Balloons,
    #[serde(rename = "Soft Play")]
    SoftPlay,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Venues,
        Category::Entertainment,
        Category::Catering,
        Category::Cakes,
        Category::Decorations,
        Category::Activities,
        Category::PartyBags,
        Category::Photography,
        Category::FacePainting,
        Category::Balloons,
        Category::SoftPlay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Venues => "Venues",
            Category::Entertainment => "Entertainment",
            Category::Catering => "Catering",
            Category::Cakes => "Cakes",
            Category::Decorations => "Decorations",
            Category::Activities => "Activities",
            Category::PartyBags => "Party Bags",
            Category::Photography => "Photography",
            Category::FacePainting => "Face Painting",
            Category::Balloons => "Balloons",
            Category::SoftPlay => "Soft Play",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().to_ascii_lowercase() == normalized)
            .ok_or_else(|| format!("unknown supplier category `{value}`"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
}

impl TimeSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
        }
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(TimeSlot::Morning),
            "afternoon" => Ok(TimeSlot::Afternoon),
            other => Err(format!("unknown time slot `{other}` (expected morning|afternoon)")),
        }
    }
}

/// Weekday keyed independently of chrono so working-hours tables can be
/// ordered and serialized without pulling chrono's serde shapes into the
/// catalog document format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDay {
    pub active: bool,
    #[serde(default)]
    pub unavailable_slots: Vec<TimeSlot>,
}

/// A date a supplier cannot (or prefers not to) take bookings. An empty
/// slot list blocks the whole day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRestriction {
    pub date: NaiveDate,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

impl DateRestriction {
    pub fn blocks(&self, date: NaiveDate, slot: TimeSlot) -> Option<RestrictionScope> {
        if self.date != date {
            return None;
        }
        if self.slots.is_empty() {
            Some(RestrictionScope::WholeDay)
        } else if self.slots.contains(&slot) {
            Some(RestrictionScope::Slot)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestrictionScope {
    WholeDay,
    Slot,
}

/// Availability representation, decided once at catalog-load time. The
/// original catalog documents carried up to four differently-shaped
/// optional fields per supplier; normalizing them into a closed union here
/// lets the oracle pattern-match instead of probing shapes at call time.
/// `Invalid` marks availability data the loader could not interpret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AvailabilitySpec {
    WorkingHours { days: BTreeMap<DayOfWeek, WorkingDay> },
    UnavailableDates { dates: Vec<DateRestriction> },
    BusyDates { dates: Vec<DateRestriction> },
    GenericSlots {
        #[serde(default)]
        time_slots: Vec<TimeSlot>,
        #[serde(default)]
        blocked_dates: Vec<NaiveDate>,
    },
    Invalid,
}

/// A catalog entry. Immutable input to the engine; never mutated by it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: Category,
    pub location: String,
    pub price_from: Decimal,
    pub price_unit: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub avg_response_hours: Option<u32>,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub service_themes: Vec<String>,
    #[serde(default)]
    pub availability: Vec<AvailabilitySpec>,
}

impl Supplier {
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    pub fn review_count_or_zero(&self) -> u32 {
        self.review_count.unwrap_or(0)
    }

    pub fn has_theme(&self, theme: &str) -> bool {
        self.themes.iter().any(|candidate| candidate.eq_ignore_ascii_case(theme))
    }

    pub fn has_service_theme(&self, theme: &str) -> bool {
        self.service_themes.iter().any(|candidate| candidate.eq_ignore_ascii_case(theme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_catalog_spelling() {
        let json = serde_json::to_string(&Category::PartyBags).expect("serialize");
        assert_eq!(json, "\"Party Bags\"");
        let parsed: Category = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, Category::PartyBags);
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("face painting".parse::<Category>(), Ok(Category::FacePainting));
        assert!("Bouncy Castles".parse::<Category>().is_err());
    }

    #[test]
    fn bare_date_restriction_blocks_both_slots() {
        let restriction = DateRestriction {
            date: NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(),
            slots: Vec::new(),
        };
        let date = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
        assert_eq!(restriction.blocks(date, TimeSlot::Morning), Some(RestrictionScope::WholeDay));
        assert_eq!(restriction.blocks(date, TimeSlot::Afternoon), Some(RestrictionScope::WholeDay));
    }

    #[test]
    fn slotted_restriction_blocks_only_listed_slots() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
        let restriction = DateRestriction { date, slots: vec![TimeSlot::Morning] };
        assert_eq!(restriction.blocks(date, TimeSlot::Morning), Some(RestrictionScope::Slot));
        assert_eq!(restriction.blocks(date, TimeSlot::Afternoon), None);
    }
}
