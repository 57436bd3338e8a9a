use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::supplier::{
    AvailabilitySpec, DayOfWeek, RestrictionScope, Supplier, TimeSlot,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityReason {
    NoAvailabilityData,
    ClosedDay,
    TimeSlotUnavailable,
    DateBlocked,
    TimeSlotBlocked,
    DateBusy,
    TimeSlotBusy,
    TimeSlotNotSupported,
    DateInBlockedList,
    Available,
    ErrorDefault,
}

impl AvailabilityReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityReason::NoAvailabilityData => "no-availability-data",
            AvailabilityReason::ClosedDay => "closed-day",
            AvailabilityReason::TimeSlotUnavailable => "time-slot-unavailable",
            AvailabilityReason::DateBlocked => "date-blocked",
            AvailabilityReason::TimeSlotBlocked => "time-slot-blocked",
            AvailabilityReason::DateBusy => "date-busy",
            AvailabilityReason::TimeSlotBusy => "time-slot-busy",
            AvailabilityReason::TimeSlotNotSupported => "time-slot-not-supported",
            AvailabilityReason::DateInBlockedList => "date-in-blocked-list",
            AvailabilityReason::Available => "available",
            AvailabilityReason::ErrorDefault => "error-default",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityVerdict {
    pub available: bool,
    pub reason: AvailabilityReason,
    pub confidence: Confidence,
}

impl AvailabilityVerdict {
    fn blocked(reason: AvailabilityReason) -> Self {
        Self { available: false, reason, confidence: Confidence::High }
    }
}

/// Decides whether a supplier is bookable on a date and time slot,
/// whichever availability representations the record carries. Blocking
/// rules are evaluated in a fixed order and the first match wins; the
/// oracle fails open — a supplier with no data, or with data the catalog
/// loader could not interpret, is treated as bookable at reduced
/// confidence rather than excluded. A false positive is recoverable
/// downstream through fallback confirmation; a false negative is not.
#[derive(Clone, Debug, Default)]
pub struct AvailabilityOracle;

impl AvailabilityOracle {
    pub fn check(&self, supplier: &Supplier, date: NaiveDate, slot: TimeSlot) -> AvailabilityVerdict {
        if supplier.availability.is_empty() {
            return AvailabilityVerdict {
                available: true,
                reason: AvailabilityReason::NoAvailabilityData,
                confidence: Confidence::Medium,
            };
        }

        let weekday: DayOfWeek = date.weekday().into();

        // Representations are consulted in a fixed order regardless of how
        // the record stores them: working hours, then blocked dates, then
        // busy dates, then the generic slot object. First block wins.
        for spec in &supplier.availability {
            if let AvailabilitySpec::WorkingHours { days } = spec {
                if let Some(verdict) = check_working_hours(days, weekday, slot) {
                    return verdict;
                }
            }
        }
        for spec in &supplier.availability {
            if let AvailabilitySpec::UnavailableDates { dates } = spec {
                if let Some(verdict) = check_restrictions(
                    dates,
                    date,
                    slot,
                    AvailabilityReason::DateBlocked,
                    AvailabilityReason::TimeSlotBlocked,
                ) {
                    return verdict;
                }
            }
        }
        for spec in &supplier.availability {
            if let AvailabilitySpec::BusyDates { dates } = spec {
                if let Some(verdict) = check_restrictions(
                    dates,
                    date,
                    slot,
                    AvailabilityReason::DateBusy,
                    AvailabilityReason::TimeSlotBusy,
                ) {
                    return verdict;
                }
            }
        }
        for spec in &supplier.availability {
            if let AvailabilitySpec::GenericSlots { time_slots, blocked_dates } = spec {
                if let Some(verdict) = check_generic(time_slots, blocked_dates, date, slot) {
                    return verdict;
                }
            }
        }

        let saw_invalid = supplier
            .availability
            .iter()
            .any(|spec| matches!(spec, AvailabilitySpec::Invalid));
        if saw_invalid {
            return AvailabilityVerdict {
                available: true,
                reason: AvailabilityReason::ErrorDefault,
                confidence: Confidence::Low,
            };
        }

        AvailabilityVerdict {
            available: true,
            reason: AvailabilityReason::Available,
            confidence: Confidence::High,
        }
    }
}

fn check_working_hours(
    days: &std::collections::BTreeMap<DayOfWeek, crate::domain::supplier::WorkingDay>,
    weekday: DayOfWeek,
    slot: TimeSlot,
) -> Option<AvailabilityVerdict> {
    let day = days.get(&weekday)?;
    if !day.active {
        return Some(AvailabilityVerdict::blocked(AvailabilityReason::ClosedDay));
    }
    if day.unavailable_slots.contains(&slot) {
        return Some(AvailabilityVerdict::blocked(AvailabilityReason::TimeSlotUnavailable));
    }
    None
}

fn check_restrictions(
    restrictions: &[crate::domain::supplier::DateRestriction],
    date: NaiveDate,
    slot: TimeSlot,
    whole_day_reason: AvailabilityReason,
    slot_reason: AvailabilityReason,
) -> Option<AvailabilityVerdict> {
    for restriction in restrictions {
        match restriction.blocks(date, slot) {
            Some(RestrictionScope::WholeDay) => {
                return Some(AvailabilityVerdict::blocked(whole_day_reason));
            }
            Some(RestrictionScope::Slot) => {
                return Some(AvailabilityVerdict::blocked(slot_reason));
            }
            None => {}
        }
    }
    None
}

fn check_generic(
    time_slots: &[TimeSlot],
    blocked_dates: &[NaiveDate],
    date: NaiveDate,
    slot: TimeSlot,
) -> Option<AvailabilityVerdict> {
    if !time_slots.is_empty() && !time_slots.contains(&slot) {
        return Some(AvailabilityVerdict::blocked(AvailabilityReason::TimeSlotNotSupported));
    }
    if blocked_dates.contains(&date) {
        return Some(AvailabilityVerdict::blocked(AvailabilityReason::DateInBlockedList));
    }
    None
}
