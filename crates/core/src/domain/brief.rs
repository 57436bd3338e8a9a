use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::supplier::TimeSlot;
use crate::errors::DomainError;

/// Theme sentinel for parents who did not pick one.
pub const NO_THEME: &str = "no-theme";

/// Caller-supplied party requirements. `budget` is optional; when absent
/// the guest-count step function in `effective_budget` applies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartyBrief {
    pub theme: String,
    pub guest_count: u32,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub duration_hours: u32,
    pub location: String,
    #[serde(default)]
    pub budget: Option<Decimal>,
}

impl PartyBrief {
    pub fn has_theme(&self) -> bool {
        self.theme != NO_THEME
    }

    /// Requested budget, or the guest-count derived default when the
    /// parent left it blank.
    pub fn effective_budget(&self) -> Decimal {
        match self.budget {
            Some(budget) if budget > Decimal::ZERO => budget,
            _ => default_budget_for_guests(self.guest_count),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.guest_count == 0 {
            return Err(DomainError::InvalidBrief("guest_count must be positive".to_owned()));
        }
        if let Some(budget) = self.budget {
            if budget <= Decimal::ZERO {
                return Err(DomainError::InvalidBrief("budget must be positive".to_owned()));
            }
        }
        if self.location.trim().is_empty() {
            return Err(DomainError::InvalidBrief("location must not be empty".to_owned()));
        }
        Ok(())
    }
}

fn default_budget_for_guests(guest_count: u32) -> Decimal {
    let amount = match guest_count {
        0..=5 => 400,
        6..=10 => 500,
        11..=15 => 600,
        16..=20 => 700,
        21..=25 => 800,
        _ => 900,
    };
    Decimal::from(amount)
}
