//! Raw catalog document decoding.
//!
//! Supplier records arrive with up to four differently-shaped optional
//! availability fields (a working-hours table, two flavors of date
//! list, and a generic slot object). The shapes are resolved here, once,
//! into the closed [`AvailabilitySpec`] union; anything that cannot be
//! interpreted becomes `AvailabilitySpec::Invalid`, which the oracle
//! treats as bookable at low confidence. Decoding therefore only hard
//! fails on structural problems (bad JSON, unknown category), never on
//! messy availability data.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use soiree_core::{
    AvailabilitySpec, Category, DateRestriction, DayOfWeek, Supplier, SupplierId, TimeSlot,
    WorkingDay,
};

use crate::CatalogError;

#[derive(Debug, Deserialize)]
struct RawCatalogDocument {
    suppliers: Vec<RawSupplier>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSupplier {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    category: String,
    location: String,
    price_from: Decimal,
    #[serde(default)]
    price_unit: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    review_count: Option<u32>,
    #[serde(default)]
    is_premium: Option<bool>,
    #[serde(default)]
    avg_response_hours: Option<u32>,
    #[serde(default)]
    themes: Option<Vec<String>>,
    #[serde(default)]
    service_themes: Option<Vec<String>>,
    #[serde(default)]
    working_hours: Option<Value>,
    #[serde(default)]
    unavailable_dates: Option<Value>,
    #[serde(default)]
    busy_dates: Option<Value>,
    #[serde(default)]
    availability: Option<Value>,
}

pub fn decode_catalog(raw: &str) -> Result<Vec<Supplier>, CatalogError> {
    let document: RawCatalogDocument =
        serde_json::from_str(raw).map_err(|error| CatalogError::Decode(error.to_string()))?;
    document.suppliers.into_iter().map(normalize_supplier).collect()
}

fn normalize_supplier(raw: RawSupplier) -> Result<Supplier, CatalogError> {
    let category: Category = raw.category.parse().map_err(|error: String| {
        CatalogError::Decode(format!("supplier `{}`: {error}", raw.id))
    })?;

    let mut availability = Vec::new();
    push_spec(&mut availability, &raw.id, raw.working_hours, parse_working_hours);
    push_spec(&mut availability, &raw.id, raw.unavailable_dates, |value| {
        parse_date_list(value).map(|dates| AvailabilitySpec::UnavailableDates { dates })
    });
    push_spec(&mut availability, &raw.id, raw.busy_dates, |value| {
        parse_date_list(value).map(|dates| AvailabilitySpec::BusyDates { dates })
    });
    push_spec(&mut availability, &raw.id, raw.availability, parse_generic);

    Ok(Supplier {
        id: SupplierId(raw.id),
        name: raw.name,
        description: raw.description,
        category,
        location: raw.location,
        price_from: raw.price_from,
        price_unit: raw.price_unit.unwrap_or_else(|| "per party".to_owned()),
        rating: raw.rating,
        review_count: raw.review_count,
        is_premium: raw.is_premium.unwrap_or(false),
        avg_response_hours: raw.avg_response_hours,
        themes: raw.themes.unwrap_or_default(),
        service_themes: raw.service_themes.unwrap_or_default(),
        availability,
    })
}

fn push_spec(
    specs: &mut Vec<AvailabilitySpec>,
    supplier_id: &str,
    value: Option<Value>,
    parse: impl Fn(Value) -> Option<AvailabilitySpec>,
) {
    let Some(value) = value else {
        return;
    };
    match parse(value) {
        Some(spec) => specs.push(spec),
        None => {
            warn!(supplier_id, "uninterpretable availability data, failing open");
            specs.push(AvailabilitySpec::Invalid);
        }
    }
}

/// `{"saturday": true, "sunday": {"active": true, "unavailableSlots": ["morning"]}}`
fn parse_working_hours(value: Value) -> Option<AvailabilitySpec> {
    let table = value.as_object()?;
    let mut days = BTreeMap::new();
    for (key, entry) in table {
        let day = parse_day(key)?;
        let working_day = match entry {
            Value::Bool(active) => WorkingDay { active: *active, unavailable_slots: Vec::new() },
            Value::Object(fields) => {
                let active = fields.get("active").and_then(Value::as_bool).unwrap_or(true);
                let unavailable_slots = match fields.get("unavailableSlots") {
                    Some(slots) => parse_slot_list(slots)?,
                    None => Vec::new(),
                };
                WorkingDay { active, unavailable_slots }
            }
            _ => return None,
        };
        days.insert(day, working_day);
    }
    Some(AvailabilitySpec::WorkingHours { days })
}

/// Entries are either bare `"YYYY-MM-DD"` strings or
/// `{"date": "...", "slots": ["afternoon"]}` objects.
fn parse_date_list(value: Value) -> Option<Vec<DateRestriction>> {
    let entries = value.as_array()?;
    let mut restrictions = Vec::with_capacity(entries.len());
    for entry in entries {
        let restriction = match entry {
            Value::String(raw_date) => {
                DateRestriction { date: parse_date(raw_date)?, slots: Vec::new() }
            }
            Value::Object(fields) => {
                let raw_date = fields.get("date").and_then(Value::as_str)?;
                let slots = match fields.get("slots").or_else(|| fields.get("timeSlots")) {
                    Some(slots) => parse_slot_list(slots)?,
                    None => Vec::new(),
                };
                DateRestriction { date: parse_date(raw_date)?, slots }
            }
            _ => return None,
        };
        restrictions.push(restriction);
    }
    Some(restrictions)
}

/// `{"timeSlots": ["morning"], "blockedDates": ["YYYY-MM-DD"]}`
fn parse_generic(value: Value) -> Option<AvailabilitySpec> {
    let fields = value.as_object()?;
    let time_slots = match fields.get("timeSlots") {
        Some(slots) => parse_slot_list(slots)?,
        None => Vec::new(),
    };
    let blocked_dates = match fields.get("blockedDates") {
        Some(Value::Array(dates)) => {
            let mut parsed = Vec::with_capacity(dates.len());
            for date in dates {
                parsed.push(parse_date(date.as_str()?)?);
            }
            parsed
        }
        Some(_) => return None,
        None => Vec::new(),
    };
    Some(AvailabilitySpec::GenericSlots { time_slots, blocked_dates })
}

fn parse_slot_list(value: &Value) -> Option<Vec<TimeSlot>> {
    let entries = value.as_array()?;
    let mut slots = Vec::with_capacity(entries.len());
    for entry in entries {
        slots.push(entry.as_str()?.parse().ok()?);
    }
    Some(slots)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn parse_day(raw: &str) -> Option<DayOfWeek> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" => Some(DayOfWeek::Monday),
        "tuesday" | "tue" => Some(DayOfWeek::Tuesday),
        "wednesday" | "wed" => Some(DayOfWeek::Wednesday),
        "thursday" | "thu" => Some(DayOfWeek::Thursday),
        "friday" | "fri" => Some(DayOfWeek::Friday),
        "saturday" | "sat" => Some(DayOfWeek::Saturday),
        "sunday" | "sun" => Some(DayOfWeek::Sunday),
        _ => None,
    }
}

/// Renders suppliers back into the document format `decode_catalog`
/// reads, so a written catalog file round-trips through the loader.
/// `Invalid` specs are dropped; they carry no data worth writing.
pub fn encode_catalog(suppliers: &[Supplier]) -> Result<String, CatalogError> {
    let rendered: Vec<Value> = suppliers.iter().map(encode_supplier).collect();
    serde_json::to_string_pretty(&serde_json::json!({ "suppliers": rendered }))
        .map_err(|error| CatalogError::Decode(error.to_string()))
}

fn encode_supplier(supplier: &Supplier) -> Value {
    let mut fields = serde_json::Map::new();
    fields.insert("id".into(), Value::String(supplier.id.0.clone()));
    fields.insert("name".into(), Value::String(supplier.name.clone()));
    if let Some(description) = &supplier.description {
        fields.insert("description".into(), Value::String(description.clone()));
    }
    fields.insert("category".into(), Value::String(supplier.category.as_str().to_owned()));
    fields.insert("location".into(), Value::String(supplier.location.clone()));
    fields.insert("priceFrom".into(), Value::String(supplier.price_from.to_string()));
    fields.insert("priceUnit".into(), Value::String(supplier.price_unit.clone()));
    if let Some(rating) = supplier.rating {
        fields.insert("rating".into(), serde_json::json!(rating));
    }
    if let Some(review_count) = supplier.review_count {
        fields.insert("reviewCount".into(), serde_json::json!(review_count));
    }
    if supplier.is_premium {
        fields.insert("isPremium".into(), Value::Bool(true));
    }
    if let Some(hours) = supplier.avg_response_hours {
        fields.insert("avgResponseHours".into(), serde_json::json!(hours));
    }
    if !supplier.themes.is_empty() {
        fields.insert("themes".into(), serde_json::json!(supplier.themes));
    }
    if !supplier.service_themes.is_empty() {
        fields.insert("serviceThemes".into(), serde_json::json!(supplier.service_themes));
    }
    for spec in &supplier.availability {
        match spec {
            AvailabilitySpec::WorkingHours { days } => {
                let table: serde_json::Map<String, Value> = days
                    .iter()
                    .map(|(day, working_day)| {
                        (
                            day.as_str().to_owned(),
                            serde_json::json!({
                                "active": working_day.active,
                                "unavailableSlots": encode_slots(&working_day.unavailable_slots),
                            }),
                        )
                    })
                    .collect();
                fields.insert("workingHours".into(), Value::Object(table));
            }
            AvailabilitySpec::UnavailableDates { dates } => {
                fields.insert("unavailableDates".into(), encode_date_list(dates));
            }
            AvailabilitySpec::BusyDates { dates } => {
                fields.insert("busyDates".into(), encode_date_list(dates));
            }
            AvailabilitySpec::GenericSlots { time_slots, blocked_dates } => {
                let blocked: Vec<String> =
                    blocked_dates.iter().map(|date| date.format("%Y-%m-%d").to_string()).collect();
                fields.insert(
                    "availability".into(),
                    serde_json::json!({
                        "timeSlots": encode_slots(time_slots),
                        "blockedDates": blocked,
                    }),
                );
            }
            AvailabilitySpec::Invalid => {}
        }
    }
    Value::Object(fields)
}

fn encode_slots(slots: &[TimeSlot]) -> Vec<&'static str> {
    slots.iter().map(TimeSlot::as_str).collect()
}

fn encode_date_list(dates: &[DateRestriction]) -> Value {
    let entries: Vec<Value> = dates
        .iter()
        .map(|restriction| {
            let date = restriction.date.format("%Y-%m-%d").to_string();
            if restriction.slots.is_empty() {
                Value::String(date)
            } else {
                serde_json::json!({ "date": date, "slots": encode_slots(&restriction.slots) })
            }
        })
        .collect();
    Value::Array(entries)
}
