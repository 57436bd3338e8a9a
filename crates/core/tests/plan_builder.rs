use chrono::NaiveDate;
use rust_decimal::Decimal;

use soiree_core::{
    AvailabilitySpec, CatalogSnapshot, Category, DateRestriction, PartyBrief, PartyPlanBuilder,
    PlanItemStatus, PlanSlot, SelectionReason, Supplier, SupplierId, TimeSlot,
};

fn supplier(id: &str, category: Category, price: i64, themes: &[&str], location: &str) -> Supplier {
    Supplier {
        id: SupplierId(id.to_owned()),
        name: format!("Supplier {id}"),
        description: None,
        category,
        location: location.to_owned(),
        price_from: Decimal::from(price),
        price_unit: "per party".to_owned(),
        rating: Some(4.3),
        review_count: Some(25),
        is_premium: false,
        avg_response_hours: Some(5),
        themes: themes.iter().map(|theme| (*theme).to_owned()).collect(),
        service_themes: Vec::new(),
        availability: Vec::new(),
    }
}

fn brief(budget: i64, guest_count: u32, theme: &str) -> PartyBrief {
    PartyBrief {
        theme: theme.to_owned(),
        guest_count,
        date: NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(),
        time_slot: TimeSlot::Afternoon,
        duration_hours: 2,
        location: "SW19 2AB".to_owned(),
        budget: Some(Decimal::from(budget)),
    }
}

fn essentials_catalog() -> CatalogSnapshot {
    CatalogSnapshot {
        suppliers: vec![
            supplier("venue-wimbledon", Category::Venues, 200, &[], "SW19 5AE"),
            supplier("venue-north", Category::Venues, 180, &[], "N1 9GU"),
            supplier("ent-magician", Category::Entertainment, 160, &["princess"], "SE1 9SG"),
            supplier("cake-corner", Category::Cakes, 70, &["princess"], "SW4 7AA"),
            supplier("bags-r-us", Category::PartyBags, 20, &[], "CR0 1PB"),
        ],
        themed_entertainment: Vec::new(),
    }
}

#[test]
fn essentials_plan_fills_every_tier_slot_within_budget() {
    let build = PartyPlanBuilder::default().build(&brief(500, 10, "princess"), &essentials_catalog());

    let venue = build.plan.venue.clone().expect("venue filled");
    // North London venue is out of range for the exact venue tier; the
    // Wimbledon one matches the target area.
    assert_eq!(venue.id, SupplierId("venue-wimbledon".to_owned()));
    assert_eq!(venue.status, PlanItemStatus::Pending);

    assert!(build.plan.entertainment.is_some());
    assert!(build.plan.cakes.is_some());
    assert!(build.plan.party_bags.is_some());
    assert!(build.plan.einvites.is_some());
    assert!(build.plan.decorations.is_none());

    // Every selected slot honors its sub-budget with the 1.3 tolerance.
    for slot in PlanSlot::ALL {
        if slot == PlanSlot::Einvites {
            continue;
        }
        if let Some(item) = build.plan.slot(slot) {
            let ceiling = build.allocation.slot_budget(slot) * Decimal::new(13, 1);
            assert!(item.price <= ceiling, "{slot} exceeds its ceiling");
        }
    }
}

#[test]
fn planning_is_deterministic_over_the_same_snapshot() {
    let builder = PartyPlanBuilder::default();
    let catalog = essentials_catalog();
    let brief = brief(500, 10, "princess");

    let first = builder.build(&brief, &catalog);
    let second = builder.build(&brief, &catalog);
    assert_eq!(first.plan, second.plan);
}

#[test]
fn themed_pool_miss_falls_back_to_general_entertainment() {
    // Themed pool priced out of the entertainment share; the general pool
    // has an in-budget bookable match.
    let mut catalog = essentials_catalog();
    catalog.themed_entertainment =
        vec![supplier("ent-princess-premium", Category::Entertainment, 500, &["princess"], "SW19")];

    let build = PartyPlanBuilder::default().build(&brief(500, 10, "princess"), &catalog);
    let entertainment = build.plan.entertainment.expect("general pool fills the slot");
    assert_eq!(entertainment.id, SupplierId("ent-magician".to_owned()));
    assert_eq!(
        build.selections[&PlanSlot::Entertainment].reason,
        SelectionReason::BestAvailableMatch
    );
    assert!(!entertainment.is_fallback_selection);
}

#[test]
fn unavailable_sole_candidate_surfaces_as_needs_confirmation() {
    let mut catalog = essentials_catalog();
    let blocked_date = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
    for entry in &mut catalog.suppliers {
        if entry.category == Category::Cakes {
            entry.availability = vec![AvailabilitySpec::UnavailableDates {
                dates: vec![DateRestriction { date: blocked_date, slots: Vec::new() }],
            }];
        }
    }

    let build = PartyPlanBuilder::default().build(&brief(500, 10, "princess"), &catalog);
    let cakes = build.plan.cakes.clone().expect("fallback pick still surfaces");
    assert!(cakes.is_fallback_selection);
    assert_eq!(cakes.status, PlanItemStatus::NeedsConfirmation);
    assert!(build.plan.needs_confirmation());
}

#[test]
fn category_with_no_in_budget_candidate_stays_null() {
    let catalog = CatalogSnapshot {
        suppliers: vec![supplier("palace", Category::Venues, 5_000, &[], "SW19")],
        themed_entertainment: Vec::new(),
    };

    let build = PartyPlanBuilder::default().build(&brief(500, 10, "princess"), &catalog);
    assert!(build.plan.venue.is_none());
    assert_eq!(
        build.selections[&PlanSlot::Venue].reason,
        SelectionReason::NoSuppliersInBudget
    );
}

#[test]
fn plan_serializes_with_the_fixed_persistence_keys() {
    let build = PartyPlanBuilder::default().build(&brief(500, 10, "princess"), &essentials_catalog());
    let json = serde_json::to_value(&build.plan).expect("serialize plan");

    for key in ["venue", "entertainment", "cakes", "partyBags", "softPlay", "einvites"] {
        assert!(json.get(key).is_some(), "missing plan key {key}");
    }
    assert_eq!(json["einvites"]["status"], "pending");
    assert_eq!(json["einvites"]["category"], "einvites");
    assert!(json["softPlay"].is_null());
}
