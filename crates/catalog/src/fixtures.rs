//! Deterministic demo catalog used by the CLI's built-in mode, seeds,
//! and tests. Every category is represented, and the availability
//! shapes cover each `AvailabilitySpec` variant at least once.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use soiree_core::{
    AvailabilitySpec, Category, DateRestriction, DayOfWeek, Supplier, SupplierId, TimeSlot,
    WorkingDay,
};

struct FixtureSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: Category,
    location: &'static str,
    price_from: i64,
    price_unit: &'static str,
    rating: f64,
    review_count: u32,
    is_premium: bool,
    avg_response_hours: u32,
    themes: &'static [&'static str],
    service_themes: &'static [&'static str],
}

const SEEDS: &[FixtureSeed] = &[
    FixtureSeed {
        id: "venue-wimbledon-hall",
        name: "Wimbledon Community Hall",
        description: "Bright hall with a garden, seats up to 60",
        category: Category::Venues,
        location: "The Broadway, Wimbledon, SW19 1RG",
        price_from: 220,
        price_unit: "per 3 hours",
        rating: 4.6,
        review_count: 84,
        is_premium: false,
        avg_response_hours: 6,
        themes: &[],
        service_themes: &[],
    },
    FixtureSeed {
        id: "venue-battersea-loft",
        name: "Battersea Party Loft",
        description: "Industrial loft space near the park",
        category: Category::Venues,
        location: "SW11 3RX",
        price_from: 340,
        price_unit: "per 3 hours",
        rating: 4.8,
        review_count: 52,
        is_premium: true,
        avg_response_hours: 3,
        themes: &[],
        service_themes: &[],
    },
    FixtureSeed {
        id: "ent-princess-parties",
        name: "Perfect Princess Parties",
        description: "Princess entertainers with singalong shows",
        category: Category::Entertainment,
        location: "South London",
        price_from: 180,
        price_unit: "per 2 hours",
        rating: 4.9,
        review_count: 121,
        is_premium: true,
        avg_response_hours: 2,
        themes: &["princess", "unicorn"],
        service_themes: &["mermaid"],
    },
    FixtureSeed {
        id: "ent-marvellous-magic",
        name: "Marvellous Magic Co",
        description: "Close-up magic and balloon modelling",
        category: Category::Entertainment,
        location: "SE1 9SG",
        price_from: 150,
        price_unit: "per 2 hours",
        rating: 4.7,
        review_count: 98,
        is_premium: false,
        avg_response_hours: 4,
        themes: &["general"],
        service_themes: &[],
    },
    FixtureSeed {
        id: "ent-hero-academy",
        name: "Hero Academy",
        description: "Superhero training camp for ages 4-10",
        category: Category::Entertainment,
        location: "CR0 2GE",
        price_from: 165,
        price_unit: "per 2 hours",
        rating: 4.5,
        review_count: 63,
        is_premium: false,
        avg_response_hours: 8,
        themes: &["superhero"],
        service_themes: &["space"],
    },
    FixtureSeed {
        id: "cat-little-feasts",
        name: "Little Feasts",
        description: "Children's buffet boxes and grazing tables",
        category: Category::Catering,
        location: "SW17 0BW",
        price_from: 95,
        price_unit: "per 10 guests",
        rating: 4.4,
        review_count: 45,
        is_premium: false,
        avg_response_hours: 12,
        themes: &[],
        service_themes: &[],
    },
    FixtureSeed {
        id: "cake-corner",
        name: "The Cake Corner",
        description: "Bespoke celebration cakes, princess castles a speciality",
        category: Category::Cakes,
        location: "SW4 7AA",
        price_from: 65,
        price_unit: "per cake",
        rating: 4.8,
        review_count: 203,
        is_premium: false,
        avg_response_hours: 10,
        themes: &["princess", "dinosaur", "football"],
        service_themes: &[],
    },
    FixtureSeed {
        id: "cake-sugar-studio",
        name: "Sugar Studio",
        description: "Modern sculpted cakes",
        category: Category::Cakes,
        location: "E2 8HD",
        price_from: 110,
        price_unit: "per cake",
        rating: 4.9,
        review_count: 77,
        is_premium: true,
        avg_response_hours: 5,
        themes: &["space", "jungle"],
        service_themes: &[],
    },
    FixtureSeed {
        id: "dec-streamers",
        name: "Streamers & Sparkle",
        description: "Venue dressing and backdrop hire",
        category: Category::Decorations,
        location: "SW16 2PL",
        price_from: 80,
        price_unit: "per setup",
        rating: 4.3,
        review_count: 38,
        is_premium: false,
        avg_response_hours: 14,
        themes: &["princess", "superhero"],
        service_themes: &[],
    },
    FixtureSeed {
        id: "act-craft-cart",
        name: "The Craft Cart",
        description: "Drop-in craft stations and take-home kits",
        category: Category::Activities,
        location: "SE15 4QL",
        price_from: 70,
        price_unit: "per hour",
        rating: 4.2,
        review_count: 29,
        is_premium: false,
        avg_response_hours: 18,
        themes: &[],
        service_themes: &["jungle"],
    },
    FixtureSeed {
        id: "bags-party-favours",
        name: "Party Favours London",
        description: "Filled party bags from £2 per child",
        category: Category::PartyBags,
        location: "London",
        price_from: 24,
        price_unit: "per 12 bags",
        rating: 4.1,
        review_count: 56,
        is_premium: false,
        avg_response_hours: 24,
        themes: &["general"],
        service_themes: &[],
    },
    FixtureSeed {
        id: "photo-moments",
        name: "Moments Photography",
        description: "Candid party photography, edited gallery in 48h",
        category: Category::Photography,
        location: "TW9 1EJ",
        price_from: 140,
        price_unit: "per 2 hours",
        rating: 4.7,
        review_count: 41,
        is_premium: false,
        avg_response_hours: 9,
        themes: &[],
        service_themes: &[],
    },
    FixtureSeed {
        id: "face-rainbow-brushes",
        name: "Rainbow Brushes",
        description: "Face painting and glitter tattoos",
        category: Category::FacePainting,
        location: "SW2 1JF",
        price_from: 85,
        price_unit: "per 2 hours",
        rating: 4.6,
        review_count: 67,
        is_premium: false,
        avg_response_hours: 7,
        themes: &["princess", "superhero", "jungle"],
        service_themes: &[],
    },
    FixtureSeed {
        id: "balloon-up-up",
        name: "Up & Up Balloons",
        description: "Arches, garlands and number stacks",
        category: Category::Balloons,
        location: "SM1 1DF",
        price_from: 55,
        price_unit: "per arch",
        rating: 4.4,
        review_count: 33,
        is_premium: false,
        avg_response_hours: 16,
        themes: &["unicorn", "football"],
        service_themes: &[],
    },
    FixtureSeed {
        id: "soft-play-tumble",
        name: "Tumble Town Soft Play",
        description: "Soft play hire with ball pit and bouncy castle",
        category: Category::SoftPlay,
        location: "CR4 3ND",
        price_from: 75,
        price_unit: "per day",
        rating: 4.5,
        review_count: 48,
        is_premium: false,
        avg_response_hours: 11,
        themes: &[],
        service_themes: &[],
    },
];

/// Builds the demo catalog. Deterministic: same suppliers, same order,
/// every call.
pub fn demo_catalog() -> Vec<Supplier> {
    SEEDS
        .iter()
        .map(|seed| Supplier {
            id: SupplierId(seed.id.to_owned()),
            name: seed.name.to_owned(),
            description: Some(seed.description.to_owned()),
            category: seed.category,
            location: seed.location.to_owned(),
            price_from: Decimal::from(seed.price_from),
            price_unit: seed.price_unit.to_owned(),
            rating: Some(seed.rating),
            review_count: Some(seed.review_count),
            is_premium: seed.is_premium,
            avg_response_hours: Some(seed.avg_response_hours),
            themes: seed.themes.iter().map(|theme| (*theme).to_owned()).collect(),
            service_themes: seed.service_themes.iter().map(|theme| (*theme).to_owned()).collect(),
            availability: fixture_availability(seed.id),
        })
        .collect()
}

/// Availability coverage for the demo set: one supplier per
/// representation, the rest carry no data.
fn fixture_availability(id: &str) -> Vec<AvailabilitySpec> {
    match id {
        "venue-wimbledon-hall" => {
            let mut days = BTreeMap::new();
            for day in [
                DayOfWeek::Friday,
                DayOfWeek::Saturday,
                DayOfWeek::Sunday,
            ] {
                days.insert(day, WorkingDay { active: true, unavailable_slots: Vec::new() });
            }
            days.insert(
                DayOfWeek::Monday,
                WorkingDay { active: false, unavailable_slots: Vec::new() },
            );
            vec![AvailabilitySpec::WorkingHours { days }]
        }
        "ent-marvellous-magic" => vec![AvailabilitySpec::UnavailableDates {
            dates: vec![DateRestriction {
                date: NaiveDate::from_ymd_opt(2026, 12, 25).expect("fixture date"),
                slots: Vec::new(),
            }],
        }],
        "cake-sugar-studio" => vec![AvailabilitySpec::BusyDates {
            dates: vec![DateRestriction {
                date: NaiveDate::from_ymd_opt(2026, 10, 31).expect("fixture date"),
                slots: vec![TimeSlot::Afternoon],
            }],
        }],
        "face-rainbow-brushes" => vec![AvailabilitySpec::GenericSlots {
            time_slots: vec![TimeSlot::Morning, TimeSlot::Afternoon],
            blocked_dates: vec![NaiveDate::from_ymd_opt(2026, 11, 1).expect("fixture date")],
        }],
        _ => Vec::new(),
    }
}
