use crate::model::Amenities;

// Curated keyword lists, one per amenity. Lookups are independent: no
// amenity depends on another's result.
const RESTROOMS: &[&str] = &["restroom", "bathroom", "toilet", "facilities"];
const SHOWERS: &[&str] = &["shower", "bath"];
const DRINKING_WATER: &[&str] = &["water", "drinking water", "potable"];
const ELECTRIC: &[&str] = &[
    "electric",
    "electrical",
    "hookup",
    "hook up",
    "full hookup",
    "30 amp",
    "50 amp",
];
const WIFI: &[&str] = &["wifi", "wi-fi", "internet", "wireless"];
const PETS: &[&str] = &["pet", "dog", "pet-friendly", "pets welcome"];
const BIKE_REPAIR: &[&str] = &[
    "bike repair",
    "bicycle repair",
    "bike maintenance",
    "bike shop",
];
const LAUNDRY: &[&str] = &["laundry", "washing", "washer", "dryer"];

pub fn extract(text: &str) -> Amenities {
    let lower = text.to_lowercase();
    Amenities {
        restrooms: mentions(&lower, RESTROOMS),
        showers: mentions(&lower, SHOWERS),
        drinking_water: mentions(&lower, DRINKING_WATER),
        electric_hookups: mentions(&lower, ELECTRIC),
        wifi_available: mentions(&lower, WIFI),
        pet_friendly: mentions(&lower, PETS),
        bike_repair: mentions(&lower, BIKE_REPAIR),
        laundry: mentions(&lower, LAUNDRY),
    }
}

fn mentions(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| lower.contains(kw))
}
