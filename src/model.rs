use serde::{Deserialize, Serialize};

/// A normalized campground record, the unit flowing through the whole
/// pipeline: builders construct it, the importer persists it, the query
/// layer reads it back. Field names follow the JSON interchange format
/// produced by earlier extractor generations (camelCase, snake_case tags).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campground {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location: Location,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub amenities: Amenities,
    #[serde(default)]
    pub trail_access: TrailAccess,
    #[serde(default)]
    pub pricing: Pricing,
    #[serde(default)]
    pub capacity: Capacity,
    #[serde(default)]
    pub images: Vec<String>,
    pub last_updated: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Amenities {
    pub restrooms: bool,
    pub showers: bool,
    pub drinking_water: bool,
    pub electric_hookups: bool,
    pub wifi_available: bool,
    pub pet_friendly: bool,
    pub bike_repair: bool,
    pub laundry: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrailAccess {
    pub has_direct_access: bool,
    pub trail_types: Vec<TrailType>,
    pub difficulty: TrailDifficulty,
    /// Meters to the nearest trailhead. 0 means adjacent/co-located,
    /// None means no trail information at all.
    pub distance_to_trailhead: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pricing {
    pub base_price: Option<f64>,
    pub currency: String,
    pub price_type: PriceType,
}

impl Default for Pricing {
    fn default() -> Self {
        Pricing {
            base_price: None,
            currency: "USD".to_string(),
            price_type: PriceType::PerNight,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capacity {
    pub max_occupancy: Option<u32>,
    pub total_sites: Option<u32>,
    pub reservation_required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailType {
    MountainBiking,
    RoadCycling,
    MixedUse,
    Gravel,
    SingleTrack,
    RailTrail,
}

impl TrailType {
    /// Parse an interchange tag, rejecting anything outside the known set.
    pub fn from_tag(tag: &str) -> Option<TrailType> {
        match tag {
            "mountain_biking" => Some(TrailType::MountainBiking),
            "road_cycling" => Some(TrailType::RoadCycling),
            "mixed_use" => Some(TrailType::MixedUse),
            "gravel" => Some(TrailType::Gravel),
            "single_track" => Some(TrailType::SingleTrack),
            "rail_trail" => Some(TrailType::RailTrail),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            TrailType::MountainBiking => "mountain_biking",
            TrailType::RoadCycling => "road_cycling",
            TrailType::MixedUse => "mixed_use",
            TrailType::Gravel => "gravel",
            TrailType::SingleTrack => "single_track",
            TrailType::RailTrail => "rail_trail",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailDifficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl TrailDifficulty {
    pub fn from_tag(tag: &str) -> Option<TrailDifficulty> {
        match tag {
            "beginner" => Some(TrailDifficulty::Beginner),
            "intermediate" => Some(TrailDifficulty::Intermediate),
            "advanced" => Some(TrailDifficulty::Advanced),
            "expert" => Some(TrailDifficulty::Expert),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    #[default]
    PerNight,
    PerPerson,
    Varies,
}

impl PriceType {
    pub fn from_tag(tag: &str) -> Option<PriceType> {
        match tag {
            "per_night" => Some(PriceType::PerNight),
            "per_person" => Some(PriceType::PerPerson),
            "varies" => Some(PriceType::Varies),
            _ => None,
        }
    }
}
