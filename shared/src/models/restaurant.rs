//! Restaurant Model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::availability::{AvailableDate, TimeSlot};

/// Opaque restaurant identifier
///
/// The directory sends ids as numbers on listings and as strings in route
/// parameters; both forms deserialize into the same string value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RestaurantId(String);

impl RestaurantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RestaurantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RestaurantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for RestaurantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

/// Restaurant listing entry (search results, featured sections)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantSummary {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub cuisine: String,
    #[serde(rename = "priceRange", default)]
    pub price_range: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl RestaurantSummary {
    /// Cover image: explicit `image` first, else the first gallery image
    pub fn cover_image(&self) -> Option<&str> {
        self.image
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }
}

/// Full restaurant profile with its availability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantDetail {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(rename = "priceRange", default)]
    pub price_range: String,
    #[serde(default)]
    pub michelin: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    /// Display order is the order the directory returned
    #[serde(default)]
    pub available_dates: Vec<AvailableDate>,
}

impl RestaurantDetail {
    /// Whether any date is open for booking
    pub fn has_availability(&self) -> bool {
        !self.available_dates.is_empty()
    }

    /// Find a date entry by its calendar string
    pub fn find_date(&self, date: &str) -> Option<&AvailableDate> {
        self.available_dates.iter().find(|d| d.date == date)
    }

    /// Time slots offered on `date`, empty if the date is unknown
    pub fn slots_for(&self, date: &str) -> &[TimeSlot] {
        self.find_date(date)
            .map(|d| d.time_slots.as_slice())
            .unwrap_or(&[])
    }
}

/// Search filters for the restaurant listing
///
/// Unset fields are sent as empty strings (and `party_size` as 0), which the
/// directory treats as "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub location: Option<String>,
    pub party_size: Option<u32>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl SearchFilters {
    /// Query pairs in the order the directory expects
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("location", self.location.clone().unwrap_or_default()),
            ("party_size", self.party_size.unwrap_or(0).to_string()),
            ("available_dates", self.date.clone().unwrap_or_default()),
            ("time", self.time.clone().unwrap_or_default()),
        ]
    }
}
