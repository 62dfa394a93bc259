use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadId(pub String);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub load_id: LoadId,
    pub origin: String,
    pub destination: String,
    pub pickup_datetime: DateTime<Utc>,
    pub delivery_datetime: DateTime<Utc>,
    pub equipment_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub loadboard_rate: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub commodity_type: Option<String>,
    #[serde(default)]
    pub num_of_pieces: Option<u32>,
    #[serde(default)]
    pub miles: Option<f64>,
    #[serde(default)]
    pub dimensions: Option<String>,
}

/// Every field narrows the result; an empty query matches the whole catalog.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadSearchQuery {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub equipment_type: Option<String>,
    #[serde(default)]
    pub pickup_date: Option<NaiveDate>,
    #[serde(default)]
    pub max_miles: Option<u32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub min_rate: Option<Decimal>,
}
