use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::image::image_url_for;

pub type PropertyId = u32;

pub const MAX_PROPSCORE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyStatus {
    Available,
    SoldOut,
    #[serde(other)]
    Other,
}

impl PropertyStatus {
    /// Badge text shown on cards; `None` for statuses that carry no badge.
    #[must_use]
    pub fn badge(self) -> Option<&'static str> {
        match self {
            PropertyStatus::Available => Some("Available"),
            PropertyStatus::SoldOut => Some("Sold Out"),
            PropertyStatus::Other => None,
        }
    }

    #[must_use]
    pub fn is_sold_out(self) -> bool {
        self == PropertyStatus::SoldOut
    }
}

/// One listing in the catalog. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub name: String,
    pub slug: String,
    pub city: String,
    pub micromarket: String,
    pub latitude: f64,
    pub longitude: f64,
    pub min_price: u64,
    pub max_price: u64,
    pub min_saleable_area: u32,
    pub max_saleable_area: u32,
    #[serde(default)]
    pub typologies: Vec<String>,
    pub possession_date: NaiveDate,
    pub status: PropertyStatus,
    pub propscore: f64,
    #[serde(default)]
    pub developer: Option<String>,
    #[serde(rename = "type")]
    pub property_type: String,
    /// Explicit image URL; falls back to [`image_url_for`] when absent.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub alt: String,
}

impl PropertyRecord {
    /// Detail page path, e.g. `/property-for-sale-in/bangalore/prestige-park/12`.
    #[must_use]
    pub fn detail_path(&self) -> String {
        format!(
            "/property-for-sale-in/{}/{}/{}",
            self.city.to_lowercase(),
            self.slug.to_lowercase(),
            self.id
        )
    }

    #[must_use]
    pub fn image_url(&self) -> String {
        self.image
            .clone()
            .unwrap_or_else(|| image_url_for(self.id))
    }

    #[must_use]
    pub fn alt_text(&self) -> &str {
        if self.alt.trim().is_empty() {
            &self.name
        } else {
            &self.alt
        }
    }

    /// Checks the per-record invariants, returning a description of the first violation.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!("property {} has an empty name", self.id));
        }
        if self.slug.trim().is_empty() {
            return Err(format!("property {} has an empty slug", self.id));
        }
        if self.min_price > self.max_price {
            return Err(format!(
                "property {} has min_price {} above max_price {}",
                self.id, self.min_price, self.max_price
            ));
        }
        if self.min_saleable_area > self.max_saleable_area {
            return Err(format!(
                "property {} has min_saleable_area {} above max_saleable_area {}",
                self.id, self.min_saleable_area, self.max_saleable_area
            ));
        }
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(format!(
                "property {} has invalid coordinates ({}, {})",
                self.id, self.latitude, self.longitude
            ));
        }
        if !(0.0..=MAX_PROPSCORE).contains(&self.propscore) {
            return Err(format!(
                "property {} has propscore {} outside [0, {MAX_PROPSCORE}]",
                self.id, self.propscore
            ));
        }
        Ok(())
    }
}
