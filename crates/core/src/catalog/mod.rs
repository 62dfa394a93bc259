use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::load::{Load, LoadId, LoadSearchQuery};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read load catalog `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse load catalog `{path}`: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

/// Read-only set of loads available for booking, loaded once at startup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadCatalog {
    loads: Vec<Load>,
}

impl LoadCatalog {
    pub fn new(loads: Vec<Load>) -> Self {
        Self { loads }
    }

    /// Reads a JSON array of loads. A missing file is an empty catalog.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(CatalogError::Read { path: path.to_path_buf(), source }),
        };

        let loads = serde_json::from_str::<Vec<Load>>(&raw)
            .map_err(|source| CatalogError::Parse { path: path.to_path_buf(), source })?;
        Ok(Self { loads })
    }

    pub fn list_all(&self) -> &[Load] {
        &self.loads
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    pub fn get_by_id(&self, load_id: &LoadId) -> Option<&Load> {
        self.loads.iter().find(|load| &load.load_id == load_id)
    }

    pub fn search(&self, query: &LoadSearchQuery) -> Vec<Load> {
        self.loads.iter().filter(|load| matches_query(load, query)).cloned().collect()
    }
}

fn matches_query(load: &Load, query: &LoadSearchQuery) -> bool {
    if let Some(origin) = non_blank(query.origin.as_deref()) {
        if !contains_ignore_case(&load.origin, origin) {
            return false;
        }
    }
    if let Some(destination) = non_blank(query.destination.as_deref()) {
        if !contains_ignore_case(&load.destination, destination) {
            return false;
        }
    }
    if let Some(equipment) = non_blank(query.equipment_type.as_deref()) {
        if !load.equipment_type.eq_ignore_ascii_case(equipment) {
            return false;
        }
    }
    if let Some(pickup_date) = query.pickup_date {
        if load.pickup_datetime.date_naive() != pickup_date {
            return false;
        }
    }
    if let (Some(max_miles), Some(miles)) = (query.max_miles, load.miles) {
        if miles > f64::from(max_miles) {
            return false;
        }
    }
    if let Some(min_rate) = query.min_rate {
        if load.loadboard_rate < min_rate {
            return false;
        }
    }
    true
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
