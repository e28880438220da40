//!  Module that defines what is a site (website, API endpoint, etc.)
//!
//! This is used to configure the list of possible sources through `sources.hcl`.
//!
//! You can define a set of possible routes for a site depending on how the API/site is
//! designed, a route is either a path relative to `base_url` or a full URL.
//!

use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Routes, SourceError};

/// Define the kind of data the site is serving
///
#[derive(Copy, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SiteType {
    /// HTML pages with tables
    Html,
    /// CSV exports
    Csv,
    /// ArcGIS hosted feature services
    Arcgis,
    /// Invalid datatype
    #[default]
    Invalid,
}

/// Represents a `Site` with its configuration details.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Site {
    /// Name of the site
    #[serde(skip_deserializing)]
    pub name: String,
    /// What kind of data
    #[serde(rename = "type")]
    pub dtype: SiteType,
    /// Base URL (to avoid repeating)
    pub base_url: String,
    /// Different URLs available
    pub routes: Option<Routes>,
}

impl Site {
    /// Return the list of routes
    ///
    pub fn list(&self) -> Vec<&String> {
        match &self.routes {
            Some(routes) => routes.keys().collect::<Vec<_>>(),
            _ => vec![],
        }
    }

    /// Retrieve a route
    ///
    pub fn route(&self, key: &str) -> Option<&String> {
        match &self.routes {
            Some(routes) => routes.get(key),
            _ => None,
        }
    }

    /// Full URL for a route, absolute routes are returned as-is.
    ///
    pub fn url(&self, key: &str) -> Result<String, SourceError> {
        let route = self
            .route(key)
            .ok_or_else(|| SourceError::BadRoute(self.name.clone(), key.to_string()))?;

        if route.starts_with("http://") || route.starts_with("https://") {
            Ok(route.to_owned())
        } else {
            Ok(format!("{}{}", self.base_url, route))
        }
    }
}

impl Display for Site {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ type={} url={} routes={:?} }}",
            self.dtype,
            self.base_url,
            self.list()
        )
    }
}
