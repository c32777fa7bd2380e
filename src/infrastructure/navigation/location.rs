//! URL/query reconciliation
//!
//! The interface accepts a `networkId` query parameter naming a target
//! chain. Once the parameter has been acted on it must be stripped from
//! the location so it is not re-processed on the next observation.

use url::form_urlencoded;

use crate::domain::network::catalog::ChainId;

/// Query parameter naming the chain to switch to
pub const NETWORK_ID_PARAM: &str = "networkId";

/// A browser-history location: path plus raw query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLocation {
    pub pathname: String,
    pub search: String,
}

impl AppLocation {
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        Self { pathname: pathname.into(), search: search.into() }
    }

    /// Query string as ordered key/value pairs
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        form_urlencoded::parse(self.search.trim_start_matches('?').as_bytes())
            .into_owned()
            .collect()
    }

    fn with_query_pairs(&self, pairs: &[(String, String)]) -> AppLocation {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            serializer.append_pair(key, value);
        }
        AppLocation {
            pathname: self.pathname.clone(),
            search: serializer.finish(),
        }
    }
}

/// Resolve the `networkId` parameter of a location against the
/// supported-network set. Case-sensitive; first match wins.
pub fn resolve_network_param(location: &AppLocation) -> Option<ChainId> {
    location
        .query_pairs()
        .iter()
        .find(|(key, _)| key == NETWORK_ID_PARAM)
        .and_then(|(_, value)| ChainId::from_query_value(value))
}

/// Copy of the location with the `networkId` parameter removed, all
/// other parameters kept in their original relative order.
pub fn strip_network_param(location: &AppLocation) -> AppLocation {
    let pairs: Vec<(String, String)> = location
        .query_pairs()
        .into_iter()
        .filter(|(key, _)| key != NETWORK_ID_PARAM)
        .collect();

    location.with_query_pairs(&pairs)
}
