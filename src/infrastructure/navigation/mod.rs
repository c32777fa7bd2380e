//! Browser-navigation layer: locations, query reconciliation, history

pub mod history;
pub mod location;

pub use history::{Navigator, ScheduledNavigation, TracingNavigator};
pub use location::{resolve_network_param, strip_network_param, AppLocation, NETWORK_ID_PARAM};
