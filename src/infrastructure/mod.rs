//! Infrastructure layer: wallet transport and browser navigation

pub mod navigation;
pub mod wallet;
