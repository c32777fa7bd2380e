//! Domain layer: network switching and pool ranking

pub mod network;
pub mod pool;
