// Domain layer: profile and geo models plus the ports the adapters implement.

pub mod model;
pub mod ports;
