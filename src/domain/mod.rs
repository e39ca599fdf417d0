// Domain layer: record types and the ports the views depend on.

pub mod model;
pub mod ports;
