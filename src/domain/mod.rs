// Domain layer: board models and the ports the passes run against.

pub mod model;
pub mod ports;
