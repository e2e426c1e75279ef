// Domain layer: course models and the ports the engine loads them through.

pub mod model;
pub mod ports;
