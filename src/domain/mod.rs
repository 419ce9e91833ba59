// Domain layer: models and ports. No HTTP or config types in here.

pub mod model;
pub mod ports;
