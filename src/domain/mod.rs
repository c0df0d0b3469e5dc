// Domain layer: core models, lookup registry and ports (interfaces).

pub mod model;
pub mod ports;
pub mod registry;
pub mod report;
