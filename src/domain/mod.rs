// Domain layer: models, wire format and ports. No HTTP here.

pub mod message;
pub mod model;
pub mod ports;
pub mod prompt;
