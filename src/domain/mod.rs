// Domain layer: core models and ports (interfaces). No external dependencies beyond std/serde.

pub mod chat;
pub mod model;
pub mod ports;
