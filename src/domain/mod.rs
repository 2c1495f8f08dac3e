// Domain layer: request values, renderer configuration and the ports the core depends on.

pub mod decode;
pub mod document;
pub mod model;
pub mod ports;
