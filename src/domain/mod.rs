// Domain layer: catalog models and the ports to the source platform and the target catalog.

pub mod model;
pub mod ports;
