// Domain layer: entities, ports and the vendor ranking. No I/O happens here.

pub mod model;
pub mod ports;
pub mod ranking;
