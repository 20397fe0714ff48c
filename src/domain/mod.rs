// Domain layer: book records, read requests and the ports the service depends on.

pub mod model;
pub mod ports;
