pub mod errors;
pub mod gate;
pub mod policy;
pub mod ports;
