pub mod id;
pub mod ports;
pub mod purchase;
pub mod validation;
