//! Payment rules and wire types. Nothing in here performs I/O.

pub mod country;
pub mod endpoint;
pub mod payment;
pub mod phone;
pub mod ports;
pub mod transaction;
pub mod validators;
