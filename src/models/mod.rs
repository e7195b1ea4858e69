//! Domain models

pub mod campaign;
pub mod donor;
pub mod enums;
pub mod inventory;
pub mod request;
pub mod user;
