//! Request handlers

pub mod claims;
pub mod export;
pub mod health;
pub mod reference;
