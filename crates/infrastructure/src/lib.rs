//! Copper DNS Infrastructure Layer
pub mod dns;
