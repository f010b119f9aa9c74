//! HTTP request handlers

pub mod air_quality;
pub mod dashboard;
pub mod health;
