//! Ausflug Core Library
//!
//! Core domain logic for the ausflug attraction catalog browser:
//! record filtering, sorting, geospatial proximity search, schema
//! discovery, and favorite persistence.

pub mod config;
pub mod dataset;
pub mod error;
pub mod favorites;
pub mod geo;
pub mod geocode;
pub mod identity;
pub mod logging;
pub mod projection;
pub mod query;
pub mod record;
pub mod schema;
