//! Open-Meteo payload integration
//!
//! Client for fetching raw JSON documents from the Open-Meteo APIs
//! (<https://open-meteo.com>), e.g. the Air Quality endpoint.
//! The body is returned untouched; interpretation happens downstream.

pub mod client;

pub use client::{OpenMeteoClient, OpenMeteoConfig, OpenMeteoError, PayloadClient};
