//! Core components of the `asset-fetch` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The chart [`YfClient`] and its builder.
//! - The primary [`FetchError`] type.
//! - The [`TimeSeriesTable`] model and its CSV persistence.
//! - The [`SeriesSource`] seam between fetching and the market-data provider.

/// The chart client (`YfClient`) and its builder.
pub mod client;
/// The primary error type (`FetchError`) for the crate.
pub mod error;
/// Shared data models (`PriceRow`, `TimeSeriesTable`).
pub mod models;
/// Service traits abstracting the market-data provider.
pub mod services;

#[cfg(feature = "dataframe")]
mod dataframe;
pub(crate) mod net;
mod persist;

// convenient re-exports so most code can just `use crate::core::YfClient`
pub use client::{YfClient, YfClientBuilder};
pub use error::{ErrorKind, FetchError};
pub use models::{FetchWindow, PriceRow, TimeSeriesTable};
pub use services::{SeriesFuture, SeriesSource};
