//! Nasdaq Data Link (formerly Quandl) datatable provider.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::NasdaqProvider;
