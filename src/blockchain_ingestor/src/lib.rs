//! Downloads the Bitcoin blockchain metrics of the Nasdaq Data Link `QDL/BCHAIN`
//! datatable, aligns them by date and writes one wide CSV file.

pub mod config;
pub mod errors;
pub mod io;
pub mod logging;
pub mod merge;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod requests;

pub use errors::Error;
