//! coacquire - certificate-of-analysis acquisition and extraction.
//!
//! Loads a cannabis product registry dataset, fetches each record's
//! lab-analysis document, extracts report fields from the document
//! text, and writes the dataset back out with the extracted columns
//! appended.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod extract;
pub mod models;
pub mod services;
pub mod utils;
