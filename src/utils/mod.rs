//! Utility functions shared by the API and persistence layers.
//!
//! - [`decimal`] - Precision rules for fixed-point columns
//! - [`id_list`] - Parsing of comma-separated id filters

pub mod decimal;
pub mod id_list;
