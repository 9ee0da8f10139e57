//! Export of ARINC-424 terminal procedures (SIDs, STARs, approaches and their
//! transitions) into the per-airport leg descriptor files read by the iFly
//! flight-simulation addon.
//!
//! The navigation database is read as flat CSV tables (see [`data::arinc424`]),
//! leg rows are segmented into procedures and runway variants
//! ([`export::segment`]), each leg is encoded following its path terminator
//! ([`export::leg`]) and the result is written as bracket-delimited text files
//! ([`export::writer`]).

pub mod config;
pub mod data;
pub mod diagnostics;
pub mod export;
pub mod geo;
