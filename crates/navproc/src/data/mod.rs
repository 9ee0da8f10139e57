//! Navigation data sources.

pub mod arinc424;
