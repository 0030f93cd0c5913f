//! Data retrieval: the FRED client, its response cache, and the indicator
//! catalog the dashboard is built from.

pub mod cache;
pub mod catalog;
pub mod fred;
