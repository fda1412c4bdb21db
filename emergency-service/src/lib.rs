//! Emergency plan service: turns a short emergency description into a
//! structured response plan, using a completion provider when it cooperates
//! and a curated fallback table when it does not.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
