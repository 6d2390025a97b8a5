//! Personnel records query engine for a judicial administration.
//!
//! This crate resolves which employment block currently applies to an
//! employee, filters an employee population by many optional criteria at
//! once, and classifies whether an employee may rejoin service.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod query;
