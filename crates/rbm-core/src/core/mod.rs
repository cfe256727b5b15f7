//! # Core Module
//!
//! This module provides the stateless building blocks of rule-based models.
//!
//! ## Architecture
//!
//! - **Entity Model** ([`models`]) - Monomers, patterns, compartments, parameters,
//!   rules and the model aggregate
//! - **Utilities** ([`utils`]) - Name and label checks shared by the entities

pub mod models;
pub mod utils;
