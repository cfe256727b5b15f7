//! # Core Models Module
//!
//! This module contains the entity model used to describe rule-based biochemical
//! reaction networks.
//!
//! ## Overview
//!
//! A [`model::Model`] is the aggregate root. It owns typed molecular species
//! ([`monomer`]), spatial regions ([`compartment`]), numeric constants ([`parameter`])
//! and transformation rules ([`rule`]). Rules are assembled from concrete monomer
//! usages ([`pattern`]) produced by a monomer's pattern factory.
//!
//! Every entity validates its own invariants when it is inserted, and every
//! reference between entities (compartment of a monomer, neighbors of a compartment,
//! partners of a site condition, rate of a rule) must resolve within the same model.
//!
//! ## Key Components
//!
//! - [`ids`] - Model-scoped typed keys for monomers, compartments, parameters and rules
//! - [`component`] - The closed set of entity kinds and name-bound components
//! - [`monomer`] - Species types with named sites and permitted state labels
//! - [`pattern`] - Site conditions, monomer patterns and pattern lists
//! - [`compartment`] - Spatial containers with adjacency
//! - [`parameter`] - Named numeric constants
//! - [`rule`] - Named transformations and bond-balance checking
//! - [`model`] - The aggregate root and its namespace
//! - [`error`] - Validation and registration errors
//!
//! ## Usage
//!
//! Models are normally assembled through [`crate::engine::registry::Registry`]:
//!
//! ```ignore
//! use rbmodel::core::models::monomer::MonomerDecl;
//! use rbmodel::engine::registry::Registry;
//!
//! let mut registry = Registry::new();
//! registry.declare_model("egfr")?;
//! let egf = registry.add_monomer(MonomerDecl::new("EGF").sites(["r"]))?;
//! let pattern = registry.pattern(egf)?.site("r", 1u32).build()?;
//! ```

pub mod compartment;
pub mod component;
pub mod error;
pub mod ids;
pub mod model;
pub mod monomer;
pub mod parameter;
pub mod pattern;
pub mod rule;
