//! # rbmodel Core Library
//!
//! A declarative object model for rule-based biochemical reaction-network models:
//! typed molecular species with named sites, compartments, numeric parameters, and
//! rules that transform reactant patterns into product patterns at a given rate.
//!
//! The library stops at a validated, in-memory description of a model. It does not
//! simulate, generate networks or persist models.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Contains the stateless entity model (`Model`,
//!   `Monomer`, `MonomerPattern`, `Compartment`, `Parameter`, `Rule`) and the
//!   validation each entity performs on itself.
//!
//! - **[`engine`]: The Construction Context.** The `Registry` owns the active model,
//!   enforces that the model is declared first and that names are unique, and
//!   applies the configured validation settings.

pub mod core;
pub mod engine;
