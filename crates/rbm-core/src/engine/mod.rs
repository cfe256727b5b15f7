//! # Engine Module
//!
//! This module holds the stateful side of model construction: the caller-owned
//! [`registry::Registry`] that enforces declaration order and name uniqueness, and
//! the [`config::RegistryConfig`] that tunes its validation.
//!
//! ## Overview
//!
//! The engine module sits on top of the stateless entity model in
//! [`crate::core::models`]. A registry holds at most one active model; the model
//! must be declared before any component, and every registered component is
//! appended to the model and bound under its name.
//!
//! ## Architecture
//!
//! - **Registration** ([`registry`]) - Model lifecycle and component registration
//! - **Configuration** ([`config`]) - Validation switches, loadable from TOML
//!
//! ## Key Capabilities
//!
//! - **Strict declaration order** with the model always declared first
//! - **Global name uniqueness** across every component kind
//! - **Fail-fast validation** that never leaves a partially registered component
//! - **Independent registries** for building several models in one process

pub mod config;
pub mod registry;
