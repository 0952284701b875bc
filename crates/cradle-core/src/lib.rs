//! # cradle-core
//!
//! Core types, safety scoring, and catalog synthesis for Cradle.
//!
//! This crate provides the foundational pieces shared across all Cradle crates:
//! - Entity structs for products, lab results, and contaminant measurements
//! - The metal and category enums with their fixed limits and weights
//! - The heavy-metal safety score and its per-metal breakdown
//! - Ingredient-aware contaminant estimation
//! - The reference table and the seeded catalog synthesizer
//! - Cross-cutting error types
//! - CLI response types

pub mod catalog;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod estimate;
pub mod responses;
pub mod scoring;
