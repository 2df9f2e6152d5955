//! Core types and read-side logic for the corkboard system.
//!
//! This crate contains the domain model (boards, columns, items), the import
//! document model, and the pure board projection.

pub mod board;
pub mod document;
pub mod enums;
pub mod filter;
pub mod idgen;
pub mod item;
pub mod projection;
