//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `catalog` - Reference service catalog, price overrides and browsing
//! - `project` - Project details, service items, entry form and session
//! - `budget` - Pure cost derivation and the spreadsheet layout
//! - `memorial` - Per-item descriptive text and the memorial document
//! - `artifacts` - DFD and ETP generation and their workflow
//! - `extraction` - Price-bulletin text scanning

pub mod artifacts;
pub mod budget;
pub mod catalog;
pub mod extraction;
pub mod foundation;
pub mod memorial;
pub mod organization;
pub mod project;
