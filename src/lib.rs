//! Memorial Descritivo - service memorials, budgets and procurement artifacts
//!
//! Turns a list of services picked from the CDHU reference catalog (or
//! entered by hand) into a Memorial Descritivo, an itemized budget
//! spreadsheet and the DFD/ETP procurement documents. Catalog prices can be
//! refreshed from a CDHU price bulletin.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
