// ============================================================================
// JNDI Resource Reconciliation Auditor - Library Interface
// ============================================================================
//
// This module exposes the internal modules for integration testing.
// The main binary (main.rs) uses these modules directly.

pub mod audit;
pub mod capability;
pub mod classes;
pub mod cli;
pub mod descriptor;
pub mod error;
pub mod javap;
pub mod registry;
pub mod report;
pub mod scan;
pub mod server;
pub mod xml;
