//! Shared types and models for the NovaSphere bookkeeping dashboard
//!
//! This crate contains the ledger domain model and every pure derivation
//! (metrics, margins, reports, boundary validation) shared between the
//! backend, the browser frontend (via WASM), and tests.

pub mod models;
pub mod reports;
pub mod types;
pub mod validation;

pub use models::*;
pub use reports::*;
pub use types::*;
pub use validation::*;
