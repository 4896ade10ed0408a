//! Domain models for the NovaSphere bookkeeping dashboard

mod category;
mod metrics;
mod product;
mod transaction;

pub use category::*;
pub use metrics::*;
pub use product::*;
pub use transaction::*;
