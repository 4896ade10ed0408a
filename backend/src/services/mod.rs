//! Business logic services for the NovaSphere bookkeeping server

pub mod insight;
pub mod ledger;
pub mod reporting;

pub use insight::InsightService;
pub use ledger::LedgerService;
pub use reporting::ReportingService;
