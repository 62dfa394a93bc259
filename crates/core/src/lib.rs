pub mod carrier;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod metrics;
pub mod negotiation;

pub use carrier::{CarrierVerifier, MockCarrierVerifier};
pub use catalog::{CatalogError, LoadCatalog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::call::{CallId, CallOutcome, CallRecord, CallRecordInput, Sentiment};
pub use domain::carrier::{CarrierEligibility, RiskLevel};
pub use domain::load::{Load, LoadId, LoadSearchQuery};
pub use domain::negotiation::{
    NegotiationDecision, NegotiationInput, NegotiationOutcome, NegotiationReply,
    NegotiationStatus,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use ledger::CallLedger;
pub use metrics::DashboardMetrics;
pub use negotiation::{DeterministicNegotiationEngine, NegotiationEngine, NegotiationPolicy};
