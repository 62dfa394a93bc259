use std::sync::Arc;

use freightdesk_core::{
    CallLedger, CarrierVerifier, DeterministicNegotiationEngine, LoadCatalog, MockCarrierVerifier,
    NegotiationEngine, SystemClock,
};
use secrecy::SecretString;

/// Everything a request handler can reach. Cloned per request; the ledger is shared.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<CallLedger>,
    pub catalog: Arc<LoadCatalog>,
    pub negotiator: Arc<dyn NegotiationEngine>,
    pub carriers: Arc<dyn CarrierVerifier>,
    pub api_key: Arc<SecretString>,
}

impl AppState {
    pub fn new(catalog: LoadCatalog, api_key: SecretString) -> Self {
        Self {
            ledger: Arc::new(CallLedger::new(Arc::new(SystemClock))),
            catalog: Arc::new(catalog),
            negotiator: Arc::new(DeterministicNegotiationEngine::default()),
            carriers: Arc::new(MockCarrierVerifier),
            api_key: Arc::new(api_key),
        }
    }

    #[cfg(test)]
    pub fn with_ledger(mut self, ledger: CallLedger) -> Self {
        self.ledger = Arc::new(ledger);
        self
    }
}
