use async_trait::async_trait;

use crate::domain::carrier::{CarrierEligibility, RiskLevel};
use crate::errors::ApplicationError;

#[async_trait]
pub trait CarrierVerifier: Send + Sync {
    async fn check_eligibility(
        &self,
        mc_number: &str,
    ) -> Result<CarrierEligibility, ApplicationError>;
}

/// Offline stand-in for a carrier registry lookup.
///
/// MC numbers must be all digits; anything starting with `9` is treated as a flagged
/// carrier and everything else as active.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockCarrierVerifier;

#[async_trait]
impl CarrierVerifier for MockCarrierVerifier {
    async fn check_eligibility(
        &self,
        mc_number: &str,
    ) -> Result<CarrierEligibility, ApplicationError> {
        Ok(mock_eligibility(mc_number))
    }
}

pub fn mock_eligibility(mc_number: &str) -> CarrierEligibility {
    let mc = mc_number.trim();

    if mc.is_empty() || !mc.chars().all(|ch| ch.is_ascii_digit()) {
        return CarrierEligibility {
            eligible: false,
            carrier_name: None,
            risk_level: None,
            reason: Some("Invalid MC number format".to_string()),
        };
    }

    if mc.starts_with('9') {
        return CarrierEligibility {
            eligible: false,
            carrier_name: None,
            risk_level: Some(RiskLevel::High),
            reason: Some("Mock: flagged as high risk / inactive".to_string()),
        };
    }

    CarrierEligibility {
        eligible: true,
        carrier_name: Some(format!("Mock Carrier MC {mc}")),
        risk_level: Some(RiskLevel::Low),
        reason: Some("Mock: active and in good standing".to_string()),
    }
}
