use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    High,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierEligibility {
    pub eligible: bool,
    pub carrier_name: Option<String>,
    pub risk_level: Option<RiskLevel>,
    pub reason: Option<String>,
}
