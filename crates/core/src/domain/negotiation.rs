use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::load::LoadId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NegotiationInput {
    pub load_id: LoadId,
    pub listed_rate: Decimal,
    pub carrier_offer: Decimal,
    /// 1-indexed exchange number within the current call.
    pub round: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationStatus {
    Accepted,
    Counter,
    Rejected,
}

impl NegotiationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Counter => "counter",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NegotiationOutcome {
    Accepted { final_rate: Decimal },
    Countered { counter_rate: Decimal },
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "NegotiationReply")]
pub struct NegotiationDecision {
    pub outcome: NegotiationOutcome,
    pub message: String,
}

impl NegotiationDecision {
    pub fn status(&self) -> NegotiationStatus {
        match self.outcome {
            NegotiationOutcome::Accepted { .. } => NegotiationStatus::Accepted,
            NegotiationOutcome::Countered { .. } => NegotiationStatus::Counter,
            NegotiationOutcome::Rejected => NegotiationStatus::Rejected,
        }
    }

    pub fn final_rate(&self) -> Option<Decimal> {
        match self.outcome {
            NegotiationOutcome::Accepted { final_rate } => Some(final_rate),
            _ => None,
        }
    }

    pub fn counter_rate(&self) -> Option<Decimal> {
        match self.outcome {
            NegotiationOutcome::Countered { counter_rate } => Some(counter_rate),
            _ => None,
        }
    }
}

/// Flat wire shape: `{status, final_rate?, counter_rate?, message}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NegotiationReply {
    pub status: NegotiationStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub final_rate: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub counter_rate: Option<Decimal>,
    pub message: String,
}

impl From<NegotiationDecision> for NegotiationReply {
    fn from(decision: NegotiationDecision) -> Self {
        Self {
            status: decision.status(),
            final_rate: decision.final_rate(),
            counter_rate: decision.counter_rate(),
            message: decision.message,
        }
    }
}
