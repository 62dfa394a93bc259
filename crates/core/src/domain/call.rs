use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::load::LoadId;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    Booked,
    RejectedByCarrier,
    RejectedByBroker,
    CarrierIneligible,
    NoViableLoads,
    Other,
}

impl CallOutcome {
    pub const ALL: [CallOutcome; 6] = [
        Self::Booked,
        Self::RejectedByCarrier,
        Self::RejectedByBroker,
        Self::CarrierIneligible,
        Self::NoViableLoads,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::RejectedByCarrier => "rejected_by_carrier",
            Self::RejectedByBroker => "rejected_by_broker",
            Self::CarrierIneligible => "carrier_ineligible",
            Self::NoViableLoads => "no_viable_loads",
            Self::Other => "other",
        }
    }
}

impl FromStr for CallOutcome {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|outcome| outcome.as_str() == value)
            .ok_or_else(|| DomainError::UnknownOutcome(value.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl Sentiment {
    pub const ALL: [Sentiment; 5] =
        [Self::VeryNegative, Self::Negative, Self::Neutral, Self::Positive, Self::VeryPositive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryNegative => "very_negative",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
            Self::VeryPositive => "very_positive",
        }
    }
}

impl FromStr for Sentiment {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sentiment| sentiment.as_str() == value)
            .ok_or_else(|| DomainError::UnknownSentiment(value.to_string()))
    }
}

/// A completed call as submitted by the voice agent, before the ledger stamps it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallRecordInput {
    pub call_id: CallId,
    pub carrier_mc: String,
    pub carrier_name: Option<String>,
    pub load_id: Option<LoadId>,
    pub listed_rate: Option<Decimal>,
    pub agreed_rate: Option<Decimal>,
    pub outcome: CallOutcome,
    pub sentiment: Sentiment,
    pub rounds_of_negotiation: Option<u32>,
    pub transcript_summary: Option<String>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub call_id: CallId,
    pub timestamp: DateTime<Utc>,
    pub carrier_mc: String,
    pub carrier_name: Option<String>,
    pub load_id: Option<LoadId>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub listed_rate: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub agreed_rate: Option<Decimal>,
    pub outcome: CallOutcome,
    pub sentiment: Sentiment,
    pub rounds_of_negotiation: Option<u32>,
    pub transcript_summary: Option<String>,
    pub notes: Option<String>,
}

impl CallRecord {
    pub fn from_input(input: CallRecordInput, timestamp: DateTime<Utc>) -> Self {
        Self {
            call_id: input.call_id,
            timestamp,
            carrier_mc: input.carrier_mc,
            carrier_name: input.carrier_name,
            load_id: input.load_id,
            listed_rate: input.listed_rate,
            agreed_rate: input.agreed_rate,
            outcome: input.outcome,
            sentiment: input.sentiment,
            rounds_of_negotiation: input.rounds_of_negotiation,
            transcript_summary: input.transcript_summary,
            notes: input.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{CallOutcome, Sentiment};
    use crate::errors::DomainError;

    #[test]
    fn outcome_strings_match_serde_names() {
        for outcome in CallOutcome::ALL {
            let wire = serde_json::to_value(outcome).expect("serialize outcome");
            assert_eq!(wire, outcome.as_str());
            assert_eq!(CallOutcome::from_str(outcome.as_str()), Ok(outcome));
        }
    }

    #[test]
    fn sentiment_strings_match_serde_names() {
        for sentiment in Sentiment::ALL {
            let wire = serde_json::to_value(sentiment).expect("serialize sentiment");
            assert_eq!(wire, sentiment.as_str());
            assert_eq!(Sentiment::from_str(sentiment.as_str()), Ok(sentiment));
        }
    }

    #[test]
    fn unknown_strings_are_rejected() {
        assert_eq!(
            CallOutcome::from_str("Booked"),
            Err(DomainError::UnknownOutcome("Booked".to_string()))
        );
        assert_eq!(
            Sentiment::from_str("ecstatic"),
            Err(DomainError::UnknownSentiment("ecstatic".to_string()))
        );
    }
}
