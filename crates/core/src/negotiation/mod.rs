//! Rule-based rate negotiation.
//!
//! A decision is a pure function of the listed rate, the carrier's offer and the round
//! number the caller supplies. Rules are checked in order and the first match wins:
//!
//! 1. offer >= 95% of listed: accept at the offered rate
//! 2. offer <= 85% of listed and round >= 3: reject
//! 3. otherwise counter at max(midpoint, 92% of listed), rounded to cents

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::negotiation::{NegotiationDecision, NegotiationInput, NegotiationOutcome};
use crate::errors::DomainError;

pub const ACCEPT_MESSAGE: &str = "Offer is within acceptable threshold. Accepting.";
pub const REJECT_MESSAGE: &str = "Too far below target after multiple rounds. Rejecting.";
pub const COUNTER_MESSAGE: &str = "Countering based on margin rules.";
pub const NON_POSITIVE_LISTED_RATE: &str = "Listed rate must be positive.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NegotiationPolicy {
    pub accept_ratio: Decimal,
    pub reject_ratio: Decimal,
    pub reject_from_round: u32,
    pub counter_floor_ratio: Decimal,
}

impl Default for NegotiationPolicy {
    fn default() -> Self {
        Self {
            accept_ratio: Decimal::new(95, 2),
            reject_ratio: Decimal::new(85, 2),
            reject_from_round: 3,
            counter_floor_ratio: Decimal::new(92, 2),
        }
    }
}

pub trait NegotiationEngine: Send + Sync {
    fn decide(&self, input: &NegotiationInput) -> Result<NegotiationDecision, DomainError>;
}

#[derive(Clone, Debug, Default)]
pub struct DeterministicNegotiationEngine {
    policy: NegotiationPolicy,
}

impl DeterministicNegotiationEngine {
    pub fn new(policy: NegotiationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &NegotiationPolicy {
        &self.policy
    }
}

impl NegotiationEngine for DeterministicNegotiationEngine {
    fn decide(&self, input: &NegotiationInput) -> Result<NegotiationDecision, DomainError> {
        decide_with_policy(&self.policy, input)
    }
}

pub fn decide(input: &NegotiationInput) -> Result<NegotiationDecision, DomainError> {
    decide_with_policy(&NegotiationPolicy::default(), input)
}

pub fn decide_with_policy(
    policy: &NegotiationPolicy,
    input: &NegotiationInput,
) -> Result<NegotiationDecision, DomainError> {
    let listed = input.listed_rate;
    let offer = input.carrier_offer;

    if listed <= Decimal::ZERO {
        return Err(DomainError::InvalidNegotiationInput(NON_POSITIVE_LISTED_RATE.to_string()));
    }

    if offer >= policy.accept_ratio.saturating_mul(listed) {
        return Ok(NegotiationDecision {
            outcome: NegotiationOutcome::Accepted { final_rate: offer },
            message: ACCEPT_MESSAGE.to_string(),
        });
    }

    let far_below = offer <= policy.reject_ratio.saturating_mul(listed);
    if far_below && input.round >= policy.reject_from_round {
        return Ok(NegotiationDecision {
            outcome: NegotiationOutcome::Rejected,
            message: REJECT_MESSAGE.to_string(),
        });
    }

    let counter_rate = counter_rate(policy, listed, offer);
    Ok(NegotiationDecision {
        outcome: NegotiationOutcome::Countered { counter_rate },
        message: COUNTER_MESSAGE.to_string(),
    })
}

fn counter_rate(policy: &NegotiationPolicy, listed: Decimal, offer: Decimal) -> Decimal {
    let two = Decimal::TWO;
    // The sum only overflows near Decimal::MAX; halve each side there instead.
    let midpoint = match listed.checked_add(offer) {
        Some(sum) => sum / two,
        None => (listed / two).saturating_add(offer / two),
    };
    let floor = listed.saturating_mul(policy.counter_floor_ratio);
    midpoint.max(floor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
