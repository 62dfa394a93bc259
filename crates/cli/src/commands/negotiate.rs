use freightdesk_core::{
    DeterministicNegotiationEngine, LoadId, NegotiationEngine, NegotiationInput,
};
use rust_decimal::Decimal;

use super::CommandResult;

const COMMAND: &str = "negotiate";

#[derive(Debug, Clone)]
pub struct NegotiateArgs {
    pub listed_rate: Decimal,
    pub offer: Decimal,
    pub round: u32,
    pub load_id: String,
}

/// Dry-runs the server's decision engine; nothing is recorded.
pub fn run(args: NegotiateArgs) -> CommandResult {
    if args.round == 0 {
        return CommandResult::failure(COMMAND, "invalid_input", "Round must be at least 1.", 2);
    }

    let input = NegotiationInput {
        load_id: LoadId(args.load_id),
        listed_rate: args.listed_rate,
        carrier_offer: args.offer,
        round: args.round,
    };

    let decision = match DeterministicNegotiationEngine::default().decide(&input) {
        Ok(decision) => decision,
        Err(error) => return CommandResult::failure(COMMAND, "invalid_input", error.to_string(), 2),
    };

    match serde_json::to_value(&decision) {
        Ok(detail) => CommandResult::success(COMMAND, decision.message.clone(), Some(detail)),
        Err(error) => CommandResult::failure(COMMAND, "serialization", error.to_string(), 1),
    }
}
