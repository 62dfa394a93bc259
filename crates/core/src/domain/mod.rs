pub mod call;
pub mod carrier;
pub mod load;
pub mod negotiation;
