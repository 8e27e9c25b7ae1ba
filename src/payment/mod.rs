//! Payment domain types.
//!
//! Everything a single transaction carries: the request the host hands over
//! ([`PaymentRequest`], [`CardDetails`]), exact amount normalization
//! ([`amount::to_minor_units`]), and what comes back ([`GatewayResponse`],
//! [`PaymentResult`]). No type here is mutated after construction or outlives
//! one `authorize` call.

pub mod amount;
pub mod request;
pub mod response;

pub use request::{CardDetails, PaymentRequest};
pub use response::{GatewayResponse, PaymentResult};

#[cfg(test)]
mod tests;
