//! Gateway response and authorization outcome types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

/// Parsed response parameters from one gateway round trip.
///
/// The gateway answers with a flat key-value map (`response.summaryCode`,
/// `response.text`, and so on). This wrapper keeps the raw map intact so
/// the host can read any field the gateway sent, while the accessors below
/// cover the fields the bridge itself interprets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayResponse(BTreeMap<String, String>);

impl GatewayResponse {
    /// Wraps a parsed parameter map.
    #[must_use]
    pub fn from_params(params: BTreeMap<String, String>) -> Self {
        Self(params)
    }

    /// Returns an empty response, used when no gateway round trip happened.
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Looks up a single response field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the gateway's summary code. Zero means approved; any other
    /// value is a decline.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Response`] when the field is absent or not
    /// an integer. A response without a readable summary code must never
    /// be treated as an approval.
    pub fn summary_code(&self) -> Result<i64> {
        let raw = self
            .get(crate::wire::RESPONSE_SUMMARY_CODE)
            .ok_or_else(|| GatewayError::Response("missing response.summaryCode".to_owned()))?;
        raw.trim().parse().map_err(|_| {
            GatewayError::Response(format!("non-integer response.summaryCode: {raw:?}"))
        })
    }

    /// Returns the gateway's human-readable outcome text, when present.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.get(crate::wire::RESPONSE_TEXT)
    }

    /// Returns the detailed response code, when present.
    #[must_use]
    pub fn response_code(&self) -> Option<&str> {
        self.get(crate::wire::RESPONSE_CODE)
    }

    /// Returns the gateway receipt number, when present.
    #[must_use]
    pub fn receipt_number(&self) -> Option<&str> {
        self.get(crate::wire::RESPONSE_RECEIPT_NUMBER)
    }

    /// Returns the settlement date, when present and well formed
    /// (`YYYYMMDD` on the wire).
    #[must_use]
    pub fn settlement_date(&self) -> Option<NaiveDate> {
        self.get(crate::wire::RESPONSE_SETTLEMENT_DATE)
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y%m%d").ok())
    }

    /// Exposes the raw map for host-side persistence.
    #[must_use]
    pub fn raw(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// Number of fields in the response.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the response carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of one authorization attempt.
///
/// A decline is a normal business outcome, not an error: the gateway
/// answered, the answer was no. Transport failures and malformed responses
/// surface as [`GatewayError`](crate::error::GatewayError) instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentResult {
    /// The gateway approved the payment. Carries the full response map.
    Approved(GatewayResponse),
    /// The gateway declined the payment.
    Declined {
        /// The gateway's outcome text, verbatim when it sent one.
        reason: String,
        /// The full response map for auditing.
        response: GatewayResponse,
    },
}

impl PaymentResult {
    /// Whether the payment was approved.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approved(_))
    }

    /// Returns the gateway response regardless of outcome.
    #[must_use]
    pub fn response(&self) -> &GatewayResponse {
        match self {
            Self::Approved(response) | Self::Declined { response, .. } => response,
        }
    }

    /// Returns the decline reason, or `None` for approvals.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Approved(_) => None,
            Self::Declined { reason, .. } => Some(reason),
        }
    }
}
