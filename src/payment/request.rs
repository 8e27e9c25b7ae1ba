//! Inbound payment request types.

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;
use zeroize::Zeroize;

/// Card details supplied by the checkout form.
///
/// The structure owns the sensitive card material for the duration of one
/// authorization. The PAN and CVV are wiped from memory when the value is
/// dropped, and the `Debug` output masks everything but the last four
/// digits of the PAN.
#[derive(Clone, Deserialize)]
pub struct CardDetails {
    /// Primary account number (the long card number).
    pub number: String,
    /// Expiry month, `1` through `12`.
    pub expiry_month: u8,
    /// Expiry year, two or four digits (for example `2027`).
    pub expiry_year: String,
    /// Card verification value, when the form collected one.
    #[serde(default)]
    pub cvv: Option<String>,
}

impl CardDetails {
    /// Returns the last four digits of the card number for display.
    #[must_use]
    #[allow(clippy::string_slice, reason = "card numbers are ASCII digits")]
    pub fn last_four(&self) -> &str {
        if self.number.len() >= 4 {
            &self.number[self.number.len() - 4..]
        } else {
            &self.number
        }
    }

    /// Returns the last two digits of the expiry year, as the gateway
    /// expects (`"2027"` becomes `"27"`).
    #[must_use]
    #[allow(clippy::string_slice, reason = "expiry years are ASCII digits")]
    pub fn expiry_year_2digit(&self) -> &str {
        if self.expiry_year.len() >= 2 {
            &self.expiry_year[self.expiry_year.len() - 2..]
        } else {
            &self.expiry_year
        }
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &format_args!("****{}", self.last_four()))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &self.cvv.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Drop for CardDetails {
    fn drop(&mut self) {
        // Zeroize sensitive fields on drop (PCI-DSS requirement)
        self.number.zeroize();
        if let Some(cvv) = self.cvv.as_mut() {
            cvv.zeroize();
        }
    }
}

/// One authorization request from the host checkout flow.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    /// Amount to charge, in major currency units (dollars).
    #[serde(default)]
    pub amount: Decimal,
    /// Host-side order identifier. Truncated to the gateway's limit on the
    /// wire; keep it unique within the first ten characters.
    pub order_reference: String,
    /// Host-side customer identifier, sent through verbatim.
    pub customer_reference: String,
    /// Card details collected from the payer.
    pub card: CardDetails,
}
