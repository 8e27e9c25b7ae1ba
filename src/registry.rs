//! Processor type metadata and gateway instance management.
//!
//! Hosts describe the processor to their users through [`ProcessorType`] and
//! hold per-configuration gateway instances in a [`GatewayRegistry`]. The
//! registry is keyed by processor name and [`ProcessorMode`] so live and test
//! configurations never share an instance.

use crate::config::ProcessorMode;
use crate::gateway::PaywayGateway;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Display name of this payment processor.
pub const PROCESSOR_NAME: &str = "PayWay";

/// How the host collects card details for this processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingMode {
    /// The host renders its own billing form and submits card details
    /// server-side.
    Form,
    /// The customer is redirected to the gateway's hosted payment page.
    Button,
    /// The gateway notifies the host of the outcome asynchronously.
    Notify,
}

impl BillingMode {
    /// Machine-readable name for host configuration tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Form => "form",
            Self::Button => "button",
            Self::Notify => "notify",
        }
    }
}

/// Payment instrument a processor charges against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentInstrument {
    /// Card-present or card-not-present credit card payments.
    CreditCard,
    /// Direct debit from a bank account.
    DirectDebit,
}

/// Descriptive metadata a host uses to register and label the processor.
///
/// The field labels feed the host's configuration screens, so they name the
/// gateway's own terms for each credential rather than generic ones.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessorType {
    /// Unique machine name.
    pub name: String,
    /// Short human-readable title.
    pub title: String,
    /// Longer description for administration screens.
    pub description: String,
    /// How card details reach the gateway.
    pub billing_mode: BillingMode,
    /// Label for the username credential field.
    pub user_name_label: String,
    /// Label for the password credential field.
    pub password_label: String,
    /// Label for the merchant identifier field.
    pub merchant_id_label: String,
    /// Whether the processor supports recurring payments.
    pub supports_recurring: bool,
    /// Instrument charged by this processor.
    pub instrument: PaymentInstrument,
}

impl ProcessorType {
    /// Metadata for the PayWay credit card gateway.
    #[must_use]
    pub fn payway() -> Self {
        Self {
            name: PROCESSOR_NAME.to_owned(),
            title: PROCESSOR_NAME.to_owned(),
            description: "PayWay Payment Processor".to_owned(),
            billing_mode: BillingMode::Form,
            user_name_label: "PayWay Username".to_owned(),
            password_label: "PayWay Password".to_owned(),
            merchant_id_label: "PayWay Merchant ID".to_owned(),
            supports_recurring: false,
            instrument: PaymentInstrument::CreditCard,
        }
    }
}

/// Shared map of configured gateway instances.
///
/// A host typically serves several processor configurations at once, for
/// example a live and a test profile of the same gateway. Each distinct
/// `(name, mode)` pair owns exactly one [`PaywayGateway`]; repeated lookups
/// return the same [`Arc`] so connection pools and configuration are reused
/// rather than rebuilt per payment.
pub struct GatewayRegistry<C> {
    instances: Mutex<HashMap<(String, ProcessorMode), Arc<PaywayGateway<C>>>>,
}

impl<C> GatewayRegistry<C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            instances: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the gateway registered under `name` and `mode`, creating it
    /// with `create` on first use.
    pub fn get_or_create<F>(
        &self,
        name: &str,
        mode: ProcessorMode,
        create: F,
    ) -> Arc<PaywayGateway<C>>
    where
        F: FnOnce() -> PaywayGateway<C>,
    {
        let mut instances = self.lock();
        Arc::clone(
            instances
                .entry((name.to_owned(), mode))
                .or_insert_with(|| Arc::new(create())),
        )
    }

    /// Returns the gateway registered under `name` and `mode`, if any.
    #[must_use]
    pub fn get(&self, name: &str, mode: ProcessorMode) -> Option<Arc<PaywayGateway<C>>> {
        self.lock().get(&(name.to_owned(), mode)).map(Arc::clone)
    }

    /// Removes and returns the gateway registered under `name` and `mode`.
    pub fn remove(&self, name: &str, mode: ProcessorMode) -> Option<Arc<PaywayGateway<C>>> {
        self.lock().remove(&(name.to_owned(), mode))
    }

    /// Number of registered gateway instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the registry holds no instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned lock only means another thread panicked mid-operation; the
    // map itself is always left in a consistent state.
    fn lock(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<(String, ProcessorMode), Arc<PaywayGateway<C>>>> {
        self.instances.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C> Default for GatewayRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for GatewayRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayRegistry")
            .field("instances", &self.len())
            .finish()
    }
}
