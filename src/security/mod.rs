//! Security controls for payment processing.
//!
//! Provides structured audit logging with sensitive data redaction for
//! every authorization outcome. Card numbers, verification values, and
//! credentials must never reach a log line, whether in events, error
//! text, or raw wire dumps.
//!
//! # Audit Logging
//!
//! ```rust
//! use payway_bridge::security::audit::{AuditEvent, AuditEventType};
//! use uuid::Uuid;
//!
//! let event = AuditEvent::new(AuditEventType::AuthorizationApproved, "PayWay", Uuid::new_v4())
//!     .with_order_reference("INV-2026-0")
//!     .with_summary_code(0);
//!
//! payway_bridge::security::audit::audit_log(&event);
//! ```
//!
//! # Security Considerations
//!
//! - Audit logs use a separate tracing target for easy filtering
//! - Card numbers, CVN values, and passwords are automatically redacted
//! - Customer references are partially redacted before logging
//! - Request correlation IDs enable tracking across operations

pub mod audit;

pub use audit::{
    AuditDetails, AuditEvent, AuditEventType, audit_log, redact_customer_reference,
    redact_sensitive,
};
