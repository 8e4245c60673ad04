//! Payment domain module.
//!
//! Implements the merchant side of the gateway protocol: signing outbound
//! payment forms and verifying the callbacks the gateway sends back.
//!
//! # Module Structure
//!
//! - `fields` - Wire field names and inbound length limits
//! - `values` - `Amount` and `InvoiceId` value objects
//! - `custom_params` - Declared `shp*` parameters and their values
//! - `settings` - Immutable credentials and protocol switches
//! - `signature` - Canonical strings and MD5 checksums
//! - `form` - Signed purchase and recurring forms
//! - `receipt` - Fiscal receipt attached to forms
//! - `callback` - Inbound parameters and the parsed callback
//! - `verifier` - Result, success and fail verification
//! - `notification` - Stored result notifications
//! - `events` - Events published after accepted callbacks
//! - `errors` - `PaymentError`

mod callback;
mod custom_params;
mod errors;
mod events;
pub mod fields;
mod form;
mod notification;
mod receipt;
mod settings;
mod signature;
mod values;
mod verifier;

pub use callback::{GatewayCallback, InboundParams};
pub use custom_params::{CustomParamNames, CustomParams};
pub use errors::PaymentError;
pub use events::{PaymentEvent, PaymentEventData};
pub use form::{FormField, PaymentFormBuilder, PurchaseRequest, RecurringRequest, SignedForm};
pub use notification::NotificationRecord;
pub use receipt::{Receipt, ReceiptItem};
pub use settings::{
    GatewaySettings, TransportMethod, DEFAULT_FORM_TARGET, DEFAULT_RECURRING_FORM_TARGET,
};
pub use signature::{compute_signature, CanonicalString, Signature, Signer};
pub use values::{Amount, InvoiceId};
pub use verifier::PaymentVerifier;
