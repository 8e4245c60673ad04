//! Wire field names fixed by the gateway protocol.

pub const MERCHANT_LOGIN: &str = "MerchantLogin";
pub const OUT_SUM: &str = "OutSum";
pub const INV_ID: &str = "InvId";
pub const INVOICE_ID: &str = "InvoiceID";
pub const PREVIOUS_INVOICE_ID: &str = "PreviousInvoiceID";
pub const DESCRIPTION: &str = "Description";
pub const SIGNATURE_VALUE: &str = "SignatureValue";
pub const INC_CURR_LABEL: &str = "IncCurrLabel";
pub const CULTURE: &str = "Culture";
pub const EMAIL: &str = "Email";
pub const RECURRING: &str = "Recurring";
pub const RECEIPT: &str = "Receipt";
pub const IS_TEST: &str = "isTest";

/// Prefix the gateway requires on merchant-defined fields.
pub const CUSTOM_PARAM_PREFIX: &str = "shp";

/// Inbound length limits.
pub const MAX_OUT_SUM_LEN: usize = 15;
pub const MAX_SIGNATURE_LEN: usize = 32;
pub const MAX_CULTURE_LEN: usize = 10;
