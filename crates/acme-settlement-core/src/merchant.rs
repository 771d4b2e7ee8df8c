//! Merchant entity as returned by the ACME API.

use serde::{Deserialize, Serialize};

use crate::MerchantId;

/// A merchant record fetched from the upstream API.
///
/// Merchants are read-only facts from upstream; this service never mutates
/// them. Fields beyond the identity pair are carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Merchant {
    /// Merchant identifier.
    pub id: MerchantId,

    /// Display name.
    pub name: String,

    /// Any other fields the upstream sends, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
