//! Fund reference data.

use crate::domain::{FundId, TimeMs};
use serde::{Deserialize, Serialize};

/// A named fund that cash can be allocated into.
///
/// Funds are created once when the store is seeded and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub id: FundId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: TimeMs,
}
