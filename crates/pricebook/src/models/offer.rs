use serde::{Deserialize, Serialize};

/// Response body for DELETE /offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedOffers {
    /// Number of offers removed.
    pub deleted: u64,
}
