//! JSON encoding of link records at the store boundary.

use crate::domain::entities::LinkRecord;
use crate::domain::repositories::StoreError;

pub(crate) fn encode(record: &LinkRecord) -> Result<String, StoreError> {
    serde_json::to_string(record).map_err(|e| StoreError::Corrupt {
        code: record.code.clone(),
        reason: e.to_string(),
    })
}

pub(crate) fn decode(code: &str, raw: &str) -> Result<LinkRecord, StoreError> {
    serde_json::from_str(raw).map_err(|e| StoreError::Corrupt {
        code: code.to_string(),
        reason: e.to_string(),
    })
}
