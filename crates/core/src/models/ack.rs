use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Acknowledgement document returned by write endpoints.
///
/// A business rejection (for instance a duplicate booking) is reported as
/// `acknowledged: false` with a human readable `message`, never as an HTTP
/// error status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteAck {
    pub acknowledged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WriteAck {
    pub fn inserted(id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id: Some(id),
            ..Self::default()
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            acknowledged: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn updated(matched: u64, modified: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count: Some(matched),
            modified_count: Some(modified),
            ..Self::default()
        }
    }

    pub fn deleted(count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count: Some(count),
            ..Self::default()
        }
    }
}
