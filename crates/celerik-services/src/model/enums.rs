use celerik_core::Described;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;

/// A status enumeration carried by the response envelope
///
/// `name` is the variant name, used as the localization key of the
/// status message; descriptions drive lookups such as `{0}Format`.
pub trait StatusCode: Described + Copy + Default + Debug + Serialize + DeserializeOwned + Send + Sync {
    fn name(&self) -> &'static str;
}

/// Kind of message attached to a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMessageType {
    Info,
    Success,
    Warning,
    Error,
}

impl Described for ApiMessageType {
    const DESCRIPTIONS: &'static [(Self, &'static str)] = &[
        (ApiMessageType::Info, "info"),
        (ApiMessageType::Success, "success"),
        (ApiMessageType::Warning, "warning"),
        (ApiMessageType::Error, "error"),
    ];
}

impl ApiMessageType {
    /// Position in the description table, starting at 1
    pub fn ordinal(&self) -> u8 {
        match self {
            ApiMessageType::Info => 1,
            ApiMessageType::Success => 2,
            ApiMessageType::Warning => 3,
            ApiMessageType::Error => 4,
        }
    }
}

impl Serialize for ApiMessageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.description())
    }
}

impl<'de> Deserialize<'de> for ApiMessageType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawEnum::deserialize(deserializer)? {
            RawEnum::Code(code) => ApiMessageType::variants()
                .find(|message_type| u64::from(message_type.ordinal()) == code)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown message type {}", code))),
            RawEnum::Description(description) => ApiMessageType::from_description(&description)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown message type '{}'", description))),
        }
    }
}

/// Wire form of a described enum: its number or its description
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEnum {
    Code(u64),
    Description(String),
}

/// Default status codes of the envelope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ApiStatusCode {
    #[default]
    Ok,
    BadRequest,
    /// Template for a per-property format error, `{0}` is the property
    Format,
    Error,
}

impl Described for ApiStatusCode {
    const DESCRIPTIONS: &'static [(Self, &'static str)] = &[
        (ApiStatusCode::Ok, "Ok"),
        (ApiStatusCode::BadRequest, "BadRequest"),
        (ApiStatusCode::Format, "{0}Format"),
        (ApiStatusCode::Error, "Error"),
    ];
}

impl ApiStatusCode {
    pub fn code(&self) -> u16 {
        match self {
            ApiStatusCode::Ok => 200,
            ApiStatusCode::BadRequest => 400,
            ApiStatusCode::Format => 460,
            ApiStatusCode::Error => 500,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::variants().find(|status| status.code() == code)
    }
}

impl StatusCode for ApiStatusCode {
    fn name(&self) -> &'static str {
        match self {
            ApiStatusCode::Ok => "Ok",
            ApiStatusCode::BadRequest => "BadRequest",
            ApiStatusCode::Format => "Format",
            ApiStatusCode::Error => "Error",
        }
    }
}

// Encoded as the numeric code; decoding also accepts the description
impl Serialize for ApiStatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

impl<'de> Deserialize<'de> for ApiStatusCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawEnum::deserialize(deserializer)? {
            RawEnum::Code(code) => u16::try_from(code)
                .ok()
                .and_then(ApiStatusCode::from_code)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown status code {}", code))),
            RawEnum::Description(description) => ApiStatusCode::from_description(&description)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown status '{}'", description))),
        }
    }
}

/// Change applied to an entity by a save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiChangeAction {
    Insert,
    Update,
    Delete,
}

impl Described for ApiChangeAction {
    const DESCRIPTIONS: &'static [(Self, &'static str)] = &[
        (ApiChangeAction::Insert, "Insert"),
        (ApiChangeAction::Update, "Update"),
        (ApiChangeAction::Delete, "Delete"),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiOperationType {
    Read,
    Insert,
    BulkInsert,
    Update,
    BulkUpdate,
    Delete,
    BulkDelete,
}

impl Described for ApiOperationType {
    const DESCRIPTIONS: &'static [(Self, &'static str)] = &[
        (ApiOperationType::Read, "Read"),
        (ApiOperationType::Insert, "Insert"),
        (ApiOperationType::BulkInsert, "Bulk Insert"),
        (ApiOperationType::Update, "Update"),
        (ApiOperationType::BulkUpdate, "Bulk Update"),
        (ApiOperationType::Delete, "Delete"),
        (ApiOperationType::BulkDelete, "Bulk Delete"),
    ];
}
