use serde::Deserialize;

use super::contact::Phone;
use super::ids::Id;

/// Submitted contact attributes. This is the only shape the business layer
/// accepts: anything not named here is dropped by serde at the
/// deserialization boundary. A `None` field on update means "leave
/// unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactParams {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub phones: Vec<PhoneParams>,
}

/// Submitted phone attributes. An `id` targets an existing phone of the
/// contact for an in-place patch; without one the phone is appended.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhoneParams {
    pub id: Option<Id<Phone>>,
    pub phone: Option<String>,
    pub phone_type: Option<String>,
}
