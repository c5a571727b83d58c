use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::params::{ContactParams, PhoneParams};
use crate::error::{RolodexError, RolodexResult};

/// Phone types pre-populated on a blank contact form, in display order.
pub const DEFAULT_PHONE_TYPES: [&str; 3] = ["home", "office", "mobile"];

/// A phone number owned by a contact. `phone_type` is a free-form label;
/// the blank-form flow only ever offers the three defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    pub id: Id<Phone>,
    pub phone: String,
    pub phone_type: String,
}

impl Phone {
    pub fn create(phone: String, phone_type: String) -> Self {
        Self {
            id: Id::generate(),
            phone,
            phone_type,
        }
    }

    /// An empty slot for the new-contact form.
    pub fn blank(phone_type: &str) -> Self {
        Self::create(String::new(), phone_type.to_string())
    }

    fn from_params(params: &PhoneParams) -> Self {
        Self::create(
            params.phone.as_deref().unwrap_or("").trim().to_string(),
            params.phone_type.as_deref().unwrap_or("").trim().to_string(),
        )
    }
}

/// A contact and its owned phones. The phones vec is the aggregate's single
/// consistency boundary: it is loaded and saved with the contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Id<Contact>,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phones: Vec<Phone>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// An unsaved contact with every field blank.
    pub fn empty() -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            firstname: String::new(),
            lastname: String::new(),
            email: String::new(),
            phones: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds an unsaved contact from submitted attributes. Phone ids in the
    /// input are ignored here: nothing exists yet to patch.
    pub fn build(params: &ContactParams) -> Self {
        let mut contact = Self::empty();
        if let Some(v) = &params.firstname {
            contact.firstname = v.trim().to_string();
        }
        if let Some(v) = &params.lastname {
            contact.lastname = v.trim().to_string();
        }
        if let Some(v) = &params.email {
            contact.email = v.trim().to_string();
        }
        for phone in &params.phones {
            contact.phones.push(Phone::from_params(phone));
        }
        contact
    }

    /// Patches fields from submitted attributes; absent fields are left as
    /// they are. Phones carrying an id patch the matching sub-record and
    /// phones without one are appended. An id the contact does not own is
    /// `NotFound`.
    pub fn apply(&mut self, params: &ContactParams) -> RolodexResult<()> {
        if let Some(v) = &params.firstname {
            self.firstname = v.trim().to_string();
        }
        if let Some(v) = &params.lastname {
            self.lastname = v.trim().to_string();
        }
        if let Some(v) = &params.email {
            self.email = v.trim().to_string();
        }
        for incoming in &params.phones {
            match incoming.id {
                Some(phone_id) => {
                    let phone = self
                        .phones
                        .iter_mut()
                        .find(|p| p.id == phone_id)
                        .ok_or_else(|| RolodexError::NotFound {
                            entity_type: "Phone".into(),
                            id: phone_id.to_string(),
                        })?;
                    if let Some(number) = &incoming.phone {
                        phone.phone = number.trim().to_string();
                    }
                    if let Some(label) = &incoming.phone_type {
                        phone.phone_type = label.trim().to_string();
                    }
                }
                None => self.phones.push(Phone::from_params(incoming)),
            }
        }
        Ok(())
    }

    /// Full display name.
    pub fn name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}
