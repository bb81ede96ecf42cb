use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::{de_opt_timestamp, de_timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(deserialize_with = "de_timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ClientUpdate {
    pub fn notes(notes: impl Into<String>) -> Self {
        ClientUpdate {
            notes: Some(notes.into()),
            ..Default::default()
        }
    }
}

impl From<&Client> for ClientCreate {
    fn from(client: &Client) -> Self {
        ClientCreate {
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            location: client.location.clone(),
            notes: client.notes.clone(),
        }
    }
}

impl From<&ClientCreate> for ClientUpdate {
    fn from(form: &ClientCreate) -> Self {
        ClientUpdate {
            name: Some(form.name.clone()),
            email: form.email.clone(),
            phone: Some(form.phone.clone()),
            location: Some(form.location.clone()),
            notes: form.notes.clone(),
        }
    }
}
