/// Crisis support resources (reference data seeded at bootstrap)

use serde::{Deserialize, Serialize};
use crate::domain::CrisisResourceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrisisResourceType {
    Hotline,
    Textline,
    Emergency,
    Professional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisResource {
    pub id: CrisisResourceId,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: CrisisResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub description: String,
    pub availability: String,
    pub location: String,
}

impl CrisisResource {
    /// The number to call or text, whichever the resource offers
    pub fn contact(&self) -> Option<&str> {
        self.phone_number
            .as_deref()
            .or(self.text_number.as_deref())
            .or(self.website.as_deref())
    }
}
