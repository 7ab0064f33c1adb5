//! Origin groups: the sources a resource pulls content from

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{Client, NO_BODY};
use crate::error::Result;
use crate::response::ApiResponse;

pub const ORIGIN_GROUPS_PATH: &str = "/originGroups";

/// Single origin source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Origin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub enabled: bool,
    /// Used only when every non-backup origin fails
    pub backup: bool,
    pub source: String,
}

impl Origin {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            id: None,
            enabled: true,
            backup: false,
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OriginGroup {
    pub id: u64,
    pub name: String,
    /// Try the next origin on a failed response
    pub use_next: bool,
    /// Origins with their identifiers
    #[serde(rename = "origin_ids", skip_serializing_if = "Vec::is_empty")]
    pub origin_ids: Vec<Origin>,
    pub origins: Vec<Origin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOriginGroupBody {
    pub name: String,
    pub use_next: bool,
    pub origins: Vec<Origin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOriginGroupBody {
    pub name: String,
    pub use_next: bool,
    pub origins: Vec<Origin>,
}

fn origin_group_path(group_id: u64) -> String {
    format!("{ORIGIN_GROUPS_PATH}/{group_id}")
}

#[derive(Debug, Clone, Copy)]
pub struct OriginGroupsService<'a> {
    client: &'a Client,
}

impl<'a> OriginGroupsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<OriginGroup>>> {
        self.client.call(Method::GET, ORIGIN_GROUPS_PATH, NO_BODY).await
    }

    pub async fn get(&self, group_id: u64) -> Result<ApiResponse<OriginGroup>> {
        self.client
            .call(Method::GET, &origin_group_path(group_id), NO_BODY)
            .await
    }

    pub async fn create(&self, body: &CreateOriginGroupBody) -> Result<ApiResponse<OriginGroup>> {
        self.client
            .call(Method::POST, ORIGIN_GROUPS_PATH, Some(body))
            .await
    }

    pub async fn update(
        &self,
        group_id: u64,
        body: &UpdateOriginGroupBody,
    ) -> Result<ApiResponse<OriginGroup>> {
        self.client
            .call(Method::PUT, &origin_group_path(group_id), Some(body))
            .await
    }

    pub async fn delete(&self, group_id: u64) -> Result<ApiResponse<()>> {
        self.client
            .call_empty(Method::DELETE, &origin_group_path(group_id), NO_BODY)
            .await
    }
}
