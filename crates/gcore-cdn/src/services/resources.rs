//! CDN resources and their cache

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::rules::{Options, Rule};
use crate::client::{Client, NO_BODY};
use crate::error::Result;
use crate::response::ApiResponse;
use crate::time::GcoreTime;

pub const RESOURCES_PATH: &str = "/resources";

/// CDN resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resource {
    pub id: u64,
    pub name: Option<String>,
    pub deleted: bool,
    pub active: bool,
    pub enabled: bool,
    pub company_name: String,
    pub status: String,
    pub client: u64,
    pub origin_group: Option<u64>,
    pub cname: String,
    pub secondary_hostnames: Vec<String>,
    pub options: Option<Options>,
    pub origin_protocol: String,
    pub rules: Vec<Rule>,
    #[serde(rename = "created")]
    pub created_at: Option<GcoreTime>,
    #[serde(rename = "updated")]
    pub updated_at: Option<GcoreTime>,
    pub ssl_data: Option<u64>,
    pub ssl_enabled: bool,
}

/// Body of [`ResourcesService::create`]. Unset fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceBody {
    pub cname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_group: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secondary_hostnames: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_data: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

/// Body of [`ResourcesService::update`]. Unset fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_group: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secondary_hostnames: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_data: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

#[derive(Serialize)]
struct PathsBody<'a> {
    paths: &'a [String],
}

fn resource_path(resource_id: u64) -> String {
    format!("{RESOURCES_PATH}/{resource_id}")
}

/// Resource endpoints
#[derive(Debug, Clone, Copy)]
pub struct ResourcesService<'a> {
    client: &'a Client,
}

impl<'a> ResourcesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// All resources of the account
    pub async fn list(&self) -> Result<ApiResponse<Vec<Resource>>> {
        self.client.call(Method::GET, RESOURCES_PATH, NO_BODY).await
    }

    pub async fn get(&self, resource_id: u64) -> Result<ApiResponse<Resource>> {
        self.client
            .call(Method::GET, &resource_path(resource_id), NO_BODY)
            .await
    }

    pub async fn create(&self, body: &CreateResourceBody) -> Result<ApiResponse<Resource>> {
        self.client.call(Method::POST, RESOURCES_PATH, Some(body)).await
    }

    pub async fn update(
        &self,
        resource_id: u64,
        body: &UpdateResourceBody,
    ) -> Result<ApiResponse<Resource>> {
        self.client
            .call(Method::PUT, &resource_path(resource_id), Some(body))
            .await
    }

    /// Drop cached copies of `paths` from the CDN servers.
    ///
    /// Paths may contain wildcards such as `/static/*.css`. An empty list
    /// purges the whole resource.
    pub async fn purge(&self, resource_id: u64, paths: &[String]) -> Result<ApiResponse<()>> {
        let path = format!("{}/purge", resource_path(resource_id));
        self.client
            .call_empty(Method::POST, &path, Some(&PathsBody { paths }))
            .await
    }

    /// Load `paths` into the CDN cache ahead of the first request
    pub async fn prefetch(&self, resource_id: u64, paths: &[String]) -> Result<ApiResponse<()>> {
        let path = format!("{}/prefetch", resource_path(resource_id));
        self.client
            .call_empty(Method::POST, &path, Some(&PathsBody { paths }))
            .await
    }
}
