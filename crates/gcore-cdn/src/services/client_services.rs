//! Paid services of a client

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{Client, NO_BODY};
use crate::error::Result;
use crate::response::ApiResponse;
use crate::time::GcoreTime;

/// Service such as `CDN`, `STORAGE` or `STREAMING`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub id: u64,
    pub name: String,
    pub client: u64,
    pub status: String,
    pub enabled: bool,
    pub start: Option<GcoreTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateServiceBody {
    pub enabled: bool,
    /// `active`, `paused`, ...
    pub status: String,
}

fn services_path(client_id: u64) -> String {
    format!("/clients/{client_id}/services")
}

#[derive(Debug, Clone, Copy)]
pub struct ServicesService<'a> {
    client: &'a Client,
}

impl<'a> ServicesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, client_id: u64) -> Result<ApiResponse<Vec<Service>>> {
        self.client
            .call(Method::GET, &services_path(client_id), NO_BODY)
            .await
    }

    pub async fn update(
        &self,
        client_id: u64,
        service_id: u64,
        body: &UpdateServiceBody,
    ) -> Result<ApiResponse<Service>> {
        let path = format!("{}/{service_id}", services_path(client_id));
        self.client.call(Method::PATCH, &path, Some(body)).await
    }
}
