//! Billing regions a client's content is delivered from

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{Client, NO_BODY};
use crate::error::Result;
use crate::response::ApiResponse;

pub const BILLING_REGIONS_PATH: &str = "/admin/billing_regions";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub id: u64,
    /// Abbreviation such as `eu`
    pub name: String,
    pub description: String,
    /// Required regions cannot be excluded from delivery
    pub required: bool,
}

/// Regions used for a client's content delivery.
///
/// With `is_in` set only the listed regions deliver content; otherwise the
/// listed regions are excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoRestrictions {
    pub is_in: bool,
    pub region_list: Vec<u64>,
}

fn restrictions_path(client_id: u64) -> String {
    format!("/admin/clients/{client_id}")
}

#[derive(Debug, Clone, Copy)]
pub struct GeoRestrictionsService<'a> {
    client: &'a Client,
}

impl<'a> GeoRestrictionsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list_regions(&self) -> Result<ApiResponse<Vec<Region>>> {
        self.client
            .call(Method::GET, BILLING_REGIONS_PATH, NO_BODY)
            .await
    }

    /// Current restrictions of a client. The API answers 404 when none were set.
    pub async fn get_restrictions(&self, client_id: u64) -> Result<ApiResponse<GeoRestrictions>> {
        self.client
            .call(Method::GET, &restrictions_path(client_id), NO_BODY)
            .await
    }

    pub async fn set_restrictions(
        &self,
        client_id: u64,
        restrictions: &GeoRestrictions,
    ) -> Result<ApiResponse<()>> {
        self.client
            .call_empty(Method::POST, &restrictions_path(client_id), Some(restrictions))
            .await
    }
}
