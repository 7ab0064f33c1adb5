//! Account details

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{Client, NO_BODY};
use crate::error::Result;
use crate::response::ApiResponse;

pub const ACCOUNT_DETAILS_PATH: &str = "/clients/me";

/// Account of the authenticated user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Account {
    pub id: u64,
    /// User who requested the details
    pub current_user: u64,
    pub users: Vec<User>,
    /// Hostname of the edge server
    pub cname: String,
}

/// User belonging to an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: u64,
    pub deleted: bool,
    pub email: String,
    pub name: String,
    pub client: u64,
    pub company: String,
    pub lang: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reseller: Option<u64>,
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub id: u64,
    pub name: String,
}

/// Account related endpoints
#[derive(Debug, Clone, Copy)]
pub struct AccountService<'a> {
    client: &'a Client,
}

impl<'a> AccountService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Details of the account the token belongs to
    pub async fn details(&self) -> Result<ApiResponse<Account>> {
        self.client
            .call(Method::GET, ACCOUNT_DETAILS_PATH, NO_BODY)
            .await
    }
}
