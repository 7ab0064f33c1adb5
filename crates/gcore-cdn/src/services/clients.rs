//! Client accounts managed by a reseller

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::account::User;
use crate::client::{Client, CommonClient, NO_BODY, Token};
use crate::error::{Error, Result};
use crate::query::with_query;
use crate::response::ApiResponse;
use crate::time::GcoreTime;

pub const USERS_PATH: &str = "/users";
pub const CLIENTS_PATH: &str = "/clients";

/// Name of the paid service behind [`ClientsService::suspend_cdn`]
const CDN_SERVICE_NAME: &str = "CDN";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientAccount {
    pub id: u64,
    pub client: u64,
    pub users: Vec<User>,
    pub current_user: u64,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub status: String,
    pub created: Option<GcoreTime>,
    pub updated: Option<GcoreTime>,
    pub company_name: String,
    #[serde(rename = "utilization_level")]
    pub utilization_level: u64,
    pub reseller: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cname: String,
}

/// Body of [`ClientsService::create`]. The client is activated on creation.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateClientBody {
    /// `common` for a regular client
    pub user_type: String,
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for CreateClientBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateClientBody")
            .field("user_type", &self.user_type)
            .field("name", &self.name)
            .field("company", &self.company)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientBody {
    pub name: String,
    pub company_name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<u64>,
}

/// Filters for [`ClientsService::list`]. Unset filters are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated: Option<bool>,
}

/// Paid service attached to a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaidService {
    pub id: u64,
    pub name: String,
}

#[derive(Serialize)]
struct ServiceFilter<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct ServiceState<'a> {
    enabled: bool,
    status: &'a str,
}

fn client_path(client_id: u64) -> String {
    format!("{CLIENTS_PATH}/{client_id}")
}

#[derive(Debug, Clone, Copy)]
pub struct ClientsService<'a> {
    client: &'a Client,
}

impl<'a> ClientsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, body: &CreateClientBody) -> Result<ApiResponse<ClientAccount>> {
        self.client.call(Method::POST, USERS_PATH, Some(body)).await
    }

    pub async fn get(&self, client_id: u64) -> Result<ApiResponse<ClientAccount>> {
        self.client
            .call(Method::GET, &client_path(client_id), NO_BODY)
            .await
    }

    /// Clients of the reseller, narrowed by `opts`
    pub async fn list(&self, opts: &ListOpts) -> Result<ApiResponse<Vec<ClientAccount>>> {
        let path = with_query(CLIENTS_PATH, opts)?;
        self.client.call(Method::GET, &path, NO_BODY).await
    }

    pub async fn update(
        &self,
        client_id: u64,
        body: &UpdateClientBody,
    ) -> Result<ApiResponse<ClientAccount>> {
        self.client
            .call(Method::PUT, &client_path(client_id), Some(body))
            .await
    }

    /// Act as the given user.
    ///
    /// Fetches a token for `user_id` and returns a [`CommonClient`] holding it.
    /// The new client shares configuration and transport with this one, but
    /// not the token: the reseller stays authenticated as itself.
    pub async fn get_common_client(&self, user_id: u64) -> Result<ApiResponse<CommonClient>> {
        let token: ApiResponse<Token> = self
            .client
            .call(Method::GET, &format!("{USERS_PATH}/{user_id}/token"), NO_BODY)
            .await?;
        debug!(user_id, "Obtained token for user");

        Ok(token.map(|token| CommonClient::from_client(self.client.fork_with_token(token))))
    }

    /// Pause the CDN service of a client
    pub async fn suspend_cdn(&self, client_id: u64) -> Result<ApiResponse<()>> {
        self.set_cdn_state(client_id, false, "paused").await
    }

    /// Resume a paused CDN service
    pub async fn resume_cdn(&self, client_id: u64) -> Result<ApiResponse<()>> {
        self.set_cdn_state(client_id, true, "active").await
    }

    async fn set_cdn_state(&self, client_id: u64, enabled: bool, status: &str) -> Result<ApiResponse<()>> {
        let services_path = format!("{}/services", client_path(client_id));
        let lookup = with_query(&services_path, &ServiceFilter { name: CDN_SERVICE_NAME })?;

        let services: ApiResponse<Vec<PaidService>> =
            self.client.call(Method::GET, &lookup, NO_BODY).await?;

        // A client has at most one CDN service
        let Some(service) = services.first() else {
            return Err(Error::ServiceNotFound {
                client_id,
                name: CDN_SERVICE_NAME.to_string(),
            });
        };

        debug!(client_id, service_id = service.id, status, "Changing CDN service state");
        let body = ServiceState { enabled, status };
        self.client
            .call_empty(
                Method::PUT,
                &format!("{services_path}/{}", service.id),
                Some(&body),
            )
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_list_opts_query() {
        let opts = ListOpts {
            company_name: Some("Whatever inc".to_string()),
            activated: Some(true),
            ..ListOpts::default()
        };
        assert_eq!(
            with_query(CLIENTS_PATH, &opts).unwrap(),
            "/clients?companyName=Whatever+inc&activated=true"
        );
        assert_eq!(with_query(CLIENTS_PATH, &ListOpts::default()).unwrap(), "/clients");
    }

    #[test]
    fn test_update_body_omits_seller() {
        let body = UpdateClientBody {
            name: "New name".to_string(),
            ..UpdateClientBody::default()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            json!({"name": "New name", "companyName": "", "phone": "", "email": ""})
        );
    }

    #[test]
    fn test_client_account_without_client_field() {
        let raw = r#"{
            "id": 2, "users": [], "currentUser": 7, "status": "trial",
            "created": "2018-04-09T11:31:40.000000Z", "companyName": "Client 2 Company Name",
            "utilization_level": 0, "reseller": 1, "cname": "example.gcdn.co"
        }"#;
        let account: ClientAccount = serde_json::from_str(raw).unwrap();
        assert_eq!(account.client, 0);
        assert_eq!(account.current_user, 7);
        assert_eq!(account.cname, "example.gcdn.co");
        assert!(account.updated.is_none());
    }

    #[test]
    fn test_create_body_redacts_password() {
        let body = CreateClientBody {
            password: "123123123qwe".to_string(),
            ..CreateClientBody::default()
        };
        assert!(!format!("{body:?}").contains("123123123qwe"));
    }
}
