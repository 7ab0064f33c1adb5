//! Account-type specific entry points
//!
//! A common account manages its own CDN resources; a reseller account manages
//! client accounts. Both wrap the same [`Client`] and hand out service groups
//! that borrow it.

use super::{AuthOptions, Client};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::services::{
    AccountService, CertService, ClientsService, GeoRestrictionsService, OriginGroupsService,
    ResourcesService, RulesService, ServicesService,
};

/// API of a basic G-Core account.
#[derive(Debug, Clone)]
pub struct CommonClient {
    client: Client,
}

impl CommonClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(Client::new(config)?))
    }

    /// Use a caller-provided transport
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        Ok(Self::from_client(Client::with_http_client(config, http)?))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn authenticate(&self, opts: &AuthOptions) -> Result<()> {
        self.client.authenticate(opts).await
    }

    pub fn account(&self) -> AccountService<'_> {
        AccountService::new(&self.client)
    }

    pub fn resources(&self) -> ResourcesService<'_> {
        ResourcesService::new(&self.client)
    }

    pub fn origin_groups(&self) -> OriginGroupsService<'_> {
        OriginGroupsService::new(&self.client)
    }

    pub fn rules(&self) -> RulesService<'_> {
        RulesService::new(&self.client)
    }

    pub fn certificates(&self) -> CertService<'_> {
        CertService::new(&self.client)
    }
}

/// API of a reseller G-Core account.
#[derive(Debug, Clone)]
pub struct ResellerClient {
    client: Client,
}

impl ResellerClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(Client::new(config)?))
    }

    /// Use a caller-provided transport
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        Ok(Self::from_client(Client::with_http_client(config, http)?))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn authenticate(&self, opts: &AuthOptions) -> Result<()> {
        self.client.authenticate(opts).await
    }

    pub fn clients(&self) -> ClientsService<'_> {
        ClientsService::new(&self.client)
    }

    pub fn geo_restrictions(&self) -> GeoRestrictionsService<'_> {
        GeoRestrictionsService::new(&self.client)
    }

    pub fn services(&self) -> ServicesService<'_> {
        ServicesService::new(&self.client)
    }
}
