//! Resource rules and the option blocks shared with resources
//!
//! A rule applies a set of [`Options`] to requests whose path matches a
//! pattern. Every option block is nullable on the wire: `null` means the
//! value is inherited from the parent resource, so unset blocks are sent
//! as explicit `null`s.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{Client, NO_BODY};
use crate::error::Result;
use crate::response::ApiResponse;

/// Rule of a CDN resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rule {
    pub id: u64,
    /// Path pattern the rule matches
    pub rule: String,
    pub name: String,
    pub origin_group: Option<u64>,
    pub rule_type: u32,
    pub options: Options,
    pub weight: u32,
    #[serde(rename = "preset_applied")]
    pub preset_applied: bool,
    pub origin_protocol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleBody {
    pub rule: String,
    pub name: String,
    pub rule_type: u32,
    pub options: Options,
}

/// Caching and delivery options of a resource or a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Headers that must be included in the cached response
    pub cache_http_headers: Option<ListOption>,
    /// Cache expiration time in seconds
    pub cache_expire: Option<TtlOption>,
    #[serde(rename = "allowedHttpMethods")]
    pub allowed_http_methods: Option<ListOption>,
    /// Domains for `Access-Control-Allow-Origin`, `["*"]` for all
    pub cors: Option<ListOption>,
    pub country_acl: Option<AclOption>,
    pub disable_cache: Option<FlagOption>,
    /// Fetch and cache already compressed content. Overrides `gzip_on`.
    pub fetch_compressed: Option<FlagOption>,
    pub force_return: Option<ForceReturn>,
    /// Compress on the CDN side. Not supported together with `fetch_compressed`.
    #[serde(rename = "gzipOn")]
    pub gzip_on: Option<FlagOption>,
    #[serde(rename = "hostHeader")]
    pub host_header: Option<HostHeader>,
    /// Cache files differing only by query string as one object
    #[serde(rename = "ignoreQueryString")]
    pub ignore_query_string: Option<FlagOption>,
    /// Cache objects pulled with cookies
    pub ignore_cookie: Option<FlagOption>,
    pub ip_address_acl: Option<AclOption>,
    /// Cache expiry time in seconds for the end user's browser
    pub override_browser_ttl: Option<TtlOption>,
    /// Allow caching of GET, HEAD and POST requests
    pub proxy_cache_methods_set: Option<FlagOption>,
    pub referrer_acl: Option<AclOption>,
    pub rewrite: Option<Rewrite>,
    pub secure_key: Option<SecureKey>,
    /// Request and cache large files in 10 MB parts
    pub slice: Option<FlagOption>,
    /// Errors for which stale content is served
    pub stale: Option<ListOption>,
    /// Headers a CDN server adds to the response
    #[serde(rename = "staticHeaders")]
    pub static_headers: Option<ListOption>,
    pub user_agent_acl: Option<AclOption>,
}

/// On/off option
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagOption {
    pub enabled: bool,
    pub value: bool,
}

/// Option carrying a list of strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListOption {
    pub enabled: bool,
    pub value: Vec<String>,
}

/// Duration in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtlOption {
    pub enabled: bool,
    pub value: u64,
}

/// Access list. `policy_type` is `allow` or `deny`, `excepted_values` the exceptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclOption {
    pub enabled: bool,
    pub excepted_values: Vec<String>,
    pub policy_type: String,
}

/// Answer with a fixed status code; `body` is a text or a redirect URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceReturn {
    pub enabled: bool,
    pub code: u16,
    pub body: String,
}

/// Host header sent to the origin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostHeader {
    pub enabled: bool,
    pub value: String,
}

/// Rewrite pattern such as `/rewrite_from/(.*) /rewrite_to/$1`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewrite {
    pub enabled: bool,
    pub body: String,
    pub flag: String,
}

/// Access through tokenized URLs, signed with `key`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecureKey {
    pub enabled: bool,
    #[serde(rename = "body")]
    pub key: String,
    #[serde(rename = "type")]
    pub kind: u32,
}

fn rules_path(resource_id: u64) -> String {
    format!("/resources/{resource_id}/rules")
}

fn rule_path(resource_id: u64, rule_id: u64) -> String {
    format!("/resources/{resource_id}/rules/{rule_id}")
}

/// Rule endpoints of a resource
#[derive(Debug, Clone, Copy)]
pub struct RulesService<'a> {
    client: &'a Client,
}

impl<'a> RulesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, resource_id: u64) -> Result<ApiResponse<Vec<Rule>>> {
        self.client
            .call(Method::GET, &rules_path(resource_id), NO_BODY)
            .await
    }

    pub async fn create(&self, resource_id: u64, body: &CreateRuleBody) -> Result<ApiResponse<Rule>> {
        self.client
            .call(Method::POST, &rules_path(resource_id), Some(body))
            .await
    }

    pub async fn get(&self, resource_id: u64, rule_id: u64) -> Result<ApiResponse<Rule>> {
        self.client
            .call(Method::GET, &rule_path(resource_id, rule_id), NO_BODY)
            .await
    }

    pub async fn delete(&self, resource_id: u64, rule_id: u64) -> Result<ApiResponse<()>> {
        self.client
            .call_empty(Method::DELETE, &rule_path(resource_id, rule_id), NO_BODY)
            .await
    }
}
