//! SSL certificates used to deliver content over HTTPS

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::client::{Client, NO_BODY};
use crate::error::Result;
use crate::response::ApiResponse;
use crate::time::GcoreTime;

pub const CERTIFICATES_PATH: &str = "/sslData";

/// Uploaded certificate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertSsl {
    pub id: u64,
    pub name: String,
    pub cname: String,
    pub deleted: bool,
    pub cert_subject_alt: Option<String>,
    #[serde(rename = "hasRelatedResources")]
    pub has_related_resources: bool,
    pub validity_not_after: Option<GcoreTime>,
    pub validity_not_before: Option<GcoreTime>,
    #[serde(rename = "sslCertificateChain")]
    pub certificate_chain: String,
    pub cert_issuer: String,
    pub cert_subject_cn: String,
}

/// Body of [`CertService::add`].
///
/// Certificates of the chain and the private key are PEM strings with
/// `\n` line separators.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCertBody {
    pub name: String,
    #[serde(rename = "sslCertificate")]
    pub certificate: String,
    #[serde(rename = "sslPrivateKey")]
    pub private_key: String,
}

impl fmt::Debug for AddCertBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddCertBody")
            .field("name", &self.name)
            .field("certificate", &self.certificate)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CertService<'a> {
    client: &'a Client,
}

impl<'a> CertService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<CertSsl>>> {
        self.client.call(Method::GET, CERTIFICATES_PATH, NO_BODY).await
    }

    pub async fn get(&self, cert_id: u64) -> Result<ApiResponse<CertSsl>> {
        self.client
            .call(Method::GET, &format!("{CERTIFICATES_PATH}/{cert_id}"), NO_BODY)
            .await
    }

    pub async fn add(&self, body: &AddCertBody) -> Result<ApiResponse<CertSsl>> {
        self.client
            .call(Method::POST, CERTIFICATES_PATH, Some(body))
            .await
    }

    pub async fn delete(&self, cert_id: u64) -> Result<ApiResponse<()>> {
        self.client
            .call_empty(Method::DELETE, &format!("{CERTIFICATES_PATH}/{cert_id}"), NO_BODY)
            .await
    }
}
