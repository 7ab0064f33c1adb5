//! Query-string building from typed option structs
//!
//! Option structs derive `Serialize` and mark optional fields with
//! `skip_serializing_if = "Option::is_none"`, so unset filters never reach
//! the URL.

use serde::Serialize;

use crate::error::Result;

/// Serialize `opts` into a url-encoded query string, `None` when empty.
pub fn serialize_query<Q: Serialize + ?Sized>(opts: &Q) -> Result<Option<String>> {
    let query = serde_urlencoded::to_string(opts)?;
    Ok((!query.is_empty()).then_some(query))
}

/// Append the query built from `opts` to `path`.
pub fn with_query<Q: Serialize + ?Sized>(path: &str, opts: &Q) -> Result<String> {
    Ok(match serialize_query(opts)? {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Serialize, Default)]
    struct Opts {
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        #[serde(rename = "companyName", skip_serializing_if = "Option::is_none")]
        company_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        deleted: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
    }

    #[test]
    fn test_empty_options() {
        assert_eq!(serialize_query(&Opts::default()).unwrap(), None);
        assert_eq!(with_query("/clients", &Opts::default()).unwrap(), "/clients");
    }

    #[test]
    fn test_set_fields_only() {
        let opts = Opts {
            email: Some("user@example.com".to_string()),
            deleted: Some(true),
            limit: Some(5),
            ..Opts::default()
        };
        assert_eq!(
            with_query("/clients", &opts).unwrap(),
            "/clients?email=user%40example.com&deleted=true&limit=5"
        );
    }

    #[test]
    fn test_renamed_field_and_escaping() {
        let opts = Opts {
            company_name: Some("Whatever inc".to_string()),
            ..Opts::default()
        };
        assert_eq!(
            serialize_query(&opts).unwrap().as_deref(),
            Some("companyName=Whatever+inc")
        );
    }

    #[test]
    fn test_non_struct_is_rejected() {
        assert!(serialize_query(&42_u32).is_err());
    }
}
