//! Engine API URL type.

use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Path of the SSO token endpoint, relative to the engine root.
const SSO_TOKEN_PATH: &str = "sso/oauth/token";

/// A validated oVirt engine API URL.
///
/// This type ensures the URL is absolute, uses HTTP or HTTPS, and has a host.
/// It composes resource URIs and the SSO token endpoint from the API root.
///
/// # Example
///
/// ```
/// use ovirt::ApiUrl;
///
/// let api = ApiUrl::new("https://engine.example.com/ovirt-engine/api/").unwrap();
/// assert_eq!(api.join("/vms/"), "https://engine.example.com/ovirt-engine/api/vms");
/// assert_eq!(api.sso_token_url(), "https://engine.example.com/ovirt-engine/sso/oauth/token");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the API root with trailing slashes removed.
    pub fn base(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Returns the full URI for a resource path.
    ///
    /// Leading and trailing slashes on `path` are ignored, so `"/vms/"`
    /// and `"vms"` resolve to the same URI.
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base(), path.trim_matches('/'))
    }

    /// Returns the SSO token endpoint.
    ///
    /// The endpoint lives next to the API root: a trailing `/api` segment is
    /// stripped before appending `sso/oauth/token`.
    pub fn sso_token_url(&self) -> String {
        let base = self.base();
        let root = base.strip_suffix("/api").unwrap_or(base);
        format!("{}/{}", root, SSO_TOKEN_PATH)
    }

    /// Returns the URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTP or HTTPS".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base())
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://engine.example.com/ovirt-engine/api").unwrap();
        assert_eq!(api.as_str(), "https://engine.example.com/ovirt-engine/api");
        assert_eq!(api.to_string(), "https://engine.example.com/ovirt-engine/api");
    }

    #[test]
    fn valid_plain_http() {
        let api: ApiUrl = "http://127.0.0.1:8080/ovirt-engine/api".parse().unwrap();
        assert_eq!(api.join("vms"), "http://127.0.0.1:8080/ovirt-engine/api/vms");
    }

    #[test]
    fn join_ignores_surrounding_slashes() {
        let api = ApiUrl::new("https://engine.example.com/ovirt-engine/api/").unwrap();
        let expected = "https://engine.example.com/ovirt-engine/api/vms";
        assert_eq!(api.join("/vms/"), expected);
        assert_eq!(api.join("vms"), expected);
        assert_eq!(api.join("//vms"), expected);
    }

    #[test]
    fn join_keeps_nested_paths() {
        let api = ApiUrl::new("https://engine.example.com/ovirt-engine/api").unwrap();
        assert_eq!(
            api.join("vms/123/nics"),
            "https://engine.example.com/ovirt-engine/api/vms/123/nics"
        );
    }

    #[test]
    fn join_empty_path_targets_api_root() {
        let api = ApiUrl::new("https://engine.example.com/ovirt-engine/api").unwrap();
        assert_eq!(api.join("/"), "https://engine.example.com/ovirt-engine/api/");
    }

    #[test]
    fn sso_url_strips_api_segment() {
        let api = ApiUrl::new("https://engine.example.com/ovirt-engine/api/").unwrap();
        assert_eq!(
            api.sso_token_url(),
            "https://engine.example.com/ovirt-engine/sso/oauth/token"
        );
    }

    #[test]
    fn sso_url_without_api_segment() {
        let api = ApiUrl::new("https://engine.example.com").unwrap();
        assert_eq!(
            api.sso_token_url(),
            "https://engine.example.com/sso/oauth/token"
        );
    }

    #[test]
    fn sso_url_keeps_host_ending_in_api_letters() {
        let api = ApiUrl::new("https://rapi/ovirt-engine/api").unwrap();
        assert_eq!(api.sso_token_url(), "https://rapi/ovirt-engine/sso/oauth/token");
    }

    #[test]
    fn invalid_scheme() {
        assert!(ApiUrl::new("ftp://engine.example.com/api").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/ovirt-engine/api").is_err());
    }
}
