use std::fmt;

use url::{Origin, Url};

use super::error::{ServerError, ServerResult};

pub const DEFAULT_SERVER_ORIGIN: &str = "https://beta.revolt.chat";

/// Scheme + host + port of a server, never carrying a path, query or fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOrigin {
    url: Url,
}

impl ServerOrigin {
    /// Parses `input` as an absolute URL and keeps only its origin.
    ///
    /// Inputs without a host-based origin (`file:`, `mailto:`, `data:`) are
    /// rejected as well, since they cannot name a server.
    pub fn parse(input: &str) -> ServerResult<Self> {
        let invalid = || ServerError::InvalidUrl {
            input: input.to_string(),
        };
        let parsed = Url::parse(input.trim()).map_err(|_| invalid())?;
        let origin = parsed.origin();
        if !origin.is_tuple() {
            return Err(invalid());
        }

        let url = Url::parse(&origin.ascii_serialization()).map_err(|_| invalid())?;
        Ok(Self { url })
    }

    pub fn default_origin() -> Self {
        Self::parse(DEFAULT_SERVER_ORIGIN).expect("default server origin is a valid URL")
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }

    pub fn origin(&self) -> Origin {
        self.url.origin()
    }

    /// Serialized form without the trailing slash, e.g. `https://chat.example.com`.
    pub fn as_str(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default_origin()
    }
}

impl fmt::Display for ServerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}
