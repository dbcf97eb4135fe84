use url::{Origin, Url};

use super::error::{ServerError, ServerResult};
use super::origin::ServerOrigin;
use crate::store::OriginStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartUrlSource {
    Override,
    Stored,
}

/// The URL the main window loads right after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartUrl {
    url: Url,
    source: StartUrlSource,
}

impl StartUrl {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn source(&self) -> StartUrlSource {
        self.source
    }

    pub fn origin(&self) -> Origin {
        self.url.origin()
    }
}

/// Computes the start URL: a present override wins, then the stored origin.
/// `Ok(None)` means no server was chosen and the setup view must be shown.
pub fn resolve_start_url<S>(override_url: Option<&str>, store: &S) -> ServerResult<Option<StartUrl>>
where
    S: OriginStore + ?Sized,
{
    if let Some(raw) = override_url {
        let url = Url::parse(raw.trim()).map_err(|_| ServerError::InvalidUrl {
            input: raw.to_string(),
        })?;
        return Ok(Some(StartUrl {
            url,
            source: StartUrlSource::Override,
        }));
    }

    Ok(store.get()?.map(|origin: ServerOrigin| StartUrl {
        url: origin.as_url().clone(),
        source: StartUrlSource::Stored,
    }))
}
