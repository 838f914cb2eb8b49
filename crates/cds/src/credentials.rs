//! API credentials from the environment or a `.cdsapirc` file.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CdsError;

/// Archive URL and `UID:KEY` API key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    url: String,
    user: String,
    secret: String,
}

impl Credentials {
    /// Creates credentials from a base URL and a `UID:KEY` key.
    ///
    /// A trailing `/` on the URL is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CdsError::InvalidKey`] if `key` has no `:` separator or an
    /// empty part.
    pub fn new(url: impl Into<String>, key: &str) -> Result<Self, CdsError> {
        let (user, secret) = key.trim().split_once(':').ok_or(CdsError::InvalidKey)?;
        if user.is_empty() || secret.is_empty() {
            return Err(CdsError::InvalidKey);
        }
        let url = url.into().trim().trim_end_matches('/').to_string();
        Ok(Self {
            url,
            user: user.to_string(),
            secret: secret.to_string(),
        })
    }

    /// Looks up credentials the way the reference CDS client does:
    /// `CDSAPI_URL` and `CDSAPI_KEY` if both are set, otherwise the rc file
    /// named by `CDSAPI_RC`, otherwise `~/.cdsapirc`.
    ///
    /// # Errors
    ///
    /// Returns [`CdsError::MissingCredentials`] if none of the sources
    /// yields a URL and key.
    pub fn from_env() -> Result<Self, CdsError> {
        resolve(|name| std::env::var(name).ok())
    }

    /// Reads an rc file with `url:` and `key:` lines.
    ///
    /// # Errors
    ///
    /// Returns [`CdsError::Io`] if the file cannot be read, or the errors of
    /// [`Credentials::parse_rc`].
    pub fn from_rc_file(path: &Path) -> Result<Self, CdsError> {
        let text = std::fs::read_to_string(path).map_err(|source| CdsError::Io {
            action: "reading",
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_rc(&text)
    }

    /// Parses the contents of an rc file. Blank lines and lines without a
    /// `:` are ignored; unknown keys such as `verify:` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CdsError::MissingCredentials`] if `url` or `key` is absent.
    pub fn parse_rc(text: &str) -> Result<Self, CdsError> {
        let mut url = None;
        let mut key = None;
        for line in text.lines() {
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            match name.trim() {
                "url" => url = Some(value.trim().to_string()),
                "key" => key = Some(value.trim().to_string()),
                _ => {}
            }
        }
        match (url, key) {
            (Some(url), Some(key)) => Self::new(url, &key),
            _ => Err(CdsError::MissingCredentials {
                reason: "rc file needs both 'url:' and 'key:' lines".to_string(),
            }),
        }
    }

    /// Base URL of the API, without a trailing `/`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// User identifier part of the key.
    pub fn user(&self) -> &str {
        &self.user
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("secret", &"<redacted>")
            .finish()
    }
}

fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Credentials, CdsError> {
    if let (Some(url), Some(key)) = (lookup("CDSAPI_URL"), lookup("CDSAPI_KEY")) {
        debug!("using credentials from environment");
        return Credentials::new(url, &key);
    }

    let rc = match lookup("CDSAPI_RC") {
        Some(path) => PathBuf::from(path),
        None => {
            let home = lookup("HOME").ok_or_else(|| CdsError::MissingCredentials {
                reason: "CDSAPI_URL/CDSAPI_KEY unset and HOME unknown".to_string(),
            })?;
            PathBuf::from(home).join(".cdsapirc")
        }
    };
    if !rc.exists() {
        return Err(CdsError::MissingCredentials {
            reason: format!("{} not found", rc.display()),
        });
    }
    debug!(rc = %rc.display(), "using credentials from rc file");
    Credentials::from_rc_file(&rc)
}
