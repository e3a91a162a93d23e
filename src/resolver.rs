//! Section resolution
//!
//! An explicit section is fetched once. Without one, sections 1 through 9
//! are probed in ascending order and the first 200 wins, so user command
//! pages take precedence over system calls and library pages.

use tracing::{debug, error, warn};

use crate::error::ResolveError;
use crate::fetcher::ManSource;

/// Sections tried when none is given
pub const PROBE_SECTIONS: std::ops::RangeInclusive<u8> = 1..=9;

/// A man page that was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub section: String,
    pub body: String,
}

pub struct Resolver<S> {
    source: S,
}

impl<S: ManSource> Resolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn resolve(
        &self,
        section: Option<&str>,
        command: &str,
    ) -> Result<Resolved, ResolveError> {
        match section {
            Some(section) => self.resolve_explicit(section, command).await,
            None => self.probe(command).await,
        }
    }

    async fn resolve_explicit(&self, section: &str, command: &str) -> Result<Resolved, ResolveError> {
        let response = self.source.fetch(section, command).await.map_err(|e| {
            warn!("Fetch failed for {} {}: {}", section, command, e);
            ResolveError::from(e)
        })?;

        match response.status {
            200 => Ok(Resolved {
                section: section.to_string(),
                body: response.body,
            }),
            404 => Err(ResolveError::NotFound {
                section: Some(section.to_string()),
                command: command.to_string(),
            }),
            500 => {
                error!("Man server error for {} {}: {}", section, command, response.body);
                Err(ResolveError::Server {
                    status: response.status,
                    body: response.body,
                })
            }
            status => {
                error!(
                    "Unknown status {} for {} {}: {}",
                    status, section, command, response.body
                );
                Err(ResolveError::UnknownStatus {
                    status,
                    body: response.body,
                })
            }
        }
    }

    /// Transport failures are logged and treated like a missing section
    async fn probe(&self, command: &str) -> Result<Resolved, ResolveError> {
        for section in PROBE_SECTIONS {
            let section = section.to_string();
            match self.source.fetch(&section, command).await {
                Ok(response) if response.status == 200 => {
                    debug!("Resolved {} to section {}", command, section);
                    return Ok(Resolved {
                        section,
                        body: response.body,
                    });
                }
                Ok(response) => {
                    debug!("Section {} for {}: status {}", section, command, response.status);
                }
                Err(e) => {
                    warn!("Lookup of section {} for {} failed: {}", section, command, e);
                }
            }
        }

        Err(ResolveError::NotFound {
            section: None,
            command: command.to_string(),
        })
    }
}
