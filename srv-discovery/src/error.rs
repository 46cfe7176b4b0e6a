//! Errors surfaced by a [`Lookup`](crate::Lookup) and by
//! [`ServiceResolver::resolve`](crate::ServiceResolver::resolve).

use std::fmt;

/// Failure of a single query issued through a [`Lookup`](crate::Lookup).
///
/// A DNS server answering with a non-successful status is *not* a `LookupError`,
/// it is reported through [`LookupStatus`](crate::LookupStatus) instead.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The queried name cannot be encoded as a DNS name.
    #[error("invalid dns name `{0}`")]
    InvalidName(String),
    /// The query never produced an answer, e.g. it timed out or the connection was refused.
    #[error("dns query for `{name}` failed")]
    Transport {
        /// The name that was queried.
        name: String,
        /// What went wrong on the way to the DNS server.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl LookupError {
    /// Wrap a transport failure that happened while querying `name`.
    pub fn transport<E>(name: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Transport {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Why a [`ServiceNotFoundError`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The SRV lookup did not yield any record for the service.
    NoSrvRecords,
    /// SRV records exist but none of their targets resolved to an address.
    NoResolvableTargets,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::NoSrvRecords => f.write_str("no SRV records"),
            NotFoundReason::NoResolvableTargets => f.write_str("no resolvable targets"),
        }
    }
}

/// No endpoint could be discovered for a service.
///
/// Callers only need to know that the service is unavailable, while
/// [`reason`](ServiceNotFoundError::reason) tells apart a service that is
/// unknown to DNS from one whose backing hosts are all unregistered.
#[derive(Debug, thiserror::Error)]
#[error("service `{service}` not found: {reason}")]
pub struct ServiceNotFoundError {
    service: String,
    reason: NotFoundReason,
    #[source]
    source: Option<LookupError>,
}

impl ServiceNotFoundError {
    pub(crate) fn new(service: impl Into<String>, reason: NotFoundReason) -> Self {
        Self {
            service: service.into(),
            reason,
            source: None,
        }
    }

    pub(crate) fn with_source(mut self, source: LookupError) -> Self {
        self.source = Some(source);
        self
    }

    /// The service name as it was queried.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The resolution phase that came up empty.
    pub fn reason(&self) -> NotFoundReason {
        self.reason
    }

    /// The transport failure that aborted the SRV lookup, if any.
    pub fn lookup_error(&self) -> Option<&LookupError> {
        self.source.as_ref()
    }
}
