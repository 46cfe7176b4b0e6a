//! Provides the builder of a [`ServiceResolver`] talking to DNS through [`DnsLookup`].

use crate::{DnsLookup, ServiceResolver};
use anyhow::Context as _;
use std::time::Duration;
use trust_dns_resolver::config::ResolverOpts;

// Port DNS servers listen on unless told otherwise.
static DEFAULT_DNS_PORT: u16 = 53;

impl ServiceResolver<DnsLookup> {
    /// Start configuring a [`ServiceResolver`] backed by [`DnsLookup`].
    pub fn builder() -> ServiceResolverBuilder {
        ServiceResolverBuilder::new()
    }
}

/// Builder to configure and create a [`ServiceResolver`] that queries DNS.
///
/// ```rust,no_run
/// #[tokio::main]
/// async fn main() {
///     use srv_discovery::{ServiceQuery, ServiceResolver};
///     use std::time::Duration;
///
///     // Query the DNS interface of a local Consul agent.
///     let resolver = ServiceResolver::builder()
///         .dns_host("127.0.0.1")
///         .dns_port(8600)
///         .timeout(Duration::from_secs(2))
///         .build()
///         .await
///         .expect("failed to construct ServiceResolver");
///
///     let endpoints = resolver
///         .resolve(&ServiceQuery::new("namenode.service.consul").unwrap())
///         .await
///         .expect("namenode is not registered");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ServiceResolverBuilder {
    dns_host: Option<String>,
    dns_port: u16,
    timeout: Option<Duration>,
    attempts: Option<usize>,
    concurrency_limit: Option<usize>,
}

impl Default for ServiceResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceResolverBuilder {
    /// Create a builder using the system name servers and the default transport options.
    pub fn new() -> Self {
        Self {
            dns_host: None,
            dns_port: DEFAULT_DNS_PORT,
            timeout: None,
            attempts: None,
            concurrency_limit: None,
        }
    }

    /// Set the DNS server to query, as an IP literal or a hostname.
    ///
    /// When no host is set, the name servers of the system configuration are used
    /// and [`dns_port`](Self::dns_port) is ignored.
    pub fn dns_host<T: Into<String>>(self, host: T) -> ServiceResolverBuilder {
        Self {
            dns_host: Some(host.into()),
            ..self
        }
    }

    /// Set the port of the DNS server. Defaults to 53.
    pub fn dns_port(self, port: u16) -> ServiceResolverBuilder {
        Self {
            dns_port: port,
            ..self
        }
    }

    /// Set how long a single DNS query may take before it is considered failed.
    pub fn timeout(self, timeout: Duration) -> ServiceResolverBuilder {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }

    /// Set how many times the underlying transport sends a query before giving up.
    pub fn attempts(self, attempts: usize) -> ServiceResolverBuilder {
        Self {
            attempts: Some(attempts),
            ..self
        }
    }

    /// Bound the number of A lookups in flight while resolving one service.
    ///
    /// See [`ServiceResolver::with_concurrency_limit`].
    pub fn concurrency_limit(self, limit: usize) -> ServiceResolverBuilder {
        Self {
            concurrency_limit: Some(limit),
            ..self
        }
    }

    /// Construct a [`ServiceResolver`] from the [`ServiceResolverBuilder`] instance.
    pub async fn build(self) -> Result<ServiceResolver<DnsLookup>, anyhow::Error> {
        let lookup = match &self.dns_host {
            Some(host) => {
                let opts = self.resolver_opts(ResolverOpts::default());
                DnsLookup::with_name_server(host, self.dns_port, opts)
                    .await
                    .with_context(|| {
                        format!("failed to use '{}:{}' as dns server", host, self.dns_port)
                    })?
            }
            None => DnsLookup::from_system_config_with(|opts| self.resolver_opts(opts))?,
        };

        let resolver = ServiceResolver::new(lookup);
        Ok(match self.concurrency_limit {
            Some(limit) => resolver.with_concurrency_limit(limit),
            None => resolver,
        })
    }

    fn resolver_opts(&self, mut opts: ResolverOpts) -> ResolverOpts {
        if let Some(timeout) = self.timeout {
            opts.timeout = timeout;
        }
        if let Some(attempts) = self.attempts {
            opts.attempts = attempts;
        }
        opts
    }
}

const _: () = {
    const fn assert_is_send<T: Send>() {}
    assert_is_send::<ServiceResolverBuilder>();
    assert_is_send::<ServiceResolver<DnsLookup>>();
};
