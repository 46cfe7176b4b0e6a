//! Implements [`Lookup`] for dns.

use crate::{
    ARecord, DnsRecord, Lookup, LookupError, LookupResult, LookupStatus, RecordKind, SrvRecord,
};
use anyhow::Context;
use std::net::{IpAddr, Ipv4Addr};
use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::ResolveErrorKind;
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::proto::rr::{Name, RData, Record, RecordType};
use trust_dns_resolver::{system_conf, AsyncResolver, TokioAsyncResolver};

/// Implements [`Lookup`] by sending queries to a DNS server.
pub struct DnsLookup {
    /// The trust-dns resolver which contacts the dns service directly such
    /// that we bypass os-specific dns caching.
    dns: TokioAsyncResolver,
}

impl DnsLookup {
    /// Construct a new [`DnsLookup`] from env and system configuration, e.g `resolv.conf`.
    pub async fn from_system_config() -> Result<Self, anyhow::Error> {
        Self::from_system_config_with(|opts| opts)
    }

    /// Like [`DnsLookup::from_system_config`], letting `customize` adjust the
    /// options read from the system before the resolver is created.
    pub(crate) fn from_system_config_with<F>(customize: F) -> Result<Self, anyhow::Error>
    where
        F: FnOnce(ResolverOpts) -> ResolverOpts,
    {
        let (config, opts) = system_conf::read_system_conf()
            .context("failed to read dns services from system configuration")?;

        Ok(Self::from_parts(config, customize(opts)))
    }

    /// Construct a new [`DnsLookup`] that only queries the DNS server listening on
    /// `host` and `port`, e.g. a Consul agent on port 8600.
    ///
    /// `host` is either an IP literal or a hostname, which is resolved once
    /// through the operating system.
    pub async fn with_name_server(
        host: &str,
        port: u16,
        opts: ResolverOpts,
    ) -> Result<Self, anyhow::Error> {
        let ips = name_server_ips(host, port).await?;
        let name_servers = NameServerConfigGroup::from_ips_clear(&ips, port, true);
        let config = ResolverConfig::from_parts(None, vec![], name_servers);

        Ok(Self::from_parts(config, opts))
    }

    /// Construct a new [`DnsLookup`] from a complete trust-dns configuration.
    ///
    /// Response caching is always disabled.
    pub fn from_parts(config: ResolverConfig, mut opts: ResolverOpts) -> Self {
        // We do not want any caching on our side.
        opts.cache_size = 0;

        let dns = AsyncResolver::tokio(config, opts);

        Self { dns }
    }
}

async fn name_server_ips(host: &str, port: u16) -> Result<Vec<IpAddr>, anyhow::Error> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(vec![ip]);
    }

    let mut ips: Vec<IpAddr> = tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("failed to resolve dns host '{}'", host))?
        .map(|addr| addr.ip())
        .collect();
    ips.sort();
    ips.dedup();

    if ips.is_empty() {
        anyhow::bail!("dns host '{}' did not resolve to any address", host);
    }

    tracing::debug!("dns host {} resolved to {:?}", host, ips);
    Ok(ips)
}

/// Map the response code of an answer without records onto a [`LookupStatus`].
pub(crate) fn status_from_response_code(code: ResponseCode) -> LookupStatus {
    match code {
        ResponseCode::NoError => LookupStatus::TypeNotFound,
        ResponseCode::NXDomain => LookupStatus::HostNotFound,
        ResponseCode::ServFail => LookupStatus::TryAgain,
        _ => LookupStatus::Unrecoverable,
    }
}

fn record_type(kind: RecordKind) -> RecordType {
    match kind {
        RecordKind::Srv => RecordType::SRV,
        RecordKind::A => RecordType::A,
    }
}

fn dns_record(record: &Record) -> Option<DnsRecord> {
    match record.data()? {
        RData::SRV(srv) => Some(DnsRecord::Srv(SrvRecord::new(
            srv.priority(),
            srv.weight(),
            srv.port(),
            srv.target().to_ascii(),
        ))),
        RData::A(a) => Some(DnsRecord::A(ARecord::new(
            record.name().to_ascii(),
            Ipv4Addr::from(*a),
        ))),
        _ => None,
    }
}

#[async_trait::async_trait]
impl Lookup for DnsLookup {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn lookup(&self, name: &str, kind: RecordKind) -> Result<LookupResult, LookupError> {
        let query =
            Name::from_ascii(name).map_err(|_| LookupError::InvalidName(name.to_string()))?;

        match self.dns.lookup(query, record_type(kind)).await {
            Ok(lookup) => {
                tracing::debug!("dns query expires in: {:?}", lookup.valid_until());
                let answers: Vec<DnsRecord> = lookup
                    .record_iter()
                    .filter_map(dns_record)
                    .inspect(|record| tracing::debug!("result: {:?}", record))
                    .collect();
                Ok(LookupResult::successful(answers))
            }
            Err(err) => match err.kind() {
                ResolveErrorKind::NoRecordsFound { response_code, .. } => {
                    let status = status_from_response_code(*response_code);
                    tracing::debug!("no records found: {:?}", status);
                    Ok(LookupResult::with_status(status))
                }
                _ => Err(LookupError::transport(name, err)),
            },
        }
    }
}
