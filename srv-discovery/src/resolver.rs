//! Resolves a [`ServiceQuery`] into the [`ServiceEndpoint`]s backing it, by chaining
//! an SRV lookup on the service name with an A lookup on every SRV target.

use crate::{
    Lookup, NotFoundReason, RecordKind, ServiceEndpoint, ServiceNotFoundError, ServiceQuery,
    SrvRecord,
};
use futures::stream::{self, StreamExt};
use std::net::Ipv4Addr;
use tracing_futures::Instrument;

/// Discovers the endpoints of a service using DNS SRV and A records.
///
/// ```rust
/// use srv_discovery::{Lookup, LookupError, LookupResult, LookupStatus, RecordKind};
/// use srv_discovery::{NotFoundReason, ServiceQuery, ServiceResolver};
///
/// // Knows no service at all.
/// struct EmptyZone;
///
/// #[async_trait::async_trait]
/// impl Lookup for EmptyZone {
///     async fn lookup(&self, _: &str, _: RecordKind) -> Result<LookupResult, LookupError> {
///         Ok(LookupResult::with_status(LookupStatus::HostNotFound))
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let resolver = ServiceResolver::new(EmptyZone);
///     let query = ServiceQuery::new("namenode.service.consul").unwrap();
///
///     let err = resolver.resolve(&query).await.unwrap_err();
///     assert_eq!(err.reason(), NotFoundReason::NoSrvRecords);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ServiceResolver<L> {
    lookup: L,
    concurrency_limit: Option<usize>,
}

impl<L> ServiceResolver<L>
where
    L: Lookup + Send + Sync,
{
    /// Create a [`ServiceResolver`] issuing its queries through `lookup`.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            concurrency_limit: None,
        }
    }

    /// Bound the number of A lookups in flight during one resolution.
    ///
    /// By default every SRV target is looked up at once.
    pub fn with_concurrency_limit(self, limit: usize) -> Self {
        Self {
            concurrency_limit: Some(limit.max(1)),
            ..self
        }
    }

    /// The [`Lookup`] used to query DNS.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolve `query` into the endpoints of the service.
    ///
    /// Endpoints are returned in the order of the SRV answers they stem from.
    /// SRV targets whose address cannot be resolved are left out, the call only
    /// fails if the service has no SRV record or none of its targets resolve.
    #[tracing::instrument(level = "debug", skip(self, query), fields(service = %query.name()))]
    pub async fn resolve(
        &self,
        query: &ServiceQuery,
    ) -> Result<Vec<ServiceEndpoint>, ServiceNotFoundError> {
        let srv_records = self.srv_records(query).await?;

        let limit = self.concurrency_limit.unwrap_or(srv_records.len()).max(1);
        let addresses: Vec<Option<Ipv4Addr>> = stream::iter(srv_records.iter())
            .map(|srv| {
                self.target_address(srv.target())
                    .instrument(tracing::debug_span!("target", target = %srv.target()))
            })
            .buffered(limit)
            .collect()
            .await;

        // `buffered` yields in submission order, so every address lines up with its SRV record.
        let endpoints: Vec<ServiceEndpoint> = srv_records
            .iter()
            .zip(addresses)
            .filter_map(|(srv, address)| {
                address.map(|address| ServiceEndpoint::new(query.name(), address, srv.port()))
            })
            .collect();

        if endpoints.is_empty() {
            tracing::debug!("none of {} SRV targets resolved", srv_records.len());
            return Err(ServiceNotFoundError::new(
                query.name(),
                NotFoundReason::NoResolvableTargets,
            ));
        }

        tracing::debug!("resolved {} of {} SRV targets", endpoints.len(), srv_records.len());
        Ok(endpoints)
    }

    async fn srv_records(
        &self,
        query: &ServiceQuery,
    ) -> Result<Vec<SrvRecord>, ServiceNotFoundError> {
        let not_found = || ServiceNotFoundError::new(query.name(), NotFoundReason::NoSrvRecords);

        let result = match self.lookup.lookup(&query.fqdn(), RecordKind::Srv).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!("SRV lookup failed: {}", err);
                return Err(not_found().with_source(err));
            }
        };

        if !result.status().is_successful() {
            tracing::debug!("SRV lookup returned {:?}", result.status());
            return Err(not_found());
        }

        let srv_records: Vec<SrvRecord> = result.srv_records().cloned().collect();
        if srv_records.is_empty() {
            tracing::debug!("SRV lookup returned no records");
            return Err(not_found());
        }

        Ok(srv_records)
    }

    /// The first address `target` resolves to, if any.
    async fn target_address(&self, target: &str) -> Option<Ipv4Addr> {
        match self.lookup.lookup(target, RecordKind::A).await {
            Ok(result) if result.status().is_successful() => {
                let address = result.a_records().next().map(|a| a.address());
                if address.is_none() {
                    tracing::debug!("A lookup returned no records, skipping target");
                }
                address
            }
            Ok(result) => {
                tracing::debug!("A lookup returned {:?}, skipping target", result.status());
                None
            }
            Err(err) => {
                tracing::warn!("A lookup failed, skipping target: {}", err);
                None
            }
        }
    }
}
