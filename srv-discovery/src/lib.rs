#![deny(missing_docs)]

//! `srv-discovery` resolves a logical service name, e.g. `namenode.service.consul`,
//! into the concrete endpoints backing it using DNS `SRV` and `A` records.
//!
//! # Simple example
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() {
//!     use srv_discovery::{ServiceQuery, ServiceResolver};
//!
//!     // Create a resolver that uses the name servers of the system configuration.
//!     let resolver = ServiceResolver::builder()
//!         .build()
//!         .await
//!         .expect("failed to construct ServiceResolver");
//!
//!     let query = ServiceQuery::new("namenode.service.consul").expect("invalid service name");
//!     for endpoint in resolver.resolve(&query).await.expect("namenode not found") {
//!         println!("{}", endpoint.socket_addr());
//!     }
//! }
//! ```
//!
//! [`ServiceResolver`] also allows plugging in a different implementation of [`Lookup`].
//!
//! ```rust
//! use srv_discovery::{ARecord, DnsRecord, Lookup, LookupError, LookupResult};
//! use srv_discovery::{RecordKind, SrvRecord};
//! use std::net::Ipv4Addr;
//!
//! // Every name is served by a single host on 10.0.0.1:8080.
//! struct SingleHost;
//!
//! #[async_trait::async_trait]
//! impl Lookup for SingleHost {
//!     async fn lookup(&self, name: &str, kind: RecordKind) -> Result<LookupResult, LookupError> {
//!         let record = match kind {
//!             RecordKind::Srv => DnsRecord::Srv(SrvRecord::new(1, 1, 8080, "host.lc.")),
//!             RecordKind::A => DnsRecord::A(ARecord::new(name, Ipv4Addr::new(10, 0, 0, 1))),
//!         };
//!         Ok(LookupResult::successful(vec![record]))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     use srv_discovery::{ServiceQuery, ServiceResolver};
//!
//!     let resolver = ServiceResolver::new(SingleHost);
//!     let query = ServiceQuery::new("namenode.service.lc").unwrap();
//!
//!     let endpoints = resolver.resolve(&query).await.unwrap();
//!     let expected: std::net::SocketAddr = "10.0.0.1:8080".parse().unwrap();
//!     assert_eq!(endpoints[0].socket_addr(), expected);
//! }
//! ```
//!
//! # Internals
//! Resolution happens in two phases. The service name is looked up for `SRV` records,
//! each of which names a target host and a port. Every target is then looked up for
//! `A` records, concurrently, and its first address is paired with the port of its
//! `SRV` record. Targets that fail to resolve are skipped, a
//! [`ServiceNotFoundError`] is only returned when no endpoint is left.

mod builder;
mod dns_lookup;
mod error;
mod lookup;
mod resolver;
mod service_endpoint;
mod service_query;

pub use builder::*;
pub use dns_lookup::DnsLookup;
pub use error::*;
pub use lookup::*;
pub use resolver::*;
pub use service_endpoint::*;
pub use service_query::*;
