//! Defines the interface that [`ServiceResolver`](crate::ServiceResolver) requires in order
//! to query DNS for a single record type, and the raw answers it gets back.

use std::fmt;
use std::net::Ipv4Addr;

use crate::LookupError;

/// The record types [`ServiceResolver`](crate::ServiceResolver) asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Service locator, naming the target and port of a service instance.
    Srv,
    /// IPv4 address of a host.
    A,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Srv => f.write_str("SRV"),
            RecordKind::A => f.write_str("A"),
        }
    }
}

/// Outcome reported by the DNS server for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupStatus {
    /// The server answered the query.
    Successful,
    /// The server failed to answer, a later attempt may succeed.
    TryAgain,
    /// The queried name does not exist.
    HostNotFound,
    /// The name exists, but holds no record of the requested type.
    TypeNotFound,
    /// The server refused or could not understand the query.
    Unrecoverable,
}

impl LookupStatus {
    /// Whether the server answered, even with an empty answer section.
    pub fn is_successful(&self) -> bool {
        matches!(self, LookupStatus::Successful)
    }
}

/// Data of an SRV record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvRecord {
    priority: u16,
    weight: u16,
    port: u16,
    target: String,
}

impl SrvRecord {
    /// Create an SRV record pointing at `port` on `target`.
    pub fn new(priority: u16, weight: u16, port: u16, target: impl Into<String>) -> Self {
        Self {
            priority,
            weight,
            port,
            target: target.into(),
        }
    }

    /// Preference of this target, lower values are tried first.
    pub fn priority(&self) -> u16 {
        self.priority
    }

    /// Relative weight among targets sharing the same priority.
    pub fn weight(&self) -> u16 {
        self.weight
    }

    /// The port the service listens on at [`target`](Self::target).
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The host that serves the service, to be resolved with an A lookup.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Data of an A record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ARecord {
    owner: String,
    address: Ipv4Addr,
}

impl ARecord {
    /// Create an A record holding `address` for `owner`.
    pub fn new(owner: impl Into<String>, address: Ipv4Addr) -> Self {
        Self {
            owner: owner.into(),
            address,
        }
    }

    /// The name the address belongs to.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The IPv4 address held by the record.
    pub fn address(&self) -> Ipv4Addr {
        self.address
    }
}

/// A single record of an answer section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsRecord {
    /// An SRV record.
    Srv(SrvRecord),
    /// An A record.
    A(ARecord),
}

/// Status and answer section of one DNS query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    status: LookupStatus,
    answers: Vec<DnsRecord>,
}

impl LookupResult {
    /// A successful answer holding `answers`, which may be empty.
    pub fn successful(answers: Vec<DnsRecord>) -> Self {
        Self {
            status: LookupStatus::Successful,
            answers,
        }
    }

    /// An answer without records, reporting `status`.
    pub fn with_status(status: LookupStatus) -> Self {
        Self {
            status,
            answers: Vec::new(),
        }
    }

    /// The status reported by the server.
    pub fn status(&self) -> LookupStatus {
        self.status
    }

    /// Every record of the answer section, in the order they were received.
    pub fn answers(&self) -> &[DnsRecord] {
        &self.answers
    }

    /// The SRV records of the answer section, in the order they were received.
    pub fn srv_records(&self) -> impl Iterator<Item = &SrvRecord> {
        self.answers.iter().filter_map(|record| match record {
            DnsRecord::Srv(srv) => Some(srv),
            DnsRecord::A(_) => None,
        })
    }

    /// The A records of the answer section, in the order they were received.
    pub fn a_records(&self) -> impl Iterator<Item = &ARecord> {
        self.answers.iter().filter_map(|record| match record {
            DnsRecord::A(a) => Some(a),
            DnsRecord::Srv(_) => None,
        })
    }
}

/// Interface that issues a single DNS query of a given record type.
///
/// [`DnsLookup`](crate::DnsLookup) talks to a real DNS server, tests plug in
/// their own implementation to control the answers.
#[async_trait::async_trait]
pub trait Lookup {
    /// Query `name` for records of `kind`.
    ///
    /// A DNS-level failure (unknown name, no record of that type, ...) is reported as
    /// an `Ok` [`LookupResult`] with the matching [`LookupStatus`]. `Err` is reserved
    /// for queries that did not get an answer at all.
    async fn lookup(&self, name: &str, kind: RecordKind) -> Result<LookupResult, LookupError>;
}
