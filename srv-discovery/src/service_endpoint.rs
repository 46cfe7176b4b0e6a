use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// A concrete instance of a service: the address and port one of its hosts listens on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceEndpoint {
    service_name: String,
    address: IpAddr,
    port: u16,
}

impl ServiceEndpoint {
    /// Create the endpoint of `service_name` reachable on `address` and `port`.
    pub fn new(service_name: impl Into<String>, address: impl Into<IpAddr>, port: u16) -> Self {
        Self {
            service_name: service_name.into(),
            address: address.into(),
            port,
        }
    }

    /// The name of the service this endpoint was discovered for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// The address of the host backing this endpoint.
    pub fn address(&self) -> IpAddr {
        self.address
    }

    /// The port taken from the SRV record of the host.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The address and port to connect to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.service_name, self.socket_addr())
    }
}

impl From<ServiceEndpoint> for SocketAddr {
    fn from(endpoint: ServiceEndpoint) -> Self {
        endpoint.socket_addr()
    }
}
