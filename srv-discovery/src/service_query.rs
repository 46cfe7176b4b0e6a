use anyhow::Context;
use std::collections::BTreeSet;
use trust_dns_resolver::proto::rr::Name;

/// Identifies the service to discover by its DNS `name`, e.g. `namenode.service.consul`.
///
/// `filters` are carried along for lookup implementations that understand tags or
/// metadata, [`ServiceResolver`](crate::ServiceResolver) does not interpret them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceQuery {
    /// The service name, either relative or fully-qualified.
    name: String,
    /// Tag or metadata filters.
    filters: BTreeSet<String>,
}

impl ServiceQuery {
    /// Create a [`ServiceQuery`] without filters.
    ///
    /// This function will fail if `name` is not a valid domain name.
    pub fn new<T: ToString>(name: T) -> Result<Self, anyhow::Error> {
        Self::from_parts(name, std::iter::empty::<String>())
    }

    /// Create a [`ServiceQuery`] from a valid `name` and a set of `filters`.
    ///
    /// This function will fail if `name` is not a valid domain name.
    pub fn from_parts<T, I, F>(name: T, filters: I) -> Result<Self, anyhow::Error>
    where
        T: ToString,
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        let name = name.to_string();

        if name.trim_end_matches('.').is_empty() {
            anyhow::bail!("invalid 'name': a service name cannot be empty");
        }

        Name::from_ascii(&name)
            .map_err(anyhow::Error::from)
            .context("invalid 'name'")?;

        Ok(Self {
            name,
            filters: filters.into_iter().map(Into::into).collect(),
        })
    }

    /// Get the `name` part of a `ServiceQuery`, as it was provided.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the `filters` of a `ServiceQuery`.
    pub fn filters(&self) -> &BTreeSet<String> {
        &self.filters
    }

    /// The fully-qualified form of `name`, terminated by a dot.
    pub fn fqdn(&self) -> String {
        if self.name.ends_with('.') {
            self.name.clone()
        } else {
            format!("{}.", self.name)
        }
    }
}

/// ```
/// let query = srv_discovery::ServiceQuery::try_from("namenode.service.lc").unwrap();
/// assert_eq!(query.name(), "namenode.service.lc");
/// assert!(query.filters().is_empty());
/// ```
impl TryFrom<&str> for ServiceQuery {
    type Error = anyhow::Error;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

/// ```
/// let query = srv_discovery::ServiceQuery::try_from(String::from("namenode.service.lc")).unwrap();
/// assert_eq!(query.fqdn(), "namenode.service.lc.");
/// ```
impl TryFrom<String> for ServiceQuery {
    type Error = anyhow::Error;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}
