use srv_discovery::{
    DnsLookup, Lookup, LookupStatus, NotFoundReason, RecordKind, ServiceEndpoint, ServiceQuery,
    ServiceResolver, SrvRecord,
};
use std::net::Ipv4Addr;
use std::time::Duration;
use tests::TestDnsServer;
use trust_dns_resolver::config::ResolverOpts;

async fn lookup_for(server: &TestDnsServer) -> DnsLookup {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(2);
    DnsLookup::with_name_server("127.0.0.1", server.address().port(), opts)
        .await
        .expect("failed to init")
}

#[tokio::test]
async fn srv_answers_are_returned_in_order() {
    let server = TestDnsServer::start().await;
    server.add_service("namenode.service.lc.", &[("node0.lc.", 8080), ("node1.lc.", 9090)]);
    let lookup = lookup_for(&server).await;

    let result = lookup
        .lookup("namenode.service.lc.", RecordKind::Srv)
        .await
        .expect("dns query failed");

    assert_eq!(result.status(), LookupStatus::Successful);
    let records: Vec<(String, u16)> = result
        .srv_records()
        .map(|srv: &SrvRecord| (srv.target().to_string(), srv.port()))
        .collect();
    assert_eq!(
        records,
        vec![
            ("node0.lc.".to_string(), 8080),
            ("node1.lc.".to_string(), 9090)
        ]
    );
}

#[tokio::test]
async fn unknown_name_is_host_not_found() {
    let server = TestDnsServer::start().await;
    let lookup = lookup_for(&server).await;

    let result = lookup
        .lookup("servicedoesnotexist.service.lc.", RecordKind::Srv)
        .await
        .expect("dns query failed");

    assert_eq!(result.status(), LookupStatus::HostNotFound);
    assert!(result.answers().is_empty());
}

#[tokio::test]
async fn missing_record_type_is_type_not_found() {
    let server = TestDnsServer::start().await;
    server.add_host("node0.lc.", &[Ipv4Addr::new(10, 0, 0, 1)]);
    let lookup = lookup_for(&server).await;

    let result = lookup
        .lookup("node0.lc.", RecordKind::Srv)
        .await
        .expect("dns query failed");

    assert_eq!(result.status(), LookupStatus::TypeNotFound);
}

#[tokio::test]
async fn service_resolves_through_dns_server() {
    // Arrange
    let server = TestDnsServer::start().await;
    server.add_service("namenode.service.lc.", &[("node0.lc.", 8080), ("node1.lc.", 8080)]);
    server.add_host("node0.lc.", &[Ipv4Addr::new(10, 0, 0, 1)]);
    server.add_host("node1.lc.", &[Ipv4Addr::new(10, 0, 0, 2)]);

    let resolver = ServiceResolver::builder()
        .dns_host("127.0.0.1")
        .dns_port(server.address().port())
        .timeout(Duration::from_secs(2))
        .build()
        .await
        .expect("failed to init");

    // Act
    let endpoints = resolver
        .resolve(&ServiceQuery::new("namenode.service.lc").unwrap())
        .await
        .expect("service not found");

    // Assert
    assert_eq!(
        endpoints,
        vec![
            ServiceEndpoint::new("namenode.service.lc", Ipv4Addr::new(10, 0, 0, 1), 8080),
            ServiceEndpoint::new("namenode.service.lc", Ipv4Addr::new(10, 0, 0, 2), 8080),
        ]
    );
}

#[tokio::test]
async fn unregistered_hosts_make_service_unreachable() {
    // Scenario:
    // The service is still published, but none of its hosts has an A record.
    let server = TestDnsServer::start().await;
    server.add_service("namenode.service.lc.", &[("node0.lc.", 8080), ("node1.lc.", 8080)]);

    let resolver = ServiceResolver::new(lookup_for(&server).await);

    let err = resolver
        .resolve(&ServiceQuery::new("namenode.service.lc.").unwrap())
        .await
        .expect_err("resolution should fail");

    assert_eq!(err.reason(), NotFoundReason::NoResolvableTargets);
}

#[tokio::test]
async fn unknown_service_is_not_found() {
    let server = TestDnsServer::start().await;
    let resolver = ServiceResolver::new(lookup_for(&server).await);

    let err = resolver
        .resolve(&ServiceQuery::new("servicedoesnotexist.service.lc").unwrap())
        .await
        .expect_err("resolution should fail");

    assert_eq!(err.reason(), NotFoundReason::NoSrvRecords);
}
