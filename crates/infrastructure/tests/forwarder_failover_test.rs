mod helpers;

use copper_dns_infrastructure::dns::cache::{AnswerCache, CacheKey};
use copper_dns_infrastructure::dns::transport::UdpTransport;
use copper_dns_infrastructure::dns::upstream::{EndpointState, UpstreamEndpoint, UpstreamPool};
use copper_dns_infrastructure::dns::Forwarder;
use helpers::dns_server_mock::{spawn_mock_upstream, MockBehavior};
use hickory_proto::rr::{RData, RecordType};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

fn forwarder_over(addrs: Vec<SocketAddr>, timeout_ms: u64) -> (Forwarder, Arc<AnswerCache>, Arc<UpstreamPool>) {
    let cache = Arc::new(AnswerCache::new());
    let endpoints = addrs
        .into_iter()
        .map(|addr| Arc::new(UpstreamEndpoint::new(addr)))
        .collect();
    let pool = Arc::new(UpstreamPool::new(endpoints));
    let forwarder = Forwarder::new(
        Arc::clone(&cache),
        Arc::clone(&pool),
        Arc::new(UdpTransport::new(4)),
        Duration::from_millis(timeout_ms),
    );
    (forwarder, cache, pool)
}

#[tokio::test]
async fn answer_from_first_upstream_is_cached() {
    let upstream = spawn_mock_upstream(MockBehavior::Answer {
        address: Ipv4Addr::new(93, 184, 216, 34),
        ttl: 120,
    })
    .await;
    let (forwarder, cache, pool) = forwarder_over(vec![upstream], 500);

    let answers = forwarder.forward("www.example.com.", RecordType::A).await;

    assert_eq!(answers.len(), 1);
    match answers[0].data() {
        Some(RData::A(a)) => assert_eq!(a.0, Ipv4Addr::new(93, 184, 216, 34)),
        other => panic!("unexpected rdata: {other:?}"),
    }
    assert!(cache
        .get(&CacheKey::new("www.example.com.", RecordType::A))
        .is_some());
    assert_eq!(pool.endpoints()[0].state(), EndpointState::Alive);
}

#[tokio::test]
async fn silent_upstream_fails_over_to_next() {
    let silent = spawn_mock_upstream(MockBehavior::Silent).await;
    let answering = spawn_mock_upstream(MockBehavior::Answer {
        address: Ipv4Addr::new(10, 0, 0, 9),
        ttl: 60,
    })
    .await;
    let (forwarder, _cache, pool) = forwarder_over(vec![silent, answering], 100);

    let answers = forwarder.forward("www.example.com.", RecordType::A).await;

    assert_eq!(answers.len(), 1);
    // A query-path timeout never demotes the endpoint; that is the health
    // checker's call.
    assert_eq!(pool.endpoints()[0].state(), EndpointState::Unknown);
    assert_eq!(pool.endpoints()[1].state(), EndpointState::Alive);
}

#[tokio::test]
async fn mismatched_transaction_id_is_discarded() {
    let spoofed = spawn_mock_upstream(MockBehavior::WrongId).await;
    let answering = spawn_mock_upstream(MockBehavior::Answer {
        address: Ipv4Addr::new(10, 0, 0, 9),
        ttl: 60,
    })
    .await;
    let (forwarder, _cache, _pool) = forwarder_over(vec![spoofed, answering], 200);

    let answers = forwarder.forward("www.example.com.", RecordType::A).await;

    assert_eq!(answers.len(), 1);
    match answers[0].data() {
        Some(RData::A(a)) => assert_eq!(a.0, Ipv4Addr::new(10, 0, 0, 9)),
        other => panic!("unexpected rdata: {other:?}"),
    }
}

#[tokio::test]
async fn error_response_code_counts_as_failure() {
    // The SERVFAIL mock carries an answer record, so only the response
    // code can justify skipping it.
    let failing = spawn_mock_upstream(MockBehavior::ServFail).await;
    let answering = spawn_mock_upstream(MockBehavior::Answer {
        address: Ipv4Addr::new(10, 0, 0, 9),
        ttl: 60,
    })
    .await;
    let (forwarder, _cache, _pool) = forwarder_over(vec![failing, answering], 200);

    let answers = forwarder.forward("www.example.com.", RecordType::A).await;

    assert_eq!(answers.len(), 1);
    match answers[0].data() {
        Some(RData::A(a)) => assert_eq!(a.0, Ipv4Addr::new(10, 0, 0, 9)),
        other => panic!("unexpected rdata: {other:?}"),
    }
}

#[tokio::test]
async fn empty_answer_counts_as_failure() {
    let empty = spawn_mock_upstream(MockBehavior::Empty).await;
    let answering = spawn_mock_upstream(MockBehavior::Answer {
        address: Ipv4Addr::new(10, 0, 0, 9),
        ttl: 60,
    })
    .await;
    let (forwarder, _cache, _pool) = forwarder_over(vec![empty, answering], 200);

    let answers = forwarder.forward("www.example.com.", RecordType::A).await;
    assert_eq!(answers.len(), 1);
}

#[tokio::test]
async fn repeat_query_is_served_from_cache() {
    let upstream = spawn_mock_upstream(MockBehavior::Answer {
        address: Ipv4Addr::new(10, 0, 0, 9),
        ttl: 300,
    })
    .await;
    let (forwarder, cache, _pool) = forwarder_over(vec![upstream], 500);

    forwarder.forward("www.example.com.", RecordType::A).await;
    forwarder.forward("www.example.com.", RecordType::A).await;

    assert_eq!(cache.metrics().hits(), 1);
    assert_eq!(cache.metrics().insertions(), 1);
}
