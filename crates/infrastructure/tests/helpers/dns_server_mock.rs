//! Minimal scripted UDP resolver for exercising the forwarding path.

use hickory_proto::op::{Header, Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::BinEncodable;
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;

/// How the mock reacts to each received query.
#[derive(Clone, Copy)]
pub enum MockBehavior {
    /// Echo the query ID and answer with one A record.
    Answer { address: Ipv4Addr, ttl: u32 },
    /// Echo the query ID with an empty answer section.
    Empty,
    /// Answer correctly but under a mangled transaction ID.
    WrongId,
    /// Echo the query ID, carry an answer, but report SERVFAIL.
    ServFail,
    /// Never respond.
    Silent,
}

/// Binds an ephemeral localhost socket and serves `behavior` forever.
/// Returns the address to point an upstream endpoint at.
pub async fn spawn_mock_upstream(behavior: MockBehavior) -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("bind mock upstream");
    let addr = socket.local_addr().expect("mock upstream local addr");

    tokio::spawn(async move {
        let mut buf = [0u8; 4096];
        loop {
            let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                return;
            };
            if matches!(behavior, MockBehavior::Silent) {
                continue;
            }
            let Ok(query) = Message::from_vec(&buf[..len]) else {
                continue;
            };
            let response = build_response(&query, behavior);
            if let Ok(bytes) = response.to_vec() {
                let _ = socket.send_to(&bytes, peer).await;
            }
        }
    });

    addr
}

fn build_response(query: &Message, behavior: MockBehavior) -> Message {
    let id = match behavior {
        MockBehavior::WrongId => query.id().wrapping_add(1),
        _ => query.id(),
    };

    let mut header = Header::new();
    header
        .set_id(id)
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_available(true);
    if matches!(behavior, MockBehavior::ServFail) {
        header.set_response_code(ResponseCode::ServFail);
    }

    let mut response = Message::new();
    response.set_header(header);
    for q in query.queries() {
        response.add_query(q.clone());
    }

    let (address, ttl) = match behavior {
        MockBehavior::Answer { address, ttl } => (address, ttl),
        MockBehavior::WrongId | MockBehavior::ServFail => (Ipv4Addr::new(93, 184, 216, 34), 60),
        MockBehavior::Empty | MockBehavior::Silent => return response,
    };

    let name = query
        .queries()
        .first()
        .map(|q| q.name().clone())
        .unwrap_or_else(Name::root);
    response.add_answer(Record::from_rdata(name, ttl, RData::A(A(address))));

    response
}
