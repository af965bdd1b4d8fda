use pretty_assertions::assert_eq;
use quarry_core::{
    driver::{Auth, Consistency, Endpoint, Statement},
    Config,
};
use quarry_driver_http::{scripted::Reply, Dispatcher, ScriptedTransport};
use serde_json::json;
use std::{sync::Arc, time::Duration};

const PORT: u16 = 4001;

fn endpoints(hosts: &[&str]) -> Vec<Endpoint> {
    hosts.iter().map(|host| Endpoint::parse(host).unwrap()).collect()
}

fn dispatcher(config: Config, transport: &ScriptedTransport) -> Dispatcher {
    Dispatcher::with_transport(config, Arc::new(transport.clone()))
}

fn config() -> Config {
    Config::new().production(false).retry_delay(Duration::ZERO)
}

fn ok_rows() -> serde_json::Value {
    json!({ "results": [{ "columns": ["id"], "types": ["integer"], "values": [[1]] }] })
}

fn select() -> Statement {
    Statement::new("SELECT \"id\" FROM \"users\"")
}

#[tokio::test]
async fn fails_over_to_next_endpoint() {
    let transport = ScriptedTransport::new();
    transport.down("10.0.0.1").push_json("10.0.0.2", ok_rows());

    let response = dispatcher(config(), &transport)
        .query_strong(&endpoints(&["10.0.0.1", "10.0.0.2"]), PORT, select(), None)
        .await
        .unwrap();

    assert_eq!(response.results[0].values, [[json!(1)]]);
    assert_eq!(transport.hosts(), ["10.0.0.1", "10.0.0.2"]);
}

#[tokio::test]
async fn every_endpoint_down() {
    let transport = ScriptedTransport::new();
    transport.down("10.0.0.1").down("10.0.0.2");

    let err = dispatcher(config(), &transport)
        .query_strong(&endpoints(&["10.0.0.1", "10.0.0.2"]), PORT, select(), None)
        .await
        .unwrap_err();

    assert!(err.is_unreachable());
    assert_eq!(err.unreachable_attempts(), Some(2));
    assert_eq!(
        err.to_string(),
        "all endpoints unreachable after 2 attempts: \
         transient network failure at http://10.0.0.2:4001: connection refused"
    );
}

#[tokio::test]
async fn no_endpoints() {
    let transport = ScriptedTransport::new();

    let err = dispatcher(config(), &transport)
        .query_strong(&[], PORT, select(), None)
        .await
        .unwrap_err();

    assert_eq!(err.unreachable_attempts(), Some(0));
    assert!(transport.is_empty());
}

#[tokio::test]
async fn loopback_is_tried_first() {
    let transport = ScriptedTransport::new();
    transport
        .down("10.0.0.1")
        .down("127.0.0.1")
        .push_json("localhost", ok_rows());

    dispatcher(config(), &transport)
        .query_strong(
            &endpoints(&["10.0.0.1", "127.0.0.1", "localhost"]),
            PORT,
            select(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(transport.hosts(), ["127.0.0.1", "localhost"]);
}

#[tokio::test]
async fn last_endpoint_succeeds() {
    let transport = ScriptedTransport::new();
    transport
        .push("a.db", Reply::Status(503, "leader not found".into()))
        .push("b.db", Reply::Json(json!("not a response")))
        .push_json("c.db", ok_rows());

    let response = dispatcher(config(), &transport)
        .query_strong(&endpoints(&["a.db", "b.db", "c.db"]), PORT, select(), None)
        .await
        .unwrap();

    assert_eq!(response.results.len(), 1);
    assert_eq!(transport.len(), 3);
}

#[tokio::test]
async fn statement_error_moves_on() {
    let transport = ScriptedTransport::new();
    transport
        .push_json("a.db", json!({ "results": [{ "error": "no such table: users" }] }))
        .push_json("b.db", ok_rows());

    dispatcher(config(), &transport)
        .query_strong(&endpoints(&["a.db", "b.db"]), PORT, select(), None)
        .await
        .unwrap();

    assert_eq!(transport.hosts(), ["a.db", "b.db"]);
}

#[tokio::test]
async fn tls_policy_skips_plain_endpoints() {
    let transport = ScriptedTransport::new();
    transport.push_json("secure.db", ok_rows());

    let dispatcher = dispatcher(config().require_tls(true), &transport);

    dispatcher
        .query_strong(
            &endpoints(&["http://plain.db", "https://secure.db"]),
            PORT,
            select(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(transport.hosts(), ["secure.db"]);

    let err = dispatcher
        .query_strong(&endpoints(&["http://plain.db"]), PORT, select(), None)
        .await
        .unwrap_err();

    assert_eq!(err.unreachable_attempts(), Some(1));
    assert!(err.to_string().contains("http://plain.db"));
    assert_eq!(transport.len(), 1);
}

#[tokio::test]
async fn oversized_payload_is_never_sent() {
    let transport = ScriptedTransport::new();
    transport.push_json("a.db", ok_rows());

    let err = dispatcher(config().max_request_size(16), &transport)
        .execute(
            &endpoints(&["a.db"]),
            PORT,
            vec![Statement::new("INSERT INTO \"users\" DEFAULT VALUES")],
            None,
        )
        .await
        .unwrap_err();

    assert!(err.is_payload_too_large());
    assert!(transport.is_empty());
}

#[tokio::test(start_paused = true)]
async fn hanging_endpoint_times_out() {
    let transport = ScriptedTransport::new();
    transport
        .push("slow.db", Reply::Hang)
        .push_json("fast.db", ok_rows());

    let config = config().timeout(Duration::from_millis(50));

    dispatcher(config, &transport)
        .query_strong(&endpoints(&["slow.db", "fast.db"]), PORT, select(), None)
        .await
        .unwrap();

    assert_eq!(transport.hosts(), ["slow.db", "fast.db"]);
}

#[tokio::test(start_paused = true)]
async fn backoff_grows_linearly() {
    let transport = ScriptedTransport::new();
    transport
        .down("a.db")
        .down("b.db")
        .push_json("c.db", ok_rows());

    let config = config().retry_delay(Duration::from_millis(100));
    let start = tokio::time::Instant::now();

    dispatcher(config, &transport)
        .query_strong(&endpoints(&["a.db", "b.db", "c.db"]), PORT, select(), None)
        .await
        .unwrap();

    // 100ms before the second attempt, 200ms before the third
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(300), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(400), "{elapsed:?}");
}

#[tokio::test]
async fn request_shape() {
    let transport = ScriptedTransport::new();
    transport.always("a.db", Reply::Json(json!({ "results": [] })));

    let dispatcher = dispatcher(
        config().freshness(Duration::from_secs(2)).freshness_strict(true),
        &transport,
    );
    let auth = Auth::new("admin", "secret");

    dispatcher
        .query_bounded(&endpoints(&["a.db"]), 4002, select(), Some(&auth))
        .await
        .unwrap();
    dispatcher
        .transaction(&endpoints(&["a.db"]), 4002, vec![select(), select()], None)
        .await
        .unwrap();
    dispatcher
        .query(
            &endpoints(&["a.db"]),
            4002,
            select(),
            Consistency::Strong,
            None,
        )
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(
        requests[0].url.as_str(),
        "http://a.db:4002/db/query?named_parameters&level=none&freshness=2000ms&freshness_strict"
    );
    assert_eq!(requests[0].auth.as_ref(), Some(&auth));
    assert_eq!(requests[0].body, r#"[["SELECT \"id\" FROM \"users\"",{}]]"#);

    assert_eq!(
        requests[1].url.as_str(),
        "http://a.db:4002/db/execute?named_parameters&transaction"
    );
    assert!(requests[1].auth.is_none());

    assert_eq!(
        requests[2].url.as_str(),
        "http://a.db:4002/db/query?named_parameters&level=strong"
    );
}
