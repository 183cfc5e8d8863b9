//! Integration tests for the echo fixture.

mod common;

use axum::http::StatusCode;
use common::{payload, TestServer};

async fn echo(server: &TestServer, body: Vec<u8>) -> Vec<u8> {
    let res = server
        .client
        .put(server.url("/echoPutFile.php"))
        .body(body)
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), StatusCode::OK);
    res.bytes().await.unwrap().to_vec()
}

#[tokio::test]
async fn test_empty_body_echoes_nothing() {
    let server = TestServer::start().await;
    assert!(echo(&server, Vec::new()).await.is_empty());
}

#[tokio::test]
async fn test_body_sizes_around_chunk_boundary() {
    let server = TestServer::start().await;

    for len in [1, 1023, 1024, 1025, 2048, 4096, 10_000] {
        let body = payload(len);
        assert_eq!(echo(&server, body.clone()).await, body, "length {len}");
    }
}

#[tokio::test]
async fn test_large_body_round_trips() {
    let server = TestServer::start().await;
    let body = payload(3 * 1024 * 1024 + 17);
    assert_eq!(echo(&server, body.clone()).await, body);
}

#[tokio::test]
async fn test_streamed_request_body() {
    let server = TestServer::start().await;

    let pieces: Vec<Result<Vec<u8>, std::io::Error>> =
        (0..8).map(|i| Ok(vec![i as u8; 700])).collect();
    let expected: Vec<u8> = (0..8).flat_map(|i| vec![i as u8; 700]).collect();

    let res = server
        .client
        .put(server.url("/echo"))
        .body(reqwest::Body::wrap_stream(futures_util::stream::iter(pieces)))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.bytes().await.unwrap().to_vec(), expected);
}

#[tokio::test]
async fn test_any_method_is_echoed() {
    let server = TestServer::start().await;

    let res = server
        .client
        .post(server.url("/echo"))
        .body("posted text")
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "posted text");

    let res = server
        .client
        .patch(server.url("/echo"))
        .body("patched")
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "patched");
}

#[tokio::test]
async fn test_custom_chunk_size() {
    let server = TestServer::start_with(|c| c.echo.chunk_size = 7).await;
    let body = payload(1000);
    assert_eq!(echo(&server, body.clone()).await, body);
}

#[tokio::test]
async fn test_request_id_is_assigned_and_propagated() {
    let server = TestServer::start().await;

    let res = server.client.put(server.url("/echo")).send().await.unwrap();
    let generated = res.headers().get("x-request-id").expect("request id header");
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());

    let res = server
        .client
        .put(server.url("/echo"))
        .header("x-request-id", "client-suite-7")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers().get("x-request-id").unwrap(), "client-suite-7");
}

#[tokio::test]
async fn test_health_probe() {
    let server = TestServer::start().await;

    let res = server.client.get(server.url("/healthz")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = TestServer::start().await;

    let res = server.client.put(server.url("/nope")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
