//! WarcraftLogsClient against a local canned-response HTTP server

use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use super::*;

type Responder = fn(&str) -> (u16, String);

fn credentials() -> Credentials {
    Credentials {
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find_header_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map(|v| v.trim().parse::<usize>().unwrap())
                .unwrap_or(0);
            if buf.len() >= end + 4 + len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Serve `connections` requests, one per connection, recording each.
fn serve(
    listener: TcpListener,
    connections: usize,
    respond: Responder,
) -> (JoinHandle<()>, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let handle = tokio::spawn(async move {
        for _ in 0..connections {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let (status, body) = respond(&request);
            log.lock().unwrap().push(request);

            let response = format!(
                "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        }
    });
    (handle, seen)
}

fn page(code: &str, has_more_pages: bool) -> String {
    json!({
        "data": { "reportData": { "reports": {
            "has_more_pages": has_more_pages,
            "data": [{
                "code": code,
                "startTime": 0.0,
                "fights": [{ "name": "Boss A", "difficulty": 3, "endTime": 10.0, "kill": true }]
            }]
        }}}
    })
    .to_string()
}

fn two_pages(request: &str) -> (u16, String) {
    if request.starts_with("POST /oauth/token") {
        return (200, json!({ "access_token": "test-token" }).to_string());
    }
    if request.contains("\"page\":1") {
        (200, page("first", true))
    } else {
        (200, page("second", false))
    }
}

fn client_for(listener: &TcpListener) -> WarcraftLogsClient {
    let addr = listener.local_addr().unwrap();
    WarcraftLogsClient::with_endpoints(
        credentials(),
        format!("http://{addr}/oauth/token"),
        format!("http://{addr}/api/v2/client"),
    )
}

#[tokio::test]
async fn test_fetch_reports_follows_pages() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let client = client_for(&listener);
    let (server, seen) = serve(listener, 3, two_pages);

    let filter = ReportFilter::Guild {
        name: "Progress".to_string(),
        server_slug: "area-52".to_string(),
        server_region: "us".to_string(),
    };
    let reports = client.fetch_reports(&filter).await.unwrap();
    server.await.unwrap();

    let codes: Vec<&str> = reports.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["first", "second"]);
    assert_eq!(reports_to_records(&reports).len(), 2);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);

    let token_request = seen[0].to_lowercase();
    assert!(token_request.contains("authorization: basic"));
    assert!(token_request.contains("grant_type=client_credentials"));

    for (request, page) in seen[1..].iter().zip(1..) {
        assert!(request.starts_with("POST /api/v2/client"));
        assert!(request.to_lowercase().contains("authorization: bearer test-token"));
        assert!(request.contains(&format!("\"page\":{page}")));
        assert!(request.contains("\"guild\":\"Progress\""));
    }
}

#[tokio::test]
async fn test_rejected_credentials_surface_status() {
    fn unauthorized(_request: &str) -> (u16, String) {
        (401, json!({ "error": "invalid_client" }).to_string())
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let client = client_for(&listener);
    let (server, _) = serve(listener, 1, unauthorized);

    let err = client
        .fetch_reports(&ReportFilter::User { id: 7 })
        .await
        .unwrap_err();
    server.await.unwrap();

    match err {
        SourceError::Status { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("invalid_client"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_graphql_errors_stop_paging() {
    fn rejected(request: &str) -> (u16, String) {
        if request.starts_with("POST /oauth/token") {
            return (200, json!({ "access_token": "t" }).to_string());
        }
        (
            200,
            json!({ "data": null, "errors": [{ "message": "Unknown user" }] }).to_string(),
        )
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let client = client_for(&listener);
    let (server, seen) = serve(listener, 2, rejected);

    let err = client
        .fetch_reports(&ReportFilter::User { id: 7 })
        .await
        .unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, SourceError::GraphQl { .. }));
    assert!(seen.lock().unwrap()[1].contains("\"user\":7"));
}
