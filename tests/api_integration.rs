//! Loader tests against a canned localhost HTTP responder.
//!
//! A one-shot listener on an ephemeral port answers a single request with
//! a fixed JSON body and hands back what it saw, so request method, path
//! and body can be asserted without a real backend.

use deskwatch::client::ApiClient;
use deskwatch::model::TicketStatus;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

struct Captured {
    method: String,
    path: String,
    body: String,
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Binds an ephemeral port and answers exactly one request with `body`.
fn serve_one(response_body: &str) -> (String, thread::JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let response_body = response_body.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut tmp = [0u8; 4096];

        let header_end = loop {
            let n = stream.read(&mut tmp).unwrap();
            assert!(n > 0, "peer closed before headers completed");
            buf.extend_from_slice(&tmp[..n]);
            if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let lower = line.to_ascii_lowercase();
                lower
                    .strip_prefix("content-length:")
                    .map(|v| v.trim().parse::<usize>().unwrap())
            })
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = stream.read(&mut tmp).unwrap();
            assert!(n > 0, "peer closed before body completed");
            buf.extend_from_slice(&tmp[..n]);
        }
        let body =
            String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string();

        let request_line = head.lines().next().unwrap().to_string();
        let mut parts = request_line.split_whitespace();
        let method = parts.next().unwrap().to_string();
        let path = parts.next().unwrap().to_string();

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            response_body.len(),
            response_body
        );
        stream.write_all(response.as_bytes()).unwrap();

        Captured { method, path, body }
    });

    (base, handle)
}

#[test]
fn tickets_loader_parses_status_envelope() {
    let (base, handle) = serve_one(
        r#"{"status":"success","data":[{"id":"1","title":"Printer jam","status":"open","priority":"high","user":"jdoe","created":"2024-01-01"}]}"#,
    );

    let client = ApiClient::new(&base).unwrap();
    let tickets = client.tickets().unwrap();

    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].id, "1");
    assert_eq!(tickets[0].title, "Printer jam");
    assert_eq!(tickets[0].status, TicketStatus::Open);
    assert_eq!(tickets[0].priority, "high");

    let captured = handle.join().unwrap();
    assert_eq!(captured.method, "GET");
    assert_eq!(captured.path, "/api/tickets");
}

#[test]
fn ticket_status_update_puts_status_body() {
    let (base, handle) = serve_one(r#"{"status":"success","data":{}}"#);

    let client = ApiClient::new(&base).unwrap();
    client
        .update_ticket_status("1", TicketStatus::Resolved)
        .unwrap();

    let captured = handle.join().unwrap();
    assert_eq!(captured.method, "PUT");
    assert_eq!(captured.path, "/api/tickets/1");

    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body, serde_json::json!({"status": "resolved"}));
}

#[test]
fn ad_search_accepts_bare_user_list() {
    let (base, handle) = serve_one(
        r#"{"users":[{"username":"jdoe","full_name":"Jane Doe","email":"jdoe@corp.local","department":"IT","status":"Active","last_login":"2024-05-01"}]}"#,
    );

    let client = ApiClient::new(&base).unwrap();
    let users = client.ad_search("jdo").unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "jdoe");
    assert_eq!(users[0].status, "Active");

    let captured = handle.join().unwrap();
    assert_eq!(captured.method, "GET");
    assert!(captured.path.starts_with("/api/ad/search?q=jdo"));
}

#[test]
fn password_reset_uses_success_envelope() {
    let (base, handle) = serve_one(r#"{"success":true,"temp_password":"Tmp!2024"}"#);

    let client = ApiClient::new(&base).unwrap();
    let reset = client.ad_reset_password("jdoe").unwrap();
    assert_eq!(reset.temp_password, "Tmp!2024");

    let captured = handle.join().unwrap();
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.path, "/api/ad/reset-password/jdoe");
}

#[test]
fn error_envelope_surfaces_message() {
    let (base, _handle) = serve_one(r#"{"status":"error","message":"WMI query failed"}"#);

    let client = ApiClient::new(&base).unwrap();
    let err = client.system_health().unwrap_err();
    assert!(err.to_string().contains("WMI query failed"));
}

#[test]
fn unreachable_backend_is_an_error_not_a_panic() {
    // Bind then drop to get a port nothing listens on
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = ApiClient::new(&format!("http://127.0.0.1:{port}")).unwrap();
    assert!(client.system_health().is_err());
}

#[test]
fn knowledge_base_unwraps_articles_field() {
    let (base, _handle) = serve_one(
        r#"{"articles":[{"id":3,"title":"Reset a password","content":"1. Open the portal","category":"Accounts","tags":["password","ad"]}]}"#,
    );

    let client = ApiClient::new(&base).unwrap();
    let articles = client.knowledge_base().unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, 3);
    assert_eq!(articles[0].tags, vec!["password", "ad"]);
}
