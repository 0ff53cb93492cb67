//! `ComplaintClient` against a canned-response HTTP server

use std::sync::{Arc, Mutex};

use complaint_desk::client::{ErrorKind, DEFAULT_SUBMISSION_MESSAGE};
use complaint_desk::{
    ClientError, ComplaintApi, ComplaintClient, ComplaintDraft, Config, ViewModel,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A request as seen by the server
#[derive(Debug, Clone)]
struct Recorded {
    request_line: String,
    body: String,
}

type Requests = Arc<Mutex<Vec<Recorded>>>;

/// Serve the given `(status, body)` pairs, one connection each, in order.
async fn spawn_server(responses: Vec<(u16, &'static str)>) -> (String, Requests) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests: Requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            let recorded = read_request(&mut socket).await;
            seen.lock().unwrap().push(recorded);

            // Clients ignore the reason phrase.
            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}/", addr), requests)
}

async fn read_request(socket: &mut TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_string();
            let content_length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.trim().eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }

    let text = String::from_utf8_lossy(&buf).to_string();
    let (head, body) = text.split_once("\r\n\r\n").unwrap_or((text.as_str(), ""));
    Recorded {
        request_line: head.lines().next().unwrap_or_default().to_string(),
        body: body.to_string(),
    }
}

fn client_for(base_url: &str) -> ComplaintClient {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.http.timeout_seconds = 5;
    ComplaintClient::new(&config).unwrap()
}

const TWO_COMPLAINTS: &str = r#"[
    {"Id": 1, "Title": "Noise", "Body": "Loud music at night", "CreatedAt": "2024-05-01T22:15:00Z"},
    {"Id": 2, "Title": "Parking", "Body": "Blocked driveway"}
]"#;

#[tokio::test]
async fn test_list_complaints_parses_array() {
    let (base, requests) = spawn_server(vec![(200, TWO_COMPLAINTS)]).await;
    let client = client_for(&base);

    let complaints = client.list_complaints().await.unwrap();

    assert_eq!(complaints.len(), 2);
    assert_eq!(complaints[0].title, "Noise");
    assert_eq!(complaints[1].created_at, None);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .request_line
        .starts_with("GET /TestApi/GetComplains "));
}

#[tokio::test]
async fn test_list_non_success_status_is_network_error() {
    let (base, _) = spawn_server(vec![(500, r#"{"error":"boom"}"#)]).await;
    let client = client_for(&base);

    let err = client.list_complaints().await.unwrap_err();
    assert!(matches!(err, ClientError::ListStatus { status: 500 }));
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_list_undecodable_body_is_network_error() {
    let (base, _) = spawn_server(vec![(200, "<html>maintenance</html>")]).await;
    let client = client_for(&base);

    let err = client.list_complaints().await.unwrap_err();
    assert!(matches!(err, ClientError::ListTransport(_)));
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_list_connection_refused_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}/", addr));
    let err = client.list_complaints().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_list_tolerates_malformed_entries() {
    let (base, _) = spawn_server(vec![(
        200,
        r#"[{"Id": 1, "Title": null, "Body": "x"}, {"Title": "No id", "CreatedAt": 1714559400}]"#,
    )])
    .await;
    let client = client_for(&base);

    let complaints = client.list_complaints().await.unwrap();
    assert_eq!(complaints.len(), 2);
    assert_eq!(complaints[0].title, "");
    assert_eq!(complaints[1].id, 0);
    assert_eq!(complaints[1].created_at.as_deref(), Some("1714559400"));
}

#[tokio::test]
async fn test_submit_connection_refused_is_submission_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}/", addr));
    let err = client
        .submit_complaint(&ComplaintDraft::new("Late delivery", "Order arrived 3 days late"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::SubmitTransport(_)));
    assert_eq!(err.kind(), ErrorKind::Submission);
}

#[tokio::test]
async fn test_submit_posts_trimmed_json_body() {
    let (base, requests) =
        spawn_server(vec![(200, r#"{"Success": true, "Message": "Saved"}"#)]).await;
    let client = client_for(&base);

    let ack = client
        .submit_complaint(&ComplaintDraft::new(
            "  Late delivery ",
            "Order arrived 3 days late\n",
        ))
        .await
        .unwrap();
    assert!(ack.success);
    assert_eq!(ack.message.as_deref(), Some("Saved"));

    let requests = requests.lock().unwrap();
    assert!(requests[0]
        .request_line
        .starts_with("POST /TestApi/SaveComplain "));
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"Title": "Late delivery", "Body": "Order arrived 3 days late"})
    );
}

#[tokio::test]
async fn test_submit_success_false_is_submission_error() {
    let (base, _) = spawn_server(vec![
        (200, r#"{"Success": false, "Message": "Body too long"}"#),
        (200, r#"{"success": false}"#),
    ])
    .await;
    let client = client_for(&base);
    let draft = ComplaintDraft::new("Late delivery", "Order arrived 3 days late");

    let err = client.submit_complaint(&draft).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Submission);
    assert_eq!(err.to_string(), "Body too long");

    let err = client.submit_complaint(&draft).await.unwrap_err();
    assert_eq!(err.to_string(), DEFAULT_SUBMISSION_MESSAGE);
}

#[tokio::test]
async fn test_submit_non_success_status_is_submission_error() {
    let (base, _) = spawn_server(vec![(503, "")]).await;
    let client = client_for(&base);

    let err = client
        .submit_complaint(&ComplaintDraft::new("Late delivery", "Order arrived 3 days late"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::SubmitStatus { status: 503 }));
    assert_eq!(err.kind(), ErrorKind::Submission);
}

#[tokio::test]
async fn test_empty_draft_sends_nothing() {
    let (base, requests) = spawn_server(vec![(200, r#"{"Success": true}"#)]).await;
    let client = client_for(&base);

    let err = client
        .submit_complaint(&ComplaintDraft::new("Late delivery", "   "))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_view_model_submit_then_refresh_over_http() {
    let (base, requests) = spawn_server(vec![
        (200, r#"{"Success": true}"#),
        (
            200,
            r#"[{"Id": 41, "Title": "Late delivery", "Body": "Order arrived 3 days late"}]"#,
        ),
    ])
    .await;
    let client = client_for(&base);

    let mut vm = ViewModel::new();
    vm.set_title("Late delivery");
    vm.set_body("Order arrived 3 days late");
    vm.submit(&client).await.unwrap();

    assert_eq!(vm.draft, ComplaintDraft::new("", ""));
    assert_eq!(vm.complaints.len(), 1);
    assert_eq!(vm.complaints[0].id, 41);
    assert_eq!(vm.complaints[0].title, "Late delivery");

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].request_line.starts_with("GET "));
}
