use drive_mirror::io::network::ApiError;
use drive_mirror::model::errors::MirrorErrKind;
use drive_mirror::{FetchRequest, Network, Remote};
use test_utils::test_config;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serves a single canned response and hands back the request head it received.
async fn serve_once(status: &'static str, body: &'static str) -> (Network, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 16 * 1024];
        let mut read = 0;
        loop {
            let n = socket.read(&mut buf[read..]).await.unwrap();
            read += n;
            if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        tx.send(String::from_utf8_lossy(&buf[..read]).to_string()).ok();
    });

    let network = Network {
        client: reqwest::Client::new(),
        api_url: format!("http://{addr}"),
        api_key: "test-key".to_string(),
    };
    (network, rx)
}

#[tokio::test]
async fn media_fetch_returns_body() {
    let (network, head) = serve_once("200 OK", "raw bytes").await;

    let content = network
        .fetch(&FetchRequest::Media { id: "abc".to_string() })
        .await
        .unwrap();

    let head = head.await.unwrap();
    assert_eq!(content, b"raw bytes");
    assert!(head.starts_with("GET /files/abc?"));
    assert!(head.contains("alt=media"));
    assert!(head.contains("key=test-key"));
}

#[tokio::test]
async fn export_fetch_sends_mime_type() {
    let (network, head) = serve_once("200 OK", "docx").await;

    network
        .fetch(&FetchRequest::Export {
            id: "doc".to_string(),
            mime_type: "application/pdf".to_string(),
        })
        .await
        .unwrap();

    let head = head.await.unwrap();
    assert!(head.starts_with("GET /files/doc/export?"));
    assert!(head.contains("mimeType=application%2Fpdf"));
}

#[tokio::test]
async fn error_status_propagates() {
    let (network, _head) = serve_once("403 Forbidden", r#"{"error":"nope"}"#).await;

    let err = network
        .fetch(&FetchRequest::Media { id: "abc".to_string() })
        .await
        .unwrap_err();

    assert!(matches!(err.kind, MirrorErrKind::Api(ApiError::Status { status: 403, .. })));
}

#[tokio::test]
async fn list_children_parses_page() {
    let (network, head) = serve_once(
        "200 OK",
        r#"{"nextPageToken":"next","files":[{"id":"1","name":"a.txt","mimeType":"text/plain","size":"3","modifiedTime":"2024-01-01T00:00:00Z"}]}"#,
    )
    .await;

    let page = network.list_children("root", Some("tok")).await.unwrap();

    let head = head.await.unwrap();
    assert_eq!(page.next_page_token.as_deref(), Some("next"));
    assert_eq!(page.files[0].size, Some(3));
    assert!(head.starts_with("GET /files?"));
    assert!(head.contains("pageToken=tok"));
    assert!(head.contains("key=test-key"));
}

#[tokio::test]
async fn garbage_listing_is_deserialize_error() {
    let (network, _head) = serve_once("200 OK", "not json").await;

    let err = network.list_children("root", None).await.unwrap_err();

    assert!(matches!(err.kind, MirrorErrKind::Api(ApiError::Deserialize(_))));
}

#[tokio::test]
async fn unreachable_server_is_send_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let network = Network {
        client: reqwest::Client::new(),
        api_url: format!("http://{addr}"),
        api_key: "test-key".to_string(),
    };
    let err = network.get_folder("root").await.unwrap_err();

    assert!(matches!(err.kind, MirrorErrKind::Api(ApiError::SendFailed(_))));
}

#[tokio::test]
async fn network_built_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.api_url = "http://localhost:9000".to_string();

    let network = Network::new(&config).unwrap();

    assert_eq!(network.api_url, "http://localhost:9000");
    assert_eq!(network.api_key, "test-key");
}
