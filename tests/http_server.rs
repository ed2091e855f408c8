//! End-to-end tests over a real TCP socket.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};

use cors_devserver::config::{AppState, Config};
use cors_devserver::logger::{AccessLog, AccessLogEntry};
use cors_devserver::server;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::LocalSet;

const DEMO_HTML: &str = "<!DOCTYPE html><html><body><h1>Demo</h1></body></html>";

#[derive(Default)]
struct CapturedLog(Mutex<Vec<String>>);

impl AccessLog for CapturedLog {
    fn log(&self, entry: &AccessLogEntry) {
        self.0.lock().unwrap().push(entry.format());
    }
}

struct RawResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl RawResponse {
    fn parse(raw: &[u8]) -> Self {
        let split = raw
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("response has no header terminator");
        let head = String::from_utf8(raw[..split].to_vec()).unwrap();
        let body = raw[split + 4..].to_vec();

        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap();
        let status = status_line
            .split(' ')
            .nth(1)
            .and_then(|s| s.parse().ok())
            .expect("bad status line");
        let headers = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
            .collect();

        Self {
            status,
            headers,
            body,
        }
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn header_count(&self, name: &str) -> usize {
        self.headers.iter().filter(|(k, _)| k == name).count()
    }

    fn assert_cors(&self) {
        assert_eq!(self.header("access-control-allow-origin"), Some("*"));
        assert_eq!(
            self.header("access-control-allow-methods"),
            Some("GET, POST, OPTIONS")
        );
        assert_eq!(
            self.header("access-control-allow-headers"),
            Some("Content-Type")
        );
        assert_eq!(
            self.header("cache-control"),
            Some("no-cache, no-store, must-revalidate")
        );
        assert_eq!(self.header_count("cache-control"), 1);
    }
}

async fn send(addr: SocketAddr, method: &str, path: &str) -> RawResponse {
    let mut stream = TcpStream::connect(("127.0.0.1", addr.port())).await.unwrap();
    let request = format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\nOrigin: http://example.test\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    // The server closes the connection after one response
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    RawResponse::parse(&raw)
}

fn create_root() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("demo.html"), DEMO_HTML).unwrap();
    std::fs::write(tmp.path().join("manifest.json"), "{\"manifest_version\":3}").unwrap();
    tmp
}

/// Run `scenario` against a live server rooted at `root`, then shut it down.
/// Returns the captured access log lines.
async fn with_server<F, Fut>(root: &Path, scenario: F) -> Vec<String>
where
    F: FnOnce(SocketAddr) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    let cfg = Config::load(Some(0), root).unwrap();
    let listener = server::create_listener(cfg.get_socket_addr().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();

    let log = Arc::new(CapturedLog::default());
    let state = Arc::new(AppState::with_access_log(
        &cfg,
        Arc::clone(&log) as Arc<dyn AccessLog>,
    ));

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let local = LocalSet::new();
    local
        .run_until(async move {
            let handle = tokio::task::spawn_local(server::start_server_loop(
                listener,
                state,
                async {
                    let _ = stop_rx.await;
                },
            ));
            scenario(addr).await;
            stop_tx.send(()).unwrap();
            handle.await.unwrap();
        })
        .await;

    let lines = log.0.lock().unwrap().clone();
    lines
}

#[tokio::test]
async fn demo_page_scenario() {
    let root = create_root();
    let lines = with_server(root.path(), |addr| async move {
        let response = send(addr, "GET", "/demo.html").await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, DEMO_HTML.as_bytes());
        assert!(response
            .header("content-type")
            .unwrap()
            .starts_with("text/html"));
        response.assert_cors();

        let response = send(addr, "OPTIONS", "/demo.html").await;
        assert_eq!(response.status, 200);
        assert!(response.body.is_empty());
        response.assert_cors();

        let response = send(addr, "GET", "/missing.html").await;
        assert_eq!(response.status, 404);
        response.assert_cors();
    })
    .await;

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with("\"GET /demo.html HTTP/1.1\" 200 -"));
    assert!(lines[1].contains("\"OPTIONS /demo.html HTTP/1.1\" 200"));
    assert!(lines[2].contains("\"GET /missing.html HTTP/1.1\" 404"));
}

#[tokio::test]
async fn every_method_carries_cors_headers() {
    let root = create_root();
    let lines = with_server(root.path(), |addr| async move {
        let response = send(addr, "HEAD", "/manifest.json").await;
        assert_eq!(response.status, 200);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert!(response.body.is_empty());
        response.assert_cors();

        let response = send(addr, "POST", "/demo.html").await;
        assert_eq!(response.status, 501);
        response.assert_cors();

        let response = send(addr, "OPTIONS", "/does/not/exist").await;
        assert_eq!(response.status, 200);
        response.assert_cors();

        let response = send(addr, "GET", "/").await;
        assert_eq!(response.status, 200);
        assert!(String::from_utf8_lossy(&response.body).contains("demo.html"));
        response.assert_cors();
    })
    .await;

    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|line| line.starts_with('[')));
}

#[tokio::test]
async fn traversal_stays_inside_root() {
    let outer = tempfile::tempdir().unwrap();
    std::fs::write(outer.path().join("secret.txt"), "nope").unwrap();
    let root = outer.path().join("site");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("demo.html"), DEMO_HTML).unwrap();

    with_server(&root, |addr| async move {
        let response = send(addr, "GET", "/../secret.txt").await;
        assert_eq!(response.status, 404);
        response.assert_cors();

        let response = send(addr, "GET", "/%2e%2e/secret.txt").await;
        assert_eq!(response.status, 404);
    })
    .await;
}

#[tokio::test]
async fn second_instance_fails_to_bind() {
    let root = create_root();
    let cfg = Config::load(Some(0), root.path()).unwrap();
    let first = server::create_listener(cfg.get_socket_addr().unwrap()).unwrap();
    let port = first.local_addr().unwrap().port();

    let taken = Config::load(Some(port), root.path()).unwrap();
    let second = server::create_listener(taken.get_socket_addr().unwrap());
    assert!(second.is_err());
}
