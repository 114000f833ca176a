//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto efímero, con el
//! contenido estático en un directorio temporal.

use session_http_server::config::Config;
use session_http_server::server::{Server, ShutdownHandle};
use session_http_server::session::SessionStore;
use std::fs;
use std::io::{Read, Write};
use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const INDEX: &str = "<html><body>Hola {{name}}!</body></html>";

/// Servidor corriendo en background mientras dure el test
struct TestServer {
    addr: SocketAddr,
    sessions: Arc<SessionStore>,
    shutdown: ShutdownHandle,
    handle: Option<JoinHandle<Server>>,
    _assets: tempfile::TempDir,
}

impl TestServer {
    fn start(idle_timeout_secs: u64) -> Self {
        let assets = tempfile::tempdir().expect("tempdir");
        fs::write(assets.path().join("index.html"), INDEX).unwrap();
        fs::write(assets.path().join("about.html"), "<p>{{name}} / {{name}}</p>").unwrap();

        let config = Config {
            port: 0,
            idle_timeout_secs,
            assets_dir: assets.path().to_string_lossy().into_owned(),
            ..Config::default()
        };

        let mut server = Server::new(config);
        let addr = server.bind().expect("bind");
        let sessions = Arc::clone(server.sessions());
        let shutdown = server.shutdown_handle();

        let handle = thread::spawn(move || {
            server.run().expect("run");
            server
        });

        Self {
            addr,
            sessions,
            shutdown,
            handle: Some(handle),
            _assets: assets,
        }
    }

    /// Envía bytes crudos y retorna todo lo que respondió el servidor
    fn send_raw(&self, raw: &[u8]) -> String {
        let mut stream = TcpStream::connect(self.addr).expect("connect");
        stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        stream.write_all(raw).unwrap();
        stream.flush().unwrap();

        let mut response = Vec::new();
        stream.read_to_end(&mut response).unwrap();
        String::from_utf8_lossy(&response).into_owned()
    }

    fn get(&self, path: &str) -> String {
        self.send_raw(format!("GET {} HTTP/1.1\r\nHost: localhost\r\n\r\n", path).as_bytes())
    }

    fn post(&self, path: &str, body: &str) -> String {
        let request = format!(
            "POST {} HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\n\r\n{}",
            path,
            body.len(),
            body
        );
        self.send_raw(request.as_bytes())
    }

    fn wait_stopped(mut self) -> Server {
        self.handle.take().unwrap().join().expect("server thread")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Helper: extrae el body de una response HTTP
fn extract_body(response: &str) -> &str {
    match response.find("\r\n\r\n") {
        Some(pos) => &response[pos + 4..],
        None => "",
    }
}

#[test]
fn test_root_serves_index() {
    let server = TestServer::start(30);

    let root = server.get("/");
    let index = server.get("/index.html");

    assert!(root.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", root);
    assert!(root.contains("Content-Type: text/html\r\n"));
    assert_eq!(extract_body(&root), "<html><body>Hola !</body></html>");
    assert_eq!(extract_body(&root), extract_body(&index));
}

#[test]
fn test_content_length_matches_body() {
    let server = TestServer::start(30);
    server.post("/change_name", "name=José");

    let response = server.get("/");
    let body = extract_body(&response);

    assert!(response.contains(&format!("Content-Length: {}\r\n", body.len())));
    assert!(body.contains("José"));
}

#[test]
fn test_change_name_flow() {
    let server = TestServer::start(30);

    let response = server.post("/change_name", "name=Alice");
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(extract_body(&response), "<html><body>Name updated to Alice</body></html>");

    assert_eq!(extract_body(&server.get("/")), "<html><body>Hola Alice!</body></html>");
    assert_eq!(extract_body(&server.get("/about.html")), "<p>Alice / Alice</p>");
    assert_eq!(
        server.sessions.get(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        Some("Alice".to_string())
    );
}

#[test]
fn test_other_address_is_not_affected() {
    let server = TestServer::start(30);
    server.post("/change_name", "name=Alice");

    let other = IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3));
    assert_eq!(server.sessions.get(other), None);
    assert_eq!(server.sessions.len(), 1);
}

#[test]
fn test_bad_forms_are_rejected() {
    let server = TestServer::start(30);

    for body in ["Alice", "user=Alice", "name="] {
        let response = server.post("/change_name", body);
        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"), "body {:?}: {}", body, response);
        assert_eq!(extract_body(&response), "Name not provided");
    }

    assert!(server.sessions.is_empty());
}

#[test]
fn test_unknown_post_endpoint() {
    let server = TestServer::start(30);

    let response = server.post("/unknown", "name=Alice");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert_eq!(extract_body(&response), "Endpoint not found");
    assert!(server.sessions.is_empty());
}

#[test]
fn test_missing_file() {
    let server = TestServer::start(30);

    let response = server.get("/missing.html");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(!response.contains("Content-Length"));
    assert_eq!(extract_body(&response), "File not found");
}

#[test]
fn test_path_traversal_is_not_found() {
    let server = TestServer::start(30);

    let response = server.get("/../../etc/passwd");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[test]
fn test_unsupported_method() {
    let server = TestServer::start(30);

    let response = server.send_raw(b"DELETE /anything HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
    assert!(extract_body(&response).contains("DELETE"));
}

#[test]
fn test_malformed_request_line_gets_no_response() {
    let server = TestServer::start(30);

    assert_eq!(server.send_raw(b"GET /index.html\r\n\r\n"), "");
    assert_eq!(server.send_raw(b"GET / HTTP/1.1 extra\r\n\r\n"), "");
    assert_eq!(server.send_raw(b"\r\n\r\n"), "");

    // El servidor sigue atendiendo después de los requests inválidos
    assert!(server.get("/").starts_with("HTTP/1.1 200 OK"));
}

#[test]
fn test_concurrent_clients() {
    let server = Arc::new(TestServer::start(30));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let server = Arc::clone(&server);
            thread::spawn(move || server.get("/"))
        })
        .collect();

    for handle in handles {
        let response = handle.join().unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    }
}

#[test]
fn test_idle_timeout_releases_socket() {
    let server = TestServer::start(1);
    let addr = server.addr;
    let started = Instant::now();

    assert!(server.get("/").starts_with("HTTP/1.1 200 OK"));

    let stopped = server.wait_stopped();

    assert!(started.elapsed() >= Duration::from_secs(1));
    assert_eq!(stopped.local_addr(), None);
    assert!(TcpStream::connect(addr).is_err());
}
