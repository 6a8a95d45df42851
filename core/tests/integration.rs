//! The facade over real HTTP against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port in a background thread,
//! then drives `TodoApi` with its default ureq transport. Timeouts are
//! exercised against a socket that accepts connections and never answers.

use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread;
use std::time::{Duration, Instant};

use todo_client::{ApiError, ClientConfig, Listing, Todo, TodoApi};

fn spawn_server() -> SocketAddr {
    let std_listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn api_for(addr: SocketAddr) -> TodoApi {
    TodoApi::new(ClientConfig::new(format!("http://{addr}")))
}

fn listed(api: &TodoApi) -> Vec<Todo> {
    api.get_all()
        .unwrap()
        .into_todos()
        .expect("server always sends an envelope")
}

#[test]
fn crud_lifecycle() {
    let api = api_for(spawn_server());

    // Step 1: list returns an empty envelope, not a passthrough.
    assert_eq!(api.get_all().unwrap(), Listing::Todos(Vec::new()));

    // Step 2: create returns the raw 201 response.
    let response = api.create("Integration test", false).unwrap();
    assert_eq!(response.status, 201);
    let created: Todo = response.json().unwrap();
    assert_eq!(created.title.as_deref(), Some("Integration test"));
    assert_eq!(created.completed, Some(false));
    let id = created.id.clone();

    // Step 3: list shows it.
    assert_eq!(listed(&api), vec![created.clone()]);

    // Step 4: update replaces both fields.
    let response = api.update_for_id(&id, "Updated title", true).unwrap();
    assert_eq!(response.status, 200);
    let updated: Todo = response.json().unwrap();
    assert_eq!(
        updated,
        Todo::new(id.clone(), "Updated title", true)
    );
    assert_eq!(listed(&api), vec![updated]);

    // Step 5: remove.
    let response = api.remove_for_id(&id).unwrap();
    assert_eq!(response.status, 204);
    assert!(response.body.is_empty());

    // Step 6: remove again, and the 404 surfaces untranslated.
    let err = api.remove_for_id(&id).unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 404, .. }));

    // Step 7: list is empty again.
    assert!(listed(&api).is_empty());
}

#[test]
fn get_fact_returns_server_value_verbatim() {
    let api = api_for(spawn_server());
    let fact = api.get_fact().unwrap();
    assert_eq!(fact, serde_json::json!({"text": mock_server::FALLBACK_FACT}));
}

#[test]
fn non_numeric_id_is_rejected_by_server() {
    let api = api_for(spawn_server());
    let err = api.update_for_id("abc", "x", false).unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[test]
fn independent_calls_run_in_parallel() {
    let api = api_for(spawn_server());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let api = api.clone();
            thread::spawn(move || api.create(format!("todo {i}"), i % 2 == 0).unwrap().status)
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 201);
    }

    let todos = listed(&api);
    assert_eq!(todos.len(), 8);
    let ids: HashSet<String> = todos.iter().map(|t| t.id.to_string()).collect();
    assert_eq!(ids.len(), 8, "ids must be unique");
}

#[test]
fn unset_base_url_fails_in_transport() {
    let api = TodoApi::new(ClientConfig::default());
    let err = api.get_all().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

#[test]
fn connection_refused_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let err = api_for(addr).get_fact().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

#[test]
fn silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });

    let timeout = Duration::from_millis(200);
    let api = TodoApi::new(ClientConfig::new(format!("http://{addr}")).with_timeout(timeout));

    let started = Instant::now();
    let err = api.get_all().unwrap_err();
    assert!(err.is_timeout(), "got {err:?}");
    assert!(started.elapsed() >= timeout);
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn non_utf8_body_still_returns_raw_response() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut content_length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
        }
        let mut body = vec![0; content_length];
        reader.read_exact(&mut body).unwrap();

        let payload = [b'o', b'k', 0xff, 0xfe];
        write!(
            stream,
            "HTTP/1.1 201 Created\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
            payload.len()
        )
        .unwrap();
        stream.write_all(&payload).unwrap();
    });

    let response = api_for(addr).create("binary", false).unwrap();
    assert_eq!(response.status, 201);
    assert!(response.body.starts_with("ok"));
    assert!(response.body.contains('\u{FFFD}'));
}
