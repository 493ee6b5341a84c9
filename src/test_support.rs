// src/test_support.rs
// =============================================================================
// A throwaway HTTP server for tests.
//
// An axum Router bound to 127.0.0.1:0 answers from a fixed route table and
// records the requests it saw. Unknown paths get a 404. Routes can delay
// their response, stream the body slowly, or break the body halfway.
// Only compiled for tests.
// =============================================================================

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::Response;
use axum::Router;
use futures::stream;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
enum RouteBody {
    Full(String),
    // Sent after a pause, once the headers are out
    Slow(String, Duration),
    // First chunk, then the connection is cut
    Broken(String),
}

#[derive(Debug, Clone)]
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    body: RouteBody,
    delay: Option<Duration>,
}

impl Route {
    pub fn new(path: &'static str, status: u16) -> Self {
        Self {
            path,
            status,
            headers: Vec::new(),
            body: RouteBody::Full(String::new()),
            delay: None,
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = RouteBody::Full(body.into());
        self
    }

    /// Waits before sending anything
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sends the headers at once and the body after `pause`
    pub fn slow_body(mut self, body: impl Into<String>, pause: Duration) -> Self {
        self.body = RouteBody::Slow(body.into(), pause);
        self
    }

    /// Sends `start` and then aborts the response
    pub fn broken_body(mut self, start: impl Into<String>) -> Self {
        self.body = RouteBody::Broken(start.into());
        self
    }
}

struct ServerState {
    routes: Vec<Route>,
    requests: Mutex<Vec<String>>,
}

pub struct TestServer {
    pub addr: SocketAddr,
    state: Arc<ServerState>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Requests seen so far, as "METHOD /path?query"
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl std::fmt::Display for TestServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.addr)
    }
}

async fn respond(State(state): State<Arc<ServerState>>, method: Method, uri: Uri) -> Response {
    state.requests.lock().unwrap().push(format!("{} {}", method, uri));

    let Some(route) = state.routes.iter().find(|r| r.path == uri.path()).cloned() else {
        return Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("not found"))
            .unwrap();
    };

    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }

    let body = match route.body {
        RouteBody::Full(text) => Body::from(text),
        RouteBody::Slow(text, pause) => Body::from_stream(stream::once(async move {
            tokio::time::sleep(pause).await;
            Ok::<_, std::io::Error>(Bytes::from(text))
        })),
        RouteBody::Broken(start) => Body::from_stream(stream::iter(vec![
            Ok(Bytes::from(start)),
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "cut")),
        ])),
    };

    let mut response = Response::builder().status(route.status);
    for (name, value) in &route.headers {
        response = response.header(*name, value.as_str());
    }
    response.body(body).unwrap()
}

/// Starts a server for the given routes
pub async fn serve(routes: Vec<Route>) -> TestServer {
    let state = Arc::new(ServerState {
        routes,
        requests: Mutex::new(Vec::new()),
    });
    let app = Router::new().fallback(respond).with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    TestServer { addr, state }
}

/// An address nothing listens on, for connection failures
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind listener");
    listener.local_addr().expect("local addr")
}
