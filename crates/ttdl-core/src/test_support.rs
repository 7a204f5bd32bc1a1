//! In-memory transport for unit tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::TransportError;
use crate::transport::{Request, Response, Transport};

#[derive(Clone)]
enum Outcome {
    Respond(Response),
    /// Connection refused.
    Fail,
}

#[derive(Clone)]
struct Scripted {
    delay: Duration,
    outcome: Outcome,
}

#[derive(Default)]
struct Route {
    queue: VecDeque<Scripted>,
    sticky: Option<Scripted>,
}

/// Answers POSTs from per-path scripts and records every request.
///
/// Queued answers are consumed in order; once a path's queue is empty its
/// `respond_always` answer (if any) is reused. Unscripted paths get a 404.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    routes: Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<Request>>,
}

pub(crate) fn json_response(status: u32, value: serde_json::Value) -> Response {
    Response::new(
        status,
        vec![("Content-Type".to_string(), "application/json".to_string())],
        serde_json::to_vec(&value).unwrap(),
    )
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&self, path: &str, scripted: Scripted) {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .queue
            .push_back(scripted);
    }

    pub(crate) fn respond(&self, path: &str, response: Response) {
        self.respond_after(path, Duration::ZERO, response);
    }

    pub(crate) fn respond_after(&self, path: &str, delay: Duration, response: Response) {
        self.push(
            path,
            Scripted {
                delay,
                outcome: Outcome::Respond(response),
            },
        );
    }

    pub(crate) fn respond_always(&self, path: &str, response: Response) {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .sticky = Some(Scripted {
            delay: Duration::ZERO,
            outcome: Outcome::Respond(response),
        });
    }

    pub(crate) fn fail(&self, path: &str) {
        self.push(
            path,
            Scripted {
                delay: Duration::ZERO,
                outcome: Outcome::Fail,
            },
        );
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self, path: &str) -> Option<Scripted> {
        let mut routes = self.routes.lock().unwrap();
        let route = routes.get_mut(path)?;
        route.queue.pop_front().or_else(|| route.sticky.clone())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, request: Request) -> Result<Response, TransportError> {
        let path = request.path.clone();
        self.requests.lock().unwrap().push(request);
        let Some(scripted) = self.next(&path) else {
            return Ok(Response::new(404, vec![], b"not found".to_vec()));
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        match scripted.outcome {
            Outcome::Respond(response) => Ok(response),
            // CURLE_COULDNT_CONNECT
            Outcome::Fail => Err(TransportError::Curl(curl::Error::new(7))),
        }
    }
}
