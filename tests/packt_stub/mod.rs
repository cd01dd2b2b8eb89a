use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde_json::Value;

pub const FREE_LEARNING_HTML: &str = include_str!("../fixtures/free_learning.html");

#[derive(Debug, Clone)]
pub struct StubConfig {
    pub page_status: u16,
    pub page_body: String,
    pub slack_reply: String,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            page_status: 200,
            page_body: FREE_LEARNING_HTML.to_owned(),
            slack_reply: r#"{"ok":true,"channel":"C123","ts":"1546300800.000100"}"#.to_owned(),
        }
    }
}

/// Serves the offer page at `/free-learning` and a fake Slack Web API under
/// `/api`. Every posted Slack body is forwarded to `posts`.
pub struct PacktStub {
    pub page_url: String,
    pub slack_api: String,
    pub posts: mpsc::Receiver<Value>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl PacktStub {
    pub fn spawn(config: StubConfig) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start packt stub server");
        let addr = server.server_addr();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let (posts_tx, posts) = mpsc::channel::<Value>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let mut request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let method = request.method().clone();
                let path = request.url().to_string();
                let response = match (method, path.as_str()) {
                    (tiny_http::Method::Get, "/free-learning") => {
                        tiny_http::Response::from_string(config.page_body.clone())
                            .with_status_code(config.page_status)
                    }
                    (tiny_http::Method::Post, "/api/chat.postMessage") => {
                        let mut body = String::new();
                        if request.as_reader().read_to_string(&mut body).is_err() {
                            let _ = request.respond(
                                tiny_http::Response::from_string("invalid request body")
                                    .with_status_code(400),
                            );
                            continue;
                        }
                        let _ = posts_tx.send(serde_json::from_str(&body).unwrap_or_default());
                        tiny_http::Response::from_string(config.slack_reply.clone())
                    }
                    _ => tiny_http::Response::from_string("not found").with_status_code(404),
                };
                let _ = request.respond(response);
            }
        });

        Self {
            page_url: format!("http://{addr}/free-learning"),
            slack_api: format!("http://{addr}/api"),
            posts,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for PacktStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
