#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use reqwest::Url;
use serde_json::Value;
use sie_banxico::{SieError, Transport};

pub const FIXTURE_SF311408: &str = include_str!("../fixtures/sf311408_range.json");

pub fn fixture() -> Value {
    serde_json::from_str(FIXTURE_SF311408).expect("fixture is valid json")
}

/// Transport that records every URL and answers with a fixed document.
pub struct StubTransport {
    pub urls: RefCell<Vec<Url>>,
    response: Value,
}

impl StubTransport {
    pub fn new(response: Value) -> Self {
        Self {
            urls: RefCell::new(Vec::new()),
            response,
        }
    }

    pub fn calls(&self) -> usize {
        self.urls.borrow().len()
    }

    pub fn last_url(&self) -> Url {
        self.urls.borrow().last().cloned().expect("at least one request")
    }
}

impl Transport for StubTransport {
    fn get_json(&self, url: &Url) -> Result<Value, SieError> {
        self.urls.borrow_mut().push(url.clone());
        Ok(self.response.clone())
    }
}

/// One-shot HTTP server on localhost.
///
/// Serves a single response and reports the request line (e.g.
/// `GET /v1/series/SF1/datos?token=... HTTP/1.1`) on the returned channel.
pub fn serve_once(status_line: &'static str, body: String) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind localhost");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("read request line");
        loop {
            let mut header = String::new();
            let n = reader.read_line(&mut header).expect("read header");
            if n == 0 || header == "\r\n" {
                break;
            }
        }
        tx.send(request_line.trim_end().to_string()).ok();

        let mut stream = stream;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
        stream.flush().ok();
    });

    (format!("http://{addr}/SieAPIRest/service/v1"), rx)
}
