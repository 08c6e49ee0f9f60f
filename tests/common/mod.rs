#![allow(dead_code)]

use img_optimizer::{OptimizerError, Payload, RawResponse, Result, Transport};
use std::cell::RefCell;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// In-memory transport that records every request and replays canned replies.
pub struct RecordingTransport {
    submit_reply: RefCell<Option<Result<RawResponse>>>,
    default_submit: RawResponse,
    artifact: Option<Vec<u8>>,
    pub submitted: RefCell<Vec<Payload>>,
    pub fetched: RefCell<Vec<String>>,
}

impl RecordingTransport {
    /// Service answers with `dest` and the fetch returns `artifact`.
    pub fn succeeding(dest: &str, artifact: &[u8]) -> Self {
        Self::with_body(200, &format!(r#"{{"dest":"{}"}}"#, dest), Some(artifact))
    }

    /// Service answers with `status` and `body`; fetch fails unless `artifact` is set.
    pub fn with_body(status: u16, body: &str, artifact: Option<&[u8]>) -> Self {
        Self {
            submit_reply: RefCell::new(None),
            default_submit: RawResponse::new(status, body),
            artifact: artifact.map(<[u8]>::to_vec),
            submitted: RefCell::new(Vec::new()),
            fetched: RefCell::new(Vec::new()),
        }
    }

    /// The next submit fails at the transport layer.
    pub fn failing_submit(message: &str) -> Self {
        let transport = Self::with_body(200, "{}", None);
        *transport.submit_reply.borrow_mut() = Some(Err(OptimizerError::transport(
            "submitting image",
            message.to_string(),
        )));
        transport
    }

    pub fn request_count(&self) -> usize {
        self.submitted.borrow().len() + self.fetched.borrow().len()
    }
}

impl Transport for RecordingTransport {
    fn submit(&self, payload: Payload) -> Result<RawResponse> {
        self.submitted.borrow_mut().push(payload);
        match self.submit_reply.borrow_mut().take() {
            Some(reply) => reply,
            None => Ok(self.default_submit.clone()),
        }
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.fetched.borrow_mut().push(url.to_string());
        self.artifact
            .clone()
            .ok_or_else(|| OptimizerError::transport(format!("fetching {}", url), "server status 404"))
    }
}

pub fn create_test_image(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).unwrap().write_all(data).unwrap();
    path
}

/// A tiny JPEG-looking blob: SOI marker, JFIF header and some filler.
pub fn fake_jpeg() -> Vec<u8> {
    let mut buffer = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    buffer.extend_from_slice(b"JFIF\0");
    buffer.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x48, 0x00, 0x48, 0x00, 0x00]);
    buffer.extend(std::iter::repeat(0xFF).take(256));
    buffer.extend_from_slice(&[0xFF, 0xD9]);
    buffer
}
