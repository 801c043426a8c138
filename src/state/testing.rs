// Test helpers for feed state.
// A scripted PhotoSource and page builders.

use std::collections::VecDeque;
use std::future::{Future, ready};
use std::sync::{Arc, Mutex};

use crate::error::{Result, ShutterError};
use crate::flickr::{ImageDescriptor, PhotoPage, PhotoRequest, PhotoSource};

/// Build a page whose descriptors are `{id}_s` / `http://x/{id}.jpg`.
pub fn page_of(ids: &[&str], total_pages: u32) -> PhotoPage {
    PhotoPage {
        images: ids
            .iter()
            .map(|id| ImageDescriptor::new(format!("{id}_s"), format!("http://x/{id}.jpg")))
            .collect(),
        page: 1,
        total_pages,
    }
}

/// Answers requests from a queue of canned results and records what was asked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    responses: Arc<Mutex<VecDeque<Result<PhotoPage>>>>,
    requests: Arc<Mutex<Vec<PhotoRequest>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, page: PhotoPage) {
        self.responses.lock().unwrap().push_back(Ok(page));
    }

    pub fn push_err(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ShutterError::Other(message.to_string())));
    }

    pub fn requests(&self) -> Vec<PhotoRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PhotoSource for ScriptedSource {
    fn fetch(&self, request: &PhotoRequest) -> impl Future<Output = Result<PhotoPage>> + Send {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ShutterError::Other("no scripted response".to_string())));
        ready(next)
    }
}
