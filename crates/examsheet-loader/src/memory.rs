//! In-memory exam source for tests and embedding.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::LoadError;
use crate::source::ExamSource;

/// Serves a fixed document and counts how often it was loaded.
pub struct MemorySource {
    data: Value,
    call_count: AtomicU32,
}

impl MemorySource {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            call_count: AtomicU32::new(0),
        }
    }

    /// Number of `load_raw` calls so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ExamSource for MemorySource {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn load_raw(&self) -> Result<Value, LoadError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.data.clone())
    }
}
