//! Open document tracking for the MetricsQL language server.

use std::sync::Arc;

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

use super::text::LineIndex;

/// A query document as last sent by the client.
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub line_index: LineIndex,
    /// Document version from the client.
    pub version: i32,
}

impl DocumentState {
    pub fn new(source: String, version: i32) -> Self {
        Self {
            line_index: LineIndex::new(source),
            version,
        }
    }

    /// Full document text.
    pub fn source(&self) -> &str {
        self.line_index.source()
    }
}

/// Thread-safe storage for open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<DocumentState>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open or replace a document. Older versions than the stored one are ignored.
    pub fn open(&self, uri: Url, source: String, version: i32) -> Arc<DocumentState> {
        let mut entry = self
            .documents
            .entry(uri)
            .or_insert_with(|| Arc::new(DocumentState::new(String::new(), i32::MIN)));
        if version >= entry.version {
            *entry = Arc::new(DocumentState::new(source, version));
        }
        Arc::clone(&entry)
    }

    /// Forget a document.
    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Snapshot of a document; later edits do not affect the returned state.
    pub fn get(&self, uri: &Url) -> Option<Arc<DocumentState>> {
        self.documents.get(uri).map(|r| Arc::clone(&r))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
