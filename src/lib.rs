//! MetricsQL function signatures, highlight categories and language server.

use std::sync::{Arc, OnceLock};

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService};
use tracing::{debug, info};

mod document;
pub mod highlight;
mod lsp;
pub mod settings;
pub mod types;

pub use document::{DocumentState, LineIndex};
pub use highlight::{classify, HighlightCategory};
pub use lsp::{
    completion_at_position, hover_at_position, legend, signature_help_at_position,
    tokens_for_spans,
};
pub use settings::{discover_settings, load_settings, try_load_settings, Settings, SettingsError};
pub use types::{
    check_call, is_bypassed, lookup_signature, signature_by_name, CallError, FunctionId,
    FunctionSignature, OptionalArgs, TokenId, ValueType, Variadic,
};

use document::DocumentStore;

pub struct Backend {
    client: Client,
    documents: DocumentStore,
    settings: OnceLock<Arc<Settings>>,
}

impl Backend {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            settings: OnceLock::new(),
        }
    }

    fn settings(&self) -> Arc<Settings> {
        self.settings
            .get_or_init(|| Arc::new(Settings::default()))
            .clone()
    }

    fn on_document_change(&self, uri: Url, text: String, version: i32) {
        let state = self.documents.open(uri.clone(), text, version);
        debug!(%uri, version = state.version, "document updated");
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let workspace_root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|f| f.uri.to_file_path().ok())
            .or_else(|| {
                #[allow(deprecated)]
                params.root_uri.as_ref()?.to_file_path().ok()
            });

        if let Some(root) = workspace_root {
            let (settings, settings_dir) = settings::discover_settings(&root);
            info!(
                root = %root.display(),
                settings_dir = %settings_dir.display(),
                optional_args = ?settings.optional_args(),
                "workspace settings resolved"
            );
            let _ = self.settings.set(Arc::new(settings));
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec!["(".to_string()]),
                    resolve_provider: Some(false),
                    ..Default::default()
                }),
                signature_help_provider: Some(SignatureHelpOptions {
                    trigger_characters: Some(vec!["(".to_string(), ",".to_string()]),
                    retrigger_characters: None,
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("MetricsQL language server initialized");
        self.client
            .log_message(MessageType::INFO, "MetricsQL language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!(open_documents = self.documents.len(), "shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.on_document_change(
            params.text_document.uri,
            params.text_document.text,
            params.text_document.version,
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // FULL sync: the single change carries the whole text
        if let Some(change) = params.content_changes.into_iter().next() {
            self.on_document_change(
                params.text_document.uri,
                change.text,
                params.text_document.version,
            );
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.close(&params.text_document.uri);
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(doc) = self.documents.get(uri) else {
            return Ok(None);
        };

        Ok(lsp::hover_at_position(
            &doc.line_index,
            position,
            self.settings().optional_args(),
        ))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some(doc) = self.documents.get(uri) else {
            debug!(%uri, "completion requested for unknown document");
            return Ok(None);
        };

        Ok(lsp::completion_at_position(
            &doc.line_index,
            position,
            &self.settings(),
        ))
    }

    async fn signature_help(&self, params: SignatureHelpParams) -> Result<Option<SignatureHelp>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(doc) = self.documents.get(uri) else {
            return Ok(None);
        };

        Ok(lsp::signature_help_at_position(
            &doc.line_index,
            position,
            self.settings().optional_args(),
        ))
    }
}

pub fn create_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::new(Backend::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_can_be_created() {
        let (_service, _socket) = create_service();
    }
}
