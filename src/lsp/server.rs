//! The jlfmt language server.
//!
//! Thin LSP surface over the formatting pipeline: it stores open documents,
//! snapshots configuration per request, shows progress while the external
//! tool runs, and turns pipeline failures into actionable dialogs.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result as JsonRpcResult;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::error::{FormatError, ISSUE_TRACKER_URL, Remediation};
use crate::lsp::types::JlfmtLspConfig;

const INSTALL_ACTION: &str = "Install JuliaFormatter";
const REPORT_ACTION: &str = "Report issue";

pub struct JlfmtLanguageServer {
    client: Client,
    config: Arc<RwLock<JlfmtLspConfig>>,
    /// Open documents, kept to warn when a dirty buffer diverges from disk
    /// (the external tool formats the file on disk, not the buffer).
    documents: Arc<RwLock<HashMap<Url, String>>>,
    progress_seq: AtomicU64,
}

/// Request-scoped progress handle. Created before the external process
/// starts and finished explicitly on every exit path; there is no shared
/// indicator state between requests.
struct FormatProgress {
    token: NumberOrString,
    supported: bool,
}

impl JlfmtLanguageServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            config: Arc::new(RwLock::new(JlfmtLspConfig::default())),
            documents: Arc::new(RwLock::new(HashMap::new())),
            progress_seq: AtomicU64::new(0),
        }
    }

    async fn begin_progress(&self) -> FormatProgress {
        let seq = self.progress_seq.fetch_add(1, Ordering::Relaxed);
        let token = NumberOrString::String(format!("jlfmt-format-{seq}"));

        if self
            .client
            .send_request::<request::WorkDoneProgressCreate>(WorkDoneProgressCreateParams {
                token: token.clone(),
            })
            .await
            .is_err()
        {
            log::debug!("client does not support work done progress");
            return FormatProgress {
                token,
                supported: false,
            };
        }

        self.client
            .send_notification::<notification::Progress>(ProgressParams {
                token: token.clone(),
                value: ProgressParamsValue::WorkDone(WorkDoneProgress::Begin(
                    WorkDoneProgressBegin {
                        title: "Formatting Julia file".to_string(),
                        cancellable: Some(false),
                        message: None,
                        percentage: None,
                    },
                )),
            })
            .await;

        FormatProgress {
            token,
            supported: true,
        }
    }

    async fn finish_progress(&self, progress: FormatProgress) {
        if !progress.supported {
            return;
        }
        self.client
            .send_notification::<notification::Progress>(ProgressParams {
                token: progress.token,
                value: ProgressParamsValue::WorkDone(WorkDoneProgress::End(WorkDoneProgressEnd {
                    message: None,
                })),
            })
            .await;
    }

    /// Warn when the buffer the editor shows differs from the file the
    /// external tool is about to read.
    async fn warn_if_buffer_dirty(&self, uri: &Url, path: &std::path::Path) {
        let documents = self.documents.read().await;
        if let Some(buffer) = documents.get(uri)
            && let Ok(on_disk) = tokio::fs::read_to_string(path).await
            && *buffer != on_disk
        {
            log::warn!("{uri} has unsaved changes; formatting the on-disk content");
        }
    }

    async fn report_failure(&self, error: FormatError, config: &JlfmtLspConfig) {
        log::error!("formatting failed: {error}");

        match error.remediation() {
            Remediation::InstallFormatter => {
                let choice = self
                    .client
                    .show_message_request(
                        MessageType::ERROR,
                        error.to_string(),
                        Some(vec![MessageActionItem {
                            title: INSTALL_ACTION.to_string(),
                            properties: Default::default(),
                        }]),
                    )
                    .await;

                if let Ok(Some(action)) = choice
                    && action.title == INSTALL_ACTION
                {
                    self.install_formatter(config).await;
                }
            }
            Remediation::ReportBug => {
                let choice = self
                    .client
                    .show_message_request(
                        MessageType::ERROR,
                        format!("Formatting failed: {error}"),
                        Some(vec![MessageActionItem {
                            title: REPORT_ACTION.to_string(),
                            properties: Default::default(),
                        }]),
                    )
                    .await;

                if let Ok(Some(action)) = choice
                    && action.title == REPORT_ACTION
                    && let Ok(uri) = Url::parse(ISSUE_TRACKER_URL)
                {
                    let _ = self
                        .client
                        .show_document(ShowDocumentParams {
                            uri,
                            external: Some(true),
                            take_focus: None,
                            selection: None,
                        })
                        .await;
                }
            }
            Remediation::None => {
                self.client
                    .show_message(MessageType::ERROR, error.to_string())
                    .await;
            }
        }
    }

    async fn install_formatter(&self, config: &JlfmtLspConfig) {
        match crate::install_formatter(&config.tool_config()).await {
            Ok(()) => {
                self.client
                    .show_message(
                        MessageType::INFO,
                        "JuliaFormatter installed. Trigger formatting again to use it.",
                    )
                    .await;
            }
            Err(install_error) => {
                // Surfaces the tool's stderr verbatim via the error display.
                self.client
                    .show_message(MessageType::ERROR, install_error.to_string())
                    .await;
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for JlfmtLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> JsonRpcResult<InitializeResult> {
        log::info!("initializing jlfmt language server");

        if let Some(options) = params.initialization_options {
            match serde_json::from_value::<JlfmtLspConfig>(options) {
                Ok(config) => *self.config.write().await = config,
                Err(e) => log::warn!("ignoring malformed initialization options: {e}"),
            }
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                document_formatting_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "jlfmt".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        log::info!("jlfmt language server initialized");
    }

    async fn shutdown(&self) -> JsonRpcResult<()> {
        log::info!("shutting down jlfmt language server");
        Ok(())
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        // Some clients nest the settings under the server's section name.
        let value = params
            .settings
            .get("jlfmt")
            .cloned()
            .unwrap_or(params.settings);

        match serde_json::from_value::<JlfmtLspConfig>(value) {
            Ok(config) => {
                log::debug!("configuration updated");
                *self.config.write().await = config;
            }
            Err(e) => log::warn!("ignoring malformed configuration update: {e}"),
        }
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.documents
            .write()
            .await
            .insert(params.text_document.uri, params.text_document.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // FULL sync: the last change carries the whole document.
        if let Some(change) = params.content_changes.into_iter().next_back() {
            self.documents
                .write()
                .await
                .insert(params.text_document.uri, change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.write().await.remove(&params.text_document.uri);
    }

    async fn formatting(
        &self,
        params: DocumentFormattingParams,
    ) -> JsonRpcResult<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;
        let Ok(path) = uri.to_file_path() else {
            log::warn!("cannot format non-file document {uri}");
            return Ok(None);
        };

        // Snapshot: a settings change between edits affects the next
        // request, never one in flight.
        let config = self.config.read().await.clone();
        self.warn_if_buffer_dirty(&uri, &path).await;

        let progress = self.begin_progress().await;
        let result = crate::format_to_edits(
            &path.to_string_lossy(),
            &config.tool_config(),
            &config.format,
        )
        .await;
        self.finish_progress(progress).await;

        match result {
            Ok(edits) => {
                log::info!("formatting produced {} edit(s) for {uri}", edits.len());
                Ok(Some(edits))
            }
            Err(error) => {
                self.report_failure(error, &config).await;
                Ok(None)
            }
        }
    }
}
