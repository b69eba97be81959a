//! # LSP Server Command
//!
//! Language Server Protocol server that keeps file headers current from
//! inside the editor.
//!
//! ## Features
//!
//! - **Refresh on save**: `textDocument/willSaveWaitUntil` returns the edit
//!   that regenerates an existing header with the current time.
//! - **Insert command**: `ftheader.insertHeader` inserts or refreshes the
//!   header of a document through `workspace/applyEdit`.
//! - **Auto-insert**: with `auto_insert_on_create` on, files reported by
//!   `workspace/didCreateFiles` get a header.
//! - **Function counter**: C documents report their function count on
//!   open and change.
//!
//! ## Custom Extensions
//!
//! - `ftheader/status`: short-lived status bar message
//! - `ftheader/functionCount`: function count of the current C document
//!
//! ## Usage
//!
//! ```bash
//! ftheader lsp           # Start LSP server (stdio)
//! ftheader lsp --verbose # Start with debug logging
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use dashmap::DashMap;
use ftheader_core::language::is_c_file;
use ftheader_core::{
    EditKind, FunctionCount, HeaderEdit, HeaderError, HeaderSettings, SourceDocument,
    build_insert_edit, build_update_edit, detect, plan_header_edit, timestamp,
};
use log::debug;
use serde::{Deserialize, Serialize};
use tower_lsp::jsonrpc::Result as RpcResult;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

use crate::config::{Config, config_path};
use crate::exit_codes::*;

/// Command inserting or refreshing the header of a document
pub const INSERT_HEADER_COMMAND: &str = "ftheader.insertHeader";

/// Command flipping the auto-insert-on-create flag
pub const TOGGLE_AUTO_INSERT_COMMAND: &str = "ftheader.toggleAutoInsert";

/// How long the client shows a status message
pub const STATUS_TIMEOUT_MS: u64 = 1500;

/// Minimum gap between two "settings missing" warnings
pub const SETTINGS_WARNING_COOLDOWN: Duration = Duration::from_secs(15);

/// Arguments for the LSP command
pub struct LspArgs {
    /// Enable verbose logging to stderr
    pub verbose: bool,
}

/// Transient status bar message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusNotification {
    pub message: String,
    pub timeout_ms: u64,
}

/// Function count of a C document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCountNotification {
    pub uri: String,
    pub count: usize,
    pub over_limit: bool,
    pub label: String,
}

struct StatusNotificationType;

impl tower_lsp::lsp_types::notification::Notification for StatusNotificationType {
    type Params = StatusNotification;
    const METHOD: &'static str = "ftheader/status";
}

struct FunctionCountNotificationType;

impl tower_lsp::lsp_types::notification::Notification for FunctionCountNotificationType {
    type Params = FunctionCountNotification;
    const METHOD: &'static str = "ftheader/functionCount";
}

/// Text and language of a document the client has open
#[derive(Debug, Clone)]
struct OpenDocument {
    text: String,
    language_id: String,
}

/// The ftheader LSP backend
struct HeaderLsp {
    /// LSP client for sending notifications
    client: Client,
    /// Where settings are read from; `None` when no config directory exists
    config_path: Option<PathBuf>,
    /// Open documents, keyed by URI
    documents: DashMap<Url, OpenDocument>,
    /// Most recently opened or edited document
    active_document: Mutex<Option<Url>>,
    /// When the last "settings missing" warning was shown
    last_settings_warning: Mutex<Option<Instant>>,
    /// Enable verbose logging
    verbose: bool,
}

impl HeaderLsp {
    fn new(client: Client, verbose: bool) -> Self {
        Self::with_config_path(client, config_path().ok(), verbose)
    }

    fn with_config_path(client: Client, config_path: Option<PathBuf>, verbose: bool) -> Self {
        if verbose {
            eprintln!("[ftheader-lsp] Config file: {:?}", config_path);
        }
        Self {
            client,
            config_path,
            documents: DashMap::new(),
            active_document: Mutex::new(None),
            last_settings_warning: Mutex::new(None),
            verbose,
        }
    }

    /// Log a debug message if verbose mode is enabled
    fn log_debug(&self, message: &str) {
        if self.verbose {
            eprintln!("[ftheader-lsp] {}", message);
        }
        debug!("{}", message);
    }

    /// Read the configuration fresh, so edits made with `ftheader config`
    /// apply without restarting the server.
    fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config_path {
            Some(path) if path.exists() => Config::load_from(path),
            _ => Ok(Config::default()),
        }
    }

    fn save_config(&self, config: &Config) -> anyhow::Result<()> {
        let path = self
            .config_path
            .as_ref()
            .context("Could not determine config directory")?;
        config.save_to(path)
    }

    /// Validated header settings, or the reason they cannot be used.
    fn settings(&self) -> Result<HeaderSettings, String> {
        let config = self.load_config().map_err(|e| format!("{:#}", e))?;
        let settings = config.header_settings();
        settings.validate().map_err(|e: HeaderError| e.to_string())?;
        Ok(settings)
    }

    /// Warn that settings are missing, at most once per cooldown period.
    async fn warn_missing_settings(&self, reason: &str) {
        let warn = {
            let mut last = self
                .last_settings_warning
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let now = Instant::now();
            let warn = should_warn(*last, now);
            if warn {
                *last = Some(now);
            }
            warn
        };

        log::warn!("Header settings unusable: {}", reason);
        if warn {
            self.client
                .show_message(
                    MessageType::WARNING,
                    format!(
                        "ftheader: {}. Run `ftheader config set --identity <name> --email <address>`.",
                        reason
                    ),
                )
                .await;
        }
    }

    async fn send_status(&self, message: &str) {
        self.client
            .send_notification::<StatusNotificationType>(StatusNotification {
                message: message.to_string(),
                timeout_ms: STATUS_TIMEOUT_MS,
            })
            .await;
    }

    fn set_active(&self, uri: &Url) {
        let mut active = self
            .active_document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *active = Some(uri.clone());
    }

    fn active(&self) -> Option<Url> {
        self.active_document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The document behind `uri`: the editor's copy when open, the file on
    /// disk otherwise.
    async fn document(&self, uri: &Url) -> anyhow::Result<SourceDocument> {
        if let Some(open) = self.documents.get(uri) {
            return Ok(SourceDocument::new(
                document_path(uri),
                open.language_id.as_str(),
                open.text.as_str(),
            ));
        }

        let path = uri
            .to_file_path()
            .map_err(|_| anyhow::anyhow!("{} is not a file URI", uri))?;
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(SourceDocument::from_path(&path, text))
    }

    async fn apply_header_edit(&self, uri: &Url, edit: &HeaderEdit) -> anyhow::Result<()> {
        let mut changes = HashMap::new();
        changes.insert(uri.clone(), vec![to_text_edit(edit)]);
        let response = self
            .client
            .apply_edit(WorkspaceEdit {
                changes: Some(changes),
                ..Default::default()
            })
            .await
            .map_err(|e| anyhow::anyhow!("workspace/applyEdit failed: {}", e))?;

        if !response.applied {
            bail!(
                "client rejected the edit{}",
                response
                    .failure_reason
                    .map(|reason| format!(": {}", reason))
                    .unwrap_or_default()
            );
        }
        Ok(())
    }

    async fn insert_header(&self, uri: Option<Url>) -> RpcResult<Option<serde_json::Value>> {
        let Some(uri) = uri.or_else(|| self.active()) else {
            self.client
                .show_message(MessageType::ERROR, "ftheader: no document to insert a header into")
                .await;
            return Ok(None);
        };

        let settings = match self.settings() {
            Ok(settings) => settings,
            Err(reason) => {
                self.client
                    .show_message(MessageType::ERROR, format!("ftheader: {}", reason))
                    .await;
                return Ok(None);
            }
        };

        let document = match self.document(&uri).await {
            Ok(document) => document,
            Err(e) => {
                self.client
                    .show_message(MessageType::ERROR, format!("ftheader: {:#}", e))
                    .await;
                return Ok(None);
            }
        };

        let edit = plan_header_edit(&document, &settings, &timestamp::now());
        match self.apply_header_edit(&uri, &edit).await {
            Ok(()) => {
                let message = match edit.kind {
                    EditKind::Insert => "header inserted",
                    EditKind::Refresh => "header refreshed",
                };
                self.send_status(message).await;
                Ok(Some(serde_json::json!(edit.kind)))
            }
            Err(e) => {
                log::error!("Failed to apply header edit to {}: {:#}", uri, e);
                self.client
                    .show_message(MessageType::ERROR, format!("ftheader: {:#}", e))
                    .await;
                Ok(None)
            }
        }
    }

    async fn toggle_auto_insert(&self) -> RpcResult<Option<serde_json::Value>> {
        let result = self.load_config().and_then(|mut config| {
            let enabled = config.toggle_auto_insert();
            self.save_config(&config)?;
            Ok(enabled)
        });

        match result {
            Ok(enabled) => {
                let state = if enabled { "on" } else { "off" };
                self.send_status(&format!("auto-insert on create: {}", state))
                    .await;
                Ok(Some(serde_json::Value::Bool(enabled)))
            }
            Err(e) => {
                log::error!("Failed to toggle auto-insert: {:#}", e);
                self.client
                    .show_message(MessageType::ERROR, format!("ftheader: {:#}", e))
                    .await;
                Ok(None)
            }
        }
    }

    /// Header settings for auto-insert, or `None` while it is switched off.
    fn auto_insert_settings(&self) -> anyhow::Result<Option<HeaderSettings>> {
        let config = self.load_config()?;
        if !config.auto_insert_on_create {
            return Ok(None);
        }
        Ok(Some(config.header_settings()))
    }

    /// Insert edit for a freshly created file; `None` when it already has a header.
    async fn created_file_edit(
        &self,
        uri: &Url,
        settings: &HeaderSettings,
        now: &str,
    ) -> anyhow::Result<Option<HeaderEdit>> {
        let document = self.document(uri).await?;
        if detect(&document).is_some() {
            return Ok(None);
        }
        Ok(Some(build_insert_edit(&document, settings, now)))
    }

    /// Insert a header into a freshly created file. Returns false when it
    /// already had one.
    async fn insert_into_created(
        &self,
        uri: &Url,
        settings: &HeaderSettings,
        now: &str,
    ) -> anyhow::Result<bool> {
        let Some(edit) = self.created_file_edit(uri, settings, now).await? else {
            return Ok(false);
        };
        self.apply_header_edit(uri, &edit).await?;
        Ok(true)
    }

    async fn report_function_count(&self, uri: &Url, open: &OpenDocument) {
        if !is_c_file(&open.language_id, uri.path()) {
            return;
        }
        let count = FunctionCount::of(&open.text);
        self.client
            .send_notification::<FunctionCountNotificationType>(FunctionCountNotification {
                uri: uri.to_string(),
                count: count.count,
                over_limit: count.over_limit,
                label: count.label(),
            })
            .await;
    }
}

/// Whether a warning may be shown at `now`, given when the last one was.
fn should_warn(last: Option<Instant>, now: Instant) -> bool {
    match last {
        Some(last) => now.saturating_duration_since(last) >= SETTINGS_WARNING_COOLDOWN,
        None => true,
    }
}

fn document_path(uri: &Url) -> String {
    uri.to_file_path()
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|_| uri.path().to_string())
}

/// Last path segment of a URI, for status messages.
fn file_name(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

fn to_lsp_position(position: ftheader_core::Position) -> Position {
    Position::new(position.line, position.character)
}

fn to_text_edit(edit: &HeaderEdit) -> TextEdit {
    TextEdit {
        range: Range::new(
            to_lsp_position(edit.range.start),
            to_lsp_position(edit.range.end),
        ),
        new_text: edit.new_text.clone(),
    }
}

/// Optional URI passed as the first command argument.
fn command_uri(arguments: &[serde_json::Value]) -> Option<Url> {
    arguments
        .first()
        .and_then(|value| value.as_str())
        .and_then(|raw| Url::parse(raw).ok())
}

fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::FULL),
                will_save: None,
                will_save_wait_until: Some(true),
                save: None,
            },
        )),
        execute_command_provider: Some(ExecuteCommandOptions {
            commands: vec![
                INSERT_HEADER_COMMAND.to_string(),
                TOGGLE_AUTO_INSERT_COMMAND.to_string(),
            ],
            ..Default::default()
        }),
        workspace: Some(WorkspaceServerCapabilities {
            workspace_folders: None,
            file_operations: Some(WorkspaceFileOperationsServerCapabilities {
                did_create: Some(FileOperationRegistrationOptions {
                    filters: vec![FileOperationFilter {
                        scheme: Some("file".to_string()),
                        pattern: FileOperationPattern {
                            glob: "**/*".to_string(),
                            matches: Some(FileOperationPatternKind::File),
                            options: None,
                        },
                    }],
                }),
                ..Default::default()
            }),
        }),
        ..Default::default()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for HeaderLsp {
    async fn initialize(&self, _: InitializeParams) -> RpcResult<InitializeResult> {
        self.log_debug("LSP initialize called");

        Ok(InitializeResult {
            capabilities: server_capabilities(),
            server_info: Some(ServerInfo {
                name: "ftheader-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.log_debug("LSP initialized");

        match self.settings() {
            Ok(settings) => {
                self.client
                    .log_message(
                        MessageType::INFO,
                        format!("ftheader LSP ready ({})", settings.signature()),
                    )
                    .await;
            }
            Err(reason) => self.warn_missing_settings(&reason).await,
        }
    }

    async fn shutdown(&self) -> RpcResult<()> {
        self.log_debug("LSP shutdown");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.log_debug(&format!("Document opened: {}", params.text_document.uri));

        let uri = params.text_document.uri;
        let open = OpenDocument {
            text: params.text_document.text,
            language_id: params.text_document.language_id,
        };
        self.set_active(&uri);
        self.report_function_count(&uri, &open).await;
        self.documents.insert(uri, open);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        self.log_debug(&format!("Document changed: {}", params.text_document.uri));

        let uri = params.text_document.uri;
        // Full sync: the last change holds the whole text.
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };

        let open = match self.documents.get(&uri) {
            Some(existing) => OpenDocument {
                text: change.text,
                language_id: existing.language_id.clone(),
            },
            None => {
                let path = document_path(&uri);
                let language_id = SourceDocument::from_path(Path::new(&path), "")
                    .language_id()
                    .to_string();
                OpenDocument {
                    text: change.text,
                    language_id,
                }
            }
        };
        self.set_active(&uri);
        self.report_function_count(&uri, &open).await;
        self.documents.insert(uri, open);
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.log_debug(&format!("Document closed: {}", params.text_document.uri));
        self.documents.remove(&params.text_document.uri);
    }

    async fn will_save_wait_until(
        &self,
        params: WillSaveTextDocumentParams,
    ) -> RpcResult<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;
        let document = match self.document(&uri).await {
            Ok(document) => document,
            Err(e) => {
                self.log_debug(&format!("No document for {}: {:#}", uri, e));
                return Ok(None);
            }
        };

        // Files without a header are left alone, and must not trigger the
        // missing-settings warning.
        if detect(&document).is_none() {
            return Ok(None);
        }

        let settings = match self.settings() {
            Ok(settings) => settings,
            Err(reason) => {
                self.warn_missing_settings(&reason).await;
                return Ok(None);
            }
        };

        let edit = build_update_edit(&document, &settings, &timestamp::now());
        self.log_debug(&format!("Refreshing header of {}", uri));
        Ok(edit.map(|edit| vec![to_text_edit(&edit)]))
    }

    async fn did_create_files(&self, params: CreateFilesParams) {
        let settings = match self.auto_insert_settings() {
            Ok(Some(settings)) => settings,
            Ok(None) => return,
            Err(e) => {
                log::warn!("Failed to load config: {:#}", e);
                return;
            }
        };
        if let Err(e) = settings.validate() {
            self.warn_missing_settings(&e.to_string()).await;
            return;
        }

        let now = timestamp::now();
        for file in params.files {
            let result = match Url::parse(&file.uri) {
                Ok(uri) => self.insert_into_created(&uri, &settings, &now).await,
                Err(e) => Err(anyhow::anyhow!("invalid URI: {}", e)),
            };
            match result {
                Ok(true) => {
                    self.log_debug(&format!("Inserted header into {}", file.uri));
                    self.send_status(&format!("header inserted in {}", file_name(&file.uri)))
                        .await;
                }
                Ok(false) => self.log_debug(&format!("{} already has a header", file.uri)),
                Err(e) => {
                    log::warn!("Failed to insert header into {}: {:#}", file.uri, e);
                    self.client
                        .log_message(
                            MessageType::WARNING,
                            format!("ftheader: {}: {:#}", file.uri, e),
                        )
                        .await;
                }
            }
        }
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> RpcResult<Option<serde_json::Value>> {
        self.log_debug(&format!("Execute command: {}", params.command));

        match params.command.as_str() {
            INSERT_HEADER_COMMAND => self.insert_header(command_uri(&params.arguments)).await,
            TOGGLE_AUTO_INSERT_COMMAND => self.toggle_auto_insert().await,
            _ => Err(tower_lsp::jsonrpc::Error::method_not_found()),
        }
    }
}

/// Execute the LSP command
///
/// This starts the LSP server and runs until the client disconnects.
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Server ran and shut down cleanly
pub async fn execute(args: LspArgs) -> anyhow::Result<i32> {
    if args.verbose {
        eprintln!("[ftheader-lsp] Starting LSP server");
    }

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::build(|client| HeaderLsp::new(client, args.verbose)).finish();

    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftheader_core::{HeaderSettings, apply_edit};
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;
    use tower_lsp::lsp_types::notification::Notification;

    const CREATED: &str = "2023/01/01 10:00:00";

    fn service_with_config(config: Option<&Config>) -> (LspService<HeaderLsp>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ftheader").join("config.json");
        if let Some(config) = config {
            config.save_to(&path).unwrap();
        }
        let (service, _socket) =
            LspService::new(move |client| HeaderLsp::with_config_path(client, Some(path), false));
        (service, temp_dir)
    }

    fn headed_c_source() -> String {
        let settings = HeaderSettings::new("bob", "bob@example.com");
        let document = SourceDocument::new("/tmp/main.c", "c", "int x;\n");
        let edit = plan_header_edit(&document, &settings, CREATED);
        apply_edit(&document, &edit).unwrap()
    }

    fn open_params(uri: &Url, text: &str) -> DidOpenTextDocumentParams {
        DidOpenTextDocumentParams {
            text_document: TextDocumentItem::new(uri.clone(), "c".to_string(), 1, text.to_string()),
        }
    }

    fn will_save_params(uri: &Url) -> WillSaveTextDocumentParams {
        WillSaveTextDocumentParams {
            text_document: TextDocumentIdentifier::new(uri.clone()),
            reason: TextDocumentSaveReason::MANUAL,
        }
    }

    #[test]
    fn test_should_warn_respects_cooldown() {
        let start = Instant::now();
        assert!(should_warn(None, start));
        assert!(!should_warn(Some(start), start + Duration::from_secs(14)));
        assert!(should_warn(Some(start), start + SETTINGS_WARNING_COOLDOWN));
    }

    #[test]
    fn test_notification_methods() {
        assert_eq!(StatusNotificationType::METHOD, "ftheader/status");
        assert_eq!(FunctionCountNotificationType::METHOD, "ftheader/functionCount");
    }

    #[test]
    fn test_status_notification_serializes_camel_case() {
        let json = serde_json::to_value(StatusNotification {
            message: "header inserted".to_string(),
            timeout_ms: STATUS_TIMEOUT_MS,
        })
        .unwrap();
        assert_eq!(json["timeoutMs"], 1500);
        assert_eq!(json["message"], "header inserted");
    }

    #[test]
    fn test_capabilities_request_will_save_wait_until() {
        let capabilities = server_capabilities();
        match capabilities.text_document_sync {
            Some(TextDocumentSyncCapability::Options(options)) => {
                assert_eq!(options.will_save_wait_until, Some(true));
                assert_eq!(options.change, Some(TextDocumentSyncKind::FULL));
            }
            other => panic!("unexpected sync capability: {:?}", other),
        }
        let commands = capabilities.execute_command_provider.unwrap().commands;
        assert!(commands.contains(&INSERT_HEADER_COMMAND.to_string()));
        assert!(commands.contains(&TOGGLE_AUTO_INSERT_COMMAND.to_string()));
        let did_create = capabilities
            .workspace
            .and_then(|w| w.file_operations)
            .and_then(|f| f.did_create);
        assert!(did_create.is_some());
    }

    #[test]
    fn test_command_uri_parsing() {
        let args = vec![serde_json::json!("file:///tmp/main.c")];
        assert_eq!(
            command_uri(&args).map(|u| u.to_string()),
            Some("file:///tmp/main.c".to_string())
        );
        assert_eq!(command_uri(&[]), None);
        assert_eq!(command_uri(&[serde_json::json!(42)]), None);
    }

    #[test]
    fn test_to_text_edit_copies_range() {
        let edit = HeaderEdit {
            kind: EditKind::Refresh,
            range: ftheader_core::TextRange::new(
                ftheader_core::Position::new(1, 0),
                ftheader_core::Position::new(11, 80),
            ),
            new_text: "x".to_string(),
        };
        let text_edit = to_text_edit(&edit);
        assert_eq!(text_edit.range.start, Position::new(1, 0));
        assert_eq!(text_edit.range.end, Position::new(11, 80));
        assert_eq!(text_edit.new_text, "x");
    }

    #[tokio::test]
    #[serial]
    async fn test_will_save_refreshes_existing_header() {
        let config = Config::new("ada", "ada@example.com");
        let (service, _dir) = service_with_config(Some(&config));
        let backend = service.inner();
        let uri = Url::parse("file:///tmp/main.c").unwrap();

        backend.did_open(open_params(&uri, &headed_c_source())).await;
        let edits = backend
            .will_save_wait_until(will_save_params(&uri))
            .await
            .unwrap()
            .expect("refresh edit");

        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].range.start, Position::new(0, 0));
        assert!(edits[0].new_text.contains(&format!("Created: {} by bob", CREATED)));
        assert!(edits[0].new_text.contains("by ada"));
    }

    #[tokio::test]
    #[serial]
    async fn test_will_save_without_header_returns_nothing() {
        let config = Config::new("ada", "ada@example.com");
        let (service, _dir) = service_with_config(Some(&config));
        let backend = service.inner();
        let uri = Url::parse("file:///tmp/bare.c").unwrap();

        backend.did_open(open_params(&uri, "int x;\n")).await;
        let edits = backend.will_save_wait_until(will_save_params(&uri)).await.unwrap();
        assert!(edits.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_will_save_without_settings_returns_nothing() {
        let (service, _dir) = service_with_config(None);
        let backend = service.inner();
        let uri = Url::parse("file:///tmp/main.c").unwrap();

        backend.did_open(open_params(&uri, &headed_c_source())).await;
        let edits = backend.will_save_wait_until(will_save_params(&uri)).await.unwrap();
        assert!(edits.is_none());
        assert!(backend.last_settings_warning.lock().unwrap().is_some());
    }

    #[tokio::test]
    #[serial]
    async fn test_toggle_auto_insert_persists() {
        let (service, dir) = service_with_config(Some(&Config::new("ada", "ada@example.com")));
        let backend = service.inner();

        let result = backend
            .execute_command(ExecuteCommandParams {
                command: TOGGLE_AUTO_INSERT_COMMAND.to_string(),
                arguments: vec![],
                work_done_progress_params: Default::default(),
            })
            .await
            .unwrap();
        assert_eq!(result, Some(serde_json::Value::Bool(true)));

        let saved = Config::load_from(&dir.path().join("ftheader").join("config.json")).unwrap();
        assert!(saved.auto_insert_on_create);
    }

    #[tokio::test]
    #[serial]
    async fn test_unknown_command_is_rejected() {
        let (service, _dir) = service_with_config(None);
        let result = service
            .inner()
            .execute_command(ExecuteCommandParams {
                command: "ftheader.unknown".to_string(),
                arguments: vec![],
                work_done_progress_params: Default::default(),
            })
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_file_name_takes_last_segment() {
        assert_eq!(file_name("file:///tmp/src/main.c"), "main.c");
        assert_eq!(file_name("untitled"), "untitled");
    }

    #[tokio::test]
    #[serial]
    async fn test_auto_insert_off_leaves_created_file_alone() {
        let (service, dir) = service_with_config(Some(&Config::new("ada", "ada@example.com")));
        let backend = service.inner();
        let path = dir.path().join("fresh.c");
        fs::write(&path, "int x;\n").unwrap();
        let uri = Url::from_file_path(&path).unwrap();

        assert!(backend.auto_insert_settings().unwrap().is_none());
        backend
            .did_create_files(CreateFilesParams {
                files: vec![FileCreate {
                    uri: uri.to_string(),
                }],
            })
            .await;
        assert_eq!(fs::read_to_string(&path).unwrap(), "int x;\n");
        assert!(backend.last_settings_warning.lock().unwrap().is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_created_file_with_header_is_skipped() {
        let mut config = Config::new("ada", "ada@example.com");
        config.toggle_auto_insert();
        let (service, dir) = service_with_config(Some(&config));
        let backend = service.inner();
        let path = dir.path().join("main.c");
        fs::write(&path, headed_c_source()).unwrap();
        let uri = Url::from_file_path(&path).unwrap();

        let settings = backend.auto_insert_settings().unwrap().expect("auto-insert enabled");
        let inserted = backend
            .insert_into_created(&uri, &settings, "2024/01/01 00:00:00")
            .await
            .unwrap();
        assert!(!inserted);
        assert_eq!(fs::read_to_string(&path).unwrap(), headed_c_source());
    }

    #[tokio::test]
    #[serial]
    async fn test_created_bare_file_gets_insert_edit() {
        let mut config = Config::new("ada", "ada@example.com");
        config.toggle_auto_insert();
        let (service, dir) = service_with_config(Some(&config));
        let backend = service.inner();
        let path = dir.path().join("fresh.c");
        fs::write(&path, "int x;\n").unwrap();
        let uri = Url::from_file_path(&path).unwrap();

        let settings = backend.auto_insert_settings().unwrap().unwrap();
        let edit = backend
            .created_file_edit(&uri, &settings, "2024/01/01 00:00:00")
            .await
            .unwrap()
            .expect("insert edit");
        assert_eq!(edit.kind, EditKind::Insert);
        assert_eq!(edit.range.start, ftheader_core::Position::new(0, 0));
        assert!(edit.new_text.contains("Created: 2024/01/01 00:00:00 by ada"));
    }

    #[tokio::test]
    #[serial]
    async fn test_document_falls_back_to_disk() {
        let (service, dir) = service_with_config(None);
        let path = dir.path().join("tool.py");
        fs::write(&path, "#!/usr/bin/env python3\nprint('hi')\n").unwrap();
        let uri = Url::from_file_path(&path).unwrap();

        let document = service.inner().document(&uri).await.unwrap();
        assert_eq!(document.language_id(), "python");
        assert_eq!(document.file_name(), "tool.py");
    }
}
