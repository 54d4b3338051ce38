//! Homework watch - review status watcher
//!
//! Polls the Practicum homework API, detects review status changes, and
//! reports them to a Telegram chat.

pub mod config;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod io;
pub mod notifier;
pub mod response;
pub mod state;
pub mod status;
pub mod telegram;

pub use config::{load_config, Config, Credentials};
pub use error::{Result, WatchError};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::engine::{current_epoch_secs, Engine};
use crate::fetcher::{PracticumClient, StatusSource};
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::state::PollState;
use crate::telegram::TelegramNotifier;

/// Assembles a [`Watch`] from configuration, with optional injected collaborators
pub struct WatchBuilder {
    config: Config,
    credentials: Credentials,
    http: Option<Arc<dyn HttpClient>>,
    source: Option<Arc<dyn StatusSource>>,
    notifier: Option<Arc<dyn Notifier>>,
    cancel: Option<CancellationToken>,
}

impl WatchBuilder {
    pub fn new(config: Config, credentials: Credentials) -> Self {
        Self {
            config,
            credentials,
            http: None,
            source: None,
            notifier: None,
            cancel: None,
        }
    }

    /// Use `http` for both the status API and Telegram instead of reqwest
    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_status_source(mut self, source: Arc<dyn StatusSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn build(self) -> Result<Watch> {
        let http: Arc<dyn HttpClient> = match self.http {
            Some(http) => http,
            None => Arc::new(ReqwestHttpClient::with_timeout(Duration::from_secs(
                self.config.request_timeout_seconds,
            ))?),
        };

        let source: Arc<dyn StatusSource> = match self.source {
            Some(source) => source,
            None => Arc::new(PracticumClient::new(
                &self.config.endpoint,
                &self.credentials.practicum_token,
                Arc::clone(&http),
            )),
        };

        let notifier: Arc<dyn Notifier> = match self.notifier {
            Some(notifier) => notifier,
            None => Arc::new(TelegramNotifier::new(
                &self.config.telegram_api_url,
                &self.credentials.telegram_token,
                &self.credentials.telegram_chat_id,
                Arc::clone(&http),
            )),
        };

        let cancel = self.cancel.unwrap_or_default();
        let initial = PollState::new(
            self.config
                .initial_from_date
                .unwrap_or_else(current_epoch_secs),
        );

        tracing::debug!(
            "Built watch: source={:?}, notifier={:?}, from_date={}",
            source,
            notifier,
            initial.watermark
        );

        let engine = Engine::new(source, notifier, &self.config, cancel.clone());

        Ok(Watch {
            engine: Arc::new(engine),
            initial,
            retry_period_seconds: self.config.retry_period_seconds,
            cancel,
        })
    }
}

/// A configured watcher, ready to start polling
pub struct Watch {
    engine: Arc<Engine>,
    initial: PollState,
    retry_period_seconds: u64,
    cancel: CancellationToken,
}

impl Watch {
    /// Token that stops the poll loop when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the poll loop until Ctrl-C, SIGTERM or the cancellation token fires
    pub async fn start(self) -> PollState {
        let cancel_for_signal = self.cancel.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received");
            cancel_for_signal.cancel();
        });

        tracing::info!(
            "Homework watch started, polling every {}s from {}",
            self.retry_period_seconds,
            self.initial.watermark
        );

        let state = self.engine.run(self.initial).await;

        tracing::info!("Homework watch stopped at watermark {}", state.watermark);
        state
    }
}

/// Resolves on Ctrl-C or, on unix, SIGTERM. A listener that cannot be
/// installed is logged and never resolves.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
