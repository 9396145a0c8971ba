use serde_json::json;
use tracing::{debug, warn};

/// Frontend paths whose cached pages must be rebuilt after a mutation
pub const REVALIDATE_PATHS: [&str; 5] =
    ["/", "/admin/project", "/archive", "/project", "/api/project"];

/// Notifies the frontend that cached pages for the given paths are stale.
///
/// Notification is fire-and-forget: it must never delay or fail the
/// mutation that triggered it.
#[cfg_attr(test, mockall::automock)]
pub trait RevalidationNotifier: Send + Sync {
    fn notify<'a>(&self, paths: &[&'a str]);
}

/// Webhook endpoint settings for cache revalidation.
///
/// Environment variables:
/// - `REVALIDATE_ENDPOINT` (optional) - URL to POST stale paths to;
///   notifications are skipped when unset
/// - `REVALIDATE_SECRET` (optional) - sent as `x-revalidate-secret`
#[derive(Debug, Clone, Default)]
pub struct RevalidateConfig {
    pub endpoint: Option<String>,
    pub secret: Option<String>,
}

impl RevalidateConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("REVALIDATE_ENDPOINT").ok(),
            secret: std::env::var("REVALIDATE_SECRET").ok(),
        }
    }
}

/// Notifier that POSTs stale paths to the frontend's revalidation webhook
pub struct WebhookRevalidationNotifier {
    client: reqwest::Client,
    config: RevalidateConfig,
}

impl WebhookRevalidationNotifier {
    pub fn new(config: RevalidateConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl RevalidationNotifier for WebhookRevalidationNotifier {
    fn notify(&self, paths: &[&str]) {
        let Some(endpoint) = self.config.endpoint.clone() else {
            debug!("REVALIDATE_ENDPOINT not set, skipping cache revalidation");
            return;
        };

        let payload = json!({ "paths": paths });
        let client = self.client.clone();
        let secret = self.config.secret.clone();

        tokio::spawn(async move {
            let mut request = client.post(&endpoint).json(&payload);
            if let Some(secret) = secret {
                request = request.header("x-revalidate-secret", secret);
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    debug!("Cache revalidation accepted");
                }
                Ok(response) => {
                    warn!(status = %response.status(), "Cache revalidation rejected");
                }
                Err(e) => {
                    warn!(error = %e, "Cache revalidation request failed");
                }
            }
        });
    }
}

/// Notifier that records notified paths, for tests
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    calls: std::sync::Arc<std::sync::Mutex<Vec<Vec<String>>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("notifier mutex poisoned").clone()
    }
}

impl RevalidationNotifier for RecordingNotifier {
    fn notify(&self, paths: &[&str]) {
        self.calls
            .lock()
            .expect("notifier mutex poisoned")
            .push(paths.iter().map(|p| p.to_string()).collect());
    }
}
