use std::net::TcpListener;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use procalyx_notify::configuration::get_configuration;
use procalyx_notify::fallback::FallbackStore;
use procalyx_notify::fallback::StoredSubmission;
use procalyx_notify::social::SocialConfig;
use procalyx_notify::startup::Application;
use procalyx_notify::submission::SubmitOutcome;
use procalyx_notify::telemetry::get_subscriber;
use procalyx_notify::telemetry::init_subscriber;
use tempfile::TempDir;
use wiremock::MockServer;

/// Init a static subscriber once for the whole test binary.
///
/// To opt in to verbose logging, use the env var `TEST_LOG`:
///
/// ```sh
///      TEST_LOG=true cargo test [test_name] | bunyan
/// ```
static TRACING: Lazy<()> = Lazy::new(|| {
    // the two sinks are distinct closure types, hence the duplicated arms
    match std::env::var("TEST_LOG") {
        Ok(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::stdout);
            init_subscriber(subscriber);
        }
        Err(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::sink);
            init_subscriber(subscriber);
        }
    };
});

pub struct TestApp {
    /// Stands in for the notify API.
    pub notify_api: MockServer,
    app: Application,
    store: FallbackStore,
    /// Holds the fallback store and the social document; deleted on drop.
    _dir: TempDir,
}

impl TestApp {
    /// Run one submission end to end, exactly as a line of input would.
    pub async fn submit(
        &self,
        raw_email: &str,
    ) -> SubmitOutcome {
        self.app.controller().submit(raw_email).await
    }

    /// Everything the fallback store currently holds.
    pub fn queued(&self) -> Vec<StoredSubmission> {
        self.store.pending().unwrap()
    }

    pub fn store_path(&self) -> PathBuf { self.store.path() }

    pub fn social(&self) -> &SocialConfig { self.app.social() }
}

/// Spawn a `TestApp` wired to a fresh mock API and a fresh temp directory.
pub async fn spawn_app() -> TestApp { spawn_inner(None, None).await }

/// Like `spawn_app`, but with `document` on disk where the social config is
/// loaded from.
pub async fn spawn_app_with_social(document: &str) -> TestApp {
    spawn_inner(None, Some(document)).await
}

/// Like `spawn_app`, but the notify API address points at a port nothing
/// listens on, so every delivery fails at the transport level.
pub async fn spawn_unreachable_app() -> TestApp { spawn_inner(Some(dead_url()), None).await }

async fn spawn_inner(
    base_url: Option<String>,
    social_document: Option<&str>,
) -> TestApp {
    // init the tracing subscriber once only
    Lazy::force(&TRACING);

    let notify_api = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let social_path = dir.path().join("config.json");
    if let Some(document) = social_document {
        std::fs::write(&social_path, document).unwrap();
    }

    let cfg = {
        let mut cfg = get_configuration().unwrap();
        cfg.notify.base_url = base_url.unwrap_or_else(|| notify_api.uri());
        // keep the transport-failure tests fast
        cfg.notify.timeout_milliseconds = 500;
        cfg.fallback.dir = dir.path().join("fallback");
        cfg.social.config_path = social_path;
        cfg
    };

    let store = cfg.fallback.store();
    let app = Application::build(cfg).unwrap();

    TestApp {
        notify_api,
        app,
        store,
        _dir: dir,
    }
}

/// Bind to a random port, then free it; nothing listens there afterwards.
fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
