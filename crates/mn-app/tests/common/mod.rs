#![allow(dead_code)]

use std::sync::{Arc, Once};
use std::time::Duration;

use mn_app::{App, AppDeps};
use mn_core::auth::SignUpForm;
use mn_core::ports::LaunchFlagPort;
use mn_core::Route;
use mn_infra::{FileLaunchFlagRepository, InMemoryBackend, RecordingNavigator, SystemClock};
use tempfile::TempDir;

pub const EMAIL: &str = "test@example.com";
pub const PASSWORD: &str = "ValidPass1!";

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub struct Harness {
    pub app: App,
    pub backend: Arc<InMemoryBackend>,
    pub navigator: Arc<RecordingNavigator>,
    _data_dir: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_backend(InMemoryBackend::new())
    }

    pub fn with_backend(backend: InMemoryBackend) -> Self {
        init_tracing();
        let data_dir = TempDir::new().expect("create temp dir");
        let backend = Arc::new(backend);
        let navigator = Arc::new(RecordingNavigator::new());
        let launch_flag: Arc<dyn LaunchFlagPort> = Arc::new(
            FileLaunchFlagRepository::with_defaults(data_dir.path().to_path_buf()),
        );

        let app = App::new(AppDeps {
            auth: backend.clone(),
            profiles: backend.clone(),
            launch_flag,
            navigation: navigator.clone(),
            clock: Arc::new(SystemClock),
        });

        Self {
            app,
            backend,
            navigator,
            _data_dir: data_dir,
        }
    }

    /// Wait until the navigator shows `route`, for changes applied by the
    /// background auth listener.
    pub async fn wait_for_route(&self, route: Route) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while self.navigator.current() != Some(route) {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap_or_else(|_| {
            panic!(
                "navigator never reached {route}, history: {:?}",
                self.navigator.history()
            )
        });
    }
}

pub fn sign_up_form(email: &str, username: &str, password: &str, confirm: &str) -> SignUpForm {
    SignUpForm {
        email: email.to_string(),
        username: username.to_string(),
        password: password.into(),
        confirm_password: confirm.into(),
    }
}
