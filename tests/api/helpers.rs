use std::sync::Arc;
use std::{env, io, sync};

use uuid::Uuid;

use session_terminator::configuration::Settings;
use session_terminator::domain::{SessionId, SessionRecord};
use session_terminator::session_store::{InMemorySessionStore, SessionStore, SessionStoreError};
use session_terminator::startup::Application;
use session_terminator::telemetry::{get_subscriber, init_subscriber};

/// Ensure the tracing stack is initialized only once
static TRACING: sync::LazyLock<()> = sync::LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(
            subscriber_name,
            default_filter_level,
            io::stdout,
        ));
    } else {
        init_subscriber(get_subscriber(
            subscriber_name,
            default_filter_level,
            io::sink,
        ));
    };
});

/// Test application data
pub struct TestApp {
    pub address: String,
    pub session_store: Arc<InMemorySessionStore>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spin up a test application backed by an in-memory store and return its data
    pub async fn spawn() -> Self {
        let session_store = Arc::new(InMemorySessionStore::new());
        let address = spawn_server(session_store.clone()).await;
        Self {
            address,
            session_store,
            api_client: api_client(),
        }
    }

    /// Store a new session and return its identifier and record
    pub fn seed_session(&self) -> (String, SessionRecord) {
        let id = fake_session_id();
        let record = SessionRecord::new(Uuid::new_v4());
        self.session_store
            .set(&session_id(&id), record.clone())
            .expect("Failed to seed session");
        (id, record)
    }

    /// Check whether the store still holds a session
    pub fn has_session(&self, id: &str) -> bool {
        self.session_store.has(&session_id(id)).unwrap()
    }

    /// Send a request to the logout endpoint, with an optional session cookie
    pub async fn logout_with(
        &self,
        method: reqwest::Method,
        session_id: Option<&str>,
    ) -> reqwest::Response {
        let mut request = self
            .api_client
            .request(method, format!("{}/api/auth/logout", &self.address));
        if let Some(id) = session_id {
            request = request.header("Cookie", format!("SessionID={id}"));
        }
        request.send().await.expect("Failed to send request")
    }

    /// POST to the logout endpoint
    pub async fn post_logout(&self, session_id: Option<&str>) -> reqwest::Response {
        self.logout_with(reqwest::Method::POST, session_id).await
    }
}

/// Session store whose backend always fails
pub struct UnavailableSessionStore;

impl SessionStore for UnavailableSessionStore {
    fn has(&self, _id: &SessionId) -> Result<bool, SessionStoreError> {
        Err(unavailable())
    }

    fn get(&self, _id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        Err(unavailable())
    }

    fn set(
        &self,
        _id: &SessionId,
        _record: SessionRecord,
    ) -> Result<Option<SessionRecord>, SessionStoreError> {
        Err(unavailable())
    }

    fn delete(&self, _id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        Err(unavailable())
    }

    fn len(&self) -> Result<usize, SessionStoreError> {
        Err(unavailable())
    }
}

fn unavailable() -> SessionStoreError {
    SessionStoreError::Unavailable("connection refused by 10.0.0.7".into())
}

/// Spin up a server on a random port with the given store and return its address
pub async fn spawn_server(session_store: Arc<dyn SessionStore>) -> String {
    // Initialize logging
    sync::LazyLock::force(&TRACING);

    // Get settings and modify them for testing
    let config = {
        let mut c = Settings::get_config().expect("Failed to read configuration");
        // Listen on a random TCP port
        c.application.app_port = 0;
        c
    };

    // Build the application and get its address
    let app = Application::build_with_store(config, session_store)
        .expect("Failed to build application");
    let address = format!("http://127.0.0.1:{}", app.port());

    // Run the application and return its address
    #[allow(clippy::let_underscore_future)]
    let _ = tokio::spawn(app.run_until_stopped());
    address
}

/// Build an API client that does not follow redirects
pub fn api_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// Generate a fake opaque session identifier
pub fn fake_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn session_id(value: &str) -> SessionId {
    SessionId::parse(value.to_string()).unwrap()
}

/// Assert: the response clears the session cookie
pub fn assert_clears_session_cookie(response: &reqwest::Response) {
    let cookie = response
        .cookies()
        .find(|c| c.name() == "SessionID")
        .expect("No SessionID cookie in response");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(std::time::Duration::ZERO));
    assert!(cookie.http_only());
    assert!(cookie.secure());
    assert!(cookie.same_site_strict());
    assert_eq!(cookie.path(), Some("/"));
}
