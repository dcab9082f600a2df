use std::{io, net, sync::Arc};

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::{SessionSettings, Settings};
use crate::routes::{healthcheck, logout};
use crate::session_store::{InMemorySessionStore, SessionStore};

/// Application
pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    /// Build an application based on settings, backed by an in-memory session store
    pub fn build(config: Settings) -> anyhow::Result<Self> {
        Self::build_with_store(config, Arc::new(InMemorySessionStore::new()))
    }

    /// Build an application based on settings and session store
    pub fn build_with_store(
        config: Settings,
        session_store: Arc<dyn SessionStore>,
    ) -> anyhow::Result<Self> {
        // Run the HTTP server and return its data
        let listener = net::TcpListener::bind(format!(
            "{}:{}",
            config.application.app_host, config.application.app_port
        ))?;
        let port = listener.local_addr()?.port();
        let server = run_server(listener, session_store, config.session)?;
        Ok(Self { server, port })
    }

    /// Get application port
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Run application until it is stopped
    pub async fn run_until_stopped(self) -> io::Result<()> {
        self.server.await
    }
}

/// Run the HTTP server
pub fn run_server(
    listener: net::TcpListener,
    session_store: Arc<dyn SessionStore>,
    session_settings: SessionSettings,
) -> anyhow::Result<Server> {
    // Prepare data to be added the application context
    let session_store: web::Data<dyn SessionStore> = web::Data::from(session_store);
    let session_settings = web::Data::new(session_settings);

    // Start the HTTP server
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/healthcheck", web::get().to(healthcheck))
            .route("/api/auth/logout", web::route().to(logout))
            .app_data(session_store.clone())
            .app_data(session_settings.clone())
    })
    .listen(listener)?
    .run())
}
