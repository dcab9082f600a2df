use std::fmt;

use actix_web::http::header::{HeaderValue, ALLOW};
use actix_web::http::{Method, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use anyhow::Context;

use crate::configuration::SessionSettings;
use crate::domain::{SessionId, SessionRecord};
use crate::session_state::SessionCookie;
use crate::session_store::SessionStore;
use crate::utils::{error_chain_fmt, json_error};

/// Logout error type
#[derive(thiserror::Error)]
pub enum LogoutError {
    #[error("Method not allowed")]
    MethodNotAllowed(Method),
    #[error("Internal server error")]
    UnexpectedError(#[from] anyhow::Error),
}

impl fmt::Debug for LogoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for LogoutError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = json_error(self.status_code(), &self.to_string());
        if let Self::MethodNotAllowed(_) = self {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}

/// JSON body of a successful logout
#[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct LogoutBody {
    pub success: bool,
    pub message: String,
}

/// Outcome of a session termination
#[derive(Debug, PartialEq, Eq)]
pub enum Termination {
    /// A stored session was found and removed
    Terminated(SessionRecord),
    /// There was nothing to remove: no cookie, or an unknown identifier
    NoSession,
}

/// Terminate the session identified by `session_id`, if any
///
/// Removing an unknown or already removed session is not an error, which makes
/// repeated calls with the same identifier succeed with `NoSession`.
pub fn terminate(
    method: &Method,
    session_id: Option<&SessionId>,
    store: &dyn SessionStore,
) -> Result<Termination, LogoutError> {
    if *method != Method::POST {
        return Err(LogoutError::MethodNotAllowed(method.clone()));
    }

    let Some(session_id) = session_id else {
        return Ok(Termination::NoSession);
    };

    let removed = store
        .delete(session_id)
        .context("Failed to remove the session from the session store")?;

    Ok(removed.map_or(Termination::NoSession, Termination::Terminated))
}

/// Logout handler
#[tracing::instrument(
    name = "Logging out",
    skip(req, cookie, store, settings),
    fields(http_method = %req.method(), user_id = tracing::field::Empty)
)]
pub async fn logout(
    req: HttpRequest,
    cookie: SessionCookie,
    store: web::Data<dyn SessionStore>,
    settings: web::Data<SessionSettings>,
) -> Result<HttpResponse, LogoutError> {
    match terminate(req.method(), cookie.session_id(), store.get_ref()) {
        Ok(termination) => {
            if let Termination::Terminated(record) = termination {
                tracing::Span::current()
                    .record("user_id", tracing::field::display(&record.user_id));
                tracing::info!("Session terminated");
            } else {
                tracing::info!("No active session to terminate");
            }

            // Clear the cookie even when there was no session to remove
            Ok(HttpResponse::Ok()
                .cookie(SessionCookie::removal(&settings))
                .json(LogoutBody {
                    success: true,
                    message: "Logged out".into(),
                }))
        }
        Err(e) => {
            match &e {
                LogoutError::MethodNotAllowed(method) => {
                    tracing::warn!(rejected_method = %method, "Logout attempted without POST");
                }
                LogoutError::UnexpectedError(_) => {
                    tracing::error!(error.cause_chain = ?e, "Failed to terminate the session");
                }
            }
            Err(e)
        }
    }
}
