use std::future::{ready, Ready};

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::configuration::SessionSettings;
use crate::domain::SessionId;

/// Session identifier sent by the client, if any
///
/// A missing cookie and a cookie with an empty value are both treated as "no
/// session": neither is an error for the handlers that consume this.
#[derive(Debug)]
pub struct SessionCookie(Option<SessionId>);

impl FromRequest for SessionCookie {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session_id = req
            .cookie(&cookie_name(req))
            .and_then(|c| SessionId::parse(c.value().to_owned()).ok());
        ready(Ok(Self(session_id)))
    }
}

impl SessionCookie {
    /// Get the session identifier carried by the cookie
    pub const fn session_id(&self) -> Option<&SessionId> {
        self.0.as_ref()
    }

    /// Build the cookie that instructs the client to discard its session identifier
    pub fn removal(settings: &SessionSettings) -> Cookie<'static> {
        Cookie::build(settings.cookie_name.clone(), "")
            .http_only(true)
            .secure(settings.cookie_secure)
            .same_site(SameSite::Strict)
            .max_age(Duration::ZERO)
            .path("/")
            .finish()
    }
}

/// Look up the configured cookie name, falling back to the default one
fn cookie_name(req: &HttpRequest) -> String {
    req.app_data::<web::Data<SessionSettings>>()
        .map_or_else(
            || SessionSettings::default().cookie_name,
            |s| s.cookie_name.clone(),
        )
}
