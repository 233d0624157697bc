//! Session-backed identity of the signed-in user.
//!
//! The session cookie stores only the profile id. Each request resolves it
//! into an [`AuthenticatedUser`] that handlers pass explicitly to services.

use std::future::Future;
use std::pin::Pin;

use actix_identity::Identity;
use actix_identity::error::LoginError;
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::ProfileId;
use crate::routes::{redirect, request_locale};

fn parse_identity(identity: &Identity) -> Option<AuthenticatedUser> {
    let raw = identity.id().ok()?;
    let id = raw.parse::<i32>().ok()?;
    ProfileId::new(id).ok().map(|id| AuthenticatedUser { id })
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let user = Identity::extract(&req)
                .await
                .ok()
                .and_then(|identity| parse_identity(&identity));

            match user {
                Some(user) => Ok(user),
                None => {
                    let login = format!("/{}/login", request_locale(&req));
                    Err(InternalError::from_response("authentication required", redirect(&login))
                        .into())
                }
            }
        })
    }
}

/// Attaches `user` to the session.
pub fn log_in(req: &HttpRequest, user: &AuthenticatedUser) -> Result<Identity, LoginError> {
    Identity::login(&req.extensions(), user.id.to_string())
}
