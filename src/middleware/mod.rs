/// HTTP middleware utilities for gram-service
///
/// [`JwtAuthMiddleware`] validates a Bearer token when one is presented and
/// stores the caller id in request extensions; requests without a valid
/// token pass through as anonymous. Enforcement happens at the extractors:
/// [`UserId`] rejects anonymous callers with 401, [`MaybeUserId`] hands the
/// handler an `Option` so read endpoints can render viewer-dependent flags
/// as false for anonymous callers.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth;

/// Extracted user identifier stored in request extensions after auth.
/// Extraction fails with 401 when the caller is anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

/// Caller identity for routes that allow anonymous access.
/// `None` when no valid bearer token was presented.
#[derive(Debug, Clone, Copy)]
pub struct MaybeUserId(pub Option<Uuid>);

/// Actix middleware that validates a Bearer token and stores the caller id.
pub struct JwtAuthMiddleware {
    secret: Arc<String>,
}

impl JwtAuthMiddleware {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::new(secret.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            secret: self.secret.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    secret: Arc<String>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let secret = self.secret.clone();

        Box::pin(async move {
            let token = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(str::to_owned);

            if let Some(token) = token {
                // A presented token must be valid; only absence means anonymous.
                let user_id = auth::user_id_from_token(&secret, &token)
                    .map_err(|_| ErrorUnauthorized("Invalid or expired token"))?;
                req.extensions_mut().insert(UserId(user_id));
            }

            service.call(req).await
        })
    }
}

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserId>()
                .copied()
                .ok_or_else(|| ErrorUnauthorized("Missing Authorization header")),
        )
    }
}

impl FromRequest for MaybeUserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(MaybeUserId(
            req.extensions().get::<UserId>().map(|id| id.0),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    const SECRET: &str = "test-secret";

    async fn whoami(user_id: UserId) -> HttpResponse {
        HttpResponse::Ok().body(user_id.0.to_string())
    }

    async fn viewer(viewer: MaybeUserId) -> HttpResponse {
        match viewer.0 {
            Some(id) => HttpResponse::Ok().body(id.to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    fn secured_scope() -> impl actix_web::dev::HttpServiceFactory {
        web::scope("")
            .wrap(JwtAuthMiddleware::new(SECRET))
            .route("/whoami", web::get().to(whoami))
            .route("/viewer", web::get().to(viewer))
    }

    #[actix_web::test]
    async fn authenticated_request_reaches_handler() {
        let app = test::init_service(App::new().service(secured_scope())).await;
        let user_id = Uuid::new_v4();
        let token = auth::generate_token(SECRET, user_id, 3600).unwrap();

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert_eq!(body, user_id.to_string().as_bytes());
    }

    #[actix_web::test]
    async fn missing_token_is_401_for_strict_extractor() {
        let app = test::init_service(App::new().service(secured_scope())).await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn invalid_token_is_rejected_even_on_lenient_routes() {
        let app = test::init_service(App::new().service(secured_scope())).await;

        let req = test::TestRequest::get()
            .uri("/viewer")
            .insert_header(("Authorization", "Bearer garbage"))
            .to_request();

        // The middleware errors before the handler runs.
        let err = test::try_call_service(&app, req)
            .await
            .expect_err("garbage token must not reach the handler");
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn missing_token_is_anonymous_for_lenient_extractor() {
        let app = test::init_service(App::new().service(secured_scope())).await;

        let req = test::TestRequest::get().uri("/viewer").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert_eq!(body, b"anonymous".as_ref());
    }
}
