//! Extractor for gateway callback parameters.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use url::form_urlencoded;

use crate::domain::payment::InboundParams;

/// Gateway parameters read from the query string (GET, HEAD) or from the
/// urlencoded body (any other method).
#[derive(Debug, Clone)]
pub struct GatewayParams(pub InboundParams);

/// Rejection when the request body cannot be read.
#[derive(Debug)]
pub struct GatewayParamsRejection(String);

impl IntoResponse for GatewayParamsRejection {
    fn into_response(self) -> Response {
        tracing::warn!(reason = %self.0, "Unreadable gateway callback");
        (StatusCode::BAD_REQUEST, "error: unreadable request").into_response()
    }
}

fn parse(raw: &[u8]) -> InboundParams {
    form_urlencoded::parse(raw).into_owned().collect()
}

#[axum::async_trait]
impl<S> FromRequest<S> for GatewayParams
where
    S: Send + Sync,
{
    type Rejection = GatewayParamsRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.method() == Method::GET || req.method() == Method::HEAD {
            let query = req.uri().query().unwrap_or_default();
            return Ok(Self(parse(query.as_bytes())));
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| GatewayParamsRejection(e.body_text()))?;
        Ok(Self(parse(&body)))
    }
}
