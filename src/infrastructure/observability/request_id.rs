use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id for one request, minted here unless the caller or a
/// fronting proxy already supplied one. Handlers can pull it back out of
/// the request extensions.
#[derive(Clone, Debug)]
pub struct RequestId(String);

impl RequestId {
    fn for_request(request: &Request) -> Self {
        let id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Wrap the rest of the stack in a span carrying the correlation id, and
/// echo the id on the response so clients can quote it when reporting a
/// failed analysis.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::for_request(&request);

    let span = tracing::info_span!(
        "request",
        request_id = %request_id.as_str(),
        method = %request.method(),
        path = %request.uri().path(),
    );

    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
