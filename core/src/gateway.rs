//! Authenticated request gateway and the response contracts built on it.
//!
//! # Design
//! Every endpoint goes through `Gateway::dispatch`, which hands the request to
//! the transport and returns the raw response for any completed call. What
//! that response means is decided afterwards by one of two contracts:
//! `decode` for endpoints that return a payload, `expect_success` for
//! mutations whose body is ignored. Both treat a status of 300 or more as a
//! `Status` failure before looking at the body.
//!
//! Nothing here retries. Mutations on the friends service are not guaranteed
//! idempotent.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

#[derive(Debug, Clone)]
pub struct Gateway<T = UreqTransport> {
    transport: T,
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue `method url` with `Authorization: Bearer <token>` and an optional
    /// raw body.
    pub fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        token: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        self.dispatch(HttpRequest::authorized(method, url.to_string(), token, body))
    }

    /// Send an already-built request.
    pub fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "dispatching friends request");
        let response = self.transport.send(request)?;
        debug!(status = response.status, "friends response received");
        Ok(response)
    }
}

/// Decode a successful response body as `T`, all or nothing.
pub fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    let response = check_status(response)?;
    Ok(serde_json::from_slice(&response.body)?)
}

/// Accept any status below 300 and drop the body.
pub fn expect_success(response: HttpResponse) -> Result<(), ApiError> {
    check_status(response).map(drop)
}

fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::Status {
        status: response.status,
        body: response.body_text(),
        reason: response.reason,
    })
}
