//! Stateless request builder for the friends API.
//!
//! # Design
//! `FriendsClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is a `build_*` method producing an `HttpRequest`; the
//! request goes out through a `Gateway` and comes back through
//! `gateway::decode` or `gateway::expect_success`. Building never performs
//! I/O, so the request shape of every endpoint can be tested directly.

use crate::http::{HttpMethod, HttpRequest};
use crate::types::Credentials;

/// Builds authenticated `HttpRequest` values for each friends endpoint.
#[derive(Debug, Clone)]
pub struct FriendsClient {
    base_url: String,
}

impl FriendsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_add_friend(&self, credentials: &Credentials, friend_id: &str) -> HttpRequest {
        self.request(HttpMethod::Post, credentials, &format!("friends/{friend_id}"), None)
    }

    pub fn build_fetch_friend(&self, credentials: &Credentials, friend_id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, credentials, &format!("friends/{friend_id}"), None)
    }

    pub fn build_fetch_friends(&self, credentials: &Credentials) -> HttpRequest {
        self.request(HttpMethod::Get, credentials, "friends", None)
    }

    pub fn build_remove_friend(&self, credentials: &Credentials, friend_id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, credentials, &format!("friends/{friend_id}"), None)
    }

    pub fn build_remove_friends_bulk(&self, credentials: &Credentials) -> HttpRequest {
        self.request(HttpMethod::Delete, credentials, "friends", None)
    }

    /// The nickname is sent as the raw body, not JSON-encoded.
    pub fn build_set_friend_nickname(
        &self,
        credentials: &Credentials,
        friend_id: &str,
        nickname: &str,
    ) -> HttpRequest {
        self.request(
            HttpMethod::Put,
            credentials,
            &format!("friends/{friend_id}/alias"),
            Some(nickname.to_string()),
        )
    }

    pub fn build_remove_friend_nickname(&self, credentials: &Credentials, friend_id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, credentials, &format!("friends/{friend_id}/alias"), None)
    }

    pub fn build_fetch_friends_summary(&self, credentials: &Credentials) -> HttpRequest {
        self.request(HttpMethod::Get, credentials, "summary", None)
    }

    pub fn build_fetch_friends_incoming(&self, credentials: &Credentials) -> HttpRequest {
        self.request(HttpMethod::Get, credentials, "incoming", None)
    }

    pub fn build_fetch_friends_outgoing(&self, credentials: &Credentials) -> HttpRequest {
        self.request(HttpMethod::Get, credentials, "outgoing", None)
    }

    pub fn build_fetch_friends_suggested(&self, credentials: &Credentials) -> HttpRequest {
        self.request(HttpMethod::Get, credentials, "suggested", None)
    }

    /// `{base}/friends/api/v1/{account}/{resource}` with the bearer header.
    fn request(
        &self,
        method: HttpMethod,
        credentials: &Credentials,
        resource: &str,
        body: Option<String>,
    ) -> HttpRequest {
        let url = format!(
            "{}/friends/api/v1/{}/{resource}",
            self.base_url, credentials.account_id
        );
        HttpRequest::authorized(method, url, &credentials.access_token, body)
    }
}
