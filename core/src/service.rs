//! One method per friends endpoint.
//!
//! Each method builds the request with `FriendsClient`, sends it through the
//! `Gateway` and applies the matching response contract. The service holds no
//! mutable state, so one instance can be shared across threads.

use crate::client::FriendsClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::gateway::{decode, expect_success, Gateway};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Credentials, Friend, FriendsSummary, SuggestedFriend};

#[derive(Debug, Clone)]
pub struct FriendsService<T = UreqTransport> {
    client: FriendsClient,
    gateway: Gateway<T>,
}

impl FriendsService<UreqTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(&config.base_url, UreqTransport::new(config))
    }
}

impl<T: Transport> FriendsService<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: FriendsClient::new(base_url),
            gateway: Gateway::new(transport),
        }
    }

    pub fn client(&self) -> &FriendsClient {
        &self.client
    }

    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    pub fn add_friend(&self, credentials: &Credentials, friend_id: &str) -> Result<(), ApiError> {
        expect_success(self.gateway.dispatch(self.client.build_add_friend(credentials, friend_id))?)
    }

    pub fn fetch_friend(&self, credentials: &Credentials, friend_id: &str) -> Result<Friend, ApiError> {
        decode(self.gateway.dispatch(self.client.build_fetch_friend(credentials, friend_id))?)
    }

    pub fn fetch_friends(&self, credentials: &Credentials) -> Result<Vec<Friend>, ApiError> {
        decode(self.gateway.dispatch(self.client.build_fetch_friends(credentials))?)
    }

    pub fn remove_friend(&self, credentials: &Credentials, friend_id: &str) -> Result<(), ApiError> {
        expect_success(self.gateway.dispatch(self.client.build_remove_friend(credentials, friend_id))?)
    }

    /// Removes every friend of the account.
    pub fn remove_friends_bulk(&self, credentials: &Credentials) -> Result<(), ApiError> {
        expect_success(self.gateway.dispatch(self.client.build_remove_friends_bulk(credentials))?)
    }

    pub fn set_friend_nickname(
        &self,
        credentials: &Credentials,
        friend_id: &str,
        nickname: &str,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .build_set_friend_nickname(credentials, friend_id, nickname);
        expect_success(self.gateway.dispatch(request)?)
    }

    pub fn remove_friend_nickname(&self, credentials: &Credentials, friend_id: &str) -> Result<(), ApiError> {
        let request = self.client.build_remove_friend_nickname(credentials, friend_id);
        expect_success(self.gateway.dispatch(request)?)
    }

    pub fn fetch_friends_summary(&self, credentials: &Credentials) -> Result<FriendsSummary, ApiError> {
        decode(self.gateway.dispatch(self.client.build_fetch_friends_summary(credentials))?)
    }

    /// Incoming requests, decoded with the full `Friend` shape.
    pub fn fetch_friends_incoming(&self, credentials: &Credentials) -> Result<Vec<Friend>, ApiError> {
        decode(self.gateway.dispatch(self.client.build_fetch_friends_incoming(credentials))?)
    }

    /// Outgoing requests, decoded with the full `Friend` shape.
    pub fn fetch_friends_outgoing(&self, credentials: &Credentials) -> Result<Vec<Friend>, ApiError> {
        decode(self.gateway.dispatch(self.client.build_fetch_friends_outgoing(credentials))?)
    }

    pub fn fetch_friends_suggested(&self, credentials: &Credentials) -> Result<Vec<SuggestedFriend>, ApiError> {
        decode(self.gateway.dispatch(self.client.build_fetch_friends_suggested(credentials))?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Answers every request with the same status and body, logging requests.
    struct Fixed {
        status: u16,
        body: &'static str,
        log: Mutex<Vec<HttpRequest>>,
    }

    impl Fixed {
        fn service(status: u16, body: &'static str) -> FriendsService<Fixed> {
            FriendsService::with_transport(
                "http://svc",
                Fixed {
                    status,
                    body,
                    log: Mutex::new(Vec::new()),
                },
            )
        }
    }

    impl Transport for Fixed {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.log.lock().unwrap().push(request);
            Ok(HttpResponse::new(self.status, self.body))
        }
    }

    fn creds() -> Credentials {
        Credentials::new("me", "tok")
    }

    #[test]
    fn every_mutation_fails_on_error_status() {
        let service = Fixed::service(403, r#"{"errorCode":"forbidden"}"#);
        let me = creds();
        let results = [
            service.add_friend(&me, "f"),
            service.remove_friend(&me, "f"),
            service.remove_friends_bulk(&me),
            service.set_friend_nickname(&me, "f", "nick"),
            service.remove_friend_nickname(&me, "f"),
        ];
        for result in results {
            assert_eq!(result.unwrap_err().status(), Some(403));
        }
    }

    #[test]
    fn every_fetch_fails_on_error_status_despite_json_body() {
        let service = Fixed::service(500, "[]");
        let me = creds();
        assert_eq!(service.fetch_friend(&me, "f").unwrap_err().status(), Some(500));
        assert_eq!(service.fetch_friends(&me).unwrap_err().status(), Some(500));
        assert_eq!(service.fetch_friends_summary(&me).unwrap_err().status(), Some(500));
        assert_eq!(service.fetch_friends_incoming(&me).unwrap_err().status(), Some(500));
        assert_eq!(service.fetch_friends_outgoing(&me).unwrap_err().status(), Some(500));
        assert_eq!(service.fetch_friends_suggested(&me).unwrap_err().status(), Some(500));
    }

    #[test]
    fn list_fetches_decode_empty_arrays() {
        let service = Fixed::service(200, "[]");
        let me = creds();
        assert!(service.fetch_friends(&me).unwrap().is_empty());
        assert!(service.fetch_friends_incoming(&me).unwrap().is_empty());
        assert!(service.fetch_friends_outgoing(&me).unwrap().is_empty());
        assert!(service.fetch_friends_suggested(&me).unwrap().is_empty());
    }

    #[test]
    fn object_fetches_reject_array_body() {
        let service = Fixed::service(200, "[]");
        let me = creds();
        assert!(matches!(service.fetch_friend(&me, "f"), Err(ApiError::Decode(_))));
        assert!(matches!(service.fetch_friends_summary(&me), Err(ApiError::Decode(_))));
    }

    #[test]
    fn nickname_goes_out_unwrapped() {
        let service = Fixed::service(204, "");
        service.set_friend_nickname(&creds(), "alice123", "Al").unwrap();

        let log = service.gateway().transport().log.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].method, HttpMethod::Put);
        assert_eq!(log[0].url, "http://svc/friends/api/v1/me/friends/alice123/alias");
        assert_eq!(log[0].body.as_deref(), Some("Al"));
    }

    #[test]
    fn default_service_is_debug_without_exposing_the_agent() {
        let service = FriendsService::new(&ClientConfig::with_base_url("http://svc"));
        let rendered = format!("{service:?}");
        assert!(rendered.contains("FriendsService"));
        assert!(rendered.contains("UreqTransport"));
        assert!(rendered.contains("http://svc"));
    }
}
