//! Blocking client for the friends service REST API.
//!
//! # Overview
//! Friend lists, pending requests, suggestions and nicknames for one account.
//! Every operation is a single authenticated HTTP call with no caching and no
//! retries.
//!
//! # Design
//! - `FriendsClient` builds each endpoint's `HttpRequest` as plain data.
//! - `Gateway` sends requests through a `Transport` (ureq by default) and
//!   returns raw responses for every completed call.
//! - `gateway::decode` and `gateway::expect_success` classify responses into
//!   payloads or the three disjoint `ApiError` kinds.
//! - `FriendsService` ties the three together with one method per endpoint.
//! - Payload types are defined independently from the mock-server crate;
//!   integration tests catch schema drift.
//!
//! ```no_run
//! use friends_core::{ClientConfig, Credentials, FriendsService};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = FriendsService::new(&ClientConfig::from_env()?);
//! let me = Credentials::new("account-id", "access-token");
//! for friend in service.fetch_friends(&me)? {
//!     println!("{} ({} mutual)", friend.account_id, friend.mutual);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::FriendsClient;
pub use config::{ClientConfig, FRIENDS_SERVICE};
pub use error::{ApiError, ConfigError};
pub use gateway::{decode, expect_success, Gateway};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::FriendsService;
pub use transport::{Transport, UreqTransport};
pub use types::{
    Connections, Credentials, EpicConnection, Friend, FriendSettings, FriendsSummary, LimitsReached,
    PendingFriend, SortFactors, SuggestedFriend,
};
