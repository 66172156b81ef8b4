//! Credentials and the payloads returned by the friends service.
//!
//! # Design
//! Payload types are defined independently from the mock-server crate;
//! integration tests catch schema drift between the two. Fields whose shape
//! the service does not pin down (`groups`, `blocklist`) stay as raw JSON
//! values and are passed through untouched.
//!
//! `accountId` and `created` are required on every friend-like record. The
//! remaining scalars default when the service leaves them out.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Account scope and bearer token for every call.
///
/// The account id is fixed here while friend ids are passed per call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account_id: String,
    pub access_token: String,
}

impl Credentials {
    pub fn new(account_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// An accepted friend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub account_id: String,
    #[serde(default)]
    pub groups: Vec<Value>,
    #[serde(default)]
    pub mutual: i64,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub favorite: bool,
    pub created: DateTime<Utc>,
}

/// An incoming or outgoing friend request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingFriend {
    pub account_id: String,
    #[serde(default)]
    pub mutual: i64,
    #[serde(default)]
    pub favorite: bool,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedFriend {
    pub account_id: String,
    pub connections: Connections,
    #[serde(default)]
    pub mutual: i64,
}

/// Where a suggestion came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connections {
    pub epic: EpicConnection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpicConnection {
    pub id: String,
    pub sort_factors: SortFactors,
}

/// Ranking inputs the service uses to order suggestions. Opaque to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortFactors {
    pub x: i64,
    pub y: i64,
    pub k: DateTime<Utc>,
    pub l: DateTime<Utc>,
}

/// Everything the service knows about an account's social graph in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendsSummary {
    #[serde(default)]
    pub friends: Vec<Friend>,
    #[serde(default)]
    pub incoming: Vec<PendingFriend>,
    #[serde(default)]
    pub outgoing: Vec<PendingFriend>,
    #[serde(default)]
    pub suggested: Vec<SuggestedFriend>,
    #[serde(default)]
    pub blocklist: Vec<Value>,
    pub settings: FriendSettings,
    pub limits_reached: LimitsReached,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendSettings {
    /// Who may send invites, e.g. `"public"`.
    pub accept_invites: String,
    /// Who may see mutual friends, e.g. `"ALL"`.
    pub mutual_privacy: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsReached {
    pub incoming: bool,
    pub outgoing: bool,
    pub accepted: bool,
}
