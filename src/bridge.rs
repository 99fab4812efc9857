//! Subscription bridge - asks the content client to fetch missing packages
//!
//! The bridge hands requests to the client and remembers nothing between
//! calls; it never waits for or reports download completion. Callers re-scan
//! to find out what arrived.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use crate::error::BridgeError;

mod steam_client;

pub use steam_client::SteamClient;

/// What the client did with one fetch request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Enqueued {
    /// The download is queued with the client
    Queued,
    /// The client showed the item; the user still has to subscribe there
    AwaitingConfirmation,
}

/// The external distribution client, as far as the bridge needs it.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// `Ok` when the client is running and can take requests.
    async fn check_reachable(&self) -> Result<(), BridgeError>;

    /// Hand one package to the client. Must not wait for the download.
    ///
    /// Requesting a package the client already has or is fetching is the
    /// client's no-op, not the bridge's.
    async fn enqueue(&self, id: &str) -> Result<Enqueued, BridgeError>;
}

/// Ids handed to the client by one request, split by what the client did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchReceipt {
    pub queued: Vec<String>,
    pub awaiting_confirmation: Vec<String>,
}

impl FetchReceipt {
    /// User-facing text for ids that need a click in the client.
    pub fn confirmation_note(&self) -> Option<String> {
        if self.awaiting_confirmation.is_empty() {
            return None;
        }
        Some(format!(
            "Steam opened the Workshop page for {}; press Subscribe there to start the download",
            self.awaiting_confirmation.join(", ")
        ))
    }
}

/// Boundary result of `fetchMissing`.
///
/// `accepted` means the client took every request. It does not mean a
/// download is running: ids in `awaiting_confirmation` only start once the
/// user subscribes to them in Steam.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutcome {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub awaiting_confirmation: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<FetchReceipt, BridgeError>> for FetchOutcome {
    fn from(result: Result<FetchReceipt, BridgeError>) -> Self {
        match result {
            Ok(receipt) => FetchOutcome {
                accepted: true,
                note: receipt.confirmation_note(),
                awaiting_confirmation: receipt.awaiting_confirmation,
                error: None,
            },
            Err(e) => FetchOutcome {
                accepted: false,
                awaiting_confirmation: Vec::new(),
                note: None,
                error: Some(crate::error::LaunchError::from(e).to_string()),
            },
        }
    }
}

/// Stateless front of the content client: every call reaches the client.
pub struct SubscriptionBridge {
    client: Arc<dyn ContentClient>,
}

impl SubscriptionBridge {
    pub fn new(client: Arc<dyn ContentClient>) -> Self {
        Self { client }
    }

    pub async fn request_fetch(&self, ids: &BTreeSet<String>, timeout: Duration) -> FetchOutcome {
        self.try_request_fetch(ids, timeout).await.into()
    }

    /// Hand `ids` to the client, bounded by `timeout`.
    ///
    /// Each id is sent once per call. No retries happen here.
    pub async fn try_request_fetch(
        &self,
        ids: &BTreeSet<String>,
        timeout: Duration,
    ) -> Result<FetchReceipt, BridgeError> {
        if ids.is_empty() {
            return Ok(FetchReceipt::default());
        }

        match tokio::time::timeout(timeout, self.enqueue_all(ids)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(?timeout, "fetch request timed out");
                Err(BridgeError::Timeout(timeout))
            }
        }
    }

    async fn enqueue_all(&self, ids: &BTreeSet<String>) -> Result<FetchReceipt, BridgeError> {
        self.client.check_reachable().await?;

        let mut receipt = FetchReceipt::default();
        for id in ids {
            match self.client.enqueue(id).await? {
                Enqueued::Queued => receipt.queued.push(id.clone()),
                Enqueued::AwaitingConfirmation => receipt.awaiting_confirmation.push(id.clone()),
            }
        }

        tracing::info!(
            queued = receipt.queued.len(),
            awaiting_confirmation = receipt.awaiting_confirmation.len(),
            "fetch requested"
        );
        Ok(receipt)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeClient;
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn ids(raw: &[&str]) -> BTreeSet<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn unreachable_client_is_not_accepted() {
        let bridge = SubscriptionBridge::new(Arc::new(FakeClient {
            unreachable: true,
            ..Default::default()
        }));
        let outcome = bridge.request_fetch(&ids(&["1"]), TIMEOUT).await;
        assert!(!outcome.accepted);
        assert!(outcome.error.unwrap().contains("not running"));
    }

    #[tokio::test]
    async fn rejection_is_not_accepted() {
        let bridge = SubscriptionBridge::new(Arc::new(FakeClient {
            reject: true,
            ..Default::default()
        }));
        let err = bridge.try_request_fetch(&ids(&["1"]), TIMEOUT).await.unwrap_err();
        assert_eq!(err, BridgeError::Rejected("item 1 is private".to_string()));
    }

    #[tokio::test]
    async fn every_request_reaches_the_client() {
        let client = Arc::new(FakeClient::default());
        let bridge = SubscriptionBridge::new(client.clone());

        let first = bridge.try_request_fetch(&ids(&["1", "2"]), TIMEOUT).await.unwrap();
        assert_eq!(first.queued, vec!["1", "2"]);
        // A lost download can be asked for again
        let second = bridge.try_request_fetch(&ids(&["2", "3"]), TIMEOUT).await.unwrap();
        assert_eq!(second.queued, vec!["2", "3"]);
        assert_eq!(client.enqueued(), vec!["1", "2", "2", "3"]);
    }

    #[tokio::test]
    async fn confirmation_is_spelled_out() {
        let bridge = SubscriptionBridge::new(Arc::new(FakeClient {
            needs_confirmation: true,
            ..Default::default()
        }));
        let outcome = bridge.request_fetch(&ids(&["7", "8"]), TIMEOUT).await;
        assert!(outcome.accepted);
        assert_eq!(outcome.awaiting_confirmation, vec!["7", "8"]);
        assert!(outcome.note.unwrap().contains("press Subscribe"));
    }

    #[tokio::test]
    async fn queued_downloads_carry_no_note() {
        let bridge = SubscriptionBridge::new(Arc::new(FakeClient::default()));
        let outcome = bridge.request_fetch(&ids(&["7"]), TIMEOUT).await;
        assert!(outcome.accepted);
        assert!(outcome.awaiting_confirmation.is_empty());
        assert_eq!(outcome.note, None);
    }

    #[tokio::test]
    async fn empty_request_does_not_touch_client() {
        let bridge = SubscriptionBridge::new(Arc::new(FakeClient {
            unreachable: true,
            ..Default::default()
        }));
        assert!(bridge.request_fetch(&BTreeSet::new(), TIMEOUT).await.accepted);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_client_times_out() {
        let bridge = SubscriptionBridge::new(Arc::new(FakeClient {
            hang: true,
            ..Default::default()
        }));
        let err = bridge
            .try_request_fetch(&ids(&["1"]), Duration::from_secs(2))
            .await
            .unwrap_err();
        assert_eq!(err, BridgeError::Timeout(Duration::from_secs(2)));
    }
}
