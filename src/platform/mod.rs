//! Platform I/O — wire model, request signing, and the REST client.

pub mod model;
pub mod oauth;
pub mod twitter;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

pub use model::{ExtendedTweet, Status, User};
pub use oauth::OauthKeys;
pub use twitter::TwitterClient;

use crate::error::PlatformError;

/// Stream of newly observed statuses, oldest first.
pub type StatusStream = Pin<Box<dyn Stream<Item = Status> + Send>>;

/// Remote platform operations the bot core relies on. Pure I/O, no
/// business logic.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Fetch a single status by identifier, full text form.
    async fn status(&self, id: &str) -> Result<Status, PlatformError>;

    /// Up to `count` most recent statuses by an account, most recent
    /// first.
    async fn user_timeline(
        &self,
        user_id: &str,
        count: usize,
    ) -> Result<Vec<Status>, PlatformError>;

    /// Submit a new post, optionally as a reply to an existing status.
    async fn publish(&self, text: &str, in_reply_to: Option<&str>) -> Result<(), PlatformError>;
}
