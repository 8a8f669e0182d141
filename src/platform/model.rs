//! Wire model for platform statuses.

use serde::Deserialize;

use crate::error::BotError;

/// Author of a status.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(rename = "id_str")]
    pub id: String,
    pub screen_name: String,
}

/// One status as fetched from the REST API.
///
/// Text arrives in one of three forms depending on length and endpoint;
/// [`Status::content`] resolves them in priority order.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    #[serde(rename = "id_str")]
    pub id: String,
    pub user: User,
    /// Extended payload carried by long statuses on streaming-style
    /// endpoints.
    #[serde(default)]
    pub extended_tweet: Option<ExtendedTweet>,
    /// Full text on endpoints called with the extended tweet mode.
    #[serde(default)]
    pub full_text: Option<String>,
    /// Short-form text, possibly truncated.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "in_reply_to_status_id_str")]
    pub in_reply_to_status_id: Option<String>,
    #[serde(default, rename = "in_reply_to_user_id_str")]
    pub in_reply_to_user_id: Option<String>,
    #[serde(default)]
    pub in_reply_to_screen_name: Option<String>,
    /// Present when the status is a native reshare of another.
    #[serde(default)]
    pub retweeted_status: Option<Box<Status>>,
}

/// Extended text block nested inside long statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtendedTweet {
    pub full_text: String,
}

impl Status {
    /// Status text, tried in priority order: extended form, full form,
    /// then short form. All three absent is a malformed status.
    ///
    /// Entity escapes are decoded so character counts line up with the
    /// platform's own length accounting.
    pub fn content(&self) -> Result<String, BotError> {
        let text = self
            .extended_tweet
            .as_ref()
            .map(|e| e.full_text.as_str())
            .or(self.full_text.as_deref())
            .or(self.text.as_deref())
            .ok_or_else(|| BotError::MissingText {
                id: self.id.clone(),
            })?;
        Ok(unescape(text))
    }

    /// Link to this status on the platform's web frontend.
    pub fn web_url(&self) -> String {
        format!(
            "https://twitter.com/{}/status/{}",
            self.user.screen_name, self.id
        )
    }
}

/// Decode the entity escapes the platform applies to status text.
/// `&amp;` goes last so nested escapes decode only one level.
fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

// ── Tests ───────────────────────────────────────────────────────────
