//! Message classification and repost dispatch.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::BotError;
use crate::owo::{MAX_POST_CHARS, Owoifier};
use crate::platform::{Platform, Status};
use crate::thread;

/// What an incoming status means for the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Monitored account replying to itself — the bot threads too.
    SelfThread,
    /// Reshare, or reply to anything else — not repost material.
    Ignored,
    /// Ordinary monitored-account post.
    Plain,
}

/// Classify an incoming status against the monitored account.
///
/// The self-thread check runs first: those statuses carry reply
/// metadata too, and the general reply/reshare exclusion below must
/// not swallow them.
pub fn classify(status: &Status, monitored_id: &str) -> Disposition {
    if status.user.id == monitored_id
        && status.in_reply_to_user_id.as_deref() == Some(monitored_id)
    {
        return Disposition::SelfThread;
    }
    if status.retweeted_status.is_some()
        || status.in_reply_to_status_id.is_some()
        || status.in_reply_to_user_id.is_some()
        || status.in_reply_to_screen_name.is_some()
    {
        return Disposition::Ignored;
    }
    Disposition::Plain
}

/// The repost driver: owns the transform, the randomness source, and
/// the platform handle.
pub struct Bot<P: Platform, R: Rng> {
    platform: P,
    owo: Owoifier,
    rng: R,
    monitored_id: String,
    bot_id: String,
}

impl<P: Platform, R: Rng> Bot<P, R> {
    pub fn new(
        platform: P,
        owo: Owoifier,
        rng: R,
        monitored_id: impl Into<String>,
        bot_id: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            owo,
            rng,
            monitored_id: monitored_id.into(),
            bot_id: bot_id.into(),
        }
    }

    /// Handle one incoming status end to end. Never returns an error:
    /// per-message failures are logged here and the stream moves on.
    pub async fn handle(&mut self, status: &Status) {
        debug!(id = %status.id, "Status received");

        let result = match classify(status, &self.monitored_id) {
            Disposition::SelfThread => {
                info!(id = %status.id, "Thread post from the monitored account");
                self.repost_threaded(status).await
            }
            Disposition::Ignored => {
                debug!(id = %status.id, "Reply or reshare, nothing to do");
                Ok(())
            }
            Disposition::Plain => {
                info!(id = %status.id, "New post from the monitored account");
                self.repost(status, None).await
            }
        };

        if let Err(e) = result {
            warn!(id = %status.id, error = %e, "Dropping status");
        }
    }

    /// Resolve the thread root, then repost as a reply to it. An
    /// unresolved root drops the reply with a diagnostic rather than
    /// posting an unthreaded duplicate.
    async fn repost_threaded(&mut self, status: &Status) -> Result<(), BotError> {
        let root = thread::resolve_root(&self.platform, &self.owo, &self.bot_id, status).await?;

        let Some(root) = root else {
            warn!(
                root_id = %status.in_reply_to_status_id.as_deref().unwrap_or("unknown"),
                "No posted transform of the root candidate in the window, dropping reply"
            );
            return Ok(());
        };

        self.repost(status, Some(&root.id)).await
    }

    /// Transform a status and publish it, linking back to the source
    /// post when the budget allows.
    async fn repost(
        &mut self,
        status: &Status,
        in_reply_to: Option<&str>,
    ) -> Result<(), BotError> {
        let mut owo = self.owo.owoify(&status.content()?, &mut self.rng);

        let url = status.web_url();
        if owo.chars().count() + 1 + url.chars().count() <= MAX_POST_CHARS {
            owo = format!("{owo} {url}");
        }

        info!(text = %owo, in_reply_to = ?in_reply_to, "Publishing");
        self.platform.publish(&owo, in_reply_to).await?;

        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────
