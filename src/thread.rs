//! Thread-root resolution for self-thread replies.

use tracing::debug;

use crate::error::BotError;
use crate::owo::Owoifier;
use crate::platform::{Platform, Status};

/// How many of the bot's own recent posts to scan for a root match.
pub const HISTORY_WINDOW: usize = 100;

/// Find the bot's previously posted transform of the status `reply`
/// replies to.
///
/// The replied-to text runs through the deterministic unaffixed
/// transform, and the bot's recent posts are scanned most recent first
/// for the first one containing it as a substring. Containment, not
/// equality: the posted version may carry an affix or a trailing link
/// on top of the recomputed core. `Ok(None)` means the window held no
/// match — an expected outcome for the caller to log and drop.
pub async fn resolve_root<P: Platform>(
    platform: &P,
    owo: &Owoifier,
    bot_user_id: &str,
    reply: &Status,
) -> Result<Option<Status>, BotError> {
    let Some(root_id) = reply.in_reply_to_status_id.as_deref() else {
        return Ok(None);
    };

    debug!(root_id = %root_id, "Retrieving root candidate");
    let candidate = platform.status(root_id).await?;
    let needle = owo.unaffixed(&candidate.content()?);

    debug!(needle = %needle, "Scanning recent posts for the transformed core");
    let history = platform.user_timeline(bot_user_id, HISTORY_WINDOW).await?;

    for posted in history {
        let text = match posted.content() {
            Ok(text) => text,
            Err(e) => {
                // A textless post can't be the root; keep scanning
                debug!(error = %e, "Skipping post in the history window");
                continue;
            }
        };
        if text.contains(&needle) {
            return Ok(Some(posted));
        }
    }

    Ok(None)
}
