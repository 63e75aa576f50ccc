//! Sending helpers shared by paginator sessions and command handlers.

use std::{sync::Arc, time::Duration};

use tracing::debug;
use twilight_model::id::{Id, marker::ChannelMarker};

use pager_core::Interactive;

use super::client::{MessageHandle, PagerClient};
use super::error::PagerError;
use super::message::PaginatedMessage;
use super::session::{PaginatorSession, SourceContext};

/// Send a plain reply and delete it once `timeout` has passed.
pub async fn reply_and_delete(
    client: &Arc<dyn PagerClient>,
    channel_id: Id<ChannelMarker>,
    content: &str,
    timeout: Duration,
) -> anyhow::Result<MessageHandle> {
    let handle = client.send_message(channel_id, Some(content), None).await?;

    let client = Arc::clone(client);
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;

        if let Err(source) = client.delete_message(handle).await {
            debug!(
                ?source,
                message_id = handle.message_id.get(),
                "failed to delete temporary reply"
            );
        }
    });

    Ok(handle)
}

/// Open a reaction paginator in the source channel.
pub async fn send_paginated_reply(
    client: Arc<dyn PagerClient>,
    interactive: Interactive,
    source: SourceContext,
    pager: PaginatedMessage,
) -> Result<Arc<PaginatorSession>, PagerError> {
    let session = PaginatorSession::new(client, interactive, source, pager)?;
    session.display().await?;
    Ok(session)
}
