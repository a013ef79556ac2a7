use async_trait::async_trait;

use crate::reply::Reply;

/// Direct-message delivery seam. Dispatch fires notifications and
/// discards the result by contract; an implementation's failure is never
/// surfaced to the initiating user.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, discord_id: &str, reply: Reply) -> anyhow::Result<()>;
}

/// No-op notifier for contexts without a DM channel.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(&self, _discord_id: &str, _reply: Reply) -> anyhow::Result<()> {
        Ok(())
    }
}
