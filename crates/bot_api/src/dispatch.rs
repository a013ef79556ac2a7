//! Interaction dispatch: typed command → handler → reply.

use std::sync::Arc;

use economy_client::{CurrencyCache, EconomyBackend};
use shared::protocol::{PendingAction, PendingActionRequest, TradeAction};
use tracing::warn;

use crate::commands::{ButtonCommand, Command};
use crate::handlers;
use crate::links::LinkStore;
use crate::notify::Notifier;
use crate::perms::PermStore;
use crate::reply::{Embed, Reply, COLOR_ERROR, COLOR_SUCCESS};

pub struct BotContext {
    pub backend: Arc<dyn EconomyBackend>,
    pub currencies: Arc<CurrencyCache>,
    pub links: LinkStore,
    pub perms: PermStore,
    pub notifier: Arc<dyn Notifier>,
}

/// A slash-command invocation, already decoupled from the Discord SDK.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Discord user id of the invoker (the key of the link file).
    pub discord_id: String,
    /// Invoker's visible name, used in recipient notifications.
    pub display_name: String,
    pub command: Command,
}

fn not_linked() -> Reply {
    Reply::embed(
        Embed::new()
            .title("❌ Account Not Linked")
            .description("Your Discord account is not linked to a Construxis user")
            .color(COLOR_ERROR),
    )
    .ephemeral()
}

/// Runs one command invocation to a single reply. Never panics and never
/// returns an error: backend failures become an error reply carrying the
/// best-available message.
pub async fn dispatch(ctx: &BotContext, inv: &Invocation) -> Reply {
    let username = if inv.command.requires_link() {
        match ctx.links.username_for(&inv.discord_id).await {
            Some(username) => username,
            None => return not_linked(),
        }
    } else {
        // The two link-free commands never read the username.
        String::new()
    };

    let result = match &inv.command {
        Command::Balance => handlers::balance(ctx, &username).await,
        Command::History { limit } => handlers::history(ctx, &username, *limit).await,
        Command::Hand {
            to_user,
            currency,
            amount,
            reason,
        } => {
            handlers::hand(
                ctx,
                &inv.display_name,
                &username,
                to_user,
                currency,
                *amount,
                reason.as_deref(),
            )
            .await
        }
        Command::Transfer {
            to_account,
            amount,
            reason,
        } => handlers::transfer(ctx, &username, to_account, *amount, reason).await,
        Command::Deposit {
            account_id,
            amount,
            currency,
        } => handlers::deposit(ctx, account_id, *amount, currency).await,
        Command::Withdraw { account_id, amount } => {
            handlers::withdraw(ctx, &username, account_id, *amount).await
        }
        Command::Pay {
            entity,
            amount,
            currency,
            reason,
            to_user,
            to_account,
        } => {
            handlers::pay(
                ctx,
                &inv.discord_id,
                entity,
                *amount,
                currency,
                reason,
                to_user.as_deref(),
                to_account.as_deref(),
            )
            .await
        }
        Command::Paytax {
            entity,
            amount,
            reason,
        } => handlers::paytax(ctx, &username, entity, *amount, reason).await,
        Command::Burn {
            currency,
            amount,
            reason,
        } => handlers::burn(ctx, &username, currency, *amount, reason).await,
        Command::Pending => handlers::pending(ctx).await,
        Command::Stock { ticker } => handlers::stock(ctx, ticker).await,
        Command::Buy { ticker, shares } => {
            handlers::trade(ctx, &username, ticker, *shares, TradeAction::Buy).await
        }
        Command::Sell { ticker, shares } => {
            handlers::trade(ctx, &username, ticker, *shares, TradeAction::Sell).await
        }
        Command::Portfolio => handlers::portfolio(ctx, &username).await,
        Command::Market => handlers::market(ctx).await,
    };

    match result {
        Ok(reply) => reply,
        Err(error) => {
            warn!(%error, command = ?inv.command, "command failed");
            Reply::error(error.detail_or_message())
        }
    }
}

/// Resolves an approve/decline button press. `None` when the custom id is
/// not a recognized pending-transaction action; no backend call is made
/// in that case.
pub async fn dispatch_button(ctx: &BotContext, custom_id: &str) -> Option<Reply> {
    let button = ButtonCommand::parse(custom_id)?;

    let reply = match ctx
        .backend
        .pending_action(&PendingActionRequest {
            transaction_id: button.transaction_id.clone(),
            action: button.action,
        })
        .await
    {
        Ok(()) => {
            let (title, color) = match button.action {
                PendingAction::Approve => ("✅ Transaction Approved", COLOR_SUCCESS),
                PendingAction::Decline => ("❌ Transaction Declined", COLOR_ERROR),
            };
            Reply::embed(
                Embed::new()
                    .title(title)
                    .description(format!("Transaction ID: {}", button.transaction_id))
                    .color(color)
                    .timestamped(),
            )
        }
        Err(error) => {
            warn!(%error, custom_id, "pending action failed");
            Reply::error(error.detail_or_message())
        }
    };
    Some(reply)
}
