//! One async function per slash command.
//!
//! Handlers make sequential backend calls only and produce exactly one
//! [`Reply`]. Local validation failures (missing wallet, missing account,
//! missing permission, missing recipient) come back as rejection replies
//! before any mutating backend call. Backend errors propagate to the
//! dispatcher, which turns them into an error reply.

use chrono::{DateTime, Utc};
use shared::{
    currency::{currency_name, format_amount},
    error::BackendError,
    protocol::{
        AccountAction, AccountOperationRequest, BurnRequest, EntityPayRequest,
        EntityReceiveRequest, PendingAction, TradeAction, TradeRequest, TransactionRequest,
    },
};
use tracing::debug;

use crate::commands::ButtonCommand;
use crate::dispatch::BotContext;
use crate::reply::{
    Button, ButtonStyle, Embed, Reply, COLOR_BURN, COLOR_ERROR, COLOR_INFO, COLOR_MUTED,
    COLOR_PENDING, COLOR_SALE, COLOR_SUCCESS,
};

/// Physical-cash wallet ids follow the backend's naming scheme
/// `VF-CASH-{username}-{currency}`.
const CASH_WALLET_PREFIX: &str = "VF-CASH";

const DEFAULT_HISTORY_LIMIT: i64 = 10;
const HISTORY_DISPLAY_CAP: usize = 10;

type Result<T> = std::result::Result<T, BackendError>;

fn rejection(title: &str, message: impl Into<String>) -> Reply {
    Reply::embed(
        Embed::new()
            .title(title)
            .description(message)
            .color(COLOR_ERROR),
    )
    .ephemeral()
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Drops a `prefix:` tag from a wallet reference, keeping everything
/// after the first colon.
fn strip_wallet_tag(reference: &str) -> &str {
    reference
        .split_once(':')
        .map(|(_, rest)| rest)
        .unwrap_or(reference)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub async fn balance(ctx: &BotContext, username: &str) -> Result<Reply> {
    let Ok(user) = ctx.backend.user(username).await else {
        return Ok(rejection("❌ Error", "User not found"));
    };
    let currencies = ctx.currencies.snapshot();

    let mut embed = Embed::new().title("💰 Your Balances").color(COLOR_INFO);

    // Aggregate cash wallets per currency, first-seen order.
    let mut cash: Vec<(String, f64)> = Vec::new();
    for wallet in &user.wallets {
        match cash.iter_mut().find(|(code, _)| *code == wallet.currency) {
            Some((_, total)) => *total += wallet.balance,
            None => cash.push((wallet.currency.clone(), wallet.balance)),
        }
    }

    if !cash.is_empty() {
        let lines: Vec<String> = cash
            .iter()
            .map(|(code, total)| {
                format!(
                    "{} ({})",
                    format_amount(&currencies, *total, code),
                    currency_name(&currencies, code)
                )
            })
            .collect();
        embed = embed.field("💵 Cash", lines.join("\n"));
    }

    if !user.bank_accounts.is_empty() {
        let lines: Vec<String> = user
            .bank_accounts
            .iter()
            .map(|account| {
                let frozen = if account.frozen { " **[FROZEN]**" } else { "" };
                format!(
                    "{} ({}){frozen}\nAccount: {}",
                    format_amount(&currencies, account.balance, &account.currency),
                    currency_name(&currencies, &account.currency),
                    account.account_id
                )
            })
            .collect();
        embed = embed.field("🏦 Bank Accounts", lines.join("\n\n"));
    }

    if cash.is_empty() && user.bank_accounts.is_empty() {
        embed = embed.description("No balances found");
    }

    Ok(Reply::embed(embed.timestamped()))
}

pub async fn history(ctx: &BotContext, username: &str, limit: Option<i64>) -> Result<Reply> {
    let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let history = ctx.backend.history(username, limit).await?;

    if history.transactions.is_empty() {
        return Ok(Reply::embed(
            Embed::new()
                .title("📋 Transaction History")
                .description("No transactions found")
                .color(COLOR_MUTED),
        ));
    }

    let currencies = ctx.currencies.snapshot();
    let mut embed = Embed::new()
        .title("📋 Transaction History")
        .description(format!(
            "Showing {} most recent transactions",
            history.transactions.len()
        ))
        .color(COLOR_INFO);

    for txn in history.transactions.iter().take(HISTORY_DISPLAY_CAP) {
        let amount = format_amount(&currencies, txn.amount, &txn.currency);
        embed = embed.field(
            format!("{} - {}", txn.id, txn.kind),
            format!(
                "{amount}\n{} → {}\n{}\n{}",
                strip_wallet_tag(&txn.from),
                strip_wallet_tag(&txn.to),
                txn.note.as_deref().unwrap_or("No note"),
                format_date(&txn.date)
            ),
        );
    }

    Ok(Reply::embed(embed))
}

#[allow(clippy::too_many_arguments)]
pub async fn hand(
    ctx: &BotContext,
    invoker: &str,
    username: &str,
    to_user: &str,
    currency: &str,
    amount: f64,
    reason: Option<&str>,
) -> Result<Reply> {
    let currency = currency.to_uppercase();
    let reason = reason.unwrap_or("Cash payment");
    let currencies = ctx.currencies.snapshot();

    let user = ctx.backend.user(username).await?;
    let Some(from_wallet) = user.wallets.iter().find(|w| w.currency == currency) else {
        return Ok(rejection(
            "❌ Error",
            format!(
                "You don't have a {} cash wallet",
                currency_name(&currencies, &currency)
            ),
        ));
    };

    ctx.backend
        .create_transaction(&TransactionRequest {
            from_wallet: from_wallet.id.clone(),
            to_wallet: format!("{CASH_WALLET_PREFIX}-{to_user}-{currency}"),
            amount,
            currency: currency.clone(),
            note: reason.to_string(),
            is_physical: true,
        })
        .await?;

    let formatted = format_amount(&currencies, amount, &currency);

    if let Some(recipient_id) = ctx.links.discord_id_for(to_user).await {
        notify_best_effort(
            ctx,
            &recipient_id,
            Reply::embed(
                Embed::new()
                    .title("💵 Cash Received")
                    .description(format!("**{invoker}** handed you **{formatted}**"))
                    .field("Reason", reason)
                    .color(COLOR_SUCCESS)
                    .timestamped(),
            ),
        )
        .await;
    }

    Ok(Reply::embed(
        Embed::new()
            .title("💵 Cash Handed")
            .description(format!("Handed **{formatted}** to **{to_user}**"))
            .field("Reason", reason)
            .color(COLOR_SUCCESS)
            .timestamped(),
    ))
}

pub async fn transfer(
    ctx: &BotContext,
    username: &str,
    to_account: &str,
    amount: f64,
    reason: &str,
) -> Result<Reply> {
    let user = ctx.backend.user(username).await?;
    let Some(account) = user.bank_accounts.first() else {
        return Ok(rejection("❌ Error", "You don't have a bank account"));
    };

    let outcome = ctx
        .backend
        .create_transaction(&TransactionRequest {
            from_wallet: account.account_id.clone(),
            to_wallet: to_account.to_string(),
            amount,
            currency: account.currency.clone(),
            note: reason.to_string(),
            is_physical: false,
        })
        .await?;

    let currencies = ctx.currencies.snapshot();
    let formatted = format_amount(&currencies, amount, &account.currency);
    let mut embed = Embed::new()
        .description(format!("Transferred **{formatted}** to **{to_account}**"))
        .field("Reason", reason)
        .timestamped();

    if outcome.status == "completed" {
        embed = embed.title("✅ Transfer Complete").color(COLOR_SUCCESS);
    } else {
        embed = embed
            .title("⏳ Transfer Pending")
            .field(
                "Transaction ID",
                outcome.transaction_id.as_deref().unwrap_or("unknown"),
            )
            .color(COLOR_PENDING);
    }

    Ok(Reply::embed(embed))
}

pub async fn deposit(
    ctx: &BotContext,
    account_id: &str,
    amount: f64,
    currency: &str,
) -> Result<Reply> {
    let currency = currency.to_uppercase();
    ctx.backend
        .account_operation(&AccountOperationRequest {
            account_id: account_id.to_string(),
            amount,
            currency: currency.clone(),
            action: AccountAction::Deposit,
        })
        .await?;

    let currencies = ctx.currencies.snapshot();
    Ok(Reply::embed(
        Embed::new()
            .title("✅ Deposit Complete")
            .description(format!(
                "Deposited **{}** into account",
                format_amount(&currencies, amount, &currency)
            ))
            .field("Account", account_id)
            .color(COLOR_SUCCESS)
            .timestamped(),
    ))
}

pub async fn withdraw(
    ctx: &BotContext,
    username: &str,
    account_id: &str,
    amount: f64,
) -> Result<Reply> {
    let user = ctx.backend.user(username).await?;
    let Some(account) = user
        .bank_accounts
        .iter()
        .find(|a| a.account_id == account_id)
    else {
        return Ok(rejection("❌ Error", "Account not found"));
    };

    ctx.backend
        .account_operation(&AccountOperationRequest {
            account_id: account_id.to_string(),
            amount,
            currency: account.currency.clone(),
            action: AccountAction::Withdraw,
        })
        .await?;

    let currencies = ctx.currencies.snapshot();
    Ok(Reply::embed(
        Embed::new()
            .title("✅ Withdrawal Complete")
            .description(format!(
                "Withdrew **{}** from account",
                format_amount(&currencies, amount, &account.currency)
            ))
            .field("Account", account_id)
            .color(COLOR_SUCCESS)
            .timestamped(),
    ))
}

#[allow(clippy::too_many_arguments)]
pub async fn pay(
    ctx: &BotContext,
    discord_id: &str,
    entity: &str,
    amount: f64,
    currency: &str,
    reason: &str,
    to_user: Option<&str>,
    to_account: Option<&str>,
) -> Result<Reply> {
    if !ctx.perms.user_has_entity_perm(discord_id, entity, "pay").await {
        return Ok(rejection(
            "❌ Permission Denied",
            "You don't have permission to pay from this entity",
        ));
    }

    let currency = currency.to_uppercase();

    // to_user wins when both are given; neither is a local rejection
    // before any backend call.
    let (to_username, to_wallet, recipient) = match (to_user, to_account) {
        (Some(user), _) => (Some(user.to_string()), None, format!("**{user}**")),
        (None, Some(account)) => (
            None,
            Some(account.to_string()),
            format!("account **{account}**"),
        ),
        (None, None) => {
            return Ok(rejection("❌ Error", "Specify either to_user or to_account"));
        }
    };

    ctx.backend
        .entity_pay(&EntityPayRequest {
            entity_name: entity.to_string(),
            amount,
            currency: currency.clone(),
            note: reason.to_string(),
            to_username,
            to_wallet,
        })
        .await?;

    let currencies = ctx.currencies.snapshot();
    Ok(Reply::embed(
        Embed::new()
            .title("✅ Entity Payment")
            .description(format!(
                "Paid **{}** from **{entity}**",
                format_amount(&currencies, amount, &currency)
            ))
            .field("To", recipient)
            .field("Reason", reason)
            .color(COLOR_INFO)
            .timestamped(),
    ))
}

pub async fn paytax(
    ctx: &BotContext,
    username: &str,
    entity: &str,
    amount: f64,
    reason: &str,
) -> Result<Reply> {
    let user = ctx.backend.user(username).await?;
    let Some(account) = user.bank_accounts.first() else {
        return Ok(rejection("❌ Error", "You don't have a bank account"));
    };

    ctx.backend
        .entity_receive(&EntityReceiveRequest {
            entity_name: entity.to_string(),
            from_account: account.account_id.clone(),
            amount,
            currency: account.currency.clone(),
            note: reason.to_string(),
        })
        .await?;

    let currencies = ctx.currencies.snapshot();
    Ok(Reply::embed(
        Embed::new()
            .title("✅ Payment to Entity")
            .description(format!(
                "Paid **{}** to **{entity}**",
                format_amount(&currencies, amount, &account.currency)
            ))
            .field("Reason", reason)
            .color(COLOR_SUCCESS)
            .timestamped(),
    ))
}

pub async fn burn(
    ctx: &BotContext,
    username: &str,
    currency: &str,
    amount: f64,
    reason: &str,
) -> Result<Reply> {
    let currency = currency.to_uppercase();
    let currencies = ctx.currencies.snapshot();

    let user = ctx.backend.user(username).await?;
    let Some(wallet) = user.wallets.iter().find(|w| w.currency == currency) else {
        return Ok(rejection(
            "❌ Error",
            format!(
                "You don't have {} cash",
                currency_name(&currencies, &currency)
            ),
        ));
    };

    ctx.backend
        .burn(&BurnRequest {
            wallet_id: wallet.id.clone(),
            amount,
            currency: currency.clone(),
            reason: reason.to_string(),
        })
        .await?;

    Ok(Reply::embed(
        Embed::new()
            .title("🔥 Currency Burned")
            .description(format!(
                "Destroyed **{}**",
                format_amount(&currencies, amount, &currency)
            ))
            .field("Reason", reason)
            .color(COLOR_BURN)
            .timestamped(),
    ))
}

pub async fn pending(ctx: &BotContext) -> Result<Reply> {
    let pending = ctx.backend.pending().await?;

    // One transaction at a time; the buttons resolve it and the command
    // can be re-run for the next one.
    let Some((txn_id, txn)) = pending.pending_transactions.iter().next() else {
        return Ok(Reply::embed(
            Embed::new()
                .title("⏳ Pending Transactions")
                .description("No pending transactions")
                .color(COLOR_MUTED),
        ));
    };

    let currencies = ctx.currencies.snapshot();
    let embed = Embed::new()
        .title("⏳ Pending Transaction")
        .description(format!(
            "**{}**",
            format_amount(&currencies, txn.amount, &txn.currency)
        ))
        .inline_field("From", &txn.from)
        .inline_field("To", &txn.to)
        .inline_field("Type", if txn.is_physical { "Physical" } else { "Digital" })
        .field("Note", txn.note.as_deref().unwrap_or("No note"))
        .field("Created", format_date(&txn.created_at))
        .field("Transaction ID", txn_id)
        .color(COLOR_PENDING)
        .timestamped();

    Ok(Reply::embed(embed).buttons(vec![
        Button {
            custom_id: ButtonCommand::custom_id(PendingAction::Approve, txn_id),
            label: "Approve".to_string(),
            style: ButtonStyle::Success,
        },
        Button {
            custom_id: ButtonCommand::custom_id(PendingAction::Decline, txn_id),
            label: "Decline".to_string(),
            style: ButtonStyle::Danger,
        },
    ]))
}

pub async fn stock(ctx: &BotContext, ticker: &str) -> Result<Reply> {
    let ticker = ticker.to_uppercase();
    let quote = ctx.backend.stock(&ticker).await?;
    let currencies = ctx.currencies.snapshot();

    Ok(Reply::embed(
        Embed::new()
            .title(format!("📈 {} ({ticker})", quote.name))
            .inline_field(
                "Current Price",
                format_amount(&currencies, quote.price, &quote.currency),
            )
            .inline_field("Volume (24h)", format!("{} shares", quote.volume_24h))
            .inline_field("Shareholders", quote.shareholders.to_string())
            .inline_field(
                "Outstanding Shares",
                group_thousands(quote.outstanding_shares),
            )
            .footer(currency_name(&currencies, &quote.currency))
            .color(COLOR_SUCCESS),
    ))
}

pub async fn trade(
    ctx: &BotContext,
    username: &str,
    ticker: &str,
    shares: i64,
    action: TradeAction,
) -> Result<Reply> {
    let ticker = ticker.to_uppercase();

    let user = ctx.backend.user(username).await?;
    let Some(account) = user.bank_accounts.first() else {
        let message = match action {
            TradeAction::Buy => "❌ You need a bank account to buy stocks",
            TradeAction::Sell => "❌ You need a bank account",
        };
        return Ok(Reply::text(message).ephemeral());
    };

    let outcome = ctx
        .backend
        .trade(&TradeRequest {
            ticker: ticker.clone(),
            shares,
            action,
            wallet_id: account.account_id.clone(),
        })
        .await?;

    let currencies = ctx.currencies.snapshot();
    let currency = outcome.currency.as_deref().unwrap_or(&account.currency);
    let (title, verb, total_label, color) = match action {
        TradeAction::Buy => ("✅ Stock Purchase", "Bought", "Total Cost", COLOR_SUCCESS),
        TradeAction::Sell => ("✅ Stock Sale", "Sold", "Total Received", COLOR_SALE),
    };

    Ok(Reply::embed(
        Embed::new()
            .title(title)
            .description(format!("{verb} **{shares} {ticker}**"))
            .inline_field(
                "Price per Share",
                format_amount(&currencies, outcome.price, currency),
            )
            .inline_field(
                total_label,
                format_amount(&currencies, outcome.total, currency),
            )
            .inline_field(
                "New Market Price",
                format_amount(&currencies, outcome.new_price, currency),
            )
            .color(color)
            .timestamped(),
    ))
}

pub async fn portfolio(ctx: &BotContext, username: &str) -> Result<Reply> {
    let portfolio = ctx.backend.portfolio(username).await?;

    if portfolio.holdings.is_empty() {
        return Ok(Reply::embed(
            Embed::new()
                .title("📊 Portfolio")
                .description("You don't own any stocks yet")
                .color(COLOR_MUTED),
        ));
    }

    let currencies = ctx.currencies.snapshot();
    let mut embed = Embed::new()
        .title(format!("📊 {username}'s Portfolio"))
        .color(COLOR_INFO);

    let mut totals: Vec<(String, f64)> = Vec::new();
    for holding in &portfolio.holdings {
        embed = embed.inline_field(
            holding.ticker.clone(),
            format!(
                "{} shares @ {}\nValue: **{}**",
                holding.shares,
                format_amount(&currencies, holding.current_price, &holding.currency),
                format_amount(&currencies, holding.total_value, &holding.currency)
            ),
        );
        match totals.iter_mut().find(|(code, _)| *code == holding.currency) {
            Some((_, total)) => *total += holding.total_value,
            None => totals.push((holding.currency.clone(), holding.total_value)),
        }
    }

    let total_lines: Vec<String> = totals
        .iter()
        .map(|(code, total)| format_amount(&currencies, *total, code))
        .collect();
    embed = embed.field("Total Portfolio Value", total_lines.join("\n"));

    Ok(Reply::embed(embed))
}

pub async fn market(ctx: &BotContext) -> Result<Reply> {
    let market = ctx.backend.stocks().await?;

    if market.stocks.is_empty() {
        return Ok(Reply::text("📈 No stocks listed yet"));
    }

    let currencies = ctx.currencies.snapshot();
    let mut embed = Embed::new()
        .title("📈 Stock Market")
        .description("All available stocks")
        .color(COLOR_SUCCESS);

    for stock in &market.stocks {
        embed = embed.inline_field(
            format!("{} - {}", stock.ticker, stock.name),
            format!(
                "Price: **{}**\n24h Vol: {} shares",
                format_amount(&currencies, stock.price, &stock.currency),
                stock.volume_24h
            ),
        );
    }

    Ok(Reply::embed(embed))
}

/// Fire-and-forget recipient notification; delivery failure is discarded
/// by contract and never surfaced to the initiating user.
async fn notify_best_effort(ctx: &BotContext, discord_id: &str, reply: Reply) {
    if let Err(error) = ctx.notifier.notify(discord_id, reply).await {
        debug!(%error, discord_id, "recipient notification failed");
    }
}
