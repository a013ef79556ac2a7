//! Slash-command definitions registered with Discord at startup.

use serenity::all::{
    CommandOptionType, CreateCommand, CreateCommandOption, InstallationContext, InteractionContext,
};

fn opt(kind: CommandOptionType, name: &str, description: &str, required: bool) -> CreateCommandOption {
    CreateCommandOption::new(kind, name, description).required(required)
}

/// Commands are installable on servers and on user accounts, and usable
/// in guilds, bot DMs, and private channels.
fn everywhere(command: CreateCommand) -> CreateCommand {
    command
        .integration_types(vec![InstallationContext::Guild, InstallationContext::User])
        .contexts(vec![
            InteractionContext::Guild,
            InteractionContext::BotDm,
            InteractionContext::PrivateChannel,
        ])
}

pub fn commands() -> Vec<CreateCommand> {
    use CommandOptionType::{Integer, Number, String as Text};

    vec![
        everywhere(CreateCommand::new("balance").description("Check your balances")),
        everywhere(
            CreateCommand::new("history")
                .description("View your transaction history")
                .add_option(opt(Integer, "limit", "Number of transactions (default 10)", false)),
        ),
        everywhere(
            CreateCommand::new("hand")
                .description("Hand physical cash to someone")
                .add_option(opt(Text, "to_user", "Username", true))
                .add_option(opt(Text, "currency", "Currency code", true))
                .add_option(opt(Number, "amount", "Amount", true))
                .add_option(opt(Text, "reason", "Reason", false)),
        ),
        everywhere(
            CreateCommand::new("transfer")
                .description("Bank transfer to another account")
                .add_option(opt(Text, "to_account", "Account ID", true))
                .add_option(opt(Number, "amount", "Amount", true))
                .add_option(opt(Text, "reason", "Reason", true)),
        ),
        everywhere(
            CreateCommand::new("deposit")
                .description("Deposit cash into your bank account")
                .add_option(opt(Text, "account_id", "Your account ID", true))
                .add_option(opt(Number, "amount", "Amount", true))
                .add_option(opt(Text, "currency", "Currency code", true)),
        ),
        everywhere(
            CreateCommand::new("withdraw")
                .description("Withdraw cash from your bank account")
                .add_option(opt(Text, "account_id", "Your account ID", true))
                .add_option(opt(Number, "amount", "Amount", true)),
        ),
        everywhere(
            CreateCommand::new("pay")
                .description("Pay someone from an entity treasury (requires permission)")
                .add_option(opt(Text, "entity", "Entity name", true))
                .add_option(opt(Number, "amount", "Amount", true))
                .add_option(opt(Text, "currency", "Currency", true))
                .add_option(opt(Text, "reason", "Reason", true))
                .add_option(opt(Text, "to_user", "Username (for cash)", false))
                .add_option(opt(Text, "to_account", "Account ID (for bank)", false)),
        ),
        everywhere(
            CreateCommand::new("paytax")
                .description("Pay an entity (country/company)")
                .add_option(opt(Text, "entity", "Entity name", true))
                .add_option(opt(Number, "amount", "Amount", true))
                .add_option(opt(Text, "reason", "Reason (e.g. taxes)", true)),
        ),
        everywhere(
            CreateCommand::new("burn")
                .description("Burn cash")
                .add_option(opt(Text, "currency", "Currency", true))
                .add_option(opt(Number, "amount", "Amount", true))
                .add_option(opt(Text, "reason", "Reason", true)),
        ),
        everywhere(
            CreateCommand::new("pending").description("View and manage pending transactions"),
        ),
        everywhere(
            CreateCommand::new("stock")
                .description("View stock information")
                .add_option(opt(Text, "ticker", "Stock ticker", true)),
        ),
        everywhere(
            CreateCommand::new("buy")
                .description("Buy stocks")
                .add_option(opt(Text, "ticker", "Stock ticker", true))
                .add_option(opt(Integer, "shares", "Number of shares", true)),
        ),
        everywhere(
            CreateCommand::new("sell")
                .description("Sell stocks")
                .add_option(opt(Text, "ticker", "Stock ticker", true))
                .add_option(opt(Integer, "shares", "Number of shares", true)),
        ),
        everywhere(CreateCommand::new("portfolio").description("View your stock portfolio")),
        everywhere(CreateCommand::new("market").description("View all listed stocks")),
    ]
}
