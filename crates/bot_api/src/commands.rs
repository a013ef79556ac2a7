//! The typed slash-command set and the button-id grammar.

use shared::protocol::PendingAction;

/// One variant per registered slash command. Construction goes through
/// [`Command::parse`], an explicit finite mapping; unknown names map to
/// `None` and the interaction is ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Balance,
    History {
        limit: Option<i64>,
    },
    Hand {
        to_user: String,
        currency: String,
        amount: f64,
        reason: Option<String>,
    },
    Transfer {
        to_account: String,
        amount: f64,
        reason: String,
    },
    Deposit {
        account_id: String,
        amount: f64,
        currency: String,
    },
    Withdraw {
        account_id: String,
        amount: f64,
    },
    Pay {
        entity: String,
        amount: f64,
        currency: String,
        reason: String,
        to_user: Option<String>,
        to_account: Option<String>,
    },
    Paytax {
        entity: String,
        amount: f64,
        reason: String,
    },
    Burn {
        currency: String,
        amount: f64,
        reason: String,
    },
    Pending,
    Stock {
        ticker: String,
    },
    Buy {
        ticker: String,
        shares: i64,
    },
    Sell {
        ticker: String,
        shares: i64,
    },
    Portfolio,
    Market,
}

impl Command {
    /// Every command except the two read-only market lookups requires a
    /// linked backend username.
    pub fn requires_link(&self) -> bool {
        !matches!(self, Command::Market | Command::Stock { .. })
    }

    /// Builds a command from an interaction's name and options. `None`
    /// for unknown names and for missing required options.
    pub fn parse(name: &str, args: &CommandArgs) -> Option<Command> {
        let command = match name {
            "balance" => Command::Balance,
            "history" => Command::History {
                limit: args.int("limit"),
            },
            "hand" => Command::Hand {
                to_user: args.str("to_user")?,
                currency: args.str("currency")?,
                amount: args.num("amount")?,
                reason: args.str("reason"),
            },
            "transfer" => Command::Transfer {
                to_account: args.str("to_account")?,
                amount: args.num("amount")?,
                reason: args.str("reason")?,
            },
            "deposit" => Command::Deposit {
                account_id: args.str("account_id")?,
                amount: args.num("amount")?,
                currency: args.str("currency")?,
            },
            "withdraw" => Command::Withdraw {
                account_id: args.str("account_id")?,
                amount: args.num("amount")?,
            },
            "pay" => Command::Pay {
                entity: args.str("entity")?,
                amount: args.num("amount")?,
                currency: args.str("currency")?,
                reason: args.str("reason")?,
                to_user: args.str("to_user"),
                to_account: args.str("to_account"),
            },
            "paytax" => Command::Paytax {
                entity: args.str("entity")?,
                amount: args.num("amount")?,
                reason: args.str("reason")?,
            },
            "burn" => Command::Burn {
                currency: args.str("currency")?,
                amount: args.num("amount")?,
                reason: args.str("reason")?,
            },
            "pending" => Command::Pending,
            "stock" => Command::Stock {
                ticker: args.str("ticker")?,
            },
            "buy" => Command::Buy {
                ticker: args.str("ticker")?,
                shares: args.int("shares")?,
            },
            "sell" => Command::Sell {
                ticker: args.str("ticker")?,
                shares: args.int("shares")?,
            },
            "portfolio" => Command::Portfolio,
            "market" => Command::Market,
            _ => return None,
        };
        Some(command)
    }
}

/// Interaction option values, decoupled from any Discord SDK.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Num(f64),
}

#[derive(Debug, Clone, Default)]
pub struct CommandArgs(Vec<(String, ArgValue)>);

impl CommandArgs {
    pub fn new(args: Vec<(String, ArgValue)>) -> Self {
        Self(args)
    }

    pub fn str(&self, name: &str) -> Option<String> {
        self.0.iter().find_map(|(key, value)| match value {
            ArgValue::Str(s) if key == name => Some(s.clone()),
            _ => None,
        })
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.0.iter().find_map(|(key, value)| match value {
            ArgValue::Int(n) if key == name => Some(*n),
            _ => None,
        })
    }

    pub fn num(&self, name: &str) -> Option<f64> {
        self.0.iter().find_map(|(key, value)| match value {
            ArgValue::Num(n) if key == name => Some(*n),
            ArgValue::Int(n) if key == name => Some(*n as f64),
            _ => None,
        })
    }
}

/// A pending-transaction button press, parsed from the component custom
/// id `"{action}_{transaction_id}"`. Unrecognized actions never reach the
/// backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonCommand {
    pub action: PendingAction,
    pub transaction_id: String,
}

impl ButtonCommand {
    pub fn custom_id(action: PendingAction, transaction_id: &str) -> String {
        let action = match action {
            PendingAction::Approve => "approve",
            PendingAction::Decline => "decline",
        };
        format!("{action}_{transaction_id}")
    }

    pub fn parse(custom_id: &str) -> Option<ButtonCommand> {
        let mut parts = custom_id.split('_');
        let action = match parts.next()? {
            "approve" => PendingAction::Approve,
            "decline" => PendingAction::Decline,
            _ => return None,
        };
        let transaction_id = parts.next()?.to_string();
        Some(ButtonCommand {
            action,
            transaction_id,
        })
    }
}
