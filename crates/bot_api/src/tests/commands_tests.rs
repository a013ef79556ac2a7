use shared::protocol::PendingAction;

use crate::commands::{ArgValue, ButtonCommand, Command, CommandArgs};

fn args(pairs: &[(&str, ArgValue)]) -> CommandArgs {
    CommandArgs::new(
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect(),
    )
}

#[test]
fn unknown_command_name_maps_to_none() {
    assert_eq!(Command::parse("frobnicate", &CommandArgs::default()), None);
}

#[test]
fn bare_commands_parse_without_options() {
    assert_eq!(
        Command::parse("balance", &CommandArgs::default()),
        Some(Command::Balance)
    );
    assert_eq!(
        Command::parse("market", &CommandArgs::default()),
        Some(Command::Market)
    );
}

#[test]
fn history_limit_is_optional() {
    assert_eq!(
        Command::parse("history", &CommandArgs::default()),
        Some(Command::History { limit: None })
    );
    assert_eq!(
        Command::parse("history", &args(&[("limit", ArgValue::Int(25))])),
        Some(Command::History { limit: Some(25) })
    );
}

#[test]
fn hand_parses_all_options() {
    let parsed = Command::parse(
        "hand",
        &args(&[
            ("to_user", ArgValue::Str("bob".into())),
            ("currency", ArgValue::Str("usd".into())),
            ("amount", ArgValue::Num(4.5)),
        ]),
    );
    assert_eq!(
        parsed,
        Some(Command::Hand {
            to_user: "bob".into(),
            currency: "usd".into(),
            amount: 4.5,
            reason: None,
        })
    );
}

#[test]
fn missing_required_option_maps_to_none() {
    assert_eq!(
        Command::parse("hand", &args(&[("to_user", ArgValue::Str("bob".into()))])),
        None
    );
}

#[test]
fn amount_accepts_an_integer_option_value() {
    let parsed = Command::parse(
        "withdraw",
        &args(&[
            ("account_id", ArgValue::Str("ACCT-1".into())),
            ("amount", ArgValue::Int(5)),
        ]),
    );
    assert_eq!(
        parsed,
        Some(Command::Withdraw {
            account_id: "ACCT-1".into(),
            amount: 5.0,
        })
    );
}

#[test]
fn only_market_and_stock_skip_the_link_requirement() {
    assert!(!Command::Market.requires_link());
    assert!(!Command::Stock {
        ticker: "TEST".into()
    }
    .requires_link());
    assert!(Command::Balance.requires_link());
    assert!(Command::Pending.requires_link());
}

#[test]
fn button_ids_round_trip() {
    let id = ButtonCommand::custom_id(PendingAction::Decline, "TXN42");
    assert_eq!(id, "decline_TXN42");
    let parsed = ButtonCommand::parse(&id).expect("parse");
    assert_eq!(parsed.action, PendingAction::Decline);
    assert_eq!(parsed.transaction_id, "TXN42");
}

#[test]
fn unrecognized_button_action_does_not_parse() {
    assert_eq!(ButtonCommand::parse("cancel_TXN42"), None);
    assert_eq!(ButtonCommand::parse("approve"), None);
    assert_eq!(ButtonCommand::parse(""), None);
}

#[test]
fn button_transaction_id_stops_at_the_next_separator() {
    // Ids are minted without underscores; parsing mirrors that grammar.
    let parsed = ButtonCommand::parse("approve_TXN_42").expect("parse");
    assert_eq!(parsed.transaction_id, "TXN");
}
