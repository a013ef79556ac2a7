//! Currency-aware amount rendering over a descriptor table snapshot.

use std::collections::HashMap;

use crate::domain::{CurrencyInfo, SymbolPlacement};

pub type CurrencyTable = HashMap<String, CurrencyInfo>;

/// Renders `amount` in the display convention of `code`.
///
/// Unknown codes fall back to a two-decimal rendering with the bare code
/// appended. Known codes render in subunit terms when the amount is below
/// one major unit and the descriptor carries a usable subunit, otherwise
/// with two decimals in the major unit. Total for any finite amount.
pub fn format_amount(table: &CurrencyTable, amount: f64, code: &str) -> String {
    let Some(info) = table.get(code) else {
        return format!("{amount:.2} {code}");
    };

    let symbol = info.symbol.as_deref().unwrap_or(code);
    let before = matches!(info.symbol_placement, Some(SymbolPlacement::Before));

    if amount < 1.0 {
        if let (Some(subunit), Some(ratio)) = (usable_subunit(info), usable_ratio(info)) {
            let subunits = (amount * ratio).round() as i64;
            return if before {
                format!("{symbol}{subunits} {subunit}")
            } else {
                format!("{subunits} {subunit} {symbol}")
            };
        }
    }

    if before {
        format!("{symbol}{amount:.2}")
    } else {
        format!("{amount:.2} {symbol}")
    }
}

/// The currency's full name, or the code itself when none is known.
pub fn currency_name(table: &CurrencyTable, code: &str) -> String {
    table
        .get(code)
        .and_then(|info| info.full_name.clone())
        .unwrap_or_else(|| code.to_string())
}

fn usable_subunit(info: &CurrencyInfo) -> Option<&str> {
    info.subunit.as_deref().filter(|name| !name.is_empty())
}

fn usable_ratio(info: &CurrencyInfo) -> Option<f64> {
    info.subunit_ratio.filter(|ratio| *ratio != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> CurrencyInfo {
        CurrencyInfo {
            symbol: Some("$".into()),
            symbol_placement: Some(SymbolPlacement::Before),
            subunit: Some("cents".into()),
            subunit_ratio: Some(100.0),
            full_name: Some("US Dollar".into()),
        }
    }

    fn table() -> CurrencyTable {
        CurrencyTable::from([("USD".to_string(), usd())])
    }

    #[test]
    fn subunits_below_one_major_unit() {
        assert_eq!(format_amount(&table(), 0.5, "USD"), "$50 cents");
    }

    #[test]
    fn major_units_at_or_above_one() {
        assert_eq!(format_amount(&table(), 12.3, "USD"), "$12.30");
        assert_eq!(format_amount(&table(), 1.0, "USD"), "$1.00");
    }

    #[test]
    fn subunits_never_apply_above_one_even_with_subunit_descriptor() {
        assert_eq!(format_amount(&table(), 250.0, "USD"), "$250.00");
    }

    #[test]
    fn missing_subunit_falls_back_to_two_decimal_major_unit() {
        let mut info = usd();
        info.subunit = None;
        let table = CurrencyTable::from([("USD".to_string(), info)]);
        assert_eq!(format_amount(&table, 0.5, "USD"), "$0.50");
    }

    #[test]
    fn missing_ratio_falls_back_to_two_decimal_major_unit() {
        let mut info = usd();
        info.subunit_ratio = None;
        let table = CurrencyTable::from([("USD".to_string(), info)]);
        assert_eq!(format_amount(&table, 0.5, "USD"), "$0.50");
    }

    #[test]
    fn zero_ratio_is_not_a_usable_subunit() {
        let mut info = usd();
        info.subunit_ratio = Some(0.0);
        let table = CurrencyTable::from([("USD".to_string(), info)]);
        assert_eq!(format_amount(&table, 0.5, "USD"), "$0.50");
    }

    #[test]
    fn unknown_code_renders_amount_then_code() {
        assert_eq!(format_amount(&table(), 3.14159, "XAU"), "3.14 XAU");
        assert_eq!(format_amount(&CurrencyTable::new(), 0.25, "EUR"), "0.25 EUR");
    }

    #[test]
    fn symbol_after_placement() {
        let info = CurrencyInfo {
            symbol: Some("kr".into()),
            symbol_placement: Some(SymbolPlacement::After),
            subunit: Some("øre".into()),
            subunit_ratio: Some(100.0),
            full_name: None,
        };
        let table = CurrencyTable::from([("NOK".to_string(), info)]);
        assert_eq!(format_amount(&table, 5.0, "NOK"), "5.00 kr");
        assert_eq!(format_amount(&table, 0.25, "NOK"), "25 øre kr");
    }

    #[test]
    fn missing_symbol_uses_the_code() {
        let info = CurrencyInfo {
            subunit: Some("bits".into()),
            subunit_ratio: Some(1000.0),
            ..CurrencyInfo::default()
        };
        let table = CurrencyTable::from([("CRX".to_string(), info)]);
        assert_eq!(format_amount(&table, 2.0, "CRX"), "2.00 CRX");
        assert_eq!(format_amount(&table, 0.5, "CRX"), "500 bits CRX");
    }

    #[test]
    fn name_prefers_full_name_then_code() {
        assert_eq!(currency_name(&table(), "USD"), "US Dollar");
        assert_eq!(currency_name(&table(), "EUR"), "EUR");
    }

    #[test]
    fn unknown_placement_string_deserializes_as_after() {
        let info: CurrencyInfo =
            serde_json::from_str(r#"{"symbol":"?","symbol_placement":"sideways"}"#)
                .expect("descriptor");
        assert_eq!(info.symbol_placement, Some(SymbolPlacement::After));
    }
}
