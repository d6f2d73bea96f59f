use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

/// The three user-editable money inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountInput {
    SellPrice,
    Fees,
    Cost,
}

impl AmountInput {
    pub fn key(&self) -> &'static str {
        match self {
            AmountInput::SellPrice => "sellPrice",
            AmountInput::Fees => "fees",
            AmountInput::Cost => "cost",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "sellPrice" => Some(AmountInput::SellPrice),
            "fees" => Some(AmountInput::Fees),
            "cost" => Some(AmountInput::Cost),
            _ => None,
        }
    }
}

/// Money inputs as entered plus the derived net profit.
///
/// Inputs are only writable through [`Financial::set_input`], which keeps
/// `net_profit` in step with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Financial {
    sell_price: String,
    fees: String,
    cost: String,
    #[serde(with = "rust_decimal::serde::float")]
    net_profit: Decimal,
}

impl Financial {
    pub fn new(sell_price: impl Into<String>, fees: impl Into<String>, cost: impl Into<String>) -> Self {
        let mut financial = Self {
            sell_price: sell_price.into(),
            fees: fees.into(),
            cost: cost.into(),
            net_profit: Decimal::ZERO,
        };
        financial.recompute();
        financial
    }

    pub fn net_profit(&self) -> Decimal {
        self.net_profit
    }

    pub fn input(&self, which: AmountInput) -> &str {
        match which {
            AmountInput::SellPrice => &self.sell_price,
            AmountInput::Fees => &self.fees,
            AmountInput::Cost => &self.cost,
        }
    }

    pub fn set_input(&mut self, which: AmountInput, value: impl Into<String>) {
        let value = value.into();
        match which {
            AmountInput::SellPrice => self.sell_price = value,
            AmountInput::Fees => self.fees = value,
            AmountInput::Cost => self.cost = value,
        }
        self.recompute();
    }

    pub fn sell_price(&self) -> &str {
        &self.sell_price
    }

    pub fn fees(&self) -> &str {
        &self.fees
    }

    pub fn cost(&self) -> &str {
        &self.cost
    }

    fn recompute(&mut self) {
        self.net_profit = compute_net_profit(&self.sell_price, &self.fees, &self.cost);
    }
}

impl Default for Financial {
    fn default() -> Self {
        Financial::new("", "", "")
    }
}

/// Lenient amount parse: the leading number of the input, so `"3x"` reads as 3
/// and blank or non-numeric input reads as zero. Plain decimals are exact.
pub fn parse_amount(raw: &str) -> Decimal {
    let number = leading_number(raw.trim());
    if number.is_empty() {
        return Decimal::ZERO;
    }
    if !number.contains(|c: char| c == 'e' || c == 'E') {
        if let Ok(amount) = Decimal::from_str(number) {
            return amount;
        }
    }
    number
        .parse::<f64>()
        .ok()
        .and_then(shortest_decimal)
        .unwrap_or(Decimal::ZERO)
}

/// Longest prefix of `s` that reads as a decimal number with an optional
/// exponent, or `""` when `s` doesn't start with one.
fn leading_number(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = match bytes.first() {
        Some(b'+' | b'-') => 1,
        _ => 0,
    };
    let int_start = end;
    end = digits_from(end);
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }
    if digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Nearest f64 to `amount`.
pub fn amount_to_f64(amount: Decimal) -> f64 {
    amount.to_string().parse().unwrap_or(0.0)
}

/// `amount` as it reads back after travelling as a JSON number: the shortest
/// decimal that maps to the same f64. Applying it twice changes nothing.
pub fn wire_amount(amount: Decimal) -> Decimal {
    shortest_decimal(amount_to_f64(amount)).unwrap_or(amount)
}

fn shortest_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

/// `sell_price - fees - cost`, each input read with [`parse_amount`].
pub fn compute_net_profit(sell_price: &str, fees: &str, cost: &str) -> Decimal {
    parse_amount(sell_price)
        .saturating_sub(parse_amount(fees))
        .saturating_sub(parse_amount(cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_net_profit_with_blank_cost() {
        assert_eq!(compute_net_profit("500", "20", ""), Decimal::from(480));
    }

    #[test]
    fn test_non_numeric_inputs_count_as_zero() {
        assert_eq!(compute_net_profit("abc", "", "  "), Decimal::ZERO);
        assert_eq!(compute_net_profit("100", "ten", "5"), Decimal::from(95));
    }

    #[test]
    fn test_parse_amount_reads_leading_number() {
        assert_eq!(parse_amount("3x"), Decimal::from(3));
        assert_eq!(parse_amount(" 12.50 USD"), Decimal::from_str("12.50").unwrap());
        assert_eq!(parse_amount("-4.5"), Decimal::from_str("-4.5").unwrap());
        assert_eq!(parse_amount("1e3"), Decimal::from(1000));
        assert_eq!(parse_amount("2e"), Decimal::from(2));
        assert_eq!(parse_amount(".5"), Decimal::from_str("0.5").unwrap());
        assert_eq!(parse_amount("-"), Decimal::ZERO);
        assert_eq!(parse_amount("."), Decimal::ZERO);
        assert_eq!(parse_amount("1e999"), Decimal::ZERO);
        assert_eq!(
            parse_amount("0.1234567890123456789"),
            Decimal::from_str("0.1234567890123456789").unwrap()
        );
    }

    #[test]
    fn test_wire_amount_matches_json_number() {
        let precise = Decimal::from_str("0.1234567890123456789").unwrap();
        let on_wire = wire_amount(precise);
        assert_eq!(on_wire, Decimal::from_str("0.12345678901234568").unwrap());
        assert_eq!(wire_amount(on_wire), on_wire);
        assert_eq!(wire_amount(Decimal::from_str("50.05").unwrap()), Decimal::from_str("50.05").unwrap());
        assert_eq!(amount_to_f64(Decimal::from_str("0.1").unwrap()), 0.1);
    }

    #[test]
    fn test_inputs_only_change_through_set_input() {
        let mut financial = Financial::new("1000", "50", "300");
        financial.set_input(AmountInput::Cost, "900");
        assert_eq!(financial.cost(), "900");
        assert_eq!(financial.input(AmountInput::Cost), "900");
        assert_eq!(financial.net_profit(), Decimal::from(50));
    }

    #[test]
    fn test_decimal_inputs_are_exact() {
        assert_eq!(
            compute_net_profit("100.10", "0.05", "50.05"),
            Decimal::from_str("50.00").unwrap()
        );
    }

    #[test]
    fn test_set_input_recomputes() {
        let mut financial = Financial::new("1000", "50", "300");
        assert_eq!(financial.net_profit(), Decimal::from(650));

        financial.set_input(AmountInput::Cost, "400");
        assert_eq!(financial.net_profit(), Decimal::from(550));

        financial.set_input(AmountInput::SellPrice, "");
        assert_eq!(financial.net_profit(), Decimal::from(-450));
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Financial::default().net_profit(), Decimal::ZERO);
    }

    #[test]
    fn test_amount_input_keys() {
        for input in [AmountInput::SellPrice, AmountInput::Fees, AmountInput::Cost] {
            assert_eq!(AmountInput::from_key(input.key()), Some(input));
        }
        assert_eq!(AmountInput::from_key("netProfit"), None);
    }

    proptest! {
        #[test]
        fn prop_net_profit_is_difference(
            sell in 0i64..10_000_000,
            fees in 0i64..10_000_000,
            cost in 0i64..10_000_000,
        ) {
            let expected = Decimal::new(sell, 2) - Decimal::new(fees, 2) - Decimal::new(cost, 2);
            let got = compute_net_profit(
                &Decimal::new(sell, 2).to_string(),
                &Decimal::new(fees, 2).to_string(),
                &Decimal::new(cost, 2).to_string(),
            );
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn prop_garbage_never_panics(sell in ".*", fees in ".*", cost in ".*") {
            let _ = compute_net_profit(&sell, &fees, &cost);
        }

        #[test]
        fn prop_wire_amount_is_stable(raw in "-?[0-9]{1,12}(\\.[0-9]{1,16})?") {
            let once = wire_amount(parse_amount(&raw));
            prop_assert_eq!(wire_amount(once), once);
            prop_assert_eq!(parse_amount(&amount_to_f64(once).to_string()), once);
        }
    }
}
