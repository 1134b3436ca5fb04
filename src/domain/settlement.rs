use serde::{Deserialize, Serialize};

use super::Cents;

/// Who fronted the whole bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payer {
    #[default]
    User,
    Friend,
}

impl Payer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Payer::User => "user",
            Payer::Friend => "friend",
        }
    }
}

impl std::fmt::Display for Payer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compute the balance to record for the selected friend after one split.
///
/// Expects `bill > 0` and `0 <= my_expense <= bill`; the split-bill form
/// guarantees both. When the user paid, the friend owes their share
/// (`bill - my_expense`). When the friend paid, the user owes their own
/// share, recorded as `-my_expense`.
pub fn compute_settlement(bill: Cents, my_expense: Cents, payer: Payer) -> Cents {
    match payer {
        Payer::User => bill - my_expense,
        Payer::Friend => -my_expense,
    }
}

/// How a settlement outcome combines with the friend's previous balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementMode {
    /// The outcome overwrites the previous balance.
    #[default]
    Replace,
    /// The outcome is added to the previous balance.
    Accumulate,
}

impl SettlementMode {
    /// New balance for the friend, or `None` if accumulating would overflow.
    pub fn apply(&self, previous: Cents, outcome: Cents) -> Option<Cents> {
        match self {
            SettlementMode::Replace => Some(outcome),
            SettlementMode::Accumulate => previous.checked_add(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASES: &[(Cents, Cents)] = &[
        (1, 0),
        (1, 1),
        (2000, 500),
        (5000, 5000),
        (5000, 0),
        (12345, 678),
        (999_999, 333_333),
    ];

    #[test]
    fn test_user_paid_friend_owes_their_share() {
        for &(bill, mine) in CASES {
            let result = compute_settlement(bill, mine, Payer::User);
            assert_eq!(result, bill - mine);
            assert!(result >= 0);
        }
    }

    #[test]
    fn test_friend_paid_user_owes_own_share() {
        for &(bill, mine) in CASES {
            let result = compute_settlement(bill, mine, Payer::Friend);
            assert_eq!(result, -mine);
            assert!(result <= 0);
        }
    }

    #[test]
    fn test_settled_edges() {
        assert_eq!(compute_settlement(4200, 4200, Payer::User), 0);
        assert_eq!(compute_settlement(4200, 0, Payer::Friend), 0);
    }

    #[test]
    fn test_replace_discards_previous_balance() {
        let outcome = compute_settlement(2000, 500, Payer::User);
        assert_eq!(SettlementMode::Replace.apply(-700, outcome), Some(1500));
    }

    #[test]
    fn test_accumulate_nets_against_previous_balance() {
        let outcome = compute_settlement(2000, 500, Payer::User);
        assert_eq!(SettlementMode::Accumulate.apply(-700, outcome), Some(800));
    }

    #[test]
    fn test_accumulate_overflow_is_reported() {
        assert_eq!(SettlementMode::Accumulate.apply(i64::MAX - 10, 1000), None);
        assert_eq!(SettlementMode::Accumulate.apply(i64::MIN + 10, -1000), None);
        assert_eq!(SettlementMode::Replace.apply(i64::MAX, 1000), Some(1000));
    }

    #[test]
    fn test_default_mode_is_replace() {
        assert_eq!(SettlementMode::default(), SettlementMode::Replace);
    }
}
