use serde::{Deserialize, Serialize};

use crate::domain::{Cents, Friend};

/// Totals across every friend's balance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of positive balances
    pub owed_to_you: Cents,
    /// Sum of the absolute values of negative balances
    pub you_owe: Cents,
    /// `owed_to_you - you_owe`
    pub net: Cents,
    pub friends: usize,
    /// Friends with a zero balance
    pub settled: usize,
}

impl Summary {
    /// Totals saturate at the `Cents` range instead of overflowing.
    pub fn from_friends(friends: &[Friend]) -> Self {
        let mut summary = friends.iter().fold(Summary::default(), |mut acc, friend| {
            match friend.balance {
                b if b > 0 => acc.owed_to_you = acc.owed_to_you.saturating_add(b),
                b if b < 0 => acc.you_owe = acc.you_owe.saturating_add(b.saturating_abs()),
                _ => acc.settled += 1,
            }
            acc.friends += 1;
            acc
        });
        summary.net = summary.owed_to_you.saturating_sub(summary.you_owe);
        summary
    }
}
