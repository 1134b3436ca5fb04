use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, format_money};

pub type FriendId = Uuid;

/// Someone the user splits bills with.
///
/// The balance follows a fixed sign convention:
/// negative means the user owes this friend, positive means this friend
/// owes the user, zero means settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: FriendId,
    pub name: String,
    pub image: String,
    pub balance: Cents,
    pub created_at: DateTime<Utc>,
}

impl Friend {
    /// Create a settled friend with a fresh identifier.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            image: image.into(),
            balance: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: FriendId) -> Self {
        self.id = id;
        self
    }

    pub fn with_balance(mut self, balance: Cents) -> Self {
        self.balance = balance;
        self
    }

    pub fn status(&self) -> BalanceStatus {
        BalanceStatus::from_balance(self.balance)
    }

    /// Human-readable balance line, e.g. "Sarah owes you 20.00€".
    pub fn balance_message(&self, currency: &str) -> String {
        match self.status() {
            BalanceStatus::YouOwe(amount) => {
                format!("You owe {} {}", self.name, format_money(amount, currency))
            }
            BalanceStatus::OwesYou(amount) => {
                format!("{} owes you {}", self.name, format_money(amount, currency))
            }
            BalanceStatus::Even => format!("You and {} are even", self.name),
        }
    }
}

/// Direction of the debt between the user and one friend.
/// Amounts are always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "amount")]
pub enum BalanceStatus {
    YouOwe(Cents),
    OwesYou(Cents),
    Even,
}

impl BalanceStatus {
    pub fn from_balance(balance: Cents) -> Self {
        match balance {
            b if b < 0 => BalanceStatus::YouOwe(b.saturating_abs()),
            b if b > 0 => BalanceStatus::OwesYou(b),
            _ => BalanceStatus::Even,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceStatus::YouOwe(_) => "you_owe",
            BalanceStatus::OwesYou(_) => "owes_you",
            BalanceStatus::Even => "even",
        }
    }
}

impl std::fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
