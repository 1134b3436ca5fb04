use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::io::Read;

use crate::domain::{Cents, Friend, Ledger, cents_from_units, parse_cents};

/// Friends every new session starts with when no roster file is given.
pub fn default_roster() -> Ledger {
    Ledger::from_friends([
        Friend::new("Clark", "https://i.pravatar.cc/48?u=118836").with_balance(-700),
        Friend::new("Sarah", "https://i.pravatar.cc/48?u=933372").with_balance(2000),
        Friend::new("Anthony", "https://i.pravatar.cc/48?u=499476"),
    ])
}

/// One entry of a roster file. The balance is in currency units and may be
/// given as a JSON number or a decimal string.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub balance: Option<RosterAmount>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RosterAmount {
    Number(f64),
    Text(String),
}

impl RosterAmount {
    fn to_cents(&self) -> Result<Cents> {
        match self {
            RosterAmount::Number(n) => {
                cents_from_units(*n).with_context(|| format!("invalid balance {}", n))
            }
            RosterAmount::Text(s) => {
                parse_cents(s).with_context(|| format!("invalid balance '{}'", s))
            }
        }
    }
}

/// Load a roster from a JSON array of `{ name, image, balance }` objects.
/// Every entry gets a fresh id.
pub fn load_roster<R: Read>(reader: R) -> Result<Ledger> {
    let entries: Vec<RosterEntry> =
        serde_json::from_reader(reader).context("Failed to parse roster JSON")?;

    let mut friends = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let name = entry.name.trim();
        if name.is_empty() {
            bail!("Roster entry {}: name must not be empty", index + 1);
        }
        let image = entry.image.trim();
        if image.is_empty() {
            bail!("Roster entry {} ({}): image must not be empty", index + 1, name);
        }
        let balance = match &entry.balance {
            Some(amount) => amount
                .to_cents()
                .with_context(|| format!("Roster entry {} ({})", index + 1, name))?,
            None => 0,
        };
        friends.push(Friend::new(name, image).with_balance(balance));
    }

    Ok(Ledger::from_friends(friends))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let ledger = default_roster();
        let balances: Vec<(&str, Cents)> = ledger
            .friends()
            .iter()
            .map(|f| (f.name.as_str(), f.balance))
            .collect();
        assert_eq!(
            balances,
            vec![("Clark", -700), ("Sarah", 2000), ("Anthony", 0)]
        );
    }

    #[test]
    fn test_load_roster_numbers_and_strings() {
        let json = r#"[
            {"name": "Ana", "image": "img/ana", "balance": -12.5},
            {"name": "Ben", "image": "img/ben", "balance": "40"},
            {"name": "Cy", "image": "img/cy"}
        ]"#;

        let ledger = load_roster(json.as_bytes()).unwrap();

        let balances: Vec<Cents> = ledger.friends().iter().map(|f| f.balance).collect();
        assert_eq!(balances, vec![-1250, 4000, 0]);
    }

    #[test]
    fn test_load_roster_rejects_empty_name() {
        let json = r#"[{"name": " ", "image": "img"}]"#;
        let err = load_roster(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("name must not be empty"));
    }

    #[test]
    fn test_load_roster_rejects_bad_balance() {
        let json = r#"[{"name": "Ana", "image": "img", "balance": "lots"}]"#;
        assert!(load_roster(json.as_bytes()).is_err());
    }
}
