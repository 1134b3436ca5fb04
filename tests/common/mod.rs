// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use splitbill::application::{Config, SplitService};
use splitbill::cli::Session;
use splitbill::domain::{Friend, FriendId, Ledger, SettlementMode};
use splitbill::io::default_roster;

/// Helper to create a service over the built-in roster
pub fn test_service() -> SplitService {
    SplitService::new(default_roster(), Config::default())
}

/// Helper to create a service over the built-in roster in accumulate mode
pub fn accumulating_service() -> SplitService {
    SplitService::new(
        default_roster(),
        Config::default().with_mode(SettlementMode::Accumulate),
    )
}

/// Helper to create a service with exactly the given friends
pub fn service_with(friends: Vec<Friend>) -> SplitService {
    SplitService::new(Ledger::from_friends(friends), Config::default())
}

/// Look up a friend id by name, panicking if the fixture lacks it
pub fn friend_id(service: &SplitService, name: &str) -> FriendId {
    service
        .get_friend_by_name(name)
        .unwrap_or_else(|_| panic!("fixture has no friend named {}", name))
        .id
}

/// Run a script of session commands and return everything printed
pub fn run_script(service: SplitService, script: &str) -> Result<(SplitService, String)> {
    let mut session = Session::new(service, Vec::new());
    for line in script.lines() {
        session.execute_line(line)?;
    }
    let (service, output) = session.into_parts();
    Ok((service, String::from_utf8(output)?))
}
