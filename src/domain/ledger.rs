use log::{debug, warn};

use super::{Cents, Friend, FriendId};

/// The set of friends and their balances, in insertion order.
///
/// `add_friend` and `settle` are the only ways to mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    friends: Vec<Friend>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from existing records, dropping any repeated id.
    pub fn from_friends(friends: impl IntoIterator<Item = Friend>) -> Self {
        let mut ledger = Self::new();
        for friend in friends {
            ledger.add_friend(friend);
        }
        ledger
    }

    /// Append a friend. Existing friends are never touched.
    pub fn add_friend(&mut self, friend: Friend) {
        if self.contains(friend.id) {
            warn!("ignoring friend {} with duplicate id {}", friend.name, friend.id);
            return;
        }
        self.friends.push(friend);
    }

    /// Replace one friend's balance. Unknown ids are a no-op.
    pub fn settle(&mut self, friend_id: FriendId, new_balance: Cents) {
        match self.friends.iter_mut().find(|f| f.id == friend_id) {
            Some(friend) => friend.balance = new_balance,
            None => debug!("settle: no friend with id {}", friend_id),
        }
    }

    pub fn get(&self, friend_id: FriendId) -> Option<&Friend> {
        self.friends.iter().find(|f| f.id == friend_id)
    }

    /// First friend whose name matches, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Friend> {
        let name = name.trim().to_lowercase();
        self.friends.iter().find(|f| f.name.to_lowercase() == name)
    }

    pub fn contains(&self, friend_id: FriendId) -> bool {
        self.get(friend_id).is_some()
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ledger() -> Ledger {
        Ledger::from_friends([
            Friend::new("Clark", "img/clark").with_balance(-700),
            Friend::new("Sarah", "img/sarah").with_balance(2000),
            Friend::new("Anthony", "img/anthony"),
        ])
    }

    #[test]
    fn test_add_friend_appends_in_order() {
        let mut ledger = sample_ledger();
        let before = ledger.friends().to_vec();

        let newcomer = Friend::new("Dana", "img/dana");
        ledger.add_friend(newcomer.clone());

        assert_eq!(ledger.len(), 4);
        assert_eq!(&ledger.friends()[..3], &before[..]);
        assert_eq!(ledger.friends()[3], newcomer);
    }

    #[test]
    fn test_add_friend_rejects_duplicate_id() {
        let mut ledger = sample_ledger();
        let clark_id = ledger.friends()[0].id;

        ledger.add_friend(Friend::new("Impostor", "img").with_id(clark_id));

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get(clark_id).unwrap().name, "Clark");
    }

    #[test]
    fn test_settle_only_touches_target_balance() {
        let mut ledger = sample_ledger();
        let before = ledger.clone();
        let sarah_id = ledger.friends()[1].id;

        ledger.settle(sarah_id, -5000);

        for (old, new) in before.friends().iter().zip(ledger.friends()) {
            if old.id == sarah_id {
                assert_eq!(new.balance, -5000);
                assert_eq!(new.name, old.name);
                assert_eq!(new.image, old.image);
                assert_eq!(new.created_at, old.created_at);
            } else {
                assert_eq!(new, old);
            }
        }
    }

    #[test]
    fn test_settle_unknown_id_is_noop() {
        let mut ledger = sample_ledger();
        let before = ledger.clone();

        ledger.settle(FriendId::new_v4(), 100);

        assert_eq!(ledger, before);
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let ledger = sample_ledger();
        assert_eq!(ledger.find_by_name("sarah").unwrap().balance, 2000);
        assert_eq!(ledger.find_by_name(" CLARK ").unwrap().balance, -700);
        assert!(ledger.find_by_name("nobody").is_none());
    }
}
