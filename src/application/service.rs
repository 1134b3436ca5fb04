use log::{debug, info};

use crate::domain::{
    AddFriendForm, Cents, Friend, FriendId, Ledger, Payer, Selection, SplitBillForm,
    compute_settlement, format_money,
};

use super::{AppError, Config, Summary};

/// Application state for one session: the ledger, the selected friend,
/// and whether the add-friend form is open.
/// This is the primary interface for any client (CLI, tests, a future UI).
pub struct SplitService {
    ledger: Ledger,
    selection: Selection,
    show_add_friend: bool,
    config: Config,
}

/// Result of recording a bill split
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// The friend record after settlement
    pub friend: Friend,
    pub previous_balance: Cents,
    /// What `compute_settlement` produced before the mode was applied
    pub outcome: Cents,
    pub payer: Payer,
}

impl SplitService {
    /// Create a service over the given ledger.
    pub fn new(ledger: Ledger, config: Config) -> Self {
        Self {
            ledger,
            selection: Selection::NoneSelected,
            show_add_friend: false,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    // ========================
    // Add-friend form
    // ========================

    /// Open or close the add-friend form. Returns the new visibility.
    pub fn toggle_add_friend(&mut self) -> bool {
        self.show_add_friend = !self.show_add_friend;
        self.show_add_friend
    }

    pub fn show_add_friend(&self) -> bool {
        self.show_add_friend
    }

    /// Create a friend from a submitted form and close the form.
    /// Selection is left as it is.
    pub fn add_friend(&mut self, form: AddFriendForm) -> Friend {
        let friend = form.into_friend();
        info!("Added friend {} ({})", friend.name, friend.id);
        self.ledger.add_friend(friend.clone());
        self.show_add_friend = false;
        friend
    }

    // ========================
    // Selection
    // ========================

    /// Select a friend, or clear the selection if they were already selected.
    /// Also closes the add-friend form.
    pub fn select(&mut self, friend_id: FriendId) -> Result<Selection, AppError> {
        if !self.ledger.contains(friend_id) {
            return Err(AppError::FriendNotFound(friend_id.to_string()));
        }
        self.selection = self.selection.select(friend_id);
        self.show_add_friend = false;
        debug!("Selection is now {:?}", self.selection);
        Ok(self.selection)
    }

    /// Select a friend by display name (case-insensitive).
    pub fn select_by_name(&mut self, name: &str) -> Result<Selection, AppError> {
        let friend_id = self.get_friend_by_name(name)?.id;
        self.select(friend_id)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_friend(&self) -> Option<&Friend> {
        self.selection.selected().and_then(|id| self.ledger.get(id))
    }

    // ========================
    // Settlement
    // ========================

    /// Record a bill split with the selected friend.
    ///
    /// The selection stays in place afterwards so further splits can be
    /// entered for the same friend.
    pub fn split_bill(&mut self, form: SplitBillForm) -> Result<SplitResult, AppError> {
        let friend = self
            .selected_friend()
            .ok_or(AppError::NoFriendSelected)?
            .clone();

        let outcome = compute_settlement(form.bill(), form.my_expense(), form.payer());
        let new_balance = self
            .config
            .mode
            .apply(friend.balance, outcome)
            .ok_or_else(|| AppError::BalanceOverflow(friend.name.clone()))?;

        match form.payer() {
            Payer::User => info!(
                "{} owes you {}",
                friend.name,
                format_money(form.friend_expense(), &self.config.currency)
            ),
            Payer::Friend => info!(
                "You owe {} {}",
                friend.name,
                format_money(form.my_expense(), &self.config.currency)
            ),
        }

        self.ledger.settle(friend.id, new_balance);

        Ok(SplitResult {
            friend: Friend {
                balance: new_balance,
                ..friend.clone()
            },
            previous_balance: friend.balance,
            outcome,
            payer: form.payer(),
        })
    }

    // ========================
    // Queries
    // ========================

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn friends(&self) -> &[Friend] {
        self.ledger.friends()
    }

    pub fn get_friend(&self, friend_id: FriendId) -> Result<&Friend, AppError> {
        self.ledger
            .get(friend_id)
            .ok_or_else(|| AppError::FriendNotFound(friend_id.to_string()))
    }

    pub fn get_friend_by_name(&self, name: &str) -> Result<&Friend, AppError> {
        self.ledger
            .find_by_name(name)
            .ok_or_else(|| AppError::FriendNotFound(name.trim().to_string()))
    }

    pub fn summary(&self) -> Summary {
        Summary::from_friends(self.ledger.friends())
    }
}
