use super::FriendId;

/// Which friend, if any, the split-bill form currently targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    NoneSelected,
    Selected(FriendId),
}

impl Selection {
    /// Toggle selection of `friend_id`: picking the selected friend again clears it.
    pub fn select(self, friend_id: FriendId) -> Self {
        match self {
            Selection::Selected(current) if current == friend_id => Selection::NoneSelected,
            _ => Selection::Selected(friend_id),
        }
    }

    pub fn selected(&self) -> Option<FriendId> {
        match self {
            Selection::Selected(id) => Some(*id),
            Selection::NoneSelected => None,
        }
    }

    pub fn is_selected(&self, friend_id: FriendId) -> bool {
        self.selected() == Some(friend_id)
    }
}
