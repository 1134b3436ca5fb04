use thiserror::Error;

use crate::domain::FormError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Friend not found: {0}")]
    FriendNotFound(String),

    #[error("No friend selected: select a friend before splitting a bill")]
    NoFriendSelected,

    #[error("Balance with {0} would overflow")]
    BalanceOverflow(String),

    #[error(transparent)]
    Form(#[from] FormError),
}
