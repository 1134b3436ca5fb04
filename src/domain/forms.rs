use log::debug;
use thiserror::Error;

use super::{Cents, Friend, ParseCentsError, Payer, parse_cents};

/// Image reference offered by the add-friend form before the user edits it.
pub const DEFAULT_IMAGE: &str = "https://i.pravatar.cc/48";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Friend name must not be empty")]
    EmptyName,

    #[error("Image URL must not be empty")]
    EmptyImage,

    #[error("Bill value is required")]
    MissingBill,

    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount {
        input: String,
        reason: ParseCentsError,
    },

    #[error("Bill value must be positive")]
    NonPositiveBill,

    #[error("Your expense cannot be negative")]
    NegativeExpense,

    #[error("Unknown payer '{0}': use 'user' or the friend's name")]
    UnknownPayer(String),
}

/// Validated input of the add-friend form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFriendForm {
    name: String,
    image: String,
}

impl AddFriendForm {
    pub fn new(name: impl AsRef<str>, image: impl AsRef<str>) -> Result<Self, FormError> {
        let name = name.as_ref().trim();
        let image = image.as_ref().trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }
        if image.is_empty() {
            return Err(FormError::EmptyImage);
        }
        Ok(Self {
            name: name.to_string(),
            image: image.to_string(),
        })
    }

    /// Form with the default avatar service as image.
    pub fn with_default_image(name: impl AsRef<str>) -> Result<Self, FormError> {
        Self::new(name, DEFAULT_IMAGE)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Create the friend record: fresh id, zero balance, and the id
    /// appended to the image URL so every friend gets its own avatar.
    pub fn into_friend(self) -> Friend {
        let mut friend = Friend::new(self.name, self.image);
        friend.image = format!("{}?={}", friend.image, friend.id);
        friend
    }
}

/// Validated input of the split-bill form.
///
/// `my_expense` never exceeds `bill`: updates that would break this are
/// ignored, the same way the form's expense input refuses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitBillForm {
    bill: Cents,
    my_expense: Cents,
    payer: Payer,
    /// Last expense refused for exceeding the bill, cleared on the next accepted one
    rejected_expense: Option<Cents>,
}

impl SplitBillForm {
    pub fn new(bill: Cents, payer: Payer) -> Result<Self, FormError> {
        if bill <= 0 {
            return Err(FormError::NonPositiveBill);
        }
        Ok(Self {
            bill,
            my_expense: 0,
            payer,
            rejected_expense: None,
        })
    }

    /// Build the form from raw text fields. A missing expense counts as zero.
    pub fn from_input(
        bill: &str,
        my_expense: Option<&str>,
        payer: Payer,
    ) -> Result<Self, FormError> {
        let bill = parse_amount(bill).map_err(|e| match e {
            FormError::InvalidAmount {
                reason: ParseCentsError::Empty,
                ..
            } => FormError::MissingBill,
            other => other,
        })?;
        let mut form = Self::new(bill, payer)?;
        if let Some(expense) = my_expense.filter(|s| !s.trim().is_empty()) {
            form.set_my_expense(parse_amount(expense)?)?;
        }
        Ok(form)
    }

    pub fn with_my_expense(mut self, my_expense: Cents) -> Result<Self, FormError> {
        self.set_my_expense(my_expense)?;
        Ok(self)
    }

    /// Update the user's share. Returns `Ok(false)` when the value exceeds
    /// the bill and was ignored.
    pub fn set_my_expense(&mut self, my_expense: Cents) -> Result<bool, FormError> {
        if my_expense < 0 {
            return Err(FormError::NegativeExpense);
        }
        if my_expense > self.bill {
            debug!(
                "ignoring expense {} above bill {}, keeping {}",
                my_expense, self.bill, self.my_expense
            );
            self.rejected_expense = Some(my_expense);
            return Ok(false);
        }
        self.my_expense = my_expense;
        self.rejected_expense = None;
        Ok(true)
    }

    /// Update the bill, lowering the user's share if it no longer fits.
    pub fn set_bill(&mut self, bill: Cents) -> Result<(), FormError> {
        if bill <= 0 {
            return Err(FormError::NonPositiveBill);
        }
        self.bill = bill;
        self.my_expense = self.my_expense.min(bill);
        Ok(())
    }

    pub fn set_payer(&mut self, payer: Payer) {
        self.payer = payer;
    }

    pub fn bill(&self) -> Cents {
        self.bill
    }

    pub fn my_expense(&self) -> Cents {
        self.my_expense
    }

    /// The friend's share, shown read-only next to the user's expense.
    pub fn friend_expense(&self) -> Cents {
        self.bill - self.my_expense
    }

    pub fn payer(&self) -> Payer {
        self.payer
    }

    pub fn rejected_expense(&self) -> Option<Cents> {
        self.rejected_expense
    }
}

fn parse_amount(input: &str) -> Result<Cents, FormError> {
    parse_cents(input).map_err(|reason| FormError::InvalidAmount {
        input: input.trim().to_string(),
        reason,
    })
}

/// Resolve the "who is paying" choice. The friend can be named either
/// generically or by their display name.
pub fn parse_payer(input: &str, friend_name: &str) -> Result<Payer, FormError> {
    let choice = input.trim().to_lowercase();
    match choice.as_str() {
        "user" | "you" | "me" => Ok(Payer::User),
        "friend" => Ok(Payer::Friend),
        _ if choice == friend_name.trim().to_lowercase() => Ok(Payer::Friend),
        _ => Err(FormError::UnknownPayer(input.trim().to_string())),
    }
}
