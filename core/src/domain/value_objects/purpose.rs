//! Why a code is being sent; selects the phrase used in the default message.

use crate::errors::DomainError;

/// Purpose of a verification code, numbered as on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Purpose {
    #[default]
    Registration = 0,
    Login = 1,
    ResettingPassword = 2,
    BindingPhoneOrEmail = 3,
}

impl Purpose {
    /// Phrase appended to the application name in the default message
    pub fn phrase(&self) -> &'static str {
        match self {
            Purpose::Registration => " registration code",
            Purpose::Login => " login code",
            Purpose::ResettingPassword => " password reset code",
            Purpose::BindingPhoneOrEmail => " account binding code",
        }
    }
}

impl TryFrom<i32> for Purpose {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Purpose::Registration),
            1 => Ok(Purpose::Login),
            2 => Ok(Purpose::ResettingPassword),
            3 => Ok(Purpose::BindingPhoneOrEmail),
            other => Err(DomainError::Validation {
                message: format!("unknown purpose: {}", other),
            }),
        }
    }
}
