//! Newsletter sign-up.
//!
//! The storefront only checks the shape of the address before thanking the
//! shopper; nothing is sent anywhere.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Message shown when a subscription is accepted.
pub const SUBSCRIBED_MESSAGE: &str = "Thank you for subscribing!";

/// Message shown when the address is rejected.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

/// Reasons an address is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input is empty after trimming.
    #[error("email cannot be empty")]
    Empty,
    /// The input contains whitespace.
    #[error("email cannot contain whitespace")]
    ContainsWhitespace,
    /// There is no @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// There is more than one @ symbol.
    #[error("email must contain exactly one @ symbol")]
    MultipleAtSymbols,
    /// Nothing before the @.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain has no dot with text on both sides.
    #[error("email domain must look like name.tld")]
    InvalidDomain,
}

/// A syntactically valid email address.
///
/// ## Constraints
///
/// - Surrounding whitespace is trimmed; inner whitespace is rejected
/// - Exactly one @ symbol with a non-empty local part
/// - The domain contains a dot with at least one character on each side
///
/// ```
/// use luxe_commerce::newsletter::EmailAddress;
///
/// assert!(EmailAddress::parse("  jane@example.com ").is_ok());
/// assert!(EmailAddress::parse("jane@example").is_err());
/// assert!(EmailAddress::parse("jane doe@example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and validate an address.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmailError`] the input violates.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let email = input.trim();
        if email.is_empty() {
            return Err(EmailError::Empty);
        }
        if email.chars().any(char::is_whitespace) {
            return Err(EmailError::ContainsWhitespace);
        }

        let (local, domain) = email.split_once('@').ok_or(EmailError::MissingAtSymbol)?;
        if domain.contains('@') {
            return Err(EmailError::MultipleAtSymbols);
        }
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        let has_inner_dot = domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
        if !has_inner_dot {
            return Err(EmailError::InvalidDomain);
        }

        Ok(Self(email.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the @.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or("", |(local, _)| local)
    }

    /// The part after the @.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for EmailAddress {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

/// Handle a newsletter form submission.
///
/// On success the caller shows [`SUBSCRIBED_MESSAGE`], otherwise
/// [`INVALID_EMAIL_MESSAGE`].
pub fn subscribe(input: &str) -> Result<EmailAddress, EmailError> {
    let email = EmailAddress::parse(input)?;
    tracing::info!(domain = email.domain(), "newsletter subscription accepted");
    Ok(email)
}
