//! Payment data filled in by the payer-facing application.
//!
//! [`PaymentData`] validates itself once, when it is built, and is immutable
//! afterwards. Text fields are stored trimmed and every length check runs on
//! the trimmed value. Character sanitization is a wire concern and happens
//! later, in the encoder.

use crate::amount::Amount;
use crate::{PixError, Result};
use serde::{Deserialize, Serialize};

/// Maximum characters for the recipient (merchant) name.
pub const MAX_RECIPIENT_NAME: usize = 25;
/// Maximum characters for the Pix key, so that group `26` fits in 99 characters.
pub const MAX_RECIPIENT_KEY: usize = 77;
/// Maximum characters for the sender city.
pub const MAX_SENDER_CITY: usize = 15;
/// Maximum characters for the optional description.
pub const MAX_DESCRIPTION: usize = 72;
/// Maximum characters of the formatted amount (including the `.`).
pub const MAX_AMOUNT_TEXT: usize = 13;

/// Data needed to build a Pix payment payload.
///
/// # Example
///
/// ```
/// use pixkit_lib::{Amount, PaymentData};
///
/// let data = PaymentData::new("Manoel", "11111111111", Amount::from_units(1), "Palmas")?;
/// assert_eq!(data.formatted_amount(), "1.00");
/// assert_eq!(data.description(), "");
/// # Ok::<(), pixkit_lib::PixError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaymentDataInput")]
pub struct PaymentData {
    recipient_name: String,
    recipient_key: String,
    amount: Amount,
    sender_city: String,
    description: String,
}

impl PaymentData {
    /// Create payment data without a description.
    pub fn new(
        recipient_name: &str,
        recipient_key: &str,
        amount: impl Into<Amount>,
        sender_city: &str,
    ) -> Result<Self> {
        Self::with_description(recipient_name, recipient_key, amount, sender_city, "")
    }

    /// Create payment data with a description.
    ///
    /// A blank description is stored as empty.
    ///
    /// The amount only has to be greater than zero as given. A positive amount
    /// below half a cent, such as `0.001`, is accepted and goes on the wire
    /// as `0.00`.
    ///
    /// # Errors
    ///
    /// - [`PixError::MissingField`] for a blank name, key or city
    /// - [`PixError::FieldTooLong`] for text over its limit, or an amount whose
    ///   formatted text exceeds 13 characters
    /// - [`PixError::NonPositiveAmount`] for an amount ≤ 0
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
    pub fn with_description(
        recipient_name: &str,
        recipient_key: &str,
        amount: impl Into<Amount>,
        sender_city: &str,
        description: &str,
    ) -> Result<Self> {
        let amount = amount.into();
        let data = Self {
            recipient_name: required("recipient_name", recipient_name, MAX_RECIPIENT_NAME)?,
            recipient_key: required("recipient_key", recipient_key, MAX_RECIPIENT_KEY)?,
            amount: checked_amount(amount)?,
            sender_city: required("sender_city", sender_city, MAX_SENDER_CITY)?,
            description: bounded("description", description, MAX_DESCRIPTION)?,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(amount = %data.formatted_amount(), "payment data validated");
        Ok(data)
    }

    /// Start a builder.
    pub fn builder() -> PaymentDataBuilder {
        PaymentDataBuilder::default()
    }

    /// Recipient (merchant) name, trimmed.
    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    /// Recipient Pix key (email, phone, tax id or random key), trimmed.
    pub fn recipient_key(&self) -> &str {
        &self.recipient_key
    }

    /// Amount as given.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Sender city, trimmed.
    pub fn sender_city(&self) -> &str {
        &self.sender_city
    }

    /// Description, trimmed; empty when none was given.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Amount with two fraction digits and a `.` separator.
    pub fn formatted_amount(&self) -> String {
        self.amount.formatted()
    }

    /// Parse and validate payment data from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn required(field: &'static str, value: &str, limit: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::warn!(field, "required field is blank");
        return Err(PixError::missing_field(field));
    }
    bounded(field, trimmed, limit)
}

fn bounded(field: &'static str, value: &str, limit: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() > limit {
        #[cfg(feature = "tracing")]
        tracing::warn!(field, limit, "field exceeds length limit");
        return Err(PixError::field_too_long(field, limit, trimmed));
    }
    Ok(trimmed.to_string())
}

fn checked_amount(amount: Amount) -> Result<Amount> {
    if !amount.is_positive() {
        return Err(PixError::NonPositiveAmount {
            amount: amount.to_string(),
        });
    }
    let text = amount.formatted();
    if text.len() > MAX_AMOUNT_TEXT {
        return Err(PixError::field_too_long("amount", MAX_AMOUNT_TEXT, text));
    }
    Ok(amount)
}

/// Unvalidated payment data as read from JSON.
#[derive(Deserialize)]
struct PaymentDataInput {
    recipient_name: String,
    recipient_key: String,
    amount: Amount,
    sender_city: String,
    #[serde(default)]
    description: String,
}

impl TryFrom<PaymentDataInput> for PaymentData {
    type Error = PixError;

    fn try_from(input: PaymentDataInput) -> Result<Self> {
        Self::with_description(
            &input.recipient_name,
            &input.recipient_key,
            input.amount,
            &input.sender_city,
            &input.description,
        )
    }
}

/// Step-by-step construction of [`PaymentData`].
///
/// ```
/// use pixkit_lib::{Amount, PaymentData};
///
/// let data = PaymentData::builder()
///     .recipient_key("manoel@example.com")
///     .description("lib")
///     .recipient_name("MANOEL")
///     .sender_city("PMW")
///     .amount(Amount::from_units(1))
///     .build()?;
/// assert_eq!(data.sender_city(), "PMW");
/// # Ok::<(), pixkit_lib::PixError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct PaymentDataBuilder {
    recipient_name: Option<String>,
    recipient_key: Option<String>,
    amount: Option<Amount>,
    sender_city: Option<String>,
    description: Option<String>,
}

impl PaymentDataBuilder {
    /// Set the recipient name.
    pub fn recipient_name(mut self, name: impl Into<String>) -> Self {
        self.recipient_name = Some(name.into());
        self
    }

    /// Set the recipient Pix key.
    pub fn recipient_key(mut self, key: impl Into<String>) -> Self {
        self.recipient_key = Some(key.into());
        self
    }

    /// Set the amount.
    pub fn amount(mut self, amount: impl Into<Amount>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    /// Set the sender city.
    pub fn sender_city(mut self, city: impl Into<String>) -> Self {
        self.sender_city = Some(city.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<PaymentData> {
        let name = self
            .recipient_name
            .ok_or_else(|| PixError::missing_field("recipient_name"))?;
        let key = self
            .recipient_key
            .ok_or_else(|| PixError::missing_field("recipient_key"))?;
        let amount = self
            .amount
            .ok_or_else(|| PixError::missing_field("amount"))?;
        let city = self
            .sender_city
            .ok_or_else(|| PixError::missing_field("sender_city"))?;
        PaymentData::with_description(
            &name,
            &key,
            amount,
            &city,
            self.description.as_deref().unwrap_or_default(),
        )
    }
}
