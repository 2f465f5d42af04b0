//! Pix "Copia e Cola" payload encoder.
//!
//! [`PayloadEncoder`] turns a validated [`PaymentData`] into the EMV
//! merchant-presented payload used by Pix: a fixed field tree serialized as
//! TLV, followed by the `6304` checksum marker and the CRC16 of everything
//! before it.
//!
//! # Example
//!
//! ```
//! use pixkit_lib::{Amount, PaymentData, PayloadEncoder};
//!
//! let data = PaymentData::new("Manoel", "11111111111", Amount::from_units(1), "Palmas")?;
//! let mut encoder = PayloadEncoder::new(&data);
//! assert_eq!(encoder.payload(), "");
//!
//! let payload = encoder.generate()?.to_string();
//! assert!(payload.ends_with("630477F1"));
//! assert_eq!(encoder.to_string(), payload);
//! # Ok::<(), pixkit_lib::PixError>(())
//! ```
//!
//! # Thread safety
//!
//! An encoder owns one piece of mutable state, the cached payload, and every
//! method that may refresh it takes `&mut self`. Share a single encoder
//! across threads only behind a lock; [`PaymentData`] itself is immutable
//! and can be shared freely.

use crate::crc::ChecksumCalculator;
use crate::payment::PaymentData;
use crate::render::SymbolRenderer;
use crate::tlv::{self, Field, FieldCode};
use crate::{PixError, Result};
use std::fmt;

/// Payload format indicator, field `00`.
pub const PAYLOAD_FORMAT_INDICATOR: &str = "01";
/// Arrangement identifier (GUI) for Pix, group `26` sub-field `00`.
pub const PIX_GUI: &str = "BR.GOV.BCB.PIX";
/// Merchant category code, field `52`.
pub const MERCHANT_CATEGORY_CODE: &str = "0000";
/// ISO 4217 numeric code for BRL, field `53`.
pub const CURRENCY_BRL: &str = "986";
/// ISO 3166-1 alpha-2 country code, field `58`.
pub const COUNTRY_CODE: &str = "BR";
/// Transaction id meaning "none used".
pub const NO_TRANSACTION_ID: &str = "***";
/// Maximum characters of a transaction id.
pub const MAX_TRANSACTION_ID: usize = 25;
/// Checksum field code and its fixed length.
pub const CRC_MARKER: &str = "6304";

/// Builds and caches the payload for one [`PaymentData`].
#[derive(Clone, Debug)]
pub struct PayloadEncoder<'a> {
    data: &'a PaymentData,
    transaction_id: String,
    payload: String,
}

impl<'a> PayloadEncoder<'a> {
    /// Encoder without a transaction id (`***`).
    pub fn new(data: &'a PaymentData) -> Self {
        Self {
            data,
            transaction_id: NO_TRANSACTION_ID.to_string(),
            payload: String::new(),
        }
    }

    /// Encoder with a transaction id chosen by the recipient.
    ///
    /// Use a value unique per charge (a UUID from the recipient's system
    /// works) so received payments can be reconciled, or `***` for none.
    ///
    /// # Errors
    ///
    /// [`PixError::TransactionIdTooLong`] above 25 characters.
    pub fn with_transaction_id(data: &'a PaymentData, transaction_id: &str) -> Result<Self> {
        let actual = transaction_id.chars().count();
        if actual > MAX_TRANSACTION_ID {
            #[cfg(feature = "tracing")]
            tracing::warn!(actual, "transaction id exceeds length limit");
            return Err(PixError::TransactionIdTooLong {
                limit: MAX_TRANSACTION_ID,
                actual,
                value: transaction_id.to_string(),
            });
        }
        Ok(Self {
            transaction_id: transaction_id.to_string(),
            ..Self::new(data)
        })
    }

    /// The payment data being encoded.
    pub fn payment_data(&self) -> &PaymentData {
        self.data
    }

    /// Transaction id written to group `62`.
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// Field tree for the current inputs, before serialization.
    pub fn fields(&self) -> Vec<(FieldCode, Field)> {
        let data = self.data;
        vec![
            (FieldCode::PAYLOAD_FORMAT, Field::scalar(PAYLOAD_FORMAT_INDICATOR)),
            (
                FieldCode::MERCHANT_ACCOUNT,
                Field::Group(vec![
                    (FieldCode::GUI, Field::scalar(PIX_GUI)),
                    (FieldCode::PIX_KEY, Field::scalar(data.recipient_key())),
                    (FieldCode::DESCRIPTION, Field::scalar(data.description())),
                ]),
            ),
            (FieldCode::CATEGORY_CODE, Field::scalar(MERCHANT_CATEGORY_CODE)),
            (FieldCode::CURRENCY, Field::scalar(CURRENCY_BRL)),
            (FieldCode::AMOUNT, Field::scalar(data.formatted_amount())),
            (FieldCode::COUNTRY, Field::scalar(COUNTRY_CODE)),
            (FieldCode::MERCHANT_NAME, Field::scalar(data.recipient_name())),
            (FieldCode::MERCHANT_CITY, Field::scalar(data.sender_city())),
            (
                FieldCode::ADDITIONAL_DATA,
                Field::Group(vec![(
                    FieldCode::REFERENCE_LABEL,
                    Field::scalar(self.transaction_id.as_str()),
                )]),
            ),
        ]
    }

    /// Build the payload from scratch and cache it.
    ///
    /// Always recomputes; unchanged inputs give byte-identical output. On
    /// error the previous cache is left untouched.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self), fields(amount = %self.data.formatted_amount())))]
    pub fn generate(&mut self) -> Result<&str> {
        let mut partial = tlv::serialize(&self.fields())?;
        partial.push_str(CRC_MARKER);
        let checksum = ChecksumCalculator::hex(partial.as_bytes());
        partial.push_str(&checksum);

        #[cfg(feature = "tracing")]
        tracing::debug!(len = partial.len(), %checksum, "payload generated");
        self.payload = partial;
        Ok(&self.payload)
    }

    /// Last generated payload, or empty before the first [`generate`](Self::generate).
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Cached payload, generating it first when the cache is blank.
    pub fn payload_or_generate(&mut self) -> Result<&str> {
        if self.payload.trim().is_empty() {
            return self.generate();
        }
        Ok(&self.payload)
    }

    /// Hand the payload to a symbol renderer, generating it first if needed.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
    pub fn emit<R: SymbolRenderer>(&mut self, renderer: &R) -> Result<R::Output> {
        let payload = self.payload_or_generate()?;
        renderer.render(payload)
    }
}

impl fmt::Display for PayloadEncoder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.payload)
    }
}

/// Check a complete payload's trailing checksum and read its top-level fields.
///
/// The payload must end with `6304` followed by four hex digits equal to the
/// CRC16 of everything up to and including the marker.
///
/// # Errors
///
/// [`PixError::MalformedPayload`] for a missing marker, a checksum mismatch,
/// text that does not read as TLV, or a field sequence that does not end
/// in exactly one checksum field `63`.
pub fn verify_payload(payload: &str) -> Result<Vec<(FieldCode, String)>> {
    let split = payload
        .len()
        .checked_sub(4)
        .filter(|at| payload.is_char_boundary(*at))
        .ok_or_else(|| PixError::malformed(0, "payload too short for a checksum"))?;
    let (partial, checksum) = payload.split_at(split);
    if !partial.ends_with(CRC_MARKER) {
        return Err(PixError::malformed(split, "missing 6304 checksum marker"));
    }
    let expected = ChecksumCalculator::hex(partial.as_bytes());
    if !checksum.eq_ignore_ascii_case(&expected) {
        return Err(PixError::malformed(
            split,
            format!("checksum {} does not match computed {}", checksum, expected),
        ));
    }
    let fields = tlv::parse_fields(payload)?;
    let crc_fields = fields.iter().filter(|(code, _)| *code == FieldCode::CRC).count();
    if crc_fields != 1 || fields.last() != Some(&(FieldCode::CRC, checksum.to_string())) {
        return Err(PixError::malformed(
            split - CRC_MARKER.len(),
            "checksum is not the last and only field 63",
        ));
    }
    Ok(fields)
}
