//! Tag-length-value field tree.
//!
//! Each field is a two-digit code, a two-digit decimal length and that many
//! characters of value. A value is either scalar text or a nested group of
//! fields, serialized first and then length-prefixed like any other value.

use crate::{PixError, Result};
use std::fmt;

/// Largest value length a two-digit prefix can express.
pub const MAX_VALUE_LEN: usize = 99;

/// Two-digit field code (`00`..=`99`).
///
/// Codes are fixed width, so numeric order and text order agree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldCode(u8);

impl FieldCode {
    /// Payload format indicator.
    pub const PAYLOAD_FORMAT: Self = Self(0);
    /// Merchant account information (Pix arrangement group).
    pub const MERCHANT_ACCOUNT: Self = Self(26);
    /// Merchant category code.
    pub const CATEGORY_CODE: Self = Self(52);
    /// Transaction currency.
    pub const CURRENCY: Self = Self(53);
    /// Transaction amount. Emitted verbatim, never sanitized.
    pub const AMOUNT: Self = Self(54);
    /// Country code.
    pub const COUNTRY: Self = Self(58);
    /// Merchant name.
    pub const MERCHANT_NAME: Self = Self(59);
    /// Merchant city.
    pub const MERCHANT_CITY: Self = Self(60);
    /// Additional data group.
    pub const ADDITIONAL_DATA: Self = Self(62);
    /// CRC16 checksum.
    pub const CRC: Self = Self(63);

    /// Arrangement identifier inside group `26`.
    pub const GUI: Self = Self(0);
    /// Pix key inside group `26`.
    pub const PIX_KEY: Self = Self(1);
    /// Description inside group `26`.
    pub const DESCRIPTION: Self = Self(2);
    /// Reference label (transaction id) inside group `62`.
    pub const REFERENCE_LABEL: Self = Self(5);

    /// Create a code, `None` above 99.
    pub const fn new(code: u8) -> Option<Self> {
        if code <= 99 {
            Some(Self(code))
        } else {
            None
        }
    }

    /// Numeric value of the code.
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for FieldCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A field value: scalar text or a nested group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    /// Plain text value.
    Scalar(String),
    /// Nested fields, serialized in code order.
    Group(Vec<(FieldCode, Field)>),
}

impl Field {
    /// Scalar from anything string-like.
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }
}

/// Serialize fields in ascending code order.
///
/// Scalars are sanitized (see [`sanitize`]) except the amount field `54`.
///
/// # Errors
///
/// [`PixError::SerializedFieldOverflow`] when any value, scalar or nested,
/// is longer than 99 characters.
pub fn serialize(fields: &[(FieldCode, Field)]) -> Result<String> {
    let mut ordered: Vec<&(FieldCode, Field)> = fields.iter().collect();
    ordered.sort_by_key(|(code, _)| *code);

    let mut out = String::new();
    for (code, field) in ordered {
        let value = match field {
            Field::Group(children) => serialize(children)?,
            Field::Scalar(text) if *code == FieldCode::AMOUNT => text.clone(),
            Field::Scalar(text) => sanitize(text),
        };
        out.push_str(&encode(*code, &value)?);
    }
    Ok(out)
}

/// Emit `code` + two-digit length + `value`.
pub fn encode(code: FieldCode, value: &str) -> Result<String> {
    let len = value.chars().count();
    if len > MAX_VALUE_LEN {
        return Err(PixError::SerializedFieldOverflow {
            code: code.to_string(),
            actual: len,
        });
    }
    Ok(format!("{}{:02}{}", code, len, value))
}

/// Drop every character outside the payload alphabet.
///
/// Kept: ASCII letters and digits, `-`, `@`, `.`, `*` and ASCII whitespace.
pub fn sanitize(value: &str) -> String {
    value.chars().filter(|c| is_payload_char(*c)).collect()
}

fn is_payload_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '-' | '@' | '.' | '*' | ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Read a flat code + length + value sequence.
///
/// Nested groups come back as their raw text; parse them again to descend.
///
/// ```
/// use pixkit_lib::tlv::{parse_fields, FieldCode};
///
/// let fields = parse_fields("0002015802BR")?;
/// assert_eq!(fields[1], (FieldCode::COUNTRY, "BR".to_string()));
/// # Ok::<(), pixkit_lib::PixError>(())
/// ```
pub fn parse_fields(text: &str) -> Result<Vec<(FieldCode, String)>> {
    let chars: Vec<char> = text.chars().collect();
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let code = read_number(&chars, pos, "field code")?;
        let len = usize::from(read_number(&chars, pos + 2, "field length")?);
        let start = pos + 4;
        let end = start + len;
        if end > chars.len() {
            return Err(PixError::malformed(
                start,
                format!("field {:02} declares {} characters, {} left", code, len, chars.len() - start),
            ));
        }
        let code = FieldCode::new(code).ok_or_else(|| PixError::malformed(pos, "field code"))?;
        fields.push((code, chars[start..end].iter().collect()));
        pos = end;
    }
    Ok(fields)
}

fn read_number(chars: &[char], pos: usize, what: &str) -> Result<u8> {
    let digits = chars
        .get(pos..pos + 2)
        .ok_or_else(|| PixError::malformed(pos, format!("truncated {}", what)))?;
    digits.iter().try_fold(0u8, |acc, c| {
        c.to_digit(10)
            .map(|d| acc * 10 + d as u8)
            .ok_or_else(|| PixError::malformed(pos, format!("{} must be two digits", what)))
    })
}
