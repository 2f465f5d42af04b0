//! Pix "Copia e Cola" payload library.
//!
//! Encodes a merchant payment instruction into the EMV merchant-presented QR
//! text used by Pix, including its CRC16/CCITT-FALSE checksum. The crate is
//! pure computation: no I/O, no global state, no environment variables.
//!
//! # Features
//!
//! - **Validated payment data**: [`PaymentData`] checks every field limit once,
//!   at construction
//! - **Deterministic encoding**: [`PayloadEncoder`] serializes a fixed TLV tree
//!   and appends the checksum field `63`
//! - **Renderer seam**: [`SymbolRenderer`] receives the finished payload;
//!   `QrMatrixRenderer` (feature `qrcode`) builds the QR module matrix
//!
//! # Example
//!
//! ```
//! use pixkit_lib::{Amount, PaymentData, PayloadEncoder};
//!
//! let data = PaymentData::with_description(
//!     "Manoel",
//!     "manoel@example.com",
//!     Amount::from_str_checked("25.90")?,
//!     "Palmas",
//!     "Pedido 42",
//! )?;
//! let mut encoder = PayloadEncoder::with_transaction_id(&data, "PEDIDO42")?;
//! let payload = encoder.generate()?;
//! assert!(payload.starts_with("000201"));
//! assert!(pixkit_lib::encoder::verify_payload(payload).is_ok());
//! # Ok::<(), pixkit_lib::PixError>(())
//! ```

pub mod amount;
pub mod crc;
pub mod encoder;
pub mod errors;
pub mod payment;
pub mod render;
pub mod tlv;

pub use amount::Amount;
pub use crc::ChecksumCalculator;
pub use encoder::{verify_payload, PayloadEncoder};
pub use errors::{PixError, PixErrorCode};
pub use payment::{PaymentData, PaymentDataBuilder};
pub use render::{EcLevel, ModuleMatrix, RenderConfig, SymbolRenderer};

#[cfg(feature = "qrcode")]
pub use render::QrMatrixRenderer;

/// Common result alias for Pix operations.
pub type Result<T> = std::result::Result<T, PixError>;
