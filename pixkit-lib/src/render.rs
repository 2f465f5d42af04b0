//! Hand-off of the payload to a QR symbol renderer.
//!
//! The encoder only produces text. Anything that turns that text into a
//! symbol implements [`SymbolRenderer`]. With the `qrcode` feature,
//! [`QrMatrixRenderer`] produces the module matrix; rasterizing it into an
//! image file is left to the caller.

use crate::{PixError, Result};
use serde::{Deserialize, Serialize};

/// Consumer of a finished payload.
pub trait SymbolRenderer {
    /// What rendering produces.
    type Output;

    /// Render a complete payload.
    fn render(&self, payload: &str) -> Result<Self::Output>;
}

/// QR error-correction level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcLevel {
    /// ~7% recovery.
    #[default]
    Low,
    /// ~15% recovery.
    Medium,
    /// ~25% recovery.
    Quartile,
    /// ~30% recovery.
    High,
}

/// Text encoding the payload is rendered in.
pub const UTF8: &str = "UTF-8";

/// Renderer configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Error-correction level.
    #[serde(default)]
    pub error_correction: EcLevel,

    /// Text encoding of the payload bytes.
    #[serde(default = "default_charset")]
    pub charset: String,

    /// Side of the square symbol in pixels.
    #[serde(default = "default_size_px")]
    pub size_px: u32,
}

fn default_charset() -> String {
    UTF8.to_string()
}

fn default_size_px() -> u32 {
    300
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            error_correction: EcLevel::default(),
            charset: default_charset(),
            size_px: default_size_px(),
        }
    }
}

impl RenderConfig {
    /// Set the error-correction level.
    pub fn with_error_correction(mut self, level: EcLevel) -> Self {
        self.error_correction = level;
        self
    }

    /// Set the symbol size.
    pub fn with_size_px(mut self, size_px: u32) -> Self {
        self.size_px = size_px;
        self
    }

    /// Parse a configuration from JSON, filling in defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject settings no renderer can honor.
    pub fn validate(&self) -> Result<()> {
        if !self.charset.eq_ignore_ascii_case(UTF8) {
            return Err(PixError::Render(format!(
                "unsupported charset {}, payloads are {}",
                self.charset, UTF8
            )));
        }
        if self.size_px == 0 {
            return Err(PixError::Render("symbol size must be positive".to_string()));
        }
        Ok(())
    }
}

/// Square grid of QR modules, `true` for dark.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleMatrix {
    width: usize,
    modules: Vec<bool>,
    size_px: u32,
}

impl ModuleMatrix {
    /// Build from row-major modules. `modules.len()` must be `width * width`.
    pub fn new(width: usize, modules: Vec<bool>, size_px: u32) -> Result<Self> {
        if width == 0 || modules.len() != width * width {
            return Err(PixError::Render(format!(
                "{} modules do not form a {}x{} matrix",
                modules.len(),
                width,
                width
            )));
        }
        Ok(Self {
            width,
            modules,
            size_px,
        })
    }

    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Requested pixel size of the final image.
    pub fn size_px(&self) -> u32 {
        self.size_px
    }

    /// Module at column `x`, row `y`; out of range reads as light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.modules.chunks(self.width)
    }
}

/// Module-matrix renderer backed by the `qrcode` crate.
#[cfg(feature = "qrcode")]
#[derive(Clone, Debug, Default)]
pub struct QrMatrixRenderer {
    config: RenderConfig,
}

#[cfg(feature = "qrcode")]
impl QrMatrixRenderer {
    /// Create a renderer, rejecting unusable configuration.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

#[cfg(feature = "qrcode")]
impl SymbolRenderer for QrMatrixRenderer {
    type Output = ModuleMatrix;

    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all, fields(len = payload.len())))]
    fn render(&self, payload: &str) -> Result<ModuleMatrix> {
        let level = match self.config.error_correction {
            EcLevel::Low => qrcode::EcLevel::L,
            EcLevel::Medium => qrcode::EcLevel::M,
            EcLevel::Quartile => qrcode::EcLevel::Q,
            EcLevel::High => qrcode::EcLevel::H,
        };
        let code = qrcode::QrCode::with_error_correction_level(payload.as_bytes(), level)
            .map_err(|e| PixError::Render(e.to_string()))?;
        let modules = code
            .to_colors()
            .into_iter()
            .map(|color| color == qrcode::Color::Dark)
            .collect();
        ModuleMatrix::new(code.width(), modules, self.config.size_px)
    }
}
