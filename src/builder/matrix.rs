use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

use crate::common::{ECLevel, LogoError, LogoResult};

// Module matrix
//------------------------------------------------------------------------------

/// Square grid of modules, `true` for dark. Produced once per payload and reused for
/// every logo scale tried against it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ModuleMatrix {
    width: usize,
    ec_level: ECLevel,
    grid: Vec<bool>,
}

impl ModuleMatrix {
    pub fn new(width: usize, ec_level: ECLevel, grid: Vec<bool>) -> LogoResult<Self> {
        if width == 0 || grid.len() != width * width {
            return Err(LogoError::InvalidGeometry);
        }
        Ok(Self { width, ec_level, grid })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn total_modules(&self) -> usize {
        self.grid.len()
    }

    pub fn is_dark(&self, r: usize, c: usize) -> bool {
        debug_assert!(r < self.width && c < self.width, "Module ({r}, {c}) out of bound");
        self.grid[r * self.width + c]
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m).count()
    }
}

// Encoder
//------------------------------------------------------------------------------

/// Seam to the symbol encoder. Version selection, error correction and masking all
/// happen behind it.
pub trait MatrixEncoder {
    fn encode(&self, data: &[u8], ec_level: ECLevel) -> LogoResult<ModuleMatrix>;
}

/// Encoder backed by the `qrcode` crate, picking the smallest version that fits.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrcodeEncoder;

impl From<ECLevel> for EcLevel {
    fn from(ecl: ECLevel) -> Self {
        match ecl {
            ECLevel::L => EcLevel::L,
            ECLevel::M => EcLevel::M,
            ECLevel::Q => EcLevel::Q,
            ECLevel::H => EcLevel::H,
        }
    }
}

impl MatrixEncoder for QrcodeEncoder {
    fn encode(&self, data: &[u8], ec_level: ECLevel) -> LogoResult<ModuleMatrix> {
        if data.is_empty() {
            return Err(LogoError::EmptyData);
        }

        let code = QrCode::with_error_correction_level(data, ec_level.into())
            .map_err(|e| LogoError::Encode(e.to_string()))?;
        let width = code.width();
        let grid = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        debug!(width, ?ec_level, version = ?code.version(), "Encoded module matrix");

        ModuleMatrix::new(width, ec_level, grid)
    }
}
