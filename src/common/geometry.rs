use super::error::{LogoError, LogoResult};

// Geometry
//------------------------------------------------------------------------------

/// Pixel layout of a rendered symbol: `width` modules per side, each `module_sz` pixels,
/// surrounded by a quiet zone of `border` modules on every side. Rendered images are
/// always square.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Geometry {
    width: u32,
    module_sz: u32,
    border: u32,
}

impl Geometry {
    pub fn new(width: u32, module_sz: u32, border: u32) -> LogoResult<Self> {
        if width == 0 || module_sz == 0 {
            return Err(LogoError::InvalidGeometry);
        }
        Ok(Self { width, module_sz, border })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn module_sz(&self) -> u32 {
        self.module_sz
    }

    pub fn border(&self) -> u32 {
        self.border
    }

    pub fn total_modules(&self) -> usize {
        let w = self.width as usize;
        w * w
    }

    pub fn quiet_zone_px(&self) -> u32 {
        self.border * self.module_sz
    }

    pub fn image_sz(&self) -> u32 {
        self.width * self.module_sz + 2 * self.quiet_zone_px()
    }

    // Center of the i-th module along either axis, in pixels
    pub fn module_center(&self, i: u32) -> f64 {
        f64::from(self.quiet_zone_px() + i * self.module_sz) + f64::from(self.module_sz) / 2.0
    }
}
