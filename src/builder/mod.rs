mod matrix;

pub use matrix::{MatrixEncoder, ModuleMatrix, QrcodeEncoder};

use std::path::Path;

use image::RgbaImage;
use tracing::info;

use crate::{
    common::{ECLevel, LogoConfig, LogoResult},
    render::render,
};

/// Single shot generation: encode, render and overlay the logo at a fixed scale. Never
/// consults a decoder.
pub struct LogoQRBuilder<'a> {
    data: &'a [u8],
    logo: Option<&'a RgbaImage>,
    cfg: LogoConfig,
}

impl<'a> LogoQRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, logo: None, cfg: LogoConfig::default() }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn logo(&mut self, logo: &'a RgbaImage) -> &mut Self {
        self.logo = Some(logo);
        self
    }

    pub fn unset_logo(&mut self) -> &mut Self {
        self.logo = None;
        self
    }

    pub fn logo_scale(&mut self, scale: f64) -> &mut Self {
        self.cfg.logo_scale = scale;
        self
    }

    pub fn module_sz(&mut self, module_sz: u32) -> &mut Self {
        self.cfg.module_sz = module_sz;
        self
    }

    pub fn border(&mut self, border: u32) -> &mut Self {
        self.cfg.border = border;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.cfg.ec_level = ec_level;
        self
    }

    pub fn config(&mut self, cfg: LogoConfig) -> &mut Self {
        self.cfg = cfg;
        self
    }

    pub fn metadata(&self) -> String {
        match self.logo {
            Some(l) => format!(
                "{{ Ec level: {:?}, Module size: {}, Border: {}, Logo: {}x{} @ {} }}",
                self.cfg.ec_level,
                self.cfg.module_sz,
                self.cfg.border,
                l.width(),
                l.height(),
                self.cfg.logo_scale
            ),
            None => format!(
                "{{ Ec level: {:?}, Module size: {}, Border: {}, Logo: None }}",
                self.cfg.ec_level, self.cfg.module_sz, self.cfg.border
            ),
        }
    }
}

impl LogoQRBuilder<'_> {
    pub fn build(&self) -> LogoResult<RgbaImage> {
        self.build_with(&QrcodeEncoder)
    }

    pub fn build_with<E: MatrixEncoder + ?Sized>(&self, encoder: &E) -> LogoResult<RgbaImage> {
        info!(metadata = %self.metadata(), "Generating QR");
        let matrix = encoder.encode(self.data, self.cfg.ec_level)?;
        render(&matrix, self.cfg.module_sz, self.cfg.border, self.logo, self.cfg.logo_scale)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> LogoResult<()> {
        let path = path.as_ref();
        self.build()?.save(path)?;
        info!(path = %path.display(), "Saved QR");
        Ok(())
    }
}
