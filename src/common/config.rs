use super::metadata::ECLevel;

// Logo config
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Copy, Clone)]
pub struct LogoConfig {
    /// Max fraction of the image edge the logo may occupy
    pub logo_scale: f64,
    /// Pixels per module edge
    pub module_sz: u32,
    /// Quiet zone width in modules
    pub border: u32,
    pub ec_level: ECLevel,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self { logo_scale: 0.312, module_sz: 10, border: 6, ec_level: ECLevel::H }
    }
}

// Autotune config
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Copy, Clone)]
pub struct AutotuneConfig {
    /// Residual error correction, in percent, that must survive the logo. `None` lifts the
    /// coverage ceiling and leaves decodability as the only bound.
    pub min_ecc_left: Option<f64>,
    pub start: f64,
    pub tol: f64,
    pub max_scale: f64,
}

impl Default for AutotuneConfig {
    fn default() -> Self {
        Self { min_ecc_left: Some(15.0), start: 0.05, tol: 0.01, max_scale: 0.6 }
    }
}

impl AutotuneConfig {
    pub fn min_ecc_left(mut self, pct: f64) -> Self {
        self.min_ecc_left = Some(pct);
        self
    }

    pub fn unconstrained(mut self) -> Self {
        self.min_ecc_left = None;
        self
    }

    pub fn start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn max_scale(mut self, max_scale: f64) -> Self {
        self.max_scale = max_scale;
        self
    }
}
