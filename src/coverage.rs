use std::fmt::{Display, Error, Formatter};

use image::RgbaImage;

use crate::{
    builder::MatrixEncoder,
    common::{ECLevel, Geometry, LogoConfig, LogoError, LogoResult},
};

// Logo overlay
//------------------------------------------------------------------------------

/// Pixel rectangle a logo occupies once thumbnailed and centered on the rendered image.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct LogoOverlay {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl LogoOverlay {
    /// Fits a logo of natural size `logo_dims` into a square box of `scale * image_sz`
    /// pixels and centers it. Returns `None` when the box is narrower than a pixel,
    /// in which case nothing is overlaid.
    pub fn fit(geom: &Geometry, logo_dims: (u32, u32), scale: f64) -> LogoResult<Option<Self>> {
        validate_scale(scale)?;
        if logo_dims.0 == 0 || logo_dims.1 == 0 {
            return Err(LogoError::EmptyLogo);
        }

        let img_sz = geom.image_sz();
        let bound = (f64::from(img_sz) * scale) as u32;
        if bound == 0 {
            return Ok(None);
        }

        let (w, h) = thumbnail_size(logo_dims, (bound, bound));
        let (x, y) = ((img_sz - w) / 2, (img_sz - h) / 2);
        Ok(Some(Self { x, y, w, h }))
    }

    // Bounds are inclusive on all four edges
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let (x, y) = (f64::from(self.x), f64::from(self.y));
        x <= px && px <= x + f64::from(self.w) && y <= py && py <= y + f64::from(self.h)
    }
}

pub fn validate_scale(scale: f64) -> LogoResult<()> {
    if !(0.0..=1.0).contains(&scale) {
        return Err(LogoError::InvalidScale(scale));
    }
    Ok(())
}

/// Shrinks `dims` to fit within `max` while preserving aspect ratio. Never upscales: a
/// logo that already fits keeps its natural size. The free axis is rounded to whichever
/// neighbouring integer reproduces the aspect ratio more closely, and is at least 1.
pub fn thumbnail_size(dims: (u32, u32), max: (u32, u32)) -> (u32, u32) {
    let (w, h) = dims;
    let (max_w, max_h) = max;
    if max_w >= w && max_h >= h {
        return dims;
    }

    let aspect = f64::from(w) / f64::from(h);
    let (x, y) = (f64::from(max_w), f64::from(max_h));
    if x / y >= aspect {
        let n = round_aspect(y * aspect, |n| (aspect - n / y).abs());
        (n, max_h)
    } else {
        let n = round_aspect(x / aspect, |n| if n == 0.0 { 0.0 } else { (aspect - x / n).abs() });
        (max_w, n)
    }
}

// Floor wins ties
fn round_aspect(v: f64, key: impl Fn(f64) -> f64) -> u32 {
    let (lo, hi) = (v.floor(), v.ceil());
    let n = if key(hi) < key(lo) { hi } else { lo };
    n.max(1.0) as u32
}


// Coverage
//------------------------------------------------------------------------------

/// Modules whose centers fall under the logo overlay.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Coverage {
    pub covered: usize,
    pub total: usize,
}

impl Coverage {
    pub fn none(geom: &Geometry) -> Self {
        Self { covered: 0, total: geom.total_modules() }
    }

    pub fn pct(&self) -> f64 {
        self.covered as f64 / self.total as f64 * 100.0
    }
}

/// Counts the modules obscured by a logo of natural size `logo_dims` at `scale`. A module
/// is covered iff its center pixel lies inside the overlay; there is no partial credit.
pub fn estimate_coverage(
    geom: &Geometry,
    logo_dims: Option<(u32, u32)>,
    scale: f64,
) -> LogoResult<Coverage> {
    validate_scale(scale)?;
    let overlay = match logo_dims {
        Some(dims) => LogoOverlay::fit(geom, dims, scale)?,
        None => None,
    };
    Ok(overlay.map_or_else(|| Coverage::none(geom), |o| coverage_of(geom, &o)))
}

pub fn coverage_of(geom: &Geometry, overlay: &LogoOverlay) -> Coverage {
    let n = geom.width();
    let covered = (0..n)
        .flat_map(|r| (0..n).map(move |c| (r, c)))
        .filter(|&(r, c)| overlay.contains(geom.module_center(c), geom.module_center(r)))
        .count();
    Coverage { covered, total: geom.total_modules() }
}

// Coverage report
//------------------------------------------------------------------------------

/// Coverage alongside what it leaves of the error correction budget.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct CoverageReport {
    pub coverage: Coverage,
    pub ec_level: ECLevel,
}

impl CoverageReport {
    pub fn ecc_capacity(&self) -> f64 {
        self.ec_level.recovery_pct()
    }

    pub fn remaining_pct(&self) -> f64 {
        self.ecc_capacity() - self.coverage.pct()
    }

    pub fn remaining_fraction(&self) -> f64 {
        self.remaining_pct() / 100.0
    }
}

impl Display for CoverageReport {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        writeln!(f, "covered={}", self.coverage.covered)?;
        writeln!(f, "total_modules={}", self.coverage.total)?;
        writeln!(f, "coverage_pct={:.4}", self.coverage.pct())?;
        writeln!(f, "ecc_capacity={}", self.ecc_capacity())?;
        writeln!(f, "remaining_ecc_percent={:.4}", self.remaining_pct())?;
        write!(f, "remaining_fraction={:.4}", self.remaining_fraction())
    }
}

/// Encodes `data` and estimates how much of the resulting symbol `logo` would cover
/// at the configured scale.
pub fn estimate_for_payload<E: MatrixEncoder>(
    encoder: &E,
    data: &[u8],
    logo: Option<&RgbaImage>,
    cfg: &LogoConfig,
) -> LogoResult<CoverageReport> {
    let matrix = encoder.encode(data, cfg.ec_level)?;
    let geom = Geometry::new(matrix.width() as u32, cfg.module_sz, cfg.border)?;
    let coverage = estimate_coverage(&geom, logo.map(|l| l.dimensions()), cfg.logo_scale)?;
    Ok(CoverageReport { coverage, ec_level: cfg.ec_level })
}
