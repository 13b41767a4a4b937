use std::path::Path;

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::{
    builder::{MatrixEncoder, ModuleMatrix},
    common::{
        AutotuneConfig, ECLevel, Geometry, LogoConfig, LogoError, LogoResult, ECC_BUDGET,
        LOW_ECC_WARNING_PCT,
    },
    coverage::{estimate_coverage, validate_scale, Coverage},
    reader::{decode_file, DecodeOracle},
    render::render,
};

// Hard cap on search iterations. Together with the tolerance window this is the only
// guarantee the search terminates.
pub const MAX_ITERATIONS: usize = 50;

// Floor for the stopping tolerance
pub const MIN_TOL: f64 = 0.001;

// Report
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ProbeOutcome {
    // Coverage exceeded the ceiling, nothing was rendered
    OverBudget,
    Decoded,
    Undecodable,
}

/// One search iteration: the window it started from, the scale tried and what happened.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Probe {
    pub low: f64,
    pub high: f64,
    pub scale: f64,
    pub coverage: Coverage,
    pub outcome: ProbeOutcome,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct AutotuneReport {
    /// Largest scale that decoded, if any did
    pub best: Option<f64>,
    pub probes: Vec<Probe>,
    pub decode_calls: usize,
    /// Set when the requested residual ECC is below the reliability threshold
    pub low_ecc_warning: bool,
}

impl AutotuneReport {
    pub fn iterations(&self) -> usize {
        self.probes.len()
    }

    pub fn best_probe(&self) -> Option<&Probe> {
        let best = self.best?;
        self.probes.iter().find(|p| p.scale == best)
    }
}

// Constraint
//------------------------------------------------------------------------------

/// Coverage percentage a logo may reach while leaving `min_ecc_left` of `ecc_budget`
/// intact. `None` when unconstrained. Fails when the constraint can never be met.
pub fn coverage_ceiling(min_ecc_left: Option<f64>, ecc_budget: f64) -> LogoResult<Option<f64>> {
    let Some(min_ecc_left) = min_ecc_left else {
        return Ok(None);
    };
    if min_ecc_left.is_nan() || min_ecc_left >= ecc_budget {
        return Err(LogoError::InfeasibleConstraint { min_ecc_left, ecc_budget });
    }
    Ok(Some(ecc_budget - min_ecc_left))
}

#[cfg(test)]
mod constraint_tests {
    use test_case::test_case;

    use super::coverage_ceiling;
    use crate::common::{LogoError, ECC_BUDGET};

    #[test_case(Some(15.0), Some(15.0))]
    #[test_case(Some(10.0), Some(20.0))]
    #[test_case(Some(0.0), Some(30.0))]
    #[test_case(Some(29.5), Some(0.5))]
    #[test_case(None, None)]
    fn test_ceiling(min_ecc_left: Option<f64>, exp: Option<f64>) {
        assert_eq!(coverage_ceiling(min_ecc_left, ECC_BUDGET).unwrap(), exp);
    }

    #[test_case(30.0)]
    #[test_case(35.0)]
    #[test_case(f64::NAN)]
    fn test_infeasible(min_ecc_left: f64) {
        let res = coverage_ceiling(Some(min_ecc_left), ECC_BUDGET);
        assert!(matches!(res, Err(LogoError::InfeasibleConstraint { ecc_budget, .. }) if ecc_budget == 30.0));
    }
}

// Autotuner
//------------------------------------------------------------------------------

/// Binary search for the largest logo scale that keeps coverage under the ceiling and
/// still decodes. Coverage is checked first on every iteration; only scales that pass it
/// are rendered and handed to the oracle.
///
/// The search assumes coverage and decode failure only grow with scale. A logo that
/// fails at some scale but decodes at a larger one can make it settle on a smaller
/// scale than the true maximum.
pub struct Autotuner<'a, O: DecodeOracle + ?Sized> {
    matrix: &'a ModuleMatrix,
    logo: &'a RgbaImage,
    geom: Geometry,
    cfg: AutotuneConfig,
    oracle: &'a O,
    scratch_root: Option<&'a Path>,
}

impl<'a, O: DecodeOracle + ?Sized> Autotuner<'a, O> {
    pub fn new(
        matrix: &'a ModuleMatrix,
        logo: &'a RgbaImage,
        module_sz: u32,
        border: u32,
        cfg: AutotuneConfig,
        oracle: &'a O,
    ) -> LogoResult<Self> {
        validate_scale(cfg.start)?;
        validate_scale(cfg.max_scale)?;
        if logo.width() == 0 || logo.height() == 0 {
            return Err(LogoError::EmptyLogo);
        }
        let geom = Geometry::new(matrix.width() as u32, module_sz, border)?;
        Ok(Self { matrix, logo, geom, cfg, oracle, scratch_root: None })
    }

    /// Parent for the per-run scratch directory. Defaults to the system temp dir.
    pub fn scratch_root(mut self, root: &'a Path) -> Self {
        self.scratch_root = Some(root);
        self
    }

    pub fn search(&self) -> LogoResult<AutotuneReport> {
        let ceiling = coverage_ceiling(self.cfg.min_ecc_left, ECC_BUDGET)?;

        let mut report = AutotuneReport::default();
        if let Some(min_ecc_left) = self.cfg.min_ecc_left {
            if min_ecc_left < LOW_ECC_WARNING_PCT {
                warn!(min_ecc_left, "Requested minimum ECC left is below 15%, decoding may be unreliable");
                report.low_ecc_warning = true;
            }
        }

        let mut scratch = tempfile::Builder::new();
        scratch.prefix("qr_test_");
        let scratch = match self.scratch_root {
            Some(root) => scratch.tempdir_in(root)?,
            None => scratch.tempdir()?,
        };
        let tol = self.cfg.tol.max(MIN_TOL);
        let (mut low, mut high) = (self.cfg.start, self.cfg.max_scale);

        while high - low > tol && report.iterations() < MAX_ITERATIONS {
            let mid = (low + high) / 2.0;
            let coverage = estimate_coverage(&self.geom, Some(self.logo.dimensions()), mid)?;
            debug!(
                scale = mid,
                covered = coverage.covered,
                total = coverage.total,
                coverage_pct = coverage.pct(),
                "Testing scale"
            );

            let outcome = if ceiling.is_some_and(|c| coverage.pct() > c) {
                ProbeOutcome::OverBudget
            } else {
                report.decode_calls += 1;
                if self.probe(scratch.path(), mid)? {
                    ProbeOutcome::Decoded
                } else {
                    ProbeOutcome::Undecodable
                }
            };
            report.probes.push(Probe { low, high, scale: mid, coverage, outcome });

            match outcome {
                ProbeOutcome::Decoded => {
                    report.best = Some(mid);
                    low = mid;
                }
                ProbeOutcome::OverBudget | ProbeOutcome::Undecodable => high = mid,
            }
        }

        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            warn!(path = %scratch_path.display(), error = %e, "Failed to remove scratch directory");
        }

        info!(
            best = ?report.best,
            iterations = report.iterations(),
            decode_calls = report.decode_calls,
            "Autotune finished"
        );
        Ok(report)
    }

    // Renders a candidate into the scratch dir, reads it back and asks the oracle
    fn probe(&self, scratch: &Path, scale: f64) -> LogoResult<bool> {
        let img = self.render_at(scale)?;
        let path = scratch.join(format!("qr_{}.png", (scale * 100_000.0) as u64));
        img.save(&path)?;
        let decoded = decode_file(self.oracle, &path)?;
        Ok(!decoded.is_empty())
    }

    pub fn render_at(&self, scale: f64) -> LogoResult<RgbaImage> {
        render(self.matrix, self.geom.module_sz(), self.geom.border(), Some(self.logo), scale)
    }
}

/// Finds the largest logo scale for `data` that satisfies `cfg` and writes the symbol
/// rendered at that scale to `out`. Encoding always uses level H.
///
/// Fails with `InfeasibleConstraint` before doing any work when the requested residual
/// ECC can't be met, and with `NoFeasibleScale` when no tested scale decoded. Nothing is
/// written to `out` in either case.
pub fn find_max_logo_scale<E, O>(
    encoder: &E,
    oracle: &O,
    data: &[u8],
    logo: &RgbaImage,
    logo_cfg: &LogoConfig,
    cfg: &AutotuneConfig,
    out: impl AsRef<Path>,
) -> LogoResult<AutotuneReport>
where
    E: MatrixEncoder + ?Sized,
    O: DecodeOracle + ?Sized,
{
    coverage_ceiling(cfg.min_ecc_left, ECC_BUDGET)?;

    let matrix = encoder.encode(data, ECLevel::H)?;
    let tuner = Autotuner::new(&matrix, logo, logo_cfg.module_sz, logo_cfg.border, *cfg, oracle)?;
    let report = tuner.search()?;

    let best = report.best.ok_or(LogoError::NoFeasibleScale)?;
    let out = out.as_ref();
    tuner.render_at(best)?.save(out)?;
    info!(scale = best, out = %out.display(), "Saved logo QR at max scale");

    Ok(report)
}
