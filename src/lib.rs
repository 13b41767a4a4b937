//! # qrlogo
//!
//! QR code generation with a centered logo, and an autotuner that finds the largest logo
//! the symbol can carry while staying decodable.
//!
//! ## Features
//!
//! - **Coverage estimation**: counts the modules a centered logo hides, from geometry alone
//! - **Rendering**: draws the module matrix and alpha composites the logo on top
//! - **Autotuning**: binary search over logo scale, bounded by a residual error correction
//!   budget and verified by actually decoding each candidate
//!
//! Symbol encoding and image decoding sit behind the [`MatrixEncoder`] and
//! [`DecodeOracle`] traits. The defaults use the `qrcode` and `rqrr` crates.
//!
//! ## Quick Start
//!
//! ### Estimating coverage
//!
//! ```rust
//! use qrlogo::{estimate_coverage, Geometry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Version 3 symbol, 10 px modules, 6 module quiet zone
//! let geom = Geometry::new(29, 10, 6)?;
//! let cov = estimate_coverage(&geom, Some((500, 500)), 0.312)?;
//! assert_eq!(cov.covered, 169);
//! # Ok(())
//! # }
//! ```
//!
//! ### Autotuning the logo size
//!
//! ```rust,no_run
//! use qrlogo::{find_max_logo_scale, AutotuneConfig, LogoConfig, QrcodeEncoder, RqrrOracle};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let logo = image::open("logo.png")?.to_rgba8();
//! let report = find_max_logo_scale(
//!     &QrcodeEncoder,
//!     &RqrrOracle,
//!     b"https://example.com",
//!     &logo,
//!     &LogoConfig::default(),
//!     &AutotuneConfig::default(),
//!     "qr.png",
//! )?;
//! println!("Max logo scale: {:.3}", report.best.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod autotune;
pub mod builder;
pub mod common;
pub mod coverage;
pub mod reader;
pub mod render;

pub use autotune::{find_max_logo_scale, AutotuneReport, Autotuner, Probe, ProbeOutcome};
pub use builder::{LogoQRBuilder, MatrixEncoder, ModuleMatrix, QrcodeEncoder};
pub use common::{
    AutotuneConfig, ECLevel, Geometry, LogoConfig, LogoError, LogoResult, ECC_BUDGET,
};
pub use coverage::{estimate_coverage, estimate_for_payload, Coverage, CoverageReport, LogoOverlay};
pub use reader::{DecodeOracle, RqrrOracle};
pub use render::{load_logo, render};
