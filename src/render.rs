use std::{borrow::Cow, path::Path};

use image::{imageops, imageops::FilterType, Rgba, RgbaImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};
use tracing::{info, warn};

use crate::{
    builder::ModuleMatrix,
    common::{Geometry, LogoResult},
    coverage::{coverage_of, Coverage, LogoOverlay},
};

pub const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

// Render
//------------------------------------------------------------------------------

/// Draws `matrix` with `module_sz` pixel modules inside a quiet zone of `border` modules,
/// then pastes `logo` centered at `scale` if one is given.
pub fn render(
    matrix: &ModuleMatrix,
    module_sz: u32,
    border: u32,
    logo: Option<&RgbaImage>,
    scale: f64,
) -> LogoResult<RgbaImage> {
    let geom = Geometry::new(matrix.width() as u32, module_sz, border)?;
    let mut canvas = draw_modules(matrix, &geom);
    if let Some(logo) = logo {
        if let Some(cov) = paste_logo(&mut canvas, &geom, logo, scale)? {
            info!(
                covered = cov.covered,
                total = cov.total,
                coverage_pct = cov.pct(),
                ecc_pct = matrix.ec_level().recovery_pct(),
                ec_level = ?matrix.ec_level(),
                "Logo placed"
            );
        }
    }
    Ok(canvas)
}

pub fn draw_modules(matrix: &ModuleMatrix, geom: &Geometry) -> RgbaImage {
    debug_assert!(matrix.width() as u32 == geom.width(), "Matrix doesn't match geometry");

    let sz = geom.image_sz();
    let ms = geom.module_sz();
    let qz = geom.quiet_zone_px();

    let mut canvas = RgbaImage::from_pixel(sz, sz, LIGHT);
    for r in 0..matrix.width() {
        for c in 0..matrix.width() {
            if !matrix.is_dark(r, c) {
                continue;
            }
            let (x, y) = (qz + c as u32 * ms, qz + r as u32 * ms);
            draw_filled_rect_mut(&mut canvas, Rect::at(x as i32, y as i32).of_size(ms, ms), DARK);
        }
    }
    canvas
}

/// Thumbnails `logo` into the overlay box and alpha composites it onto `canvas`. Returns
/// the coverage of the placed logo, or `None` if the scale leaves no room for it.
pub fn paste_logo(
    canvas: &mut RgbaImage,
    geom: &Geometry,
    logo: &RgbaImage,
    scale: f64,
) -> LogoResult<Option<Coverage>> {
    let Some(overlay) = LogoOverlay::fit(geom, logo.dimensions(), scale)? else {
        return Ok(None);
    };

    let thumb = if (overlay.w, overlay.h) == logo.dimensions() {
        Cow::Borrowed(logo)
    } else {
        Cow::Owned(imageops::resize(logo, overlay.w, overlay.h, FilterType::Lanczos3))
    };
    imageops::overlay(canvas, &*thumb, i64::from(overlay.x), i64::from(overlay.y));

    Ok(Some(coverage_of(geom, &overlay)))
}

// Logo asset
//------------------------------------------------------------------------------

/// Loads a logo as RGBA. A missing file is not an error: the caller gets `None` and
/// proceeds without an overlay. A file that exists but can't be decoded is.
pub fn load_logo(path: impl AsRef<Path>) -> LogoResult<Option<RgbaImage>> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(path = %path.display(), "Logo not found, rendering without overlay");
        return Ok(None);
    }
    Ok(Some(image::open(path)?.to_rgba8()))
}
