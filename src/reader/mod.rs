use std::path::Path;

use image::{imageops, RgbaImage};
use rqrr::PreparedImage;
use tracing::debug;

use crate::common::LogoResult;

// Decode oracle
//------------------------------------------------------------------------------

/// Seam to the image decoder. An empty string means no symbol was found or it failed to
/// decode; the autotuner only cares about pass or fail.
pub trait DecodeOracle {
    fn decode(&self, img: &RgbaImage) -> String;
}

impl<F: Fn(&RgbaImage) -> String> DecodeOracle for F {
    fn decode(&self, img: &RgbaImage) -> String {
        self(img)
    }
}

/// Decoder backed by `rqrr`. Returns the content of the first grid that decodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrOracle;

impl DecodeOracle for RqrrOracle {
    fn decode(&self, img: &RgbaImage) -> String {
        let gray = imageops::grayscale(img);
        let (w, h) = gray.dimensions();
        let mut prepared = PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
            gray.get_pixel(x as u32, y as u32)[0]
        });

        let grids = prepared.detect_grids();
        debug!(grids = grids.len(), "Detected grids");
        grids.iter().find_map(|g| g.decode().ok()).map(|(_, content)| content).unwrap_or_default()
    }
}

/// Reads an image from disk and runs it through `oracle`.
pub fn decode_file<O: DecodeOracle + ?Sized>(oracle: &O, path: impl AsRef<Path>) -> LogoResult<String> {
    let img = image::open(path)?.to_rgba8();
    Ok(oracle.decode(&img))
}
