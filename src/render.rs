//! Raster output of the final step: one square block per cell, coloured by
//! the cell's transition between the last two generations.

use crate::evolution::{check_dimensions, DimensionMismatch, Transition};
use crate::grid::Field;
use image::{ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Side length of a cell block in pixels
pub const DEFAULT_CELL_SIZE: u32 = 5;

/// Errors that can occur while rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    DimensionMismatch(#[from] DimensionMismatch),

    #[error("image of {rows}x{cols} cells at {cell_size}px per cell is too large")]
    TooLarge {
        rows: usize,
        cols: usize,
        cell_size: u32,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Something that can draw the last two generations to a file
pub trait Renderer {
    fn render(&self, penultimate: &Field, last: &Field, path: &Path) -> Result<(), RenderError>;
}

/// Colours for the four transition classes, as RGB triples
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// C -> C
    pub stayed_cooperator: [u8; 3],
    /// D -> C
    pub became_cooperator: [u8; 3],
    /// C -> D
    pub became_defector: [u8; 3],
    /// D -> D
    pub stayed_defector: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            stayed_cooperator: [0, 0, 255],
            became_cooperator: [0, 128, 0],
            became_defector: [255, 255, 0],
            stayed_defector: [255, 0, 0],
        }
    }
}

impl Palette {
    pub fn color(&self, transition: Transition) -> Rgb<u8> {
        Rgb(match transition {
            Transition::StayedCooperator => self.stayed_cooperator,
            Transition::BecameCooperator => self.became_cooperator,
            Transition::BecameDefector => self.became_defector,
            Transition::StayedDefector => self.stayed_defector,
        })
    }

    /// True if no two transition classes share a colour
    pub fn is_distinct(&self) -> bool {
        let colors = [
            self.stayed_cooperator,
            self.became_cooperator,
            self.became_defector,
            self.stayed_defector,
        ];
        colors
            .iter()
            .enumerate()
            .all(|(i, a)| colors[i + 1..].iter().all(|b| a != b))
    }
}

/// PNG renderer.
///
/// Rows run down the image and columns across it, so field row `r` is drawn at
/// `y = r * cell_size` (the transpose of a rows-along-x layout).
#[derive(Clone, Debug)]
pub struct PngRenderer {
    pub cell_size: u32,
    pub palette: Palette,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            palette: Palette::default(),
        }
    }
}

impl PngRenderer {
    pub fn new(cell_size: u32, palette: Palette) -> Self {
        Self { cell_size, palette }
    }

    /// Draw both generations into an in-memory image, `cols * cell_size`
    /// pixels wide and `rows * cell_size` tall
    pub fn to_image(&self, penultimate: &Field, last: &Field) -> Result<RgbImage, RenderError> {
        check_dimensions(penultimate, last)?;

        let too_large = || RenderError::TooLarge {
            rows: last.rows(),
            cols: last.cols(),
            cell_size: self.cell_size,
        };
        let width = u32::try_from(last.cols())
            .ok()
            .and_then(|c| c.checked_mul(self.cell_size))
            .ok_or_else(too_large)?;
        let height = u32::try_from(last.rows())
            .ok()
            .and_then(|r| r.checked_mul(self.cell_size))
            .ok_or_else(too_large)?;

        let size = self.cell_size.max(1);
        Ok(RgbImage::from_fn(width, height, |x, y| {
            let row = (y / size) as usize;
            let col = (x / size) as usize;
            let transition =
                Transition::between(penultimate.strategy(row, col), last.strategy(row, col));
            self.palette.color(transition)
        }))
    }
}

impl Renderer for PngRenderer {
    fn render(&self, penultimate: &Field, last: &Field, path: &Path) -> Result<(), RenderError> {
        let image = self.to_image(penultimate, last)?;
        image.save_with_format(path, ImageFormat::Png)?;
        log::info!(
            "Wrote {}x{} image to {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(())
    }
}
