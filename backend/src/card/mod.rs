//! Core card geometry and rendering.
//!
//! Everything here is independent of the HTTP layer: given decoded inputs it
//! produces a finished two-page PDF. All dimensions are fixed constants for
//! the one supported card format; there is no templating.

pub mod compose;
pub mod error;
pub mod fit;
pub mod generate;
pub mod lookup;
pub mod raster;
pub mod text;

pub use error::CardError;
pub use generate::{generate_card, CardRequest};

/// PostScript points per centimeter.
pub const CM: f32 = 28.346_457;

/// Card page size, both pages.
pub const PAGE_WIDTH: f32 = 10.152_9 * CM;
pub const PAGE_HEIGHT: f32 = 9.652 * CM;

/// Raster density used when resampling images before embedding. Placement is
/// done in page points; resampling at a fixed 300 DPI keeps output sharp
/// regardless of the final placement scale.
pub const RASTER_DPI: f32 = 300.0;

// Page 1: logo zone, gap down to the name line, and the name line itself.
pub const LOGO_ZONE_W: f32 = 7.130_1 * CM;
pub const LOGO_ZONE_H: f32 = 3.826_1 * CM;
pub const LOGO_NAME_GAP: f32 = 3.0 * CM;
pub const NAME_FONT_SIZE: f32 = 18.0;
pub const NAME_LINE_HEIGHT: f32 = 18.0 / 72.0 * CM;

// Page 2: photo zone, gap between photo and quote block, quote metrics.
pub const PHOTO_W: f32 = 7.0 * CM;
pub const PHOTO_H: f32 = 4.0 * CM;
pub const PHOTO_QUOTE_GAP: f32 = 12.0 / 72.0 * CM;
pub const QUOTE_MARGIN: f32 = 28.0 / 72.0 * CM;
pub const QUOTE_FONT_SIZE: f32 = 10.0 / 0.75;
pub const QUOTE_LINE_HEIGHT: f32 = 12.0 / 0.75;
