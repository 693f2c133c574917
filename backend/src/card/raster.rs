//! Image preparation: flatten transparency onto white, resample at the fixed
//! raster density, crop for cover fits, and re-encode as PNG for embedding.

use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage, RgbImage};

use super::error::Result;
use super::fit::{fit_cover, fit_letterbox};
use super::RASTER_DPI;

/// An encoded raster together with its page-space placement: drawn size in
/// points plus the centering offsets inside the target box.
pub struct PlacedRaster {
    pub png: Vec<u8>,
    pub width: f32,
    pub height: f32,
    pub x_offset: f32,
    pub y_offset: f32,
}

/// Composite any alpha channel over opaque white and force 3-channel RGB.
/// Printed cards have no transparency support.
pub fn flatten_to_rgb(img: DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut background = RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut background, &rgba, 0, 0);
    DynamicImage::ImageRgba8(background).to_rgb8()
}

fn to_px(pt: f32) -> f32 {
    pt * RASTER_DPI / 72.0
}

fn to_pt(px: f32) -> f32 {
    px * 72.0 / RASTER_DPI
}

/// Letterbox-fit `img` into a box given in points, resampling at the fixed
/// raster density. The returned placement is in points, relative to the box
/// origin.
pub fn letterbox_raster(
    img: &RgbImage,
    box_w_pt: f32,
    box_h_pt: f32,
) -> Result<PlacedRaster> {
    let box_w_px = to_px(box_w_pt);
    let box_h_px = to_px(box_h_pt);
    let fit = fit_letterbox(img.width() as f32, img.height() as f32, box_w_px, box_h_px);

    let w = (fit.width.round() as u32).max(1);
    let h = (fit.height.round() as u32).max(1);
    let resized = imageops::resize(img, w, h, FilterType::Lanczos3);

    Ok(PlacedRaster {
        png: encode_png(&resized)?,
        width: to_pt(w as f32),
        height: to_pt(h as f32),
        x_offset: to_pt((box_w_px - w as f32) / 2.0),
        y_offset: to_pt((box_h_px - h as f32) / 2.0),
    })
}

/// Cover-fit `img` into a box given in points: resample so the image fully
/// covers the box at the fixed raster density, then center-crop to exactly
/// the box pixels. Embedded at `RASTER_DPI` the result occupies precisely the
/// box on the page.
pub fn cover_raster(img: &RgbImage, box_w_pt: f32, box_h_pt: f32) -> Result<Vec<u8>> {
    let box_w_px = to_px(box_w_pt).round() as u32;
    let box_h_px = to_px(box_h_pt).round() as u32;
    let cover = fit_cover(img.width(), img.height(), box_w_px, box_h_px);

    let resized = imageops::resize(img, cover.scaled_w, cover.scaled_h, FilterType::Lanczos3);
    let cropped =
        imageops::crop_imm(&resized, cover.crop_x, cover.crop_y, box_w_px, box_h_px).to_image();

    encode_png(&cropped)
}

fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)?;
    Ok(buf)
}
