//! Builds the two fixed card pages as printpdf op lists.
//!
//! Page 1 carries the letterboxed logo with the name centered below it; page
//! 2 carries the cover-fitted photo above the word-wrapped quote. Optional
//! elements recenter the remaining content vertically.

use log::warn;
use printpdf::{
    Color, FontId, Op, PdfDocument, Pt, RawImage, Rgb, TextItem, TextMatrix, XObjectTransform,
};

use super::error::Result;
use super::raster::{cover_raster, letterbox_raster};
use super::text::{parse_hex_color, wrap_words, CardFont};
use super::{
    CardError, LOGO_NAME_GAP, LOGO_ZONE_H, LOGO_ZONE_W, NAME_FONT_SIZE, NAME_LINE_HEIGHT,
    PAGE_HEIGHT, PAGE_WIDTH, PHOTO_H, PHOTO_QUOTE_GAP, PHOTO_W, QUOTE_FONT_SIZE,
    QUOTE_LINE_HEIGHT, QUOTE_MARGIN, RASTER_DPI,
};

fn fill_color(value: &str, what: &str) -> Op {
    let (r, g, b) = parse_hex_color(value).unwrap_or_else(|| {
        warn!("invalid {what} color {value:?}, using black");
        (0.0, 0.0, 0.0)
    });
    Op::SetFillColor {
        col: Color::Rgb(Rgb {
            r,
            g,
            b,
            icc_profile: None,
        }),
    }
}

fn text_ops(font_id: &FontId, size: f32, x: f32, y: f32, text: &str) -> [Op; 5] {
    [
        Op::StartTextSection,
        Op::SetFontSize {
            font: font_id.clone(),
            size: Pt(size),
        },
        Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Pt(x), Pt(y)),
        },
        Op::WriteText {
            items: vec![TextItem::Text(text.to_string())],
            font: font_id.clone(),
        },
        Op::EndTextSection,
    ]
}

fn embed_png(doc: &mut PdfDocument, png: &[u8], x: f32, y: f32) -> Result<Op> {
    let mut warnings = Vec::new();
    let raw = RawImage::decode_from_bytes(png, &mut warnings).map_err(CardError::Generation)?;
    let id = doc.add_image(&raw);
    Ok(Op::UseXobject {
        id,
        transform: XObjectTransform {
            translate_x: Some(Pt(x)),
            translate_y: Some(Pt(y)),
            rotate: None,
            scale_x: None,
            scale_y: None,
            dpi: Some(RASTER_DPI),
        },
    })
}

/// Page 1: logo letterboxed into its zone, name centered below. Logo, gap and
/// name line form one vertically centered block.
pub fn compose_first_page(
    doc: &mut PdfDocument,
    font: &CardFont,
    font_id: &FontId,
    name: &str,
    logo: &image::RgbImage,
    name_color: &str,
) -> Result<Vec<Op>> {
    let content_height = LOGO_ZONE_H + LOGO_NAME_GAP + NAME_LINE_HEIGHT;
    let content_y = (PAGE_HEIGHT - content_height) / 2.0;

    let mut ops = Vec::new();

    let placed = letterbox_raster(logo, LOGO_ZONE_W, LOGO_ZONE_H)?;
    let zone_x = (PAGE_WIDTH - LOGO_ZONE_W) / 2.0;
    let zone_y = content_y + NAME_LINE_HEIGHT + LOGO_NAME_GAP;
    ops.push(embed_png(
        doc,
        &placed.png,
        zone_x + placed.x_offset,
        zone_y + placed.y_offset,
    )?);

    if !name.is_empty() {
        let text_width = font.string_width(name, NAME_FONT_SIZE);
        let x = (PAGE_WIDTH - text_width) / 2.0;
        ops.push(fill_color(name_color, "name"));
        ops.extend(text_ops(font_id, NAME_FONT_SIZE, x, content_y, name));
    }

    Ok(ops)
}

/// Page 2: photo stacked above the quote block with a fixed gap, the whole
/// stack vertically centered; a lone element is centered by itself; with
/// neither, the page stays blank.
pub fn compose_second_page(
    doc: &mut PdfDocument,
    font: &CardFont,
    font_id: &FontId,
    quote: &str,
    photo: Option<&image::RgbImage>,
    quote_color: &str,
) -> Result<Vec<Op>> {
    let lines = wrap_words(quote, PAGE_WIDTH - 2.0 * QUOTE_MARGIN, |s| {
        font.string_width(s, QUOTE_FONT_SIZE)
    });
    let text_block_height = lines.len() as f32 * QUOTE_LINE_HEIGHT;

    let content_height = match (photo.is_some(), !lines.is_empty()) {
        (true, true) => PHOTO_H + PHOTO_QUOTE_GAP + text_block_height,
        (true, false) => PHOTO_H,
        (false, _) => text_block_height,
    };
    let content_y = (PAGE_HEIGHT - content_height) / 2.0;

    let mut ops = Vec::new();

    if let Some(photo) = photo {
        let png = cover_raster(photo, PHOTO_W, PHOTO_H)?;
        let photo_y = if lines.is_empty() {
            content_y
        } else {
            content_y + text_block_height + PHOTO_QUOTE_GAP
        };
        ops.push(embed_png(doc, &png, (PAGE_WIDTH - PHOTO_W) / 2.0, photo_y)?);
    }

    if !lines.is_empty() {
        ops.push(fill_color(quote_color, "quote"));
        let mut y = content_y + text_block_height;
        for line in &lines {
            y -= QUOTE_LINE_HEIGHT;
            let x = (PAGE_WIDTH - font.string_width(line, QUOTE_FONT_SIZE)) / 2.0;
            ops.extend(text_ops(font_id, QUOTE_FONT_SIZE, x, y, line));
        }
    }

    Ok(ops)
}
