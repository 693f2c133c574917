//! Orchestrates image preparation and page composition into one finished
//! two-page PDF for a single person.

use log::warn;
use printpdf::{PdfDocument, PdfPage, PdfSaveOptions, Pt, Rect};

use super::compose::{compose_first_page, compose_second_page};
use super::error::Result;
use super::raster::flatten_to_rgb;
use super::text::CardFont;
use super::{PAGE_HEIGHT, PAGE_WIDTH};

/// Everything needed to render one card. Constructed fresh per request; no
/// state is shared between cards.
pub struct CardRequest<'a> {
    pub name: &'a str,
    pub quote: &'a str,
    pub logo: &'a [u8],
    pub photo: Option<&'a [u8]>,
    pub name_color: &'a str,
    pub quote_color: &'a str,
}

fn page_rect() -> Rect {
    Rect {
        x: Pt(0.0),
        y: Pt(0.0),
        width: Pt(PAGE_WIDTH),
        height: Pt(PAGE_HEIGHT),
    }
}

/// Render one card to PDF bytes. An undecodable logo is fatal; an undecodable
/// photo is logged and the card proceeds without it.
pub fn generate_card(req: &CardRequest, font: &CardFont) -> Result<Vec<u8>> {
    let logo = flatten_to_rgb(image::load_from_memory(req.logo)?);

    let photo = match req.photo {
        Some(bytes) => match image::load_from_memory(bytes) {
            Ok(img) => Some(flatten_to_rgb(img)),
            Err(e) => {
                warn!("could not decode photo for {:?}: {e}", req.name);
                None
            }
        },
        None => None,
    };

    let mut doc = PdfDocument::new("Card");
    let font_id = doc.add_font(font.parsed());

    let first = compose_first_page(&mut doc, font, &font_id, req.name, &logo, req.name_color)?;
    let second = compose_second_page(
        &mut doc,
        font,
        &font_id,
        req.quote,
        photo.as_ref(),
        req.quote_color,
    )?;

    for ops in [first, second] {
        doc.pages.push(PdfPage {
            media_box: page_rect(),
            trim_box: page_rect(),
            crop_box: page_rect(),
            ops,
        });
    }

    let mut warnings = Vec::new();
    Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
}
