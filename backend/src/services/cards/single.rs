//! `POST /generate_pdf`: render one card synchronously and return it as a
//! download.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::card::lookup::normalize_name;
use crate::card::text::FontSource;
use crate::card::{generate_card, CardError, CardRequest};

use super::upload::read_single_form;

pub(crate) async fn process(font: web::Data<FontSource>, payload: Multipart) -> impl Responder {
    match generate_single(font.into_inner(), payload).await {
        Ok((bytes, filename)) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{filename}\""),
            ))
            .body(bytes),
        Err(err @ CardError::Validation(_)) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() }))
        }
        Err(err) => HttpResponse::InternalServerError()
            .json(serde_json::json!({ "error": format!("Error generating PDF: {err}") })),
    }
}

async fn generate_single(
    font: Arc<FontSource>,
    payload: Multipart,
) -> Result<(Vec<u8>, String), CardError> {
    let form = read_single_form(payload).await?;
    let logo = form
        .logo
        .ok_or_else(|| CardError::Validation("No logo file provided".into()))?;

    // Card generation is CPU-bound; keep it off the async runtime. The font
    // is parsed on the worker thread because the parsed face is not `Send`.
    let (bytes, name) = tokio::task::spawn_blocking(move || {
        let font = font.parse()?;
        let req = CardRequest {
            name: &form.name,
            quote: &form.quote,
            logo: &logo,
            photo: form.photo.as_deref(),
            name_color: &form.name_color,
            quote_color: &form.quote_color,
        };
        generate_card(&req, &font).map(|bytes| (bytes, form.name.clone()))
    })
    .await
    .map_err(|e| CardError::Generation(format!("task join error: {e}")))??;

    Ok((bytes, attachment_filename(&name)))
}

/// Download filename for the card. Normalized like the batch output names,
/// then restricted to characters that are safe inside a quoted
/// `Content-Disposition` value.
fn attachment_filename(name: &str) -> String {
    let stem: String = normalize_name(name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    if stem.is_empty() {
        "generated.pdf".to_string()
    } else {
        format!("{stem}.pdf")
    }
}
