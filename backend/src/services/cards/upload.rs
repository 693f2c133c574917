//! Streamed multipart field reading shared by the single and bulk endpoints.

use actix_multipart::{Field, Multipart};
use futures_util::StreamExt;
use std::ffi::OsStr;
use std::path::Path;

use crate::card::CardError;

/// Total multipart payload cap, enforced while streaming.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
pub const CSV_EXTENSIONS: &[&str] = &["csv"];
pub const ZIP_EXTENSIONS: &[&str] = &["zip"];

const DEFAULT_COLOR: &str = "#000000";

/// Fields of a `POST /generate_pdf` form.
pub struct SingleForm {
    pub name: String,
    pub quote: String,
    pub name_color: String,
    pub quote_color: String,
    pub logo: Option<Vec<u8>>,
    pub photo: Option<Vec<u8>>,
}

/// Fields of a `POST /generate_bulk_pdfs` form.
pub struct BulkForm {
    pub name_color: String,
    pub quote_color: String,
    pub logo: Option<Vec<u8>>,
    pub csv: Option<Vec<u8>>,
    pub photos_zip: Option<Vec<u8>>,
}

pub fn allowed_file(filename: &str, allowed: &[&str]) -> bool {
    Path::new(filename)
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| allowed.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

async fn field_bytes(field: &mut Field, total: &mut usize) -> Result<Vec<u8>, CardError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| CardError::Validation(format!("upload error: {e}")))?;
        *total += chunk.len();
        if *total > MAX_UPLOAD_BYTES {
            return Err(CardError::Validation(
                "request body exceeds the 16 MiB upload limit".into(),
            ));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn text_field(field: &mut Field, total: &mut usize) -> Result<String, CardError> {
    let bytes = field_bytes(field, total).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a file field. An empty filename counts as "not provided" (browsers
/// submit empty file parts); a filename with a disallowed extension is a
/// validation error naming the field.
async fn file_field(
    field: &mut Field,
    total: &mut usize,
    label: &str,
    allowed: &[&str],
) -> Result<Option<Vec<u8>>, CardError> {
    let filename = field
        .content_disposition()
        .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
        .unwrap_or_default();

    if filename.is_empty() {
        // Drain the (empty) part so the stream can advance.
        let _ = field_bytes(field, total).await?;
        return Ok(None);
    }
    if !allowed_file(&filename, allowed) {
        return Err(CardError::Validation(format!("Invalid {label} file type")));
    }
    Ok(Some(field_bytes(field, total).await?))
}

pub async fn read_single_form(mut payload: Multipart) -> Result<SingleForm, CardError> {
    let mut form = SingleForm {
        name: String::new(),
        quote: String::new(),
        name_color: DEFAULT_COLOR.to_string(),
        quote_color: DEFAULT_COLOR.to_string(),
        logo: None,
        photo: None,
    };
    let mut total = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| CardError::Validation(format!("upload error: {e}")))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some("name") => form.name = text_field(&mut field, &mut total).await?,
            Some("quote") => form.quote = text_field(&mut field, &mut total).await?,
            Some("nameColor") => {
                let value = text_field(&mut field, &mut total).await?;
                if !value.is_empty() {
                    form.name_color = value;
                }
            }
            Some("quoteColor") => {
                let value = text_field(&mut field, &mut total).await?;
                if !value.is_empty() {
                    form.quote_color = value;
                }
            }
            Some("logo") => {
                form.logo = file_field(&mut field, &mut total, "logo", IMAGE_EXTENSIONS).await?
            }
            Some("photo") => {
                form.photo = file_field(&mut field, &mut total, "photo", IMAGE_EXTENSIONS).await?
            }
            _ => {
                let _ = field_bytes(&mut field, &mut total).await?;
            }
        }
    }

    Ok(form)
}

pub async fn read_bulk_form(mut payload: Multipart) -> Result<BulkForm, CardError> {
    let mut form = BulkForm {
        name_color: DEFAULT_COLOR.to_string(),
        quote_color: DEFAULT_COLOR.to_string(),
        logo: None,
        csv: None,
        photos_zip: None,
    };
    let mut total = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| CardError::Validation(format!("upload error: {e}")))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some("nameColor") => {
                let value = text_field(&mut field, &mut total).await?;
                if !value.is_empty() {
                    form.name_color = value;
                }
            }
            Some("quoteColor") => {
                let value = text_field(&mut field, &mut total).await?;
                if !value.is_empty() {
                    form.quote_color = value;
                }
            }
            Some("logo") => {
                form.logo = file_field(&mut field, &mut total, "logo", IMAGE_EXTENSIONS).await?
            }
            Some("csv") => {
                form.csv = file_field(&mut field, &mut total, "CSV", CSV_EXTENSIONS).await?
            }
            Some("photosZip") => {
                form.photos_zip =
                    file_field(&mut field, &mut total, "ZIP", ZIP_EXTENSIONS).await?
            }
            _ => {
                let _ = field_bytes(&mut field, &mut total).await?;
            }
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(allowed_file("logo.PNG", IMAGE_EXTENSIONS));
        assert!(allowed_file("photo.jpeg", IMAGE_EXTENSIONS));
        assert!(allowed_file("people.csv", CSV_EXTENSIONS));
        assert!(allowed_file("photos.Zip", ZIP_EXTENSIONS));
    }

    #[test]
    fn unexpected_extensions_are_rejected() {
        assert!(!allowed_file("logo.gif", IMAGE_EXTENSIONS));
        assert!(!allowed_file("noextension", IMAGE_EXTENSIONS));
        assert!(!allowed_file("archive.zip", IMAGE_EXTENSIONS));
        assert!(!allowed_file("table.csv.bak", CSV_EXTENSIONS));
    }
}
