use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    /// Missing or invalid client input; surfaces as a 400.
    #[error("{0}")]
    Validation(String),
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("failed to generate card: {0}")]
    Generation(String),
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CardError>;
