//! Voter photograph retrieval

use image::DynamicImage;
use image::imageops::FilterType;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("Photo request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Photo request returned HTTP {0}")]
    Status(u16),

    #[error("Photo URL did not return an image (content type {0:?})")]
    NotAnImage(String),

    #[error("Failed to decode photo: {0}")]
    Decode(#[from] image::ImageError),
}

/// Fetches the raw bytes of a voter photograph
pub trait PhotoLoader {
    fn load(&self, url: &str) -> Result<Vec<u8>, PhotoError>;
}

pub struct HttpPhotoLoader {
    client: Client,
}

impl HttpPhotoLoader {
    pub fn new(timeout: Duration) -> Result<Self, PhotoError> {
        let client = Client::builder()
            .user_agent(concat!("evm/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl PhotoLoader for HttpPhotoLoader {
    fn load(&self, url: &str) -> Result<Vec<u8>, PhotoError> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(PhotoError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !content_type.starts_with("image/") {
            return Err(PhotoError::NotAnImage(content_type));
        }

        Ok(response.bytes()?.to_vec())
    }
}

/// Decode photo bytes and scale them to a `size` x `size` square
pub fn decode_photo(bytes: &[u8], size: u32) -> Result<DynamicImage, PhotoError> {
    let img = image::load_from_memory(bytes)?;
    Ok(img.resize_exact(size, size, FilterType::Triangle))
}
