use eyre::Report;
use std::env;
use std::path::PathBuf;

/// Where uploaded listing media is written and how it is addressed publicly.
#[derive(Debug, Clone)]
pub struct MediaInfo {
    pub upload_dir: PathBuf,
    pub media_base_url: String,
}

impl MediaInfo {
    pub fn new(base_url: &str) -> Result<Self, Report> {
        Ok(Self {
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "./uploads".into())
                .into(),
            media_base_url: env::var("MEDIA_BASE_URL")
                .unwrap_or_else(|_| format!("{}/uploads", base_url))
                .trim_end_matches('/')
                .to_string(),
        })
    }
}
