use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "xlsx")]
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] calamine::Error),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, ArError>;
