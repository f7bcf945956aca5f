use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown modal kind: {0}")]
    InvalidKind(String),

    #[error("No modal record for key: {0}")]
    RecordNotFound(String),

    #[error("Degenerate rectangle: width={width}, height={height}")]
    DegenerateRect { width: f32, height: f32 },
}

pub type Result<T> = std::result::Result<T, CoreError>;
