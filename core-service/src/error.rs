use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Core initialization failed: {0}")]
    Runtime(#[from] core_runtime::Error),

    #[error("API error: {0}")]
    Api(#[from] core_api::ApiError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] core_catalog::CatalogError),
}

impl ServiceError {
    pub fn is_cancelled(&self) -> bool {
        match self {
            ServiceError::Api(error) => error.is_cancelled(),
            ServiceError::Catalog(error) => error.is_cancelled(),
            ServiceError::Runtime(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
