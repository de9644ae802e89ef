use bridge_traits::error::BridgeError;
use core_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Favorites store error: {0}")]
    Favorites(#[from] BridgeError),
}

impl CatalogError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CatalogError::Api(error) if error.is_cancelled())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
