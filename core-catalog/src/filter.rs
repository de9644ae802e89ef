//! Client-side list filter

use core_api::{Gender, Status};
use serde::{Deserialize, Serialize};

/// Status and gender constraints applied to every list fetch.
///
/// Changing the filter invalidates pagination and search position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterFilter {
    pub status: Option<Status>,
    pub gender: Option<Gender>,
}

impl CharacterFilter {
    pub fn new(status: Option<Status>, gender: Option<Gender>) -> Self {
        Self { status, gender }
    }

    pub fn with_status(mut self, status: Option<Status>) -> Self {
        self.status = status;
        self
    }

    pub fn with_gender(mut self, gender: Option<Gender>) -> Self {
        self.gender = gender;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status.is_some() || self.gender.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
