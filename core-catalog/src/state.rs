//! Observable list state

use core_api::{Character, PageInfo};
use serde::Serialize;

use crate::filter::CharacterFilter;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Character>),
    Failed(String),
}

impl LoadState {
    pub fn items(&self) -> &[Character] {
        match self {
            LoadState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }
}

/// Everything a list screen renders from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListSnapshot {
    pub load_state: LoadState,
    /// Pagination metadata of the most recently applied page
    pub last_page_info: Option<PageInfo>,
    pub is_loading: bool,
    /// Trimmed, non-empty search text of the current result set
    pub current_query: Option<String>,
    pub active_filter: CharacterFilter,
}
