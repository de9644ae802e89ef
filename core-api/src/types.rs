//! Rick and Morty API response types
//!
//! See: https://rickandmortyapi.com/documentation

use bridge_traits::favorites::FavoriteRecord;
use serde::{Deserialize, Serialize};

/// Character life status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Alive", alias = "alive")]
    Alive,
    #[serde(rename = "Dead", alias = "dead")]
    Dead,
    #[serde(rename = "unknown", alias = "Unknown")]
    Unknown,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Alive, Status::Dead, Status::Unknown];

    /// Value sent in the `status` query parameter
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Status::Alive => "alive",
            Status::Dead => "dead",
            Status::Unknown => "unknown",
        }
    }

    /// Label as the API spells it
    pub fn wire_label(&self) -> &'static str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "Unknown",
        }
    }

    /// Lenient parse of a stored label. Unrecognized labels map to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "alive" => Status::Alive,
            "dead" => Status::Dead,
            _ => Status::Unknown,
        }
    }
}

/// Character gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Female", alias = "female")]
    Female,
    #[serde(rename = "Male", alias = "male")]
    Male,
    #[serde(rename = "Genderless", alias = "genderless")]
    Genderless,
    #[serde(rename = "unknown", alias = "Unknown")]
    Unknown,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Male, Gender::Female, Gender::Genderless, Gender::Unknown];

    /// Value sent in the `gender` query parameter
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Genderless => "genderless",
            Gender::Unknown => "unknown",
        }
    }

    pub fn wire_label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Genderless => "Genderless",
            Gender::Unknown => "unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Genderless => "Genderless",
            Gender::Unknown => "Unknown",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "female" => Gender::Female,
            "male" => Gender::Male,
            "genderless" => Gender::Genderless,
            _ => Gender::Unknown,
        }
    }
}

/// Pagination metadata of a list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of matching records
    pub count: u32,

    /// Total number of pages
    #[serde(rename = "pages")]
    pub total_pages: u32,

    /// URL of the next page, `null` on the last page
    pub next: Option<String>,

    /// URL of the previous page, `null` on the first page
    pub prev: Option<String>,
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

pub type CharactersPage = Page<Character>;

/// Name and URL of a location a character is linked to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
    /// Empty when the location is unknown
    pub url: String,
}

/// Character resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub status: Status,
    pub species: String,
    /// Subtype or variant, often empty
    #[serde(rename = "type")]
    pub kind: String,
    pub gender: Gender,
    pub origin: LocationRef,
    pub location: LocationRef,
    #[serde(rename = "image")]
    pub image_url: String,
    #[serde(rename = "episode")]
    pub episode_urls: Vec<String>,
    pub url: String,
    #[serde(rename = "created")]
    pub created_at: String,
}

/// Location resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub dimension: String,
    /// Character URLs of the residents
    pub residents: Vec<String>,
    pub url: String,
    pub created: String,
}

/// Episode resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    pub air_date: String,
    /// Episode code, e.g. `S01E01`
    #[serde(rename = "episode")]
    pub code: String,
    /// Character URLs appearing in the episode
    pub characters: Vec<String>,
    pub url: String,
    pub created: String,
}

impl From<&Character> for FavoriteRecord {
    fn from(character: &Character) -> Self {
        FavoriteRecord {
            id: character.id,
            name: character.name.clone(),
            status: character.status.wire_label().to_string(),
            gender: character.gender.wire_label().to_string(),
            species: character.species.clone(),
            image_url: character.image_url.clone(),
            location_name: character.location.name.clone(),
        }
    }
}
