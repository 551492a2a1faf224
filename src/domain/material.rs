use serde::{Deserialize, Serialize};

use super::ids::MaterialId;

/// Flat category discriminant used to key tariff and duration tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialCategory {
    Book,
    Bestseller,
    Reference,
    Dvd,
    Magazine,
    Ebook,
}

/// Category plus the per-category detail the loss calculator prices with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MaterialKind {
    Book,
    Bestseller,
    Reference,
    Dvd { runtime_minutes: u32 },
    Magazine { current_issue: bool },
    Ebook,
}

impl MaterialKind {
    pub const fn category(&self) -> MaterialCategory {
        match self {
            MaterialKind::Book => MaterialCategory::Book,
            MaterialKind::Bestseller => MaterialCategory::Bestseller,
            MaterialKind::Reference => MaterialCategory::Reference,
            MaterialKind::Dvd { .. } => MaterialCategory::Dvd,
            MaterialKind::Magazine { .. } => MaterialCategory::Magazine,
            MaterialKind::Ebook => MaterialCategory::Ebook,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialState {
    Available,
    Loaned,
    Reserved,
    UnderRepair,
    Lost,
}

impl MaterialState {
    pub const fn label(self) -> &'static str {
        match self {
            MaterialState::Available => "available",
            MaterialState::Loaned => "loaned",
            MaterialState::Reserved => "reserved",
            MaterialState::UnderRepair => "under_repair",
            MaterialState::Lost => "lost",
        }
    }
}

/// The narrow material projection the engine reads and mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub id: MaterialId,
    pub title: String,
    pub kind: MaterialKind,
    pub state: MaterialState,
}

impl MaterialRecord {
    pub fn new(id: MaterialId, title: impl Into<String>, kind: MaterialKind) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            state: MaterialState::Available,
        }
    }

    pub fn category(&self) -> MaterialCategory {
        self.kind.category()
    }
}
