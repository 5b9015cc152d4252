//! Trade diary
//!
//! Completed purchases and sales are reported to a [`Diary`]. Recording is
//! informational: a failing diary is logged and otherwise ignored.

use serde::{Deserialize, Serialize};

use crate::error::DiaryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiaryKind {
    Bought,
    Sold,
    Donated,
}

/// One line of the diary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub turn: i64,
    pub kind: DiaryKind,
    /// Item description including quantity
    pub item: String,
    /// Gold that changed hands (0 for donations)
    pub price: i64,
}

impl DiaryEntry {
    pub fn text(&self) -> String {
        match self.kind {
            DiaryKind::Bought => format!("bought {} for {} gold", self.item, self.price),
            DiaryKind::Sold => format!("sold {} for {} gold", self.item, self.price),
            DiaryKind::Donated => format!("donated {} to the museum", self.item),
        }
    }
}

/// Receiver of trade notifications
pub trait Diary {
    fn record(&mut self, entry: DiaryEntry) -> Result<(), DiaryError>;
}

/// Diary kept in memory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDiary {
    pub entries: Vec<DiaryEntry>,
}

impl Diary for MemoryDiary {
    fn record(&mut self, entry: DiaryEntry) -> Result<(), DiaryError> {
        self.entries.push(entry);
        Ok(())
    }
}
