use serde::{Deserialize, Serialize};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

use crate::error::AppError;

use super::repo::Entry;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Raw new-entry form as submitted. `favorite` is an HTML checkbox, so it is
/// present ("on") when checked and absent otherwise.
#[derive(Debug, Deserialize)]
pub struct NewEntryForm {
    pub title: String,
    pub date: String,
    pub content: String,
    #[serde(default)]
    pub favorite: Option<String>,
}

/// Validated new-entry request; built before any store access runs.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub title: String,
    pub date: Date,
    pub content: String,
    pub favorite: bool,
}

impl NewEntryForm {
    pub fn parse(self) -> Result<NewEntry, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidForm("title must not be empty".into()));
        }

        let date = Date::parse(self.date.trim(), DATE_FORMAT).map_err(|_| {
            AppError::InvalidForm(format!("invalid date '{}': expected YYYY-MM-DD", self.date))
        })?;

        Ok(NewEntry {
            title: title.to_string(),
            date,
            content: self.content,
            favorite: self.favorite.is_some(),
        })
    }
}

/// What the listing templates see: dates pre-formatted for display.
#[derive(Debug, Serialize)]
pub struct EntryView {
    pub title: String,
    pub date: String,
    pub content: String,
    pub favorite: bool,
}

impl TryFrom<Entry> for EntryView {
    type Error = time::error::Format;

    fn try_from(entry: Entry) -> Result<Self, Self::Error> {
        Ok(Self {
            title: entry.title,
            date: entry.date.format(DATE_FORMAT)?,
            content: entry.content,
            favorite: entry.favorite,
        })
    }
}
