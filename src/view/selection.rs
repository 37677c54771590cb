//! Which file the detail panel shows, and whether its name is being edited.

use crate::types::{FileId, FileRecord};

/// State of the detail panel.
///
/// `Editing` carries the record it edits, so an editing id that differs from the
/// selected id cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Collapsed,
    Viewing(FileRecord),
    Editing { record: FileRecord, draft: String },
}

impl Selection {
    /// The detail panel is shown iff something is selected.
    pub fn detail_visible(&self) -> bool {
        !matches!(self, Selection::Collapsed)
    }

    pub fn record(&self) -> Option<&FileRecord> {
        match self {
            Selection::Collapsed => None,
            Selection::Viewing(record) | Selection::Editing { record, .. } => Some(record),
        }
    }

    pub fn selected_id(&self) -> Option<FileId> {
        self.record().map(|r| r.id)
    }

    pub fn editing_id(&self) -> Option<FileId> {
        match self {
            Selection::Editing { record, .. } => Some(record.id),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            Selection::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn is_selected(&self, id: FileId) -> bool {
        self.selected_id() == Some(id)
    }

    /// Row click. Re-selecting the shown record changes nothing; another record drops any draft.
    pub fn select(&mut self, record: FileRecord) {
        if self.is_selected(record.id) {
            return;
        }
        *self = Selection::Viewing(record);
    }

    /// Edit icon. The draft starts as the current name. Ignored unless viewing.
    pub fn begin_edit(&mut self) -> bool {
        if let Selection::Viewing(record) = self {
            let record = record.clone();
            let draft = record.file_name.clone();
            *self = Selection::Editing { record, draft };
            true
        } else {
            false
        }
    }

    pub fn set_draft(&mut self, value: impl Into<String>) -> bool {
        if let Selection::Editing { draft, .. } = self {
            *draft = value.into();
            true
        } else {
            false
        }
    }

    /// Successful rename of `id`: echo the new name locally and leave edit mode.
    /// Does nothing if `id` is not the selected record.
    pub fn apply_rename(&mut self, id: FileId, new_name: &str) {
        if let Some(record) = self.record().filter(|r| r.id == id) {
            let mut record = record.clone();
            record.file_name = new_name.to_string();
            *self = Selection::Viewing(record);
        }
    }

    pub fn collapse(&mut self) {
        *self = Selection::Collapsed;
    }

    /// Keeps the selection consistent with a freshly fetched list.
    ///
    /// A vanished record collapses the panel. A record still present is replaced by the
    /// fetched copy; an open draft survives.
    pub fn reconcile(&mut self, files: &[FileRecord]) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match files.iter().find(|f| f.id == id) {
            None => self.collapse(),
            Some(fresh) => match self {
                Selection::Viewing(record) | Selection::Editing { record, .. } => *record = fresh.clone(),
                Selection::Collapsed => {}
            },
        }
    }
}
