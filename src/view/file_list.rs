//! The file management screen: list, search, paginate, select, rename, delete, navigate.
//!
//! [`FileListView`] is the plain state; [`FileListController`] drives it from user actions
//! and gateway round trips. The controller is single-threaded: state lives in a `RefCell`
//! that is never borrowed across an `.await`, so a renderer may read [`FileListController::snapshot`]
//! while a request is outstanding.
//!
//! After every rename or delete the whole list is fetched again instead of patching the
//! cached copy. That costs a request and keeps the client from drifting away from what
//! the backend actually stores. The only local write ahead of the refresh is the echo of
//! a new name into the selected record.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};
use futures::future::{select, Either};
use futures::pin_mut;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::dismissal::{is_outside, Point, PointerHub, Region, Subscription};
use super::pagination::{self, Pager};
use super::selection::Selection;
use super::{AppRoute, Navigator, Prompt};
use crate::error::{ClientError, ClientResult};
use crate::gateway::FileGateway;
use crate::types::{BuildingId, FileId, FileRecord};

pub const MSG_EMPTY_NAME: &str = "Please enter a file name.";
pub const MSG_RENAMED: &str = "File name updated successfully.";
pub const MSG_RENAME_FAILED: &str = "An error occurred while renaming the file.";
pub const MSG_CONFIRM_DELETE: &str = "Do you really want to delete this file?";
pub const MSG_DELETED: &str = "File deleted.";
pub const MSG_DELETE_FAILED: &str = "There was an error deleting the file.";

/// A mutation currently waiting for the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Rename(FileId),
    Delete(FileId),
}

/// Everything the file list screen renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct FileListView {
    files: Vec<FileRecord>,
    selection: Selection,
    query: String,
    pager: Pager,
    pending: Option<Pending>,
    last_load_error: Option<String>,
}

impl FileListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            files: Vec::new(),
            selection: Selection::Collapsed,
            query: String::new(),
            pager: Pager::new(page_size),
            pending: None,
            last_load_error: None,
        }
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn page_size(&self) -> usize {
        self.pager.size()
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Message of the last failed list fetch, cleared by the next successful one.
    pub fn last_load_error(&self) -> Option<&str> {
        self.last_load_error.as_deref()
    }

    /// True when the building has no files at all (not merely none matching the search).
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn filtered(&self) -> Vec<&FileRecord> {
        pagination::filtered(&self.files, &self.query)
    }

    /// Rows on the current page.
    pub fn visible_rows(&self) -> Vec<&FileRecord> {
        let filtered = self.filtered();
        pagination::page(&filtered, self.pager.page(), self.pager.size()).to_vec()
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered().len(), self.pager.size())
    }

    pub fn has_next_page(&self) -> bool {
        self.pager.has_next(self.filtered().len())
    }

    pub fn has_previous_page(&self) -> bool {
        self.pager.has_previous()
    }

    /// Replaces the cached list wholesale and restores every invariant that depends on it.
    pub fn replace_files(&mut self, files: Vec<FileRecord>) {
        self.files = files;
        self.last_load_error = None;
        self.selection.reconcile(&self.files);
        self.clamp_page();
    }

    /// New search text. Always goes back to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.pager.reset();
        self.clamp_page();
    }

    pub fn next_page(&mut self) -> bool {
        let len = self.filtered().len();
        self.pager.next(len)
    }

    pub fn previous_page(&mut self) -> bool {
        self.pager.previous()
    }

    /// Selects the cached record with `id`. Unknown ids are ignored.
    pub fn select(&mut self, id: FileId) -> bool {
        match self.files.iter().find(|f| f.id == id) {
            Some(record) => {
                self.selection.select(record.clone());
                true
            }
            None => false,
        }
    }

    /// Changes the rows per page, keeping the current page when it still exists.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.pager.resize(page_size);
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        let len = self.filtered().len();
        self.pager.clamp(len);
    }
}

/// Formats a record timestamp for the detail panel.
pub fn format_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Drives a [`FileListView`] for one building.
pub struct FileListController<G> {
    building_id: BuildingId,
    gateway: G,
    prompt: Rc<dyn Prompt>,
    navigator: Rc<dyn Navigator>,
    view: RefCell<FileListView>,
    // Sequence number of the latest list fetch; older answers are dropped.
    load_seq: Cell<u64>,
    cancel: CancellationToken,
    on_change: RefCell<Option<Rc<dyn Fn()>>>,
}

impl<G: FileGateway> FileListController<G> {
    pub fn new(building_id: BuildingId, gateway: G, prompt: Rc<dyn Prompt>, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            building_id,
            gateway,
            prompt,
            navigator,
            view: RefCell::new(FileListView::new(pagination::DEFAULT_PAGE_SIZE)),
            load_seq: Cell::new(0),
            cancel: CancellationToken::new(),
            on_change: RefCell::new(None),
        }
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        self.view.replace(FileListView::new(page_size));
        self
    }

    pub fn building_id(&self) -> BuildingId {
        self.building_id
    }

    /// Page size delivered after construction, e.g. from the server's settings.
    pub fn set_page_size(&self, page_size: usize) {
        self.update(|v| v.set_page_size(page_size));
    }

    /// Registers the callback fired after every state change.
    pub fn set_on_change(&self, callback: impl Fn() + 'static) {
        *self.on_change.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn snapshot(&self) -> FileListView {
        self.view.borrow().clone()
    }

    pub fn with_view<R>(&self, f: impl FnOnce(&FileListView) -> R) -> R {
        f(&self.view.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut FileListView) -> R) -> R {
        let result = {
            let mut view = self.view.borrow_mut();
            f(&mut view)
        };
        let callback = self.on_change.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
        result
    }

    /// Runs a gateway call unless the view is torn down first.
    async fn guarded<T>(&self, call: impl Future<Output = ClientResult<T>>) -> ClientResult<T> {
        if self.cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        let cancelled = self.cancel.cancelled();
        pin_mut!(cancelled, call);
        match select(cancelled, call).await {
            Either::Left(_) => Err(ClientError::Cancelled),
            Either::Right((result, _)) => result,
        }
    }

    /// Fetches the list of the controller's building and replaces the cache.
    ///
    /// Failures are logged only; the last good snapshot stays on screen.
    pub async fn load_files(&self) -> ClientResult<()> {
        self.load_files_for(self.building_id).await
    }

    /// Fetches the list of `building_id` and replaces the cache.
    ///
    /// Only the answer of the most recent fetch is applied. An answer that arrives after a
    /// newer fetch was started is dropped, so a slow response can never bring back a list
    /// the backend has moved past.
    pub async fn load_files_for(&self, building_id: BuildingId) -> ClientResult<()> {
        let seq = self.load_seq.get() + 1;
        self.load_seq.set(seq);

        let result = self.guarded(self.gateway.list_files(building_id)).await;
        if !matches!(result, Err(ClientError::Cancelled)) && self.load_seq.get() != seq {
            debug!(building_id, seq, latest = self.load_seq.get(), "stale file list answer dropped");
            return result.map(|_| ());
        }
        match result {
            Ok(files) => {
                debug!(building_id, count = files.len(), "file list loaded");
                self.update(|v| v.replace_files(files));
                Ok(())
            }
            Err(ClientError::Cancelled) => {
                debug!(building_id, "file list fetch abandoned");
                Err(ClientError::Cancelled)
            }
            Err(e) => {
                error!(building_id, "Error fetching files: {}", e);
                self.update(|v| v.last_load_error = Some(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn set_query(&self, query: &str) {
        self.update(|v| v.set_query(query));
    }

    pub fn next_page(&self) -> bool {
        self.update(|v| v.next_page())
    }

    pub fn previous_page(&self) -> bool {
        self.update(|v| v.previous_page())
    }

    /// Row click.
    pub fn select(&self, file_id: FileId) -> bool {
        self.update(|v| v.select(file_id))
    }

    /// Edit icon on the detail panel.
    pub fn begin_edit(&self) -> bool {
        self.update(|v| v.selection.begin_edit())
    }

    pub fn set_draft(&self, draft: &str) -> bool {
        self.update(|v| v.selection.set_draft(draft))
    }

    /// Save icon: renames the record being edited to the current draft.
    pub async fn save_rename(&self) -> ClientResult<()> {
        let editing = self.with_view(|v| match v.selection() {
            Selection::Editing { record, draft } => Some((record.id, draft.clone())),
            _ => None,
        });
        match editing {
            Some((id, draft)) => self.rename_file(id, &draft).await,
            None => {
                debug!("save requested while not editing");
                Ok(())
            }
        }
    }

    /// Renames `file_id` on the backend, then refreshes the list.
    ///
    /// A blank name is rejected before any request. On failure the edit state is left
    /// exactly as it was.
    pub async fn rename_file(&self, file_id: FileId, new_name: &str) -> ClientResult<()> {
        if new_name.trim().is_empty() {
            warn!(file_id, "rename rejected: empty name");
            self.prompt.alert(MSG_EMPTY_NAME);
            return Err(ClientError::validation("fileName", MSG_EMPTY_NAME));
        }
        self.begin_pending(Pending::Rename(file_id))?;

        let result = self.guarded(self.gateway.rename_file(file_id, new_name)).await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }

        match result {
            Ok(()) => {
                info!(file_id, new_name, "file renamed");
                self.prompt.alert(MSG_RENAMED);
                self.update(|v| v.selection.apply_rename(file_id, new_name));
                // The mutation stays pending until the refreshed list is in.
                let _ = self.load_files().await;
                self.update(|v| v.pending = None);
                Ok(())
            }
            Err(e) => {
                self.update(|v| v.pending = None);
                error!(file_id, "Error renaming file: {}", e);
                self.prompt.alert(MSG_RENAME_FAILED);
                Err(e)
            }
        }
    }

    /// Deletes `file_id` after the user confirms, then refreshes the list.
    ///
    /// Returns `Ok(false)` if the user declined.
    pub async fn delete_file(&self, file_id: FileId) -> ClientResult<bool> {
        if self.with_view(|v| v.is_busy()) {
            return Err(ClientError::Busy);
        }
        if !self.prompt.confirm(MSG_CONFIRM_DELETE) {
            debug!(file_id, "deletion declined");
            return Ok(false);
        }
        self.begin_pending(Pending::Delete(file_id))?;

        let result = self.guarded(self.gateway.delete_file(file_id)).await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }

        match result {
            Ok(()) => {
                info!(file_id, "file deleted");
                self.prompt.alert(MSG_DELETED);
                self.update(|v| {
                    if v.selection.is_selected(file_id) {
                        v.selection.collapse();
                    }
                });
                let _ = self.load_files().await;
                self.update(|v| v.pending = None);
                Ok(true)
            }
            Err(e) => {
                self.update(|v| v.pending = None);
                error!(file_id, "Error deleting file: {}", e);
                self.prompt.alert(MSG_DELETE_FAILED);
                Err(e)
            }
        }
    }

    fn begin_pending(&self, op: Pending) -> ClientResult<()> {
        let busy = self.update(|v| {
            if v.pending.is_some() {
                true
            } else {
                v.pending = Some(op);
                false
            }
        });
        if busy {
            warn!(?op, "mutation rejected: another one is in flight");
            return Err(ClientError::Busy);
        }
        Ok(())
    }

    pub fn navigate_to_tables(&self, building_id: BuildingId, file_id: FileId) {
        self.navigator.navigate(AppRoute::Tables { building_id, file_id });
    }

    pub fn navigate_to_upload(&self, building_id: BuildingId) {
        self.navigator.navigate(AppRoute::Upload { building_id });
    }

    /// Pointer-down anywhere on the page. Collapses the panel if the point is outside
    /// all `regions`. Returns whether it collapsed.
    pub fn pointer_down(&self, point: Point, regions: &[Rc<dyn Region>]) -> bool {
        let visible = self.with_view(|v| v.selection().detail_visible());
        if !visible || !is_outside(point, regions) {
            return false;
        }
        debug!(x = point.x, y = point.y, "outside interaction, collapsing detail panel");
        self.update(|v| v.selection.collapse());
        true
    }

    /// Tears the view down: in-flight requests are abandoned and no callback fires again.
    pub fn unmount(&self) {
        self.cancel.cancel();
        self.on_change.borrow_mut().take();
    }

    pub fn is_unmounted(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl<G: FileGateway + 'static> FileListController<G> {
    /// Subscribes the outside-click rule to `hub` for as long as the subscription lives.
    pub fn attach_dismissal(self: &Rc<Self>, hub: &PointerHub, regions: Vec<Rc<dyn Region>>) -> Subscription {
        let weak: Weak<Self> = Rc::downgrade(self);
        hub.subscribe(move |point| {
            if let Some(controller) = weak.upgrade() {
                controller.pointer_down(point, &regions);
            }
        })
    }
}
