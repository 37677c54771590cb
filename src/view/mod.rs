//! Platform-neutral view models of the three screens.
//!
//! Nothing in here touches a DOM. Screens talk to the user through [`Prompt`], change
//! routes through [`Navigator`] and reach the backend through
//! [`crate::gateway::FileGateway`], which keeps every transition testable natively.
//!
//! - [`pagination`]: search filter and page slicing
//! - [`selection`]: the detail panel state machine
//! - [`dismissal`]: collapsing on outside pointer-down
//! - [`file_list`]: the file management controller
//! - [`building_form`]: the building creation form
//! - [`upload`]: the raw upload widget

use crate::types::{BuildingId, FileId};

pub mod building_form;
pub mod dismissal;
pub mod file_list;
pub mod pagination;
pub mod selection;
pub mod upload;

/// Blocking user dialogs (`alert` / `confirm` in a browser).
pub trait Prompt {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

/// Route changes requested by a screen. The router itself lives outside the core.
pub trait Navigator {
    fn navigate(&self, route: AppRoute);
}

/// Client-side routes of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    Buildings,
    NewBuilding,
    FileList { building_id: BuildingId },
    Upload { building_id: BuildingId },
    Tables { building_id: BuildingId, file_id: FileId },
}

impl AppRoute {
    pub fn path(&self) -> String {
        match self {
            AppRoute::Buildings => "/buildings".to_string(),
            AppRoute::NewBuilding => "/buildings/new".to_string(),
            AppRoute::FileList { building_id } => format!("/buildings/{}/files", building_id),
            AppRoute::Upload { building_id } => format!("/buildings/{}/files/upload", building_id),
            AppRoute::Tables { building_id, file_id } => {
                format!("/buildings/{}/files/{}/tables", building_id, file_id)
            }
        }
    }
}
