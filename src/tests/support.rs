use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{TimeZone, Utc};

use crate::gateway::MemoryGateway;
use crate::types::{BuildingId, FileRecord, NewBuilding};
use crate::view::file_list::FileListController;
use crate::view::{AppRoute, Navigator, Prompt};

/// Remembers every dialog and answers confirmations with a preset value.
pub struct RecordingPrompt {
    pub alerts: RefCell<Vec<String>>,
    pub confirms: RefCell<Vec<String>>,
    pub answer: Cell<bool>,
}

impl RecordingPrompt {
    pub fn new(answer: bool) -> Self {
        Self { alerts: RefCell::new(Vec::new()), confirms: RefCell::new(Vec::new()), answer: Cell::new(answer) }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Prompt for RecordingPrompt {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answer.get()
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: RefCell<Vec<AppRoute>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: AppRoute) {
        self.routes.borrow_mut().push(route);
    }
}

pub fn sample_building() -> NewBuilding {
    NewBuilding {
        building_name: "Main Hall".to_string(),
        address: "1 Example Road".to_string(),
        total_area: Some(1200.5),
        ground_floors: Some(5),
        basement_floors: Some(1),
    }
}

/// A store with one building holding files named `names` (ids 1..=n in order).
pub fn seeded(names: &[&str]) -> (MemoryGateway, BuildingId) {
    let store = MemoryGateway::new();
    let building = store.insert_building(sample_building());
    for name in names {
        store.insert_file(building.id, name).expect("building exists");
    }
    (store, building.id)
}

pub fn record(id: i64, name: &str) -> FileRecord {
    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    FileRecord { id, file_name: name.to_string(), create_time: ts, update_time: ts }
}

pub struct Harness<G> {
    pub controller: Rc<FileListController<G>>,
    pub prompt: Rc<RecordingPrompt>,
    pub navigator: Rc<RecordingNavigator>,
}

pub fn harness<G: crate::gateway::FileGateway>(gateway: G, building_id: BuildingId, confirm: bool) -> Harness<G> {
    let prompt = Rc::new(RecordingPrompt::new(confirm));
    let navigator = Rc::new(RecordingNavigator::default());
    let p: Rc<dyn Prompt> = prompt.clone();
    let n: Rc<dyn Navigator> = navigator.clone();
    let controller = Rc::new(FileListController::new(building_id, gateway, p, n));
    Harness { controller, prompt, navigator }
}
