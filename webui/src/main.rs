use dioxus::events::FormData;
use dioxus::prelude::*;

use dioxus_router::prelude::*;
use std::rc::Rc;

use building_files::gateway::FileGateway;
use building_files::types::{Building, BuildingId, FileId, UploadPayload};
use building_files::view::building_form::{self, BuildingForm, Field};
use building_files::view::dismissal::PointerHub;
use building_files::view::file_list::{format_time, FileListController};
use building_files::view::upload::UploadForm;
use building_files::view::{AppRoute, Navigator as ViewNavigator, Prompt};

mod api;
mod dom;
mod ui_utils;
use api::HttpGateway;
use dom::{DocumentPointer, ElementRegion};
use ui_utils::{log_error, show_toast, WindowPrompt};

const FILE_LIST_ID: &str = "file-list";
const FILE_DETAIL_ID: &str = "file-detail";
const UPLOAD_INPUT_ID: &str = "upload-input";

// ----- Routing -----
#[derive(Routable, Clone, Debug, PartialEq)]
pub enum Route {
    #[redirect("/", || Route::Buildings {})]
    #[route("/buildings")]
    Buildings {},
    #[route("/buildings/new")]
    NewBuilding {},
    #[route("/buildings/:building_id/files")]
    FileList { building_id: BuildingId },
    #[route("/buildings/:building_id/files/upload")]
    Upload { building_id: BuildingId },
    #[route("/buildings/:building_id/files/:file_id/tables")]
    Tables { building_id: BuildingId, file_id: FileId },
}

impl From<AppRoute> for Route {
    fn from(route: AppRoute) -> Self {
        match route {
            AppRoute::Buildings => Route::Buildings {},
            AppRoute::NewBuilding => Route::NewBuilding {},
            AppRoute::FileList { building_id } => Route::FileList { building_id },
            AppRoute::Upload { building_id } => Route::Upload { building_id },
            AppRoute::Tables { building_id, file_id } => Route::Tables { building_id, file_id },
        }
    }
}

/// Route changes requested by the view models, handed to the router.
struct RouterNavigator(Navigator);

impl ViewNavigator for RouterNavigator {
    fn navigate(&self, route: AppRoute) {
        self.0.push(Route::from(route));
    }
}

pub fn main() {
    console_error_panic_hook::set_once();
    dioxus_web::launch::launch(app, vec![], Default::default());
}

fn app() -> Element {
    rsx! {
        div { // root wrapper
            div { class: "app-header",
                div { class: "container",
                    div { class: "brand",
                        span { "Building Files" }
                    }
                    nav {
                        Link { to: Route::Buildings {}, "Buildings" }
                        Link { to: Route::NewBuilding {}, "New building" }
                    }
                }
            }
            Router::<Route> {}
            // Toast container for notifications
            div { id: "toasts", class: "toast-container" }
        }
    }
}

// ----- Buildings: listing -----
#[component]
fn Buildings() -> Element {
    let buildings = use_signal(Vec::<Building>::new);
    let error = use_signal(|| None as Option<String>);

    use_hook(move || {
        let mut buildings = buildings;
        let mut error = error;
        wasm_bindgen_futures::spawn_local(async move {
            match HttpGateway::new().list_buildings().await {
                Ok(list) => {
                    buildings.set(list);
                    error.set(None);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    rsx! {
        section { class: "panel",
            h2 { "Buildings" }
            if let Some(e) = error.read().as_ref() {
                div { class: "error", "{e}" }
            }
            if buildings.read().is_empty() {
                p { class: "muted", "No buildings yet." }
            }
            ul {
                for b in buildings.read().iter() {
                    li { key: "{b.id}",
                        Link { to: Route::FileList { building_id: b.id }, "{b.details.building_name}" }
                        span { class: "muted", " {b.details.address}" }
                    }
                }
            }
            Link { to: Route::NewBuilding {}, "New building" }
        }
    }
}

// ----- Building form -----
#[component]
fn NewBuilding() -> Element {
    let nav = use_navigator();
    let mut form = use_signal(BuildingForm::new);
    let mut submitting = use_signal(|| false);
    let mut lookup_text = use_signal(String::new);

    let submit = move |_| {
        if *submitting.read() {
            return;
        }
        let request = match form.write().validate() {
            Ok(request) => request,
            Err(_) => return,
        };
        submitting.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let navigator = RouterNavigator(nav);
            if let Err(e) = building_form::create_building(&request, &HttpGateway::new(), &navigator).await {
                log_error(&e.to_string());
                show_toast("Creating the building failed.");
            }
            submitting.set(false);
        });
    };

    let snapshot = form.read().clone();
    rsx! {
        section { class: "panel",
            h2 { "New building" }
            for field in Field::ALL {
                div { key: "{field.name()}", class: "form-row",
                    label { r#for: "{field.name()}", "{field_label(field)}" }
                    input {
                        id: "{field.name()}",
                        r#type: if field.is_floor_count() { "number" } else { "text" },
                        min: if field.is_floor_count() { "0" } else { "" },
                        readonly: field == Field::Address,
                        value: "{snapshot.draft().get(field)}",
                        oninput: move |e: Event<FormData>| {
                            let _ = form.write().set_field(field, &e.value());
                        }
                    }
                    if field == Field::Address {
                        button { class: "btn", onclick: move |_| form.write().open_address_lookup(), "Search address" }
                    }
                    if let Some(msg) = snapshot.error(field) {
                        div { class: "field-error", "{msg}" }
                    }
                }
            }
            if snapshot.is_lookup_open() {
                div { class: "dialog",
                    input {
                        r#type: "text",
                        placeholder: "Address",
                        value: "{lookup_text}",
                        oninput: move |e: Event<FormData>| lookup_text.set(e.value()),
                    }
                    button { class: "btn", onclick: move |_| {
                        let address = lookup_text.read().clone();
                        if !address.trim().is_empty() {
                            form.write().apply_address(address.trim());
                        }
                    }, "Use address" }
                    button { class: "btn", onclick: move |_| form.write().close_address_lookup(), "Cancel" }
                }
            }
            button { class: "btn primary", disabled: *submitting.read(), onclick: submit, "Create" }
        }
    }
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::BuildingName => "Building name",
        Field::Address => "Address",
        Field::TotalArea => "Total area (m²)",
        Field::GroundFloors => "Floors above ground",
        Field::BasementFloors => "Basement floors",
    }
}

// ----- File management -----
#[component]
fn FileList(building_id: BuildingId) -> Element {
    let nav = use_navigator();
    let revision = use_signal(|| 0_u64);

    let controller = use_hook(move || {
        let prompt: Rc<dyn Prompt> = Rc::new(WindowPrompt);
        let navigator: Rc<dyn ViewNavigator> = Rc::new(RouterNavigator(nav));
        let controller = Rc::new(FileListController::new(building_id, HttpGateway::new(), prompt, navigator));
        controller.set_on_change(move || {
            let mut revision = revision;
            revision += 1;
        });
        let c = controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            // Page size comes from the server's `[ui]` section; the default stays on failure.
            match HttpGateway::new().settings().await {
                Ok(settings) => c.set_page_size(settings.page_size),
                Err(e) => log_error(&format!("Could not load settings: {}", e)),
            }
            let _ = c.load_files().await;
        });
        controller
    });

    // Outside clicks collapse the detail panel; both the listener and the subscription
    // live exactly as long as this component.
    let _dismissal = use_hook({
        let controller = controller.clone();
        move || {
            let hub = Rc::new(PointerHub::new());
            let subscription = controller.attach_dismissal(
                &hub,
                vec![ElementRegion::new(FILE_LIST_ID), ElementRegion::new(FILE_DETAIL_ID)],
            );
            Rc::new((DocumentPointer::attach(hub), subscription))
        }
    });

    {
        let controller = controller.clone();
        use_drop(move || controller.unmount());
    }

    let _ = revision();
    let view = controller.snapshot();
    let selection = view.selection().clone();
    let busy = view.is_busy();

    rsx! {
        section { id: FILE_LIST_ID, class: "panel",
            div { class: "toolbar",
                h2 { "Files" }
                input {
                    r#type: "search",
                    placeholder: "Search by file name",
                    value: "{view.query()}",
                    oninput: {
                        let c = controller.clone();
                        move |e: Event<FormData>| c.set_query(&e.value())
                    }
                }
                button { class: "btn", onclick: {
                    let c = controller.clone();
                    move |_| c.navigate_to_upload(c.building_id())
                }, "Upload" }
            }
            if let Some(e) = view.last_load_error() {
                div { class: "error",
                    "Could not load files: {e} "
                    button { class: "btn", onclick: {
                        let c = controller.clone();
                        move |_| {
                            let c = c.clone();
                            wasm_bindgen_futures::spawn_local(async move { let _ = c.load_files().await; });
                        }
                    }, "Retry" }
                }
            }
            table { class: "files",
                thead {
                    tr {
                        th { "No." }
                        th { "File name" }
                        th { "Uploaded" }
                        th { "Updated" }
                    }
                }
                tbody {
                    if view.is_empty() {
                        tr { td { colspan: "4", class: "muted", "No files found." } }
                    }
                    for (i, file) in view.visible_rows().into_iter().enumerate() {
                        tr {
                            key: "{file.id}",
                            class: if selection.is_selected(file.id) { "selected" } else { "" },
                            onclick: {
                                let c = controller.clone();
                                let id = file.id;
                                move |_| { c.select(id); }
                            },
                            td { "{(view.page() - 1) * view.page_size() + i + 1}" }
                            td { "{file.file_name}" }
                            td { "{format_time(&file.create_time)}" }
                            td { "{format_time(&file.update_time)}" }
                        }
                    }
                }
            }
            div { class: "pager",
                button { class: "btn", disabled: !view.has_previous_page(), onclick: {
                    let c = controller.clone();
                    move |_| { c.previous_page(); }
                }, "Previous" }
                span { " {view.page()} / {view.total_pages()} " }
                button { class: "btn", disabled: !view.has_next_page(), onclick: {
                    let c = controller.clone();
                    move |_| { c.next_page(); }
                }, "Next" }
            }
        }
        if let Some(record) = selection.record() {
            aside { id: FILE_DETAIL_ID, class: "panel detail",
                if let Some(draft) = selection.draft() {
                    input {
                        r#type: "text",
                        value: "{draft}",
                        oninput: {
                            let c = controller.clone();
                            move |e: Event<FormData>| { c.set_draft(&e.value()); }
                        },
                        onkeydown: {
                            let c = controller.clone();
                            move |e: Event<KeyboardData>| {
                                if e.key() == Key::Enter {
                                    let c = c.clone();
                                    wasm_bindgen_futures::spawn_local(async move { let _ = c.save_rename().await; });
                                }
                            }
                        }
                    }
                    button { class: "btn primary", disabled: busy, onclick: {
                        let c = controller.clone();
                        move |_| {
                            let c = c.clone();
                            wasm_bindgen_futures::spawn_local(async move { let _ = c.save_rename().await; });
                        }
                    }, "Save" }
                } else {
                    h3 { "{record.file_name}" }
                    button { class: "btn", onclick: {
                        let c = controller.clone();
                        move |_| { c.begin_edit(); }
                    }, "Rename" }
                }
                dl {
                    dt { "Uploaded" } dd { "{format_time(&record.create_time)}" }
                    dt { "Updated" } dd { "{format_time(&record.update_time)}" }
                }
                button { class: "btn", onclick: {
                    let c = controller.clone();
                    let file_id = record.id;
                    move |_| c.navigate_to_tables(c.building_id(), file_id)
                }, "Open tables" }
                button { class: "btn danger", disabled: busy, onclick: {
                    let c = controller.clone();
                    let file_id = record.id;
                    move |_| {
                        let c = c.clone();
                        wasm_bindgen_futures::spawn_local(async move { let _ = c.delete_file(file_id).await; });
                    }
                }, "Delete" }
                if busy {
                    span { class: "muted", " working..." }
                }
            }
        }
    }
}

// ----- Upload -----
#[component]
fn Upload(building_id: BuildingId) -> Element {
    let mut form = use_signal(UploadForm::new);

    let on_pick = move |_: Event<FormData>| {
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(picked) = dom::read_picked_file(UPLOAD_INPUT_ID).await {
                let mut payload = UploadPayload::new(picked.name, picked.bytes).for_building(building_id);
                payload.content_type = picked.content_type;
                form.write().choose(payload);
            }
        });
    };

    let on_upload = move |_| {
        let payload = match form.write().start() {
            Ok(payload) => payload,
            Err(_) => return,
        };
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = HttpGateway::new().upload_file(payload).await;
            if form.write().finish(outcome).is_ok() {
                show_toast("Upload complete");
            }
        });
    };

    let snapshot = form.read().clone();
    rsx! {
        section { class: "panel",
            h2 { "Upload" }
            input { id: UPLOAD_INPUT_ID, r#type: "file", onchange: on_pick }
            button { class: "btn primary", disabled: snapshot.in_progress(), onclick: on_upload, "Upload" }
            if !snapshot.message().is_empty() {
                p { "{snapshot.message()}" }
            }
            if let Some(pretty) = snapshot.receipt_pretty() {
                pre { class: "receipt", "{pretty}" }
            }
            Link { to: Route::FileList { building_id }, "Back to files" }
        }
    }
}

// ----- Tables (table extraction happens elsewhere) -----
#[component]
fn Tables(building_id: BuildingId, file_id: FileId) -> Element {
    rsx! {
        section { class: "panel",
            h2 { "Tables of file {file_id}" }
            p { class: "muted", "Table extraction is not part of this screen." }
            Link { to: Route::FileList { building_id }, "Back to files" }
        }
    }
}
