//! Browser glue for the outside-click rule and the file picker.

use std::rc::Rc;

use building_files::view::dismissal::{Point, PointerHub, Rect, Region};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// A page element looked up by id. Its box is measured at the time of the click, so
/// the region follows layout changes.
pub struct ElementRegion {
    id: &'static str,
}

impl ElementRegion {
    pub fn new(id: &'static str) -> Rc<dyn Region> {
        Rc::new(Self { id })
    }
}

impl Region for ElementRegion {
    fn contains(&self, point: Point) -> bool {
        let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.get_element_by_id(self.id)) else {
            return false;
        };
        let r = el.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.width(), r.height()).contains(point)
    }
}

/// `mousedown` listener on the document feeding a [`PointerHub`]. Removed on drop.
pub struct DocumentPointer {
    document: web_sys::Document,
    closure: Closure<dyn FnMut(web_sys::MouseEvent)>,
}

impl DocumentPointer {
    pub fn attach(hub: Rc<PointerHub>) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            hub.pointer_down(Point::new(ev.client_x() as f64, ev.client_y() as f64));
        });
        document.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref()).ok()?;
        Some(Self { document, closure })
    }
}

impl Drop for DocumentPointer {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("mousedown", self.closure.as_ref().unchecked_ref());
    }
}

/// A file picked in an `<input type="file">`.
pub struct PickedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Reads the first file of the file input with id `input_id`.
pub async fn read_picked_file(input_id: &str) -> Option<PickedFile> {
    let document = web_sys::window()?.document()?;
    let input: web_sys::HtmlInputElement = document.get_element_by_id(input_id)?.dyn_into().ok()?;
    let file = input.files()?.get(0)?;
    let buffer = JsFuture::from(file.array_buffer()).await.ok()?;
    let content_type = file.type_();
    Some(PickedFile {
        name: file.name(),
        content_type: if content_type.is_empty() { None } else { Some(content_type) },
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}
