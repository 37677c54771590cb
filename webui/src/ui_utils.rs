use building_files::view::Prompt;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// [`Prompt`] backed by the browser's blocking `alert` / `confirm`.
pub struct WindowPrompt;

impl Prompt for WindowPrompt {
    fn alert(&self, message: &str) {
        if let Some(win) = web_sys::window() {
            let _ = win.alert_with_message(message);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window().and_then(|win| win.confirm_with_message(message).ok()).unwrap_or(false)
    }
}

// Show a transient toast in the #toasts container
pub fn show_toast(message: &str) {
    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            if let Some(container) = doc.get_element_by_id("toasts") {
                if let Ok(toast) = doc.create_element("div") {
                    toast.set_class_name("toast fade-in");
                    toast.set_text_content(Some(message));
                    if container.append_child(&toast).is_err() {
                        return; // Failed to append, exit early
                    }

                    // Auto-remove after timeout
                    let container_clone = container.clone();
                    let toast_clone = toast.clone();
                    let cb = Closure::wrap(Box::new(move || {
                        let _ = container_clone.remove_child(&toast_clone);
                    }) as Box<dyn FnMut()>);
                    let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                        cb.as_ref().unchecked_ref(),
                        2400,
                    );
                    cb.forget();
                }
            }
        }
    }
}

// Log to the browser console
pub fn log_error(message: &str) {
    web_sys::console::error_1(&message.into());
}
