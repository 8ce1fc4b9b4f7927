//! Content-replacement notifications via `MutationObserver`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MutationObserver, MutationObserverInit};

use commentfold_core::PageError;

use crate::page::js_error;

/// Watches a container's direct children and calls back on every batch of
/// changes. Disconnects when dropped.
pub struct ContentObserver {
    observer: MutationObserver,
    // Kept alive for as long as the observer can call into it.
    _callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

impl ContentObserver {
    /// Start observing `container` for child list changes.
    ///
    /// Only direct children are watched, so placeholder rows inserted deeper
    /// in the listing do not trigger notifications.
    pub fn observe(container: &Element, mut handler: Box<dyn FnMut()>) -> Result<Self, PageError> {
        let callback = Closure::wrap(Box::new(move |_records: js_sys::Array, _: MutationObserver| {
            handler();
        }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);

        let observer =
            MutationObserver::new(callback.as_ref().unchecked_ref()).map_err(js_error)?;

        let init = MutationObserverInit::new();
        init.set_child_list(true);
        observer
            .observe_with_options(container, &init)
            .map_err(js_error)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ContentObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
