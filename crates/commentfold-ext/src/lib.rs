//! WASM content script for commentfold.
//!
//! Loaded by the extension on code listing pages. On start it installs the
//! panic hook and console logging, then mounts one [`Extension`] over the
//! live document for the lifetime of the page.

use std::cell::RefCell;
use std::rc::Rc;

use commentfold_browser::{BrowserPage, Extension, ExtensionConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static EXTENSION: RefCell<Option<Rc<RefCell<Extension<BrowserPage>>>>> =
        const { RefCell::new(None) };
}

/// Initialize logging and fold the current page.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_tracing();

    if let Err(err) = mount_with(ExtensionConfig::default()) {
        tracing::warn!(%err, "commentfold not mounted");
    }
}

fn init_tracing() {
    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    let _ = set_global_default(Registry::default().with(wasm_layer));
}

fn mount_with(config: ExtensionConfig) -> Result<(), commentfold_browser::PageError> {
    let page = Rc::new(BrowserPage::new(config.selectors.clone())?);
    unmount();
    let extension = Extension::mount(page, config);
    EXTENSION.with(|slot| *slot.borrow_mut() = Some(extension));
    Ok(())
}

/// Flip every comment on the page, as the toolbar button does.
#[wasm_bindgen(js_name = toggleComments)]
pub fn toggle_comments() {
    EXTENSION.with(|slot| {
        if let Some(extension) = slot.borrow().as_ref() {
            extension.borrow().toggle_all();
        }
    });
}

/// Whether comments are currently collapsed.
#[wasm_bindgen(js_name = isHidden)]
pub fn is_hidden() -> bool {
    EXTENSION.with(|slot| {
        slot.borrow()
            .as_ref()
            .is_some_and(|extension| extension.borrow().is_hidden())
    })
}

/// Replace the running instance with one built from a JSON configuration.
#[wasm_bindgen]
pub fn configure(config: &str) -> Result<(), JsError> {
    let config = ExtensionConfig::from_json(config)
        .map_err(|e| JsError::new(&format!("Invalid configuration: {}", e)))?;
    mount_with(config).map_err(|e| JsError::new(&format!("Mount failed: {}", e)))
}

/// Expand every comment and stop following navigation.
#[wasm_bindgen]
pub fn unmount() {
    let extension = EXTENSION.with(|slot| slot.borrow_mut().take());
    if let Some(extension) = extension {
        extension.borrow_mut().unmount();
    }
}
