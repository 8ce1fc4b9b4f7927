//! Page-lifetime controller.
//!
//! The host page replaces its content wholesale on in-page navigation, so
//! the controller never patches: each content-replaced notification tears
//! down the current generation (scanner plus button) and builds a new one,
//! carrying only the hidden flag across.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ExtensionConfig;
use crate::file::FileScanner;
use crate::file_toggle::FileToggle;
use crate::page::Page;

/// One generation of page content.
struct Generation<P: Page> {
    file: Rc<FileScanner<P>>,
    toggle: Rc<FileToggle<P>>,
}

/// Owns the live scanner and button for a page and rebuilds them when the
/// page swaps its content.
pub struct Extension<P: Page> {
    page: Rc<P>,
    config: ExtensionConfig,
    hidden: bool,
    generation: Option<Generation<P>>,
    observer: Option<P::Observer>,
    rebuilds: usize,
}

impl<P: Page> Extension<P> {
    /// Create an unrendered controller. See [`Extension::mount`].
    pub fn new(page: Rc<P>, config: ExtensionConfig) -> Self {
        Self {
            page,
            hidden: config.start_hidden,
            config,
            generation: None,
            observer: None,
            rebuilds: 0,
        }
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    /// Current hidden flag: the live button's state, or the carried flag
    /// when nothing is rendered.
    pub fn is_hidden(&self) -> bool {
        self.generation
            .as_ref()
            .map_or(self.hidden, |generation| generation.toggle.is_hidden())
    }

    pub fn file(&self) -> Option<Rc<FileScanner<P>>> {
        self.generation
            .as_ref()
            .map(|generation| Rc::clone(&generation.file))
    }

    pub fn toggle(&self) -> Option<Rc<FileToggle<P>>> {
        self.generation
            .as_ref()
            .map(|generation| Rc::clone(&generation.toggle))
    }

    /// Whether content-replaced notifications are being received.
    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    /// Number of rebuilds triggered by content replacement.
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Flip every comment, as the page-wide button does.
    pub fn toggle_all(&self) {
        if let Some(generation) = &self.generation {
            generation.toggle.toggle();
        }
    }

    /// Tear down the current generation, keeping the hidden flag and the
    /// content subscription. Safe to call twice.
    pub fn destroy(&mut self) {
        let Some(generation) = self.generation.take() else {
            return;
        };
        self.hidden = generation.toggle.is_hidden();
        generation.file.destroy();
        generation.toggle.destroy();
        tracing::trace!("destroyed comment generation");
    }

    /// Expand every comment, tear down and stop listening for content
    /// replacement.
    pub fn unmount(&mut self) {
        if let Some(generation) = &self.generation {
            generation.file.show();
        }
        self.destroy();
        self.observer = None;
        tracing::debug!("extension unmounted");
    }
}

impl<P: Page + 'static> Extension<P> {
    /// Render the first generation and subscribe to content replacement
    /// for the life of the page.
    pub fn mount(page: Rc<P>, config: ExtensionConfig) -> Rc<RefCell<Self>> {
        let extension = Rc::new(RefCell::new(Self::new(page, config)));
        extension.borrow_mut().render();

        let weak = Rc::downgrade(&extension);
        let observer = extension.borrow().page.observe_content(Box::new(move || {
            let Some(extension) = weak.upgrade() else {
                return;
            };
            let Ok(mut controller) = extension.try_borrow_mut() else {
                tracing::warn!("content replaced while the extension was busy, skipping rebuild");
                return;
            };
            controller.rebuild();
        }));

        if observer.is_none() {
            tracing::debug!("no content container, comments will not follow navigation");
        }
        extension.borrow_mut().observer = observer;
        extension
    }

    /// Build a new generation from the current page content. An existing
    /// generation is destroyed first.
    pub fn render(&mut self) {
        self.destroy();

        let file = Rc::new(FileScanner::new(Rc::clone(&self.page)));
        let toggle = FileToggle::new(
            Rc::clone(&self.page),
            Rc::clone(&file),
            self.hidden,
            &self.config.button_label,
        );

        if self.hidden {
            file.hide();
        } else {
            file.show();
        }

        tracing::debug!(
            comments = file.comments().len(),
            hidden = self.hidden,
            "rendered comment generation"
        );
        self.generation = Some(Generation { file, toggle });
    }

    /// Respond to the page replacing its content.
    pub fn rebuild(&mut self) {
        self.rebuilds += 1;
        tracing::debug!(rebuild = self.rebuilds, "page content replaced, rebuilding");
        self.destroy();
        self.render();
    }
}
