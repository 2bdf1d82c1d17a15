//! Element binding for the renderers.
//!
//! Renderers name the element ids and selectors they need; the surface hands
//! back either a bound handle or [`Binding::Absent`]. Absence is normal
//! degradation for pages that omit a section, never an error.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

pub const HIDDEN_CLASS: &str = "hidden";

pub enum Binding<H> {
    Bound(H),
    Absent,
}

impl<H> Binding<H> {
    pub fn bound(self) -> Option<H> {
        match self {
            Binding::Bound(handle) => Some(handle),
            Binding::Absent => None,
        }
    }
}

/// Operations the renderers perform on a single element.
pub trait ElementHandle: Clone + 'static {
    fn set_text(&self, text: &str);
    fn set_style(&self, property: &str, value: &str);
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    /// Force a synchronous layout so a removed-then-added CSS animation restarts.
    fn force_reflow(&self);
}

pub trait Surface {
    type Handle: ElementHandle;

    fn bind(&self, id: &str) -> Binding<Self::Handle>;

    /// All elements matching a CSS selector list, in document order.
    fn select_all(&self, selector: &str) -> Vec<Self::Handle>;
}

// -- Browser implementation --

#[derive(Clone)]
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn current() -> Option<Self> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(|document| Self { document })
    }

    pub fn canvas(&self, id: &str) -> Binding<HtmlCanvasElement> {
        match self
            .document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        {
            Some(canvas) => Binding::Bound(canvas),
            None => Binding::Absent,
        }
    }

    /// Smoothly scroll the element with `id` to the top of the viewport.
    pub fn scroll_to(&self, id: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let options = web_sys::ScrollIntoViewOptions::new();
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            options.set_block(web_sys::ScrollLogicalPosition::Start);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }
}

impl Surface for DomSurface {
    type Handle = DomHandle;

    fn bind(&self, id: &str) -> Binding<DomHandle> {
        match self.document.get_element_by_id(id) {
            Some(el) => Binding::Bound(DomHandle(el)),
            None => Binding::Absent,
        }
    }

    fn select_all(&self, selector: &str) -> Vec<DomHandle> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            tracing::warn!("Invalid selector: {}", selector);
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(DomHandle)
            .collect()
    }
}

#[derive(Clone)]
pub struct DomHandle(pub Element);

impl ElementHandle for DomHandle {
    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(el) = self.0.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property(property, value);
        }
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn force_reflow(&self) {
        if let Some(el) = self.0.dyn_ref::<HtmlElement>() {
            let _ = el.offset_width();
        }
    }
}

/// Whether the user asked the browser to minimize motion.
pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}
