//! Scroll-triggered animation classes.
//!
//! Elements carrying one of the `scroll-*` classes gain `visible` while they
//! are in the viewport and lose it when they leave, so the CSS transition
//! replays every time the user scrolls back. Elements with the one-shot
//! `fade-in`/`slide-up`/`scale-up` animations get them restarted on re-entry.

use js_sys::Array;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::{DomHandle, DomSurface, ElementHandle, Surface};
use crate::error::js_error_text;

pub const VISIBLE_CLASS: &str = "visible";

/// Shrink the viewport's bottom edge so elements trigger slightly after appearing.
pub const ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const THRESHOLD: f64 = 0.05;

pub const OBSERVED_SELECTOR: &str =
    ".scroll-fade-in, .scroll-slide-left, .scroll-slide-right, .scroll-scale, .animate-on-scroll";

pub const REPLAY_CLASSES: [&str; 3] = ["fade-in", "slide-up", "scale-up"];
pub const REPLAY_SELECTOR: &str = ".fade-in, .slide-up, .scale-up";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCategory {
    Scale,
    SlideLeft,
    SlideRight,
}

impl AnimationCategory {
    pub fn class_name(self) -> &'static str {
        match self {
            AnimationCategory::Scale => "scroll-scale",
            AnimationCategory::SlideLeft => "scroll-slide-left",
            AnimationCategory::SlideRight => "scroll-slide-right",
        }
    }
}

/// Card groups that get a category class assigned on load.
pub const STAGGER_GROUPS: [(&str, AnimationCategory); 3] = [
    (".stat-card", AnimationCategory::Scale),
    (".breakdown-item", AnimationCategory::SlideLeft),
    (".compensation-item", AnimationCategory::SlideRight),
];

/// Transition delay for the `index`-th element of a group: 0.1 s per step.
pub fn stagger_delay(index: usize) -> String {
    format!("{}s", index as f64 / 10.0)
}

/// Tag every grouped element with its category class and staggered delay.
/// Elements that already carry the class are left untouched. Returns the
/// number of elements tagged.
pub fn assign_categories<S: Surface>(surface: &S) -> usize {
    let mut tagged = 0;
    for (selector, category) in STAGGER_GROUPS {
        for (index, el) in surface.select_all(selector).iter().enumerate() {
            if el.has_class(category.class_name()) {
                continue;
            }
            el.add_class(category.class_name());
            el.set_style("transition-delay", &stagger_delay(index));
            tagged += 1;
        }
    }
    tagged
}

/// Apply one intersection change. Adding or removing twice is harmless.
pub fn on_visibility_change<H: ElementHandle>(el: &H, intersecting: bool) {
    if intersecting {
        el.add_class(VISIBLE_CLASS);
    } else {
        el.remove_class(VISIBLE_CLASS);
    }
}

/// Restart the one-shot animations an entering element carries.
pub fn replay<H: ElementHandle>(el: &H) {
    for class in REPLAY_CLASSES {
        if el.has_class(class) {
            el.remove_class(class);
            el.force_reflow();
            el.add_class(class);
        }
    }
}

fn observer_options() -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_root_margin(ROOT_MARGIN);
    init.set_threshold(&JsValue::from_f64(THRESHOLD));
    init
}

/// Observe `targets`, calling `on_entry(element, is_intersecting)` for each
/// change. The observer and its callback live for the rest of the page.
fn observe<F>(targets: Vec<DomHandle>, on_entry: F) -> Result<(), JsValue>
where
    F: Fn(&DomHandle, bool) + 'static,
{
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    on_entry(&DomHandle(entry.target()), entry.is_intersecting());
                }
            }
        },
    );

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &observer_options())?;
    for target in &targets {
        observer.observe(&target.0);
    }
    callback.forget();
    Ok(())
}

/// Set up scroll animations on the current page.
pub fn install(surface: &DomSurface) {
    let tagged = assign_categories(surface);

    let animated = surface.select_all(OBSERVED_SELECTOR);
    let replayed = surface.select_all(REPLAY_SELECTOR);
    debug!(
        "Scroll animations: {} tagged, {} observed, {} replayable",
        tagged,
        animated.len(),
        replayed.len()
    );

    if let Err(e) = observe(animated, on_visibility_change::<DomHandle>) {
        warn!("Scroll observer unavailable: {}", js_error_text(&e));
    }
    if let Err(e) = observe(replayed, |el, intersecting| {
        if intersecting {
            replay(el);
        }
    }) {
        warn!("Replay observer unavailable: {}", js_error_text(&e));
    }
}
