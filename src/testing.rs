//! In-memory stand-ins for the browser seams, shared by the unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::dom::{Binding, ElementHandle, Surface};

#[derive(Debug, Default)]
pub struct FakeState {
    pub text: Option<String>,
    pub text_writes: usize,
    pub classes: Vec<String>,
    pub styles: HashMap<String, String>,
    pub reflows: usize,
    /// Class list snapshot taken at every reflow.
    pub reflow_snapshots: Vec<Vec<String>>,
}

#[derive(Clone, Default)]
pub struct FakeElement(pub Rc<RefCell<FakeState>>);

impl FakeElement {
    pub fn with_classes(classes: &[&str]) -> Self {
        let el = Self::default();
        el.0.borrow_mut().classes = classes.iter().map(|c| c.to_string()).collect();
        el
    }

    pub fn text(&self) -> Option<String> {
        self.0.borrow().text.clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }
}

impl ElementHandle for FakeElement {
    fn set_text(&self, text: &str) {
        let mut state = self.0.borrow_mut();
        state.text = Some(text.to_string());
        state.text_writes += 1;
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn add_class(&self, class: &str) {
        let mut state = self.0.borrow_mut();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn force_reflow(&self) {
        let mut state = self.0.borrow_mut();
        state.reflows += 1;
        let snapshot = state.classes.clone();
        state.reflow_snapshots.push(snapshot);
    }
}

/// A page made of elements with ids and/or classes. Selectors support the
/// comma-separated `.class` lists the scroll controller uses.
#[derive(Default)]
pub struct FakeSurface {
    elements: Vec<(Option<String>, FakeElement)>,
}

impl FakeSurface {
    pub fn with_ids(ids: &[&str]) -> Self {
        let mut surface = Self::default();
        for id in ids {
            surface.add_id(id);
        }
        surface
    }

    pub fn add_id(&mut self, id: &str) -> FakeElement {
        let el = FakeElement::default();
        self.elements.push((Some(id.to_string()), el.clone()));
        el
    }

    pub fn add_with_classes(&mut self, classes: &[&str]) -> FakeElement {
        let el = FakeElement::with_classes(classes);
        self.elements.push((None, el.clone()));
        el
    }

    pub fn get(&self, id: &str) -> FakeElement {
        self.elements
            .iter()
            .find(|(eid, _)| eid.as_deref() == Some(id))
            .map(|(_, el)| el.clone())
            .unwrap_or_else(|| panic!("no fake element with id {}", id))
    }
}

impl Surface for FakeSurface {
    type Handle = FakeElement;

    fn bind(&self, id: &str) -> Binding<FakeElement> {
        match self
            .elements
            .iter()
            .find(|(eid, _)| eid.as_deref() == Some(id))
        {
            Some((_, el)) => Binding::Bound(el.clone()),
            None => Binding::Absent,
        }
    }

    fn select_all(&self, selector: &str) -> Vec<FakeElement> {
        let wanted: Vec<&str> = selector
            .split(',')
            .map(|s| s.trim().trim_start_matches('.'))
            .collect();
        self.elements
            .iter()
            .filter(|(_, el)| wanted.iter().any(|class| el.has_class(class)))
            .map(|(_, el)| el.clone())
            .collect()
    }
}
