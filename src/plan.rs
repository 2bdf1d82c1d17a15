//! Declarative DOM updates with delays.
//!
//! Renderers build a [`RenderPlan`]; [`play`] binds every target once, applies
//! the undelayed steps on the spot and runs the rest as their own tasks,
//! [`settle`] applies everything at once.

use tracing::debug;
use wasm_bindgen_futures::spawn_local;

use crate::animate::{self, CountUp};
use crate::dom::{self, ElementHandle, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetText(String),
    /// Set `style.width` to a CSS percentage.
    SetWidth(f64),
    AddClass(&'static str),
    RemoveClass(&'static str),
    CountUp(CountUp),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub target: &'static str,
    pub delay_ms: u32,
    pub action: Action,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderPlan {
    steps: Vec<Step>,
}

impl RenderPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&mut self, target: &'static str, action: Action) -> &mut Self {
        self.after(0, target, action)
    }

    pub fn after(&mut self, delay_ms: u32, target: &'static str, action: Action) -> &mut Self {
        self.steps.push(Step {
            target,
            delay_ms,
            action,
        });
        self
    }

    #[cfg(test)]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[cfg(test)]
    pub fn step_for(&self, target: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.target == target)
    }
}

impl Step {
    /// Needs neither a delay nor a timer.
    fn is_immediate(&self) -> bool {
        self.delay_ms == 0 && !matches!(self.action, Action::CountUp(_))
    }
}

fn apply<H: ElementHandle>(handle: &H, action: &Action) {
    match action {
        Action::SetText(text) => handle.set_text(text),
        Action::SetWidth(percent) => handle.set_style("width", &format!("{}%", percent)),
        Action::AddClass(class) => handle.add_class(class),
        Action::RemoveClass(class) => handle.remove_class(class),
        Action::CountUp(anim) => handle.set_text(&anim.final_text()),
    }
}

/// Bind every step's target; steps whose element is missing are dropped.
fn bind_steps<S: Surface>(plan: RenderPlan, surface: &S) -> Vec<(S::Handle, Step)> {
    plan.steps
        .into_iter()
        .filter_map(|step| match surface.bind(step.target).bound() {
            Some(handle) => Some((handle, step)),
            None => {
                debug!("Skipping #{}: element not on page", step.target);
                None
            }
        })
        .collect()
}

/// Apply every step immediately, in delay order; count-ups jump to their final frame.
/// Returns the number of steps applied.
pub fn settle<S: Surface>(plan: RenderPlan, surface: &S) -> usize {
    let mut bound = bind_steps(plan, surface);
    bound.sort_by_key(|(_, step)| step.delay_ms);
    for (handle, step) in &bound {
        apply(handle, &step.action);
    }
    bound.len()
}

/// Apply the immediate steps in plan order and hand back the timed ones.
fn apply_immediate<H: ElementHandle>(bound: Vec<(H, Step)>) -> Vec<(H, Step)> {
    let (now, later): (Vec<_>, Vec<_>) = bound.into_iter().partition(|(_, step)| step.is_immediate());
    for (handle, step) in &now {
        apply(handle, &step.action);
    }
    later
}

/// Run the plan. Undelayed steps are applied before this returns; every other
/// step waits for its own delay on the browser event loop, none waits on another.
pub fn play<S: Surface>(plan: RenderPlan, surface: &S) -> usize {
    let bound = bind_steps(plan, surface);
    let count = bound.len();
    for (handle, step) in apply_immediate(bound) {
        spawn_local(async move {
            if step.delay_ms > 0 {
                gloo_timers::future::TimeoutFuture::new(step.delay_ms).await;
            }
            match step.action {
                Action::CountUp(anim) => animate::run(handle, anim).await,
                other => apply(&handle, &other),
            }
        });
    }
    count
}

/// [`settle`] when the user prefers reduced motion, [`play`] otherwise.
pub fn perform<S: Surface>(plan: RenderPlan, surface: &S) -> usize {
    if dom::prefers_reduced_motion() {
        settle(plan, surface)
    } else {
        play(plan, surface)
    }
}

#[cfg(test)]
pub(crate) fn apply_immediate_for_test<S: Surface>(plan: RenderPlan, surface: &S) -> Vec<Step> {
    apply_immediate(bind_steps(plan, surface))
        .into_iter()
        .map(|(_, step)| step)
        .collect()
}
