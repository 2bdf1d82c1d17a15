//! Count-up animation for numeric captions.

use gloo_timers::future::TimeoutFuture;

use crate::dom::ElementHandle;
use crate::format::rounded;

/// Frame interval, roughly 60 Hz.
pub const TICK_MS: u32 = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct CountUp {
    pub start: f64,
    pub end: f64,
    pub duration_ms: u32,
    pub suffix: &'static str,
    /// Fixed decimal places; `None` picks them from `end`.
    pub decimals: Option<usize>,
}

impl CountUp {
    pub fn new(start: f64, end: f64, duration_ms: u32) -> Self {
        Self {
            start,
            end,
            duration_ms,
            suffix: "",
            decimals: None,
        }
    }

    pub fn with_suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    fn step(&self) -> f64 {
        (self.end - self.start) / (self.duration_ms as f64 / TICK_MS as f64)
    }

    /// Two decimals when the target has a fractional part, a rounded integer
    /// otherwise. Decided once from `end`.
    fn fractional(&self) -> bool {
        self.end.fract() != 0.0
    }

    pub fn render(&self, value: f64) -> String {
        if let Some(decimals) = self.decimals {
            format!("{:.*}{}", decimals, value, self.suffix)
        } else if self.fractional() {
            format!("{:.2}{}", value, self.suffix)
        } else {
            format!("{}{}", rounded(value), self.suffix)
        }
    }

    pub fn final_text(&self) -> String {
        self.render(self.end)
    }

    /// Text written at each tick, the last one being exactly `end`.
    pub fn frames(&self) -> Frames<'_> {
        Frames {
            anim: self,
            current: self.start,
            step: self.step(),
            done: false,
        }
    }
}

pub struct Frames<'a> {
    anim: &'a CountUp,
    current: f64,
    step: f64,
    done: bool,
}

impl Iterator for Frames<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let end = self.anim.end;
        if self.step == 0.0 || !self.step.is_finite() {
            self.done = true;
            return Some(self.anim.render(end));
        }

        self.current += self.step;
        if (self.step > 0.0 && self.current >= end) || (self.step < 0.0 && self.current <= end) {
            self.current = end;
            self.done = true;
        }
        Some(self.anim.render(self.current))
    }
}

/// Write each frame to `target`, waiting one tick before every write.
pub async fn run<H: ElementHandle>(target: H, anim: CountUp) {
    for text in anim.frames() {
        TimeoutFuture::new(TICK_MS).await;
        target.set_text(&text);
    }
}
