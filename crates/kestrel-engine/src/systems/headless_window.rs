use crate::input::InputEvent;

use super::{Subsystem, WindowSystem};

/// Window stand-in with no platform surface.
///
/// Used for headless runs and tests. It can request close after a fixed
/// number of event polls, which makes `run()` terminate deterministically.
#[derive(Debug)]
pub struct HeadlessWindow {
    size: (u32, u32),
    title: String,
    close_after: Option<u64>,
    polls: u64,
    close_requested: bool,
    pending: Vec<InputEvent>,
    queued: Vec<InputEvent>,
}

impl HeadlessWindow {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            title: String::new(),
            close_after: None,
            polls: 0,
            close_requested: false,
            pending: Vec::new(),
            queued: Vec::new(),
        }
    }

    /// Requests close once `polls` event polls have happened.
    pub fn close_after(mut self, polls: u64) -> Self {
        self.close_after = Some(polls);
        self
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Queues an event delivered by the next `poll_events`.
    pub fn push_input(&mut self, ev: InputEvent) {
        self.pending.push(ev);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl Subsystem for HeadlessWindow {
    fn name(&self) -> &'static str {
        "window"
    }
}

impl WindowSystem for HeadlessWindow {
    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn poll_events(&mut self) {
        self.polls += 1;
        self.queued.append(&mut self.pending);

        if self.close_after.is_some_and(|n| self.polls >= n) {
            self.close_requested = true;
        }
    }

    fn set_title(&mut self, title: &str) {
        if self.title != title {
            self.title.clear();
            self.title.push_str(title);
        }
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn take_input_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.queued)
    }
}
