//! A chart backend that records every call, for controller and session tests.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use eframe::egui::Vec2;

use super::{ChartBackend, ChartConfig, ChartError, ChartHandle, ChartKey, ChartResult};
use crate::deck::ChartSurface;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Created { key: ChartKey, kind: &'static str, values: Vec<f64> },
    Resized(ChartKey, Option<Vec2>),
    Destroyed(ChartKey),
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Default)]
pub struct RecordingBackend {
    pub log: CallLog,
    pub fail_create: BTreeSet<ChartKey>,
    pub fail_resize: BTreeSet<ChartKey>,
    pub fail_destroy: BTreeSet<ChartKey>,
}

impl RecordingBackend {
    pub fn new() -> (Self, CallLog) {
        let backend = Self::default();
        let log = backend.log.clone();
        (backend, log)
    }

    pub fn failing_create(mut self, key: ChartKey) -> Self {
        self.fail_create.insert(key);
        self
    }

    pub fn failing_resize(mut self, key: ChartKey) -> Self {
        self.fail_resize.insert(key);
        self
    }

    pub fn failing_destroy(mut self, key: ChartKey) -> Self {
        self.fail_destroy.insert(key);
        self
    }
}

pub struct RecordingHandle {
    key: ChartKey,
    log: CallLog,
    fail_resize: bool,
    fail_destroy: bool,
}

impl ChartBackend for RecordingBackend {
    type Handle = RecordingHandle;

    fn create(
        &mut self,
        surface: &ChartSurface,
        config: ChartConfig,
    ) -> ChartResult<RecordingHandle> {
        let key = surface.key;
        if self.fail_create.contains(&key) {
            return Err(ChartError::Backend(format!("cannot create {}", key.name())));
        }
        self.log.borrow_mut().push(Call::Created {
            key,
            kind: config.kind.name(),
            values: config.values.clone(),
        });
        Ok(RecordingHandle {
            key,
            log: self.log.clone(),
            fail_resize: self.fail_resize.contains(&key),
            fail_destroy: self.fail_destroy.contains(&key),
        })
    }
}

impl ChartHandle for RecordingHandle {
    fn resize(&mut self, size: Option<Vec2>) -> ChartResult<()> {
        if self.fail_resize {
            return Err(ChartError::Backend(format!("cannot resize {}", self.key.name())));
        }
        self.log.borrow_mut().push(Call::Resized(self.key, size));
        Ok(())
    }

    fn destroy(&mut self) -> ChartResult<()> {
        if self.fail_destroy {
            return Err(ChartError::Backend(format!("cannot destroy {}", self.key.name())));
        }
        self.log.borrow_mut().push(Call::Destroyed(self.key));
        Ok(())
    }
}

/// Keys of every `Created` call, in order.
pub fn created(log: &CallLog) -> Vec<ChartKey> {
    log.borrow()
        .iter()
        .filter_map(|c| match c {
            Call::Created { key, .. } => Some(*key),
            _ => None,
        })
        .collect()
}

pub fn resized(log: &CallLog) -> Vec<ChartKey> {
    log.borrow()
        .iter()
        .filter_map(|c| match c {
            Call::Resized(key, _) => Some(*key),
            _ => None,
        })
        .collect()
}

pub fn destroyed(log: &CallLog) -> Vec<ChartKey> {
    log.borrow()
        .iter()
        .filter_map(|c| match c {
            Call::Destroyed(key) => Some(*key),
            _ => None,
        })
        .collect()
}
