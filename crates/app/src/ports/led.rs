//! LED port — the sequencer's peripheral sink.

use std::rc::Rc;
use std::sync::Arc;

use lumihub_domain::led::LedLevel;

/// Applies an output level to an LED peripheral.
///
/// Application is synchronous and assumed to always succeed; the wire
/// protocol behind it is an external collaborator.
pub trait LedSink {
    /// Apply `level` to the peripheral.
    fn apply(&self, level: LedLevel);
}

impl<L: LedSink + ?Sized> LedSink for &L {
    fn apply(&self, level: LedLevel) {
        (**self).apply(level);
    }
}

impl<L: LedSink + ?Sized> LedSink for Rc<L> {
    fn apply(&self, level: LedLevel) {
        (**self).apply(level);
    }
}

impl<L: LedSink + ?Sized> LedSink for Arc<L> {
    fn apply(&self, level: LedLevel) {
        (**self).apply(level);
    }
}
