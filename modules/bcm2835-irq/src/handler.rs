//! Driver callbacks.

/// Services an interrupt. Runs with IRQs unmasked, so it may be preempted by
/// another source.
pub trait IrqHandler: Sync {
    fn handle(&self);
}

/// Silences the interrupt condition at the peripheral that raised it. Runs
/// with IRQs masked, before the handler.
pub trait IrqClearer: Sync {
    fn clear(&self);
}

impl<F: Fn() + Sync> IrqHandler for F {
    fn handle(&self) {
        self()
    }
}

impl<F: Fn() + Sync> IrqClearer for F {
    fn clear(&self) {
        self()
    }
}

#[derive(Clone, Copy)]
pub struct HandlerEntry {
    pub handler: &'static dyn IrqHandler,
    pub clearer: &'static dyn IrqClearer,
}
