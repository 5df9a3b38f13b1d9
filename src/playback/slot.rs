use crate::engine::EngineHandle;

/// Owning slot for the single live engine handle.
///
/// The previous handle is always unloaded before a replacement is acquired,
/// whether or not the acquisition succeeds.
pub(super) struct HandleSlot<H: EngineHandle> {
    handle: Option<H>,
}

impl<H: EngineHandle> HandleSlot<H> {
    pub(super) fn new() -> Self {
        Self { handle: None }
    }

    pub(super) fn get(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub(super) fn get_mut(&mut self) -> Option<&mut H> {
        self.handle.as_mut()
    }

    pub(super) fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.unload();
        }
    }

    /// Release the current handle, then store whatever `acquire` returns.
    pub(super) fn rebind<E>(&mut self, acquire: impl FnOnce() -> Result<H, E>) -> Result<&mut H, E> {
        self.release();
        let handle = acquire()?;
        Ok(self.handle.insert(handle))
    }
}

impl<H: EngineHandle> Drop for HandleSlot<H> {
    fn drop(&mut self) {
        self.release();
    }
}
