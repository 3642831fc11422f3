use crate::bridge::{state_callback, to_home_callback, BindingId, BridgeContext, UiDispatcher};
use crate::error::ErrorRegistry;
use crate::presenter::{
    ConnectOutcome, LoginAction, LoginState, PresenterError, PresenterHandle, PresenterId,
    PresenterLibrary, StateToken,
};

/// One presenter handle together with the liveness flag its callbacks check.
///
/// Dropping a binding invalidates the flag before closing the handle, so a
/// callback racing with teardown finds the flag down and enqueues nothing.
pub struct PresenterBinding {
    ctx: BridgeContext,
    handle: PresenterHandle,
}

impl PresenterBinding {
    /// Ask the library for a presenter wired to a fresh bridge context.
    pub fn create(
        library: &dyn PresenterLibrary,
        binding: BindingId,
        dispatcher: UiDispatcher,
        errors: ErrorRegistry,
    ) -> Result<Self, PresenterError> {
        let ctx = BridgeContext::new(binding, dispatcher, errors);
        match library.create_presenter(to_home_callback(&ctx)) {
            Ok(handle) => Ok(Self { ctx, handle }),
            Err(err) => {
                ctx.liveness.invalidate();
                Err(err)
            }
        }
    }

    pub fn id(&self) -> BindingId {
        self.ctx.binding
    }

    pub fn presenter(&self) -> PresenterId {
        self.handle.id()
    }

    pub fn is_alive(&self) -> bool {
        self.ctx.liveness.is_alive()
    }

    pub fn connect(&mut self) -> Result<ConnectOutcome, PresenterError> {
        self.handle.connect(state_callback(&self.ctx))
    }

    pub fn unwrap_state(&self, token: &StateToken) -> Result<LoginState, PresenterError> {
        self.handle.unwrap_state(token)
    }

    pub fn dispatch(&self, action: LoginAction) -> Result<(), PresenterError> {
        self.handle.dispatch(action)
    }
}

impl Drop for PresenterBinding {
    fn drop(&mut self) {
        self.ctx.liveness.invalidate();
        self.handle.close();
        tracing::debug!(binding = %self.ctx.binding, "binding released");
    }
}
