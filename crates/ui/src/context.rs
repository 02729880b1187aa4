use std::sync::Arc;

use services::{ContentProvider, SessionConfig, SessionController};

pub trait UiApp: Send + Sync {
    fn content_provider(&self) -> Arc<dyn ContentProvider>;
    fn session_config(&self) -> SessionConfig;
}

#[derive(Clone)]
pub struct AppContext {
    content_provider: Arc<dyn ContentProvider>,
    session_config: SessionConfig,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            content_provider: app.content_provider(),
            session_config: app.session_config(),
        }
    }

    #[must_use]
    pub fn content_provider(&self) -> Arc<dyn ContentProvider> {
        Arc::clone(&self.content_provider)
    }

    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        self.session_config
    }

    /// A fresh controller for one practice screen. Each view owns its own.
    #[must_use]
    pub fn new_controller(&self) -> SessionController {
        SessionController::new(self.content_provider(), self.session_config)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
