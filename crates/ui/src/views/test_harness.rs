use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use ielts_core::model::{Exercise, QuestionType};
use services::{ContentError, ContentProvider, SessionConfig};

use crate::context::{UiApp, build_app_context};
use crate::views::PracticeView;

/// Never resolves, so the view stays in `Loading`.
pub struct PendingProvider;

#[async_trait::async_trait]
impl ContentProvider for PendingProvider {
    async fn generate_exercise(
        &self,
        _hint: Option<QuestionType>,
    ) -> Result<Exercise, ContentError> {
        std::future::pending().await
    }
}

pub struct FailingProvider;

#[async_trait::async_trait]
impl ContentProvider for FailingProvider {
    async fn generate_exercise(
        &self,
        _hint: Option<QuestionType>,
    ) -> Result<Exercise, ContentError> {
        Err(ContentError::Disabled)
    }
}

struct TestApp {
    provider: Arc<dyn ContentProvider>,
}

impl UiApp for TestApp {
    fn content_provider(&self) -> Arc<dyn ContentProvider> {
        Arc::clone(&self.provider)
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn PracticeHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { PracticeView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let spawned work settle over a few passes.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_practice_harness(provider: Arc<dyn ContentProvider>) -> ViewHarness {
    let app = Arc::new(TestApp { provider });
    let dom = VirtualDom::new_with_props(PracticeHarness, HarnessProps { app });
    ViewHarness { dom }
}
