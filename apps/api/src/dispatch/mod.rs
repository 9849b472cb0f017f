//! Prompt dispatch, the one behavioral contract of this service.
//!
//! Flow: credential gate → system-instruction lookup → user-turn templating →
//! one chat-completion call. Stateless; exactly one dispatch per submission.
//!
//! A missing credential is answered locally with the fixed setup notice and
//! never touches the network. A remote failure propagates to the caller
//! unchanged; this layer never retries.

pub mod handlers;
pub mod prompts;
pub mod roles;

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ApiKey;
use crate::llm_client::{ChatCompletion, LlmError};

pub use roles::Role;

/// Turns (role, user text) into a model-generated reply or the fixed
/// configuration-error message.
///
/// Holds the credential resolved once at startup and the chat-completion
/// seam; both are read-only, so concurrent dispatches share nothing mutable.
pub struct PromptDispatcher {
    credential: Option<ApiKey>,
    chat: Arc<dyn ChatCompletion>,
}

impl PromptDispatcher {
    pub fn new(credential: Option<ApiKey>, chat: Arc<dyn ChatCompletion>) -> Self {
        Self { credential, chat }
    }

    /// Single-shot dispatch.
    ///
    /// `Ok` carries the reply: the model text, or the setup notice when no
    /// API key is configured. `Err` is a remote-call failure for the caller
    /// to present as an unexpected-error state.
    pub async fn dispatch(&self, role: Role, text: &str) -> Result<String, LlmError> {
        let Some(credential) = &self.credential else {
            warn!("API key missing; returning setup guidance instead of calling the provider");
            return Ok(prompts::MISSING_CREDENTIAL_NOTICE.to_string());
        };

        let system = role.system_prompt();
        let user = render_user_prompt(text);

        info!("Dispatching consultation as {}", role.label());
        self.chat.complete(credential, system, &user).await
    }
}

/// Fills the user turn of the two-turn message sequence. Leading and
/// trailing whitespace is trimmed here, and only here.
fn render_user_prompt(text: &str) -> String {
    prompts::USER_PROMPT_TEMPLATE.replace("{user_text}", text.trim())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    fn test_key() -> ApiKey {
        ApiKey::from("sk-test".to_string())
    }

    /// Stub client: returns a canned reply and records every call.
    struct RecordingChat {
        reply: &'static str,
        calls: AtomicUsize,
        turns: Mutex<Vec<(String, String)>>,
    }

    impl RecordingChat {
        fn new(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                turns: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn recorded_turns(&self) -> Vec<(String, String)> {
            self.turns.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatCompletion for RecordingChat {
        async fn complete(
            &self,
            _credential: &ApiKey,
            system: &str,
            user: &str,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.turns
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            Ok(self.reply.to_string())
        }
    }

    /// Stub client that echoes the system turn back as the reply.
    struct EchoSystemChat;

    #[async_trait]
    impl ChatCompletion for EchoSystemChat {
        async fn complete(
            &self,
            _credential: &ApiKey,
            system: &str,
            _user: &str,
        ) -> Result<String, LlmError> {
            Ok(system.to_string())
        }
    }

    /// Stub client that always fails with a provider error.
    struct FailingChat;

    #[async_trait]
    impl ChatCompletion for FailingChat {
        async fn complete(
            &self,
            _credential: &ApiKey,
            _system: &str,
            _user: &str,
        ) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 429,
                message: "quota exceeded".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_missing_credential_short_circuits_without_network() {
        for role in Role::ALL {
            let chat = RecordingChat::new("never seen");
            let dispatcher = PromptDispatcher::new(None, chat.clone());

            let reply = dispatcher.dispatch(*role, "何か相談したい").await.unwrap();

            assert_eq!(reply, prompts::MISSING_CREDENTIAL_NOTICE);
            assert_eq!(chat.call_count(), 0, "no network call may be attempted");
        }
    }

    #[tokio::test]
    async fn test_missing_credential_notice_names_both_key_sources() {
        let chat = RecordingChat::new("never seen");
        let dispatcher = PromptDispatcher::new(None, chat.clone());

        let reply = dispatcher
            .dispatch(Role::MarketingStrategist, "売上を伸ばしたい")
            .await
            .unwrap();

        assert!(reply.contains("OPENAI_API_KEY"));
        assert!(reply.contains(".env"), "must point at the local env route");
        assert!(
            reply.contains("secrets.toml"),
            "must point at the secrets-file route"
        );
        assert_eq!(chat.call_count(), 0);
    }

    #[tokio::test]
    async fn test_system_turn_is_exactly_the_role_instruction() {
        for role in Role::ALL {
            let dispatcher = PromptDispatcher::new(Some(test_key()), Arc::new(EchoSystemChat));

            let reply = dispatcher.dispatch(*role, "質問です").await.unwrap();

            assert_eq!(reply, role.system_prompt());
        }
    }

    #[tokio::test]
    async fn test_user_turn_is_templated_with_trimmed_text() {
        let chat = RecordingChat::new("ok");
        let dispatcher = PromptDispatcher::new(Some(test_key()), chat.clone());

        dispatcher
            .dispatch(Role::SoftwareArchitect, "  設計を見直したい\n")
            .await
            .unwrap();

        let turns = chat.recorded_turns();
        assert_eq!(turns.len(), 1);
        let (system, user) = &turns[0];
        assert_eq!(system, Role::SoftwareArchitect.system_prompt());
        assert_eq!(
            user,
            &prompts::USER_PROMPT_TEMPLATE.replace("{user_text}", "設計を見直したい")
        );
    }

    #[tokio::test]
    async fn test_architect_scenario_returns_stub_reply_verbatim() {
        let chat = RecordingChat::new("OK");
        let dispatcher = PromptDispatcher::new(Some(test_key()), chat.clone());

        let reply = dispatcher
            .dispatch(Role::SoftwareArchitect, "要件を整理したい")
            .await
            .unwrap();

        assert_eq!(reply, "OK");
        assert_eq!(chat.call_count(), 1);
    }

    #[tokio::test]
    async fn test_identical_input_yields_identical_responses() {
        let chat = RecordingChat::new("同じ回答");
        let dispatcher = PromptDispatcher::new(Some(test_key()), chat.clone());

        let first = dispatcher
            .dispatch(Role::MarketingStrategist, "新規顧客を増やしたい")
            .await
            .unwrap();
        let second = dispatcher
            .dispatch(Role::MarketingStrategist, "新規顧客を増やしたい")
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(chat.call_count(), 2);
    }

    #[tokio::test]
    async fn test_remote_failure_propagates_unchanged() {
        let dispatcher = PromptDispatcher::new(Some(test_key()), Arc::new(FailingChat));

        let err = dispatcher
            .dispatch(Role::MarketingStrategist, "相談です")
            .await
            .expect_err("provider failure must propagate");

        assert!(matches!(err, LlmError::Api { status: 429, .. }));
    }

    #[test]
    fn test_render_user_prompt_keeps_inner_whitespace() {
        let rendered = render_user_prompt(" 一行目\n二行目 ");
        assert!(rendered.contains("一行目\n二行目"));
        assert!(rendered.starts_with("ユーザー入力:\n"));
        assert!(rendered.ends_with("上記に日本語で回答してください。"));
    }
}
