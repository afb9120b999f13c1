//! Scripted reasoning delegate.

use async_trait::async_trait;
use autoagents_llm::LLMProvider;
use futures_util::stream;
use parking_lot::Mutex;
use ragna_rs_core::{
    DelegateFactory, DelegateIncrement, Directive, IncrementStream, RagnaCoreError,
    ReasoningDelegate,
};
use serde_json::Value;
use std::sync::Arc;

/// Delegate that replays a fixed answer or a fixed increment script.
///
/// Each script entry is either a raw JSON increment or an error message that
/// becomes an upstream error at that point in the stream.
#[derive(Clone, Default)]
pub struct ScriptedDelegate {
    answer: Option<String>,
    script: Vec<Result<Value, String>>,
    pub directives: Arc<Mutex<Vec<Directive>>>,
    pub builds: Arc<Mutex<usize>>,
}

impl ScriptedDelegate {
    /// Delegate whose `run` returns `answer`.
    pub fn answering(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            ..Self::default()
        }
    }

    /// Delegate whose `run_stream` replays `script`.
    pub fn streaming(script: Vec<Result<Value, String>>) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    /// Directives received so far.
    pub fn seen(&self) -> Vec<Directive> {
        self.directives.lock().clone()
    }
}

#[async_trait]
impl ReasoningDelegate for ScriptedDelegate {
    async fn run(&self, directive: &Directive) -> Result<String, RagnaCoreError> {
        self.directives.lock().push(directive.clone());
        self.answer
            .clone()
            .ok_or_else(|| RagnaCoreError::Upstream("delegate failed".to_string()))
    }

    async fn run_stream(&self, directive: &Directive) -> Result<IncrementStream, RagnaCoreError> {
        self.directives.lock().push(directive.clone());
        let items = self
            .script
            .iter()
            .cloned()
            .map(|entry| match entry {
                Ok(value) => serde_json::from_value::<DelegateIncrement>(value)
                    .map_err(|err| RagnaCoreError::Upstream(err.to_string())),
                Err(message) => Err(RagnaCoreError::Upstream(message)),
            })
            .collect::<Vec<_>>();
        Ok(Box::pin(stream::iter(items)))
    }
}

impl DelegateFactory for ScriptedDelegate {
    fn build(&self, _llm: Arc<dyn LLMProvider>) -> Arc<dyn ReasoningDelegate> {
        *self.builds.lock() += 1;
        Arc::new(self.clone())
    }
}
