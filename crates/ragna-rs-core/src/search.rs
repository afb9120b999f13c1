//! Conversational retrieval orchestrator.
//!
//! A [`SearchAssistant`] is built per request. It renders a [`Directive`] from
//! the last message of a conversation, hands it to a reasoning delegate that
//! may consult lookup tools, and returns the final answer or a stream of text
//! fragments.

use crate::delegate::{DelegateFactory, ReasoningDelegate};
use crate::error::RagnaCoreError;
use crate::llm::{LlmConnector, ModelOptions, complete};
use crate::prompt;
use futures_util::{Stream, StreamExt};
use log::{debug, info, warn};
use ragna_rs_config::SearchConfig;
use ragna_rs_protocol::{Credential, Message};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Fragments buffered between the delegate task and the consumer.
const STREAM_BUFFER: usize = 32;

/// Stream of answer fragments. A failure mid-stream is delivered as one
/// final `Err(RagnaCoreError::StreamInterrupted)` item.
pub type ResponseStream = Pin<Box<dyn Stream<Item = Result<String, RagnaCoreError>> + Send>>;

/// Rendered instruction for the reasoning delegate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    query: String,
    text: String,
}

impl Directive {
    /// Render a directive for a single query.
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let text = prompt::directive(&query);
        Self { query, text }
    }

    /// Render a directive from the last message of a conversation.
    ///
    /// Earlier messages do not contribute to the directive.
    pub fn from_conversation(messages: &[Message]) -> Result<Self, RagnaCoreError> {
        let last = messages.last().ok_or_else(|| {
            RagnaCoreError::Validation("conversation must contain at least one message".to_string())
        })?;
        Ok(Self::new(last.content.trim()))
    }

    /// The user query the directive was rendered from.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The full directive text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Retrieval assistant for a single request.
pub struct SearchAssistant {
    credential: Credential,
    connector: Arc<dyn LlmConnector>,
    delegates: Arc<dyn DelegateFactory>,
    settings: SearchConfig,
}

impl SearchAssistant {
    pub fn new(
        credential: Credential,
        connector: Arc<dyn LlmConnector>,
        delegates: Arc<dyn DelegateFactory>,
        settings: SearchConfig,
    ) -> Self {
        Self {
            credential,
            connector,
            delegates,
            settings,
        }
    }

    fn model_options(&self) -> ModelOptions {
        ModelOptions::new(self.settings.model.clone())
    }

    fn delegate(&self) -> Result<Arc<dyn ReasoningDelegate>, RagnaCoreError> {
        let llm = self
            .connector
            .connect(&self.credential, &self.model_options())?;
        Ok(self.delegates.build(llm))
    }

    /// Answer the last message of a conversation.
    pub async fn process_messages(&self, messages: &[Message]) -> Result<String, RagnaCoreError> {
        let directive = Directive::from_conversation(messages)?;
        info!(
            "search request (model={}, messages={}, query_len={})",
            self.settings.model,
            messages.len(),
            directive.query().len()
        );
        let delegate = self.delegate()?;
        delegate.run(&directive).await.map_err(into_upstream)
    }

    /// Check the credential with a trial completion.
    ///
    /// Returns `Ok(true)` on success; every failure is reported as
    /// [`RagnaCoreError::InvalidCredential`].
    pub async fn validate_credential(&self) -> Result<bool, RagnaCoreError> {
        debug!("validating credential (model={})", self.settings.model);
        let llm = self
            .connector
            .connect(&self.credential, &self.model_options())
            .map_err(into_invalid_credential)?;
        complete(llm.as_ref(), &[Message::user("test")])
            .await
            .map_err(into_invalid_credential)?;
        Ok(true)
    }

    /// Stream the answer to the last message of a conversation.
    pub async fn stream_response(
        &self,
        messages: &[Message],
    ) -> Result<ResponseStream, RagnaCoreError> {
        let directive = Directive::from_conversation(messages)?;
        info!(
            "search stream request (model={}, messages={}, query_len={})",
            self.settings.model,
            messages.len(),
            directive.query().len()
        );
        let delegate = self.delegate()?;
        let mut increments = delegate
            .run_stream(&directive)
            .await
            .map_err(into_upstream)?;

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(async move {
            let mut forwarded = 0usize;
            while let Some(item) = increments.next().await {
                match item {
                    Ok(increment) => {
                        for fragment in increment.into_fragments() {
                            if tx.send(Ok(fragment)).await.is_err() {
                                debug!("stream consumer dropped (fragments={forwarded})");
                                return;
                            }
                            forwarded += 1;
                        }
                    }
                    Err(err) => {
                        warn!("search stream interrupted (fragments={forwarded}): {err}");
                        let _ = tx
                            .send(Err(RagnaCoreError::StreamInterrupted(err.to_string())))
                            .await;
                        return;
                    }
                }
            }
            debug!("search stream finished (fragments={forwarded})");
        });
        Ok(Box::pin(ReceiverStream::new(rx)))
    }
}

fn into_upstream(err: RagnaCoreError) -> RagnaCoreError {
    match err {
        RagnaCoreError::Upstream(_) | RagnaCoreError::InvalidCredential(_) => err,
        other => RagnaCoreError::Upstream(other.to_string()),
    }
}

fn into_invalid_credential(err: RagnaCoreError) -> RagnaCoreError {
    match err {
        RagnaCoreError::InvalidCredential(_) => err,
        other => RagnaCoreError::InvalidCredential(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::Directive;
    use crate::error::RagnaCoreError;
    use pretty_assertions::assert_eq;
    use ragna_rs_protocol::Message;

    #[test]
    fn directive_uses_only_last_message() {
        let first = Directive::from_conversation(&[
            Message::user("tell me about rust"),
            Message::assistant("Rust is a language."),
            Message::user("  what is borrowing?  "),
        ])
        .expect("directive");
        let second = Directive::from_conversation(&[
            Message::user("something else entirely"),
            Message::user("what is borrowing?"),
        ])
        .expect("directive");
        assert_eq!(first, second);
        assert_eq!(first.query(), "what is borrowing?");
        assert!(first.text().contains("'what is borrowing?'"));
    }

    #[test]
    fn directive_requires_a_message() {
        let err = Directive::from_conversation(&[]).expect_err("empty conversation");
        assert!(matches!(err, RagnaCoreError::Validation(_)));
    }
}
