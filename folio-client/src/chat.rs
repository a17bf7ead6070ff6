//! Retrieval-grounded conversation flow
//!
//! Three steps per turn: condense the follow-up into a standalone question
//! (skipped on the first turn), retrieve the passages relevant to it, then
//! generate an answer grounded in those passages. The provider underneath
//! is typically a failover pair; this layer never knows which backend
//! served it.

use crate::{Client, Passage, Retriever};
use folio_core::{Error, Message, Provider, Result};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::debug;

const CONDENSE_PROMPT: &str = "Given the conversation so far, rewrite the user's follow-up \
message as a single standalone question that can be understood without the conversation. \
Reply with the question only.";

const ANSWER_PREAMBLE: &str = "Use the following passages from the document to answer the \
question. If the passages do not contain the answer, say that you don't know rather than \
guessing.";

fn answer_system_prompt(passages: &[Passage]) -> String {
    let mut prompt = String::from(ANSWER_PREAMBLE);
    for passage in passages {
        prompt.push_str("\n\n---\n");
        prompt.push_str(&passage.text);
    }
    prompt
}

/// A grounded answer: the generated text plus the passages used to ground it
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// The generated answer text
    pub text: String,
    /// The supporting passages, in retrieval order
    pub sources: Vec<Passage>,
}

/// A grounded streaming answer
///
/// Yields text chunks as they arrive; the supporting passages are known
/// before the first chunk and available from [`AnswerStream::sources`].
pub struct AnswerStream {
    sources: Vec<Passage>,
    chunks: Pin<Box<dyn Stream<Item = Result<String>> + Send>>,
}

impl AnswerStream {
    /// The supporting passages, in retrieval order
    pub fn sources(&self) -> &[Passage] {
        &self.sources
    }

    /// Split into the passages and the raw chunk stream
    pub fn into_parts(self) -> (Vec<Passage>, Pin<Box<dyn Stream<Item = Result<String>> + Send>>) {
        (self.sources, self.chunks)
    }
}

impl Stream for AnswerStream {
    type Item = Result<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.chunks.as_mut().poll_next(cx)
    }
}

/// Multi-turn conversation grounded in retrieved passages
pub struct RetrievalChat<P: Provider, R> {
    client: Client<P>,
    retriever: R,
}

impl<P, R> RetrievalChat<P, R>
where
    P: Provider,
    P::Stream: 'static,
    R: Retriever,
{
    /// Create a conversation flow over a client and a retriever
    pub fn new(client: Client<P>, retriever: R) -> Self {
        Self { client, retriever }
    }

    /// Answer one turn, returning the full text and its sources
    pub async fn ask(&self, history: &[Message], input: &str) -> Result<Answer> {
        let question = self.condense_question(history, input).await?;
        let sources = self.retriever.retrieve(&question).await?;
        debug!(passages = sources.len(), "retrieved context for question");

        let text = self.client.chat(self.answer_messages(&sources, &question)).await?;
        Ok(Answer { text, sources })
    }

    /// Answer one turn incrementally
    ///
    /// The condense and retrieve steps run eagerly; only the answer itself
    /// streams.
    pub async fn ask_stream(&self, history: &[Message], input: &str) -> Result<AnswerStream> {
        let question = self.condense_question(history, input).await?;
        let sources = self.retriever.retrieve(&question).await?;
        debug!(passages = sources.len(), "retrieved context for question");

        let chunks = self
            .client
            .stream_chat(self.answer_messages(&sources, &question))
            .await?;
        Ok(AnswerStream { sources, chunks })
    }

    /// Answer one turn of a stored conversation
    pub async fn ask_conversation<H>(
        &self,
        history: &H,
        conversation_id: &str,
        input: &str,
    ) -> Result<Answer>
    where
        H: crate::MessageHistory,
    {
        let turns = history.turns(conversation_id).await?;
        self.ask(&turns, input).await
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Client<P> {
        &self.client
    }

    fn answer_messages(&self, sources: &[Passage], question: &str) -> Vec<Message> {
        vec![
            Message::system(answer_system_prompt(sources)),
            Message::user(question),
        ]
    }

    /// Rewrite a follow-up into a standalone question
    ///
    /// With no history the input already stands alone and no model call is
    /// made.
    async fn condense_question(&self, history: &[Message], input: &str) -> Result<String> {
        if history.is_empty() {
            return Ok(input.to_string());
        }

        let mut messages = vec![Message::system(CONDENSE_PROMPT)];
        messages.extend(history.iter().cloned());
        messages.push(Message::user(format!(
            "Follow-up message: {}\nStandalone question:",
            input
        )));

        let question = self.client.chat(messages).await?;
        let question = question.trim().to_string();
        if question.is_empty() {
            return Err(Error::Validation(
                "condensing produced an empty question".to_string(),
            ));
        }
        debug!(%question, "condensed follow-up");
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use folio_core::{BoxEventStream, ContentDelta, Request, Response, StreamEvent};
    use futures::StreamExt;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct ScriptedProvider {
        responses: Mutex<VecDeque<&'static str>>,
        requests: Arc<Mutex<Vec<Request>>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<&'static str>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn next_response(&self) -> &'static str {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("provider called more times than scripted")
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        type Stream = BoxEventStream;

        async fn request(&self, request: Request) -> Result<Response> {
            self.requests.lock().unwrap().push(request);
            Ok(Response::text(self.next_response()))
        }

        async fn stream(&self, request: Request) -> Result<Self::Stream> {
            self.requests.lock().unwrap().push(request);
            let text = self.next_response();
            let events = vec![
                Ok(StreamEvent::Content(ContentDelta { text: text.into() })),
                Ok(StreamEvent::Done),
            ];
            Ok(Box::pin(futures::stream::iter(events)))
        }
    }

    struct FixedRetriever {
        passages: Vec<Passage>,
        queries: Arc<Mutex<Vec<String>>>,
    }

    impl FixedRetriever {
        fn new(passages: Vec<Passage>) -> Self {
            Self {
                passages,
                queries: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn retrieve(&self, query: &str) -> Result<Vec<Passage>> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(self.passages.clone())
        }
    }

    fn passages() -> Vec<Passage> {
        vec![
            Passage::new("Section 3 covers termination.", "pdf-1"),
            Passage::new("Notice must be given in writing.", "pdf-1"),
        ]
    }

    #[tokio::test]
    async fn test_first_turn_skips_condensing() {
        let provider = ScriptedProvider::new(vec!["It covers termination."]);
        let requests = Arc::clone(&provider.requests);
        let retriever = FixedRetriever::new(passages());
        let queries = Arc::clone(&retriever.queries);

        let chat = RetrievalChat::new(Client::new(provider), retriever);
        let answer = chat.ask(&[], "What does section 3 say?").await.unwrap();

        assert_eq!(answer.text, "It covers termination.");
        assert_eq!(answer.sources, passages());
        // The raw input went straight to the retriever and only one model
        // call was made
        assert_eq!(queries.lock().unwrap().as_slice(), ["What does section 3 say?"]);
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_follow_up_is_condensed() {
        let provider = ScriptedProvider::new(vec![
            "What does section 3 of the contract say?",
            "It covers termination.",
        ]);
        let requests = Arc::clone(&provider.requests);
        let retriever = FixedRetriever::new(passages());
        let queries = Arc::clone(&retriever.queries);

        let history = vec![
            Message::user("Tell me about the contract"),
            Message::assistant("It has five sections."),
        ];

        let chat = RetrievalChat::new(Client::new(provider), retriever);
        let answer = chat.ask(&history, "and section 3?").await.unwrap();

        assert_eq!(answer.text, "It covers termination.");
        assert_eq!(
            queries.lock().unwrap().as_slice(),
            ["What does section 3 of the contract say?"]
        );

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        // The condense request carries the history; the answer request
        // carries the grounded system prompt instead
        assert!(requests[0].messages.len() > 2);
        let system = &requests[1].messages[0];
        assert!(system.content.contains("Section 3 covers termination."));
    }

    #[tokio::test]
    async fn test_ask_stream_yields_chunks_and_sources() {
        let provider = ScriptedProvider::new(vec!["Streamed answer."]);
        let retriever = FixedRetriever::new(passages());

        let chat = RetrievalChat::new(Client::new(provider), retriever);
        let mut stream = chat.ask_stream(&[], "question").await.unwrap();

        assert_eq!(stream.sources(), passages().as_slice());

        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            text.push_str(&chunk.unwrap());
        }
        assert_eq!(text, "Streamed answer.");
    }

    #[tokio::test]
    async fn test_ask_conversation_uses_history_seam() {
        struct TwoTurns;

        #[async_trait]
        impl crate::MessageHistory for TwoTurns {
            async fn turns(&self, conversation_id: &str) -> Result<Vec<Message>> {
                assert_eq!(conversation_id, "conv-42");
                Ok(vec![
                    Message::user("Tell me about the contract"),
                    Message::assistant("It has five sections."),
                ])
            }
        }

        let provider = ScriptedProvider::new(vec!["standalone?", "grounded answer"]);
        let retriever = FixedRetriever::new(passages());

        let chat = RetrievalChat::new(Client::new(provider), retriever);
        let answer = chat
            .ask_conversation(&TwoTurns, "conv-42", "and section 3?")
            .await
            .unwrap();
        assert_eq!(answer.text, "grounded answer");
    }
}
