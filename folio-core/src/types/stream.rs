//! Streaming types for incremental responses

/// A fragment of generated text in a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDelta {
    /// The text content
    pub text: String,
}

/// Metadata updates in a stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataDelta {
    /// Model information
    pub model: Option<String>,
    /// Response ID
    pub id: Option<String>,
}

/// Events that can occur during streaming
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A fragment of generated text
    Content(ContentDelta),
    /// Metadata update
    Metadata(MetadataDelta),
    /// Stream has ended
    Done,
}

/// Accumulates streaming events into a complete text
///
/// The stream itself is lazy and non-restartable; callers that need the
/// full text feed every event through an accumulator.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    content: String,
    model: Option<String>,
    id: Option<String>,
}

impl StreamAccumulator {
    /// Create a new accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a stream event
    pub fn process_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Content(delta) => {
                self.content.push_str(&delta.text);
            }
            StreamEvent::Metadata(delta) => {
                if delta.model.is_some() {
                    self.model = delta.model;
                }
                if delta.id.is_some() {
                    self.id = delta.id;
                }
            }
            StreamEvent::Done => {}
        }
    }

    /// Get the accumulated content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Model reported by the stream, if any
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Response ID reported by the stream, if any
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_concatenates_in_order() {
        let mut acc = StreamAccumulator::new();
        for text in ["Once", " upon", " a time"] {
            acc.process_event(StreamEvent::Content(ContentDelta { text: text.into() }));
        }
        acc.process_event(StreamEvent::Done);
        assert_eq!(acc.content(), "Once upon a time");
    }

    #[test]
    fn test_accumulator_keeps_latest_metadata() {
        let mut acc = StreamAccumulator::new();
        acc.process_event(StreamEvent::Metadata(MetadataDelta {
            model: Some("gpt-4o-mini".into()),
            id: Some("chatcmpl-1".into()),
        }));
        acc.process_event(StreamEvent::Metadata(MetadataDelta {
            model: None,
            id: Some("chatcmpl-2".into()),
        }));
        assert_eq!(acc.model(), Some("gpt-4o-mini"));
        assert_eq!(acc.id(), Some("chatcmpl-2"));
    }
}
