//! Streaming implementation for the OpenAI wire format

use crate::http::ResponseStream;
use crate::openai::parser::OpenAIParser;
use folio_core::{Error, StreamEvent};
use futures_core::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Lazy event stream over an SSE chat-completions response
///
/// Bytes are pulled from the wire only when the caller asks for the next
/// event; nothing is buffered ahead of consumption beyond one partial line.
pub struct OpenAIStream {
    inner: ResponseStream,
    parser: OpenAIParser,
    buffer: String,
}

impl OpenAIStream {
    pub(crate) fn new(inner: ResponseStream, parser: OpenAIParser) -> Self {
        Self {
            inner,
            parser,
            buffer: String::new(),
        }
    }

    fn parse_line(&self, line: &str) -> Result<Option<StreamEvent>, Error> {
        // SSE frames: "data: <payload>"; everything else (comments,
        // event names, keep-alive blanks) carries no payload.
        match line.strip_prefix("data:") {
            Some(payload) => self.parser.parse_event(payload.trim_start()),
            None => Ok(None),
        }
    }
}

impl Stream for OpenAIStream {
    type Item = Result<StreamEvent, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            // Drain complete lines already buffered before pulling more bytes
            while let Some(newline_pos) = self.buffer.find('\n') {
                let line = self.buffer[..newline_pos].trim().to_string();
                self.buffer.drain(..=newline_pos);
                if line.is_empty() {
                    continue;
                }
                match self.parse_line(&line) {
                    Ok(Some(event)) => return Poll::Ready(Some(Ok(event))),
                    Ok(None) => continue,
                    Err(e) => return Poll::Ready(Some(Err(e))),
                }
            }

            match self.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    let text = String::from_utf8_lossy(&chunk).into_owned();
                    self.buffer.push_str(&text);
                }
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(crate::error::network_error(e))))
                }
                Poll::Ready(None) => {
                    if !self.buffer.is_empty() {
                        let line = std::mem::take(&mut self.buffer);
                        let line = line.trim();
                        if !line.is_empty() {
                            match self.parse_line(line) {
                                Ok(Some(event)) => return Poll::Ready(Some(Ok(event))),
                                Ok(None) => {}
                                Err(e) => return Poll::Ready(Some(Err(e))),
                            }
                        }
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
