//! Resilient failover across a primary and a secondary backend
//!
//! [`Failover`] wraps two backends behind one `Provider`. Calls go to the
//! primary until a failure classified as provider exhaustion (rate limit or
//! quota) is observed; from that point on, every call on this instance goes
//! to the secondary. The transition is one-way for the lifetime of the
//! instance and invisible to callers apart from one diagnostic event.

use crate::constants::{
    DEEPSEEK_API_KEY_VAR, DEEPSEEK_BASE_URL_VAR, DEEPSEEK_DEFAULT_BASE_URL,
    DEEPSEEK_DEFAULT_MODEL, OPENAI_API_KEY_VAR, OPENAI_DEFAULT_MODEL, PRIMARY_MODEL_VAR,
    SECONDARY_MODEL_VAR,
};
use crate::openai::{OpenAI, OpenAIConfig};
use async_trait::async_trait;
use folio_core::{BoxEventStream, Error, Model, Provider, Request, Response};
use futures::StreamExt;
use std::env;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Which backend a call issued now would use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// The preferred backend, used until exhaustion is observed
    Primary,
    /// The fallback backend, used permanently after exhaustion
    Secondary,
}

const PRIMARY: u8 = 0;
const SECONDARY: u8 = 1;

/// Atomic Primary/Secondary cell with a one-way compare-and-set transition
///
/// Safe to share across concurrent calls on the same instance; exactly one
/// caller wins the transition.
struct BackendCell(AtomicU8);

impl BackendCell {
    fn new() -> Self {
        Self(AtomicU8::new(PRIMARY))
    }

    fn get(&self) -> Backend {
        if self.0.load(Ordering::Acquire) == SECONDARY {
            Backend::Secondary
        } else {
            Backend::Primary
        }
    }

    /// Transition Primary -> Secondary; true iff this call made the switch
    fn trip(&self) -> bool {
        self.0
            .compare_exchange(PRIMARY, SECONDARY, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Default exhaustion classifier
///
/// A failure is exhaustion iff its description contains "rate_limit",
/// "quota", or "429", case-insensitively. Matches what OpenAI-wire
/// providers put in 429 bodies and quota errors; swap in a structured
/// classifier via [`Failover::with_classifier`] where the backend exposes
/// error codes.
pub fn is_exhaustion(error: &Error) -> bool {
    let text = error.to_string().to_lowercase();
    ["rate_limit", "quota", "429"]
        .iter()
        .any(|needle| text.contains(needle))
}

type Classifier = Arc<dyn Fn(&Error) -> bool + Send + Sync>;
type SecondaryFactory<S> = Box<dyn Fn() -> Result<S, Error> + Send + Sync>;

fn trip_to_secondary(cell: &BackendCell, from: &Model, to: &Model, error: &Error) {
    if cell.trip() {
        tracing::warn!(
            error = %error,
            from = %from,
            to = %to,
            "backend exhausted, failing over to secondary"
        );
    }
}

/// Configuration surface for the default OpenAI/DeepSeek failover pair
///
/// Read once at construction, typically from the environment.
#[derive(Debug, Clone)]
pub struct FailoverConfig {
    /// Credential for the primary backend
    pub primary_api_key: String,
    /// Model served by the primary backend
    pub primary_model: Model,
    /// Credential for the secondary backend, if configured
    pub secondary_api_key: Option<String>,
    /// Base URL of the secondary backend
    pub secondary_base_url: String,
    /// Model served by the secondary backend
    pub secondary_model: Model,
}

impl FailoverConfig {
    /// Read the configuration from the environment
    ///
    /// `OPENAI_API_KEY` is required. `DEEPSEEK_API_KEY` may be absent; the
    /// secondary is only built on first failover, and a missing credential
    /// surfaces as a configuration error at that point, not before.
    pub fn from_env() -> Result<Self, Error> {
        let primary_api_key = env::var(OPENAI_API_KEY_VAR)
            .map_err(|_| Error::Configuration(format!("{} not set", OPENAI_API_KEY_VAR)))?;

        Ok(Self {
            primary_api_key,
            primary_model: env::var(PRIMARY_MODEL_VAR)
                .unwrap_or_else(|_| OPENAI_DEFAULT_MODEL.to_string())
                .into(),
            secondary_api_key: env::var(DEEPSEEK_API_KEY_VAR).ok(),
            secondary_base_url: env::var(DEEPSEEK_BASE_URL_VAR)
                .unwrap_or_else(|_| DEEPSEEK_DEFAULT_BASE_URL.to_string()),
            secondary_model: env::var(SECONDARY_MODEL_VAR)
                .unwrap_or_else(|_| DEEPSEEK_DEFAULT_MODEL.to_string())
                .into(),
        })
    }
}

/// A provider that transparently fails over from a primary to a secondary
/// backend on provider exhaustion
///
/// The secondary backend is built lazily, on first failover; if no call
/// ever trips the selector its setup cost is never paid. Once tripped, the
/// selector never resets for this instance's lifetime.
///
/// The wrapper pins `request.model` to the active backend's model id before
/// delegating, so each backend always sees its own model.
pub struct Failover<P, S> {
    primary: P,
    primary_model: Model,
    secondary: OnceCell<S>,
    make_secondary: SecondaryFactory<S>,
    secondary_model: Model,
    active: Arc<BackendCell>,
    classifier: Classifier,
}

impl<P, S> Failover<P, S>
where
    P: Provider,
    S: Provider,
{
    /// Create a failover pair from a primary backend and a secondary factory
    ///
    /// The factory runs at most once, on first failover.
    pub fn new<F>(
        primary: P,
        primary_model: impl Into<Model>,
        secondary_model: impl Into<Model>,
        make_secondary: F,
    ) -> Self
    where
        F: Fn() -> Result<S, Error> + Send + Sync + 'static,
    {
        Self {
            primary,
            primary_model: primary_model.into(),
            secondary: OnceCell::new(),
            make_secondary: Box::new(make_secondary),
            secondary_model: secondary_model.into(),
            active: Arc::new(BackendCell::new()),
            classifier: Arc::new(is_exhaustion),
        }
    }

    /// Replace the exhaustion classifier
    pub fn with_classifier<F>(mut self, classifier: F) -> Self
    where
        F: Fn(&Error) -> bool + Send + Sync + 'static,
    {
        self.classifier = Arc::new(classifier);
        self
    }

    /// The backend a call issued now would use
    pub fn active_backend(&self) -> Backend {
        self.active.get()
    }

    /// The model id of the active backend
    pub fn active_model(&self) -> &Model {
        match self.active.get() {
            Backend::Primary => &self.primary_model,
            Backend::Secondary => &self.secondary_model,
        }
    }

    async fn secondary(&self) -> Result<&S, Error> {
        self.secondary
            .get_or_try_init(|| async { (self.make_secondary)() })
            .await
    }

    fn pin_model(&self, mut request: Request, backend: Backend) -> Request {
        request.model = match backend {
            Backend::Primary => self.primary_model.clone(),
            Backend::Secondary => self.secondary_model.clone(),
        };
        request
    }

    fn trip(&self, error: &Error) {
        trip_to_secondary(
            &self.active,
            &self.primary_model,
            &self.secondary_model,
            error,
        );
    }
}

impl<P, S> Failover<P, S>
where
    P: Provider,
    S: Provider,
    S::Stream: 'static,
{
    async fn secondary_stream(&self, request: Request) -> Result<BoxEventStream, Error> {
        let secondary = self.secondary().await?;
        let stream = secondary
            .stream(self.pin_model(request, Backend::Secondary))
            .await?;
        Ok(Box::pin(stream))
    }
}

#[async_trait]
impl<P, S> Provider for Failover<P, S>
where
    P: Provider,
    S: Provider,
    P::Stream: 'static,
    S::Stream: 'static,
{
    type Stream = BoxEventStream;

    async fn request(&self, request: Request) -> Result<Response, Error> {
        if self.active.get() == Backend::Secondary {
            let secondary = self.secondary().await?;
            return secondary
                .request(self.pin_model(request, Backend::Secondary))
                .await;
        }

        match self
            .primary
            .request(self.pin_model(request.clone(), Backend::Primary))
            .await
        {
            Ok(response) => Ok(response),
            Err(error) if (self.classifier)(&error) => {
                self.trip(&error);
                // One retry against the secondary; its failure propagates.
                let secondary = self.secondary().await?;
                secondary
                    .request(self.pin_model(request, Backend::Secondary))
                    .await
            }
            Err(error) => Err(error),
        }
    }

    async fn stream(&self, request: Request) -> Result<Self::Stream, Error> {
        if self.active.get() == Backend::Secondary {
            return self.secondary_stream(request).await;
        }

        let mut primary = match self
            .primary
            .stream(self.pin_model(request.clone(), Backend::Primary))
            .await
        {
            Ok(stream) => stream,
            Err(error) if (self.classifier)(&error) => {
                self.trip(&error);
                return self.secondary_stream(request).await;
            }
            Err(error) => return Err(error),
        };

        // Pull the first event before yielding anything: many quota
        // failures surface with the first response frame, not at call
        // initiation. This keeps the failover invisible - either the
        // caller sees the primary's chunks, or the secondary's from the
        // start, never a torn prefix.
        match primary.next().await {
            Some(Ok(first)) => {
                let active = Arc::clone(&self.active);
                let classifier = Arc::clone(&self.classifier);
                let primary_model = self.primary_model.clone();
                let secondary_model = self.secondary_model.clone();

                // A failure after the first yielded event propagates and
                // terminates the sequence; it still trips the selector
                // when exhaustion-classified so the next call lands on
                // the secondary.
                let rest = primary.map(move |item| {
                    if let Err(error) = &item {
                        if classifier(error) {
                            trip_to_secondary(&active, &primary_model, &secondary_model, error);
                        }
                    }
                    item
                });

                Ok(Box::pin(
                    futures::stream::once(async move { Ok(first) }).chain(rest),
                ))
            }
            Some(Err(error)) if (self.classifier)(&error) => {
                self.trip(&error);
                self.secondary_stream(request).await
            }
            Some(Err(error)) => Err(error),
            None => Ok(Box::pin(futures::stream::empty())),
        }
    }
}

impl Failover<OpenAI, OpenAI> {
    /// Build the default OpenAI-primary / DeepSeek-secondary pair
    ///
    /// The primary backend is built now; the secondary waits for the first
    /// failover.
    pub fn from_config(config: FailoverConfig) -> Result<Self, Error> {
        let primary = OpenAI::from_config(OpenAIConfig::new(config.primary_api_key))?;

        let secondary_api_key = config.secondary_api_key;
        let secondary_base_url = config.secondary_base_url;
        let make_secondary = move || {
            let api_key = secondary_api_key.clone().ok_or_else(|| {
                Error::Configuration(format!("{} not set", DEEPSEEK_API_KEY_VAR))
            })?;
            OpenAI::from_config(
                OpenAIConfig::new(api_key).with_base_url(secondary_base_url.clone()),
            )
        };

        Ok(Failover::new(
            primary,
            config.primary_model,
            config.secondary_model,
            make_secondary,
        ))
    }

    /// Build the default pair from the environment
    pub fn from_env() -> Result<Self, Error> {
        Self::from_config(FailoverConfig::from_env()?)
    }
}
