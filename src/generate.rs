//! # Generation State Machine
//!
//! Drives one preview at a time from the latest `(content, style)` input.
//!
//! ## States
//!
//! ```text
//!              begin()                     complete(Ok)
//! Idle ──────────────────▶ Generating(id) ──────────────▶ Ready(image, id)
//!   ▲  Ready/Failed ──────▶      │
//!                                │ complete(Err)
//!                                ▼
//!                           Failed(error, id)
//!
//! begin() with blank content or an unknown style goes straight to Failed.
//! ```
//!
//! Every [`Generator::begin`] allocates a new request id. A result handed to
//! [`Generator::complete`] for any id other than the latest is dropped, so a
//! slow render never overwrites the state produced by a newer input.
//!
//! ## Example
//!
//! ```
//! use dotqr::encoder::QrcodeEncoder;
//! use dotqr::generate::{GenerationState, Generator};
//!
//! let mut generator = Generator::new(QrcodeEncoder);
//! generator.generate("https://example.com", "slate-ember");
//! assert!(matches!(generator.state(), GenerationState::Ready { .. }));
//!
//! let png = generator.export_png().unwrap();
//! assert_eq!(&png[..4], &[0x89, 0x50, 0x4E, 0x47]);
//! ```

use crate::config::RenderConfig;
use crate::encoder::{EncodeOptions, Encoder};
use crate::error::GenerationError;
use crate::export;
use crate::render::{DotRenderer, RasterImage, StyledImage};
use crate::style::{StylePreset, StyleRegistry};

/// Tag identifying one triggered generation.
pub type RequestId = u64;

/// Observable state of the current preview.
#[derive(Debug)]
pub enum GenerationState {
    Idle,
    Generating {
        request: RequestId,
    },
    Ready {
        image: StyledImage,
        request: RequestId,
    },
    Failed {
        error: GenerationError,
        request: RequestId,
    },
}

impl GenerationState {
    pub fn name(&self) -> &'static str {
        match self {
            GenerationState::Idle => "idle",
            GenerationState::Generating { .. } => "generating",
            GenerationState::Ready { .. } => "ready",
            GenerationState::Failed { .. } => "failed",
        }
    }

    /// Request that produced this state, if any.
    pub fn request(&self) -> Option<RequestId> {
        match self {
            GenerationState::Idle => None,
            GenerationState::Generating { request }
            | GenerationState::Ready { request, .. }
            | GenerationState::Failed { request, .. } => Some(*request),
        }
    }
}

/// Input snapshot for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub id: RequestId,
    pub content: String,
    pub style: StylePreset,
}

/// Owns the encoder, the preset table and the current state.
pub struct Generator<E> {
    encoder: E,
    registry: StyleRegistry,
    renderer: DotRenderer,
    state: GenerationState,
    last_issued: RequestId,
    latest: Option<GenerationRequest>,
}

impl<E: Encoder> Generator<E> {
    /// Generator over the built-in presets and canonical geometry.
    pub fn new(encoder: E) -> Self {
        Self {
            encoder,
            registry: StyleRegistry::builtin().clone(),
            renderer: DotRenderer::default(),
            state: GenerationState::Idle,
            last_issued: 0,
            latest: None,
        }
    }

    pub fn with_registry(mut self, registry: StyleRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.renderer = DotRenderer::new(config);
        self
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RenderConfig {
        self.renderer.config()
    }

    /// The styled image, only while `Ready`.
    pub fn preview(&self) -> Option<&StyledImage> {
        match &self.state {
            GenerationState::Ready { image, .. } => Some(image),
            _ => None,
        }
    }

    /// The current error, only while `Failed`.
    pub fn error(&self) -> Option<&GenerationError> {
        match &self.state {
            GenerationState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Register a new input. Returns the request to run, or `None` when the
    /// input failed validation (state is then `Failed`).
    pub fn begin(&mut self, content: &str, style_id: &str) -> Option<GenerationRequest> {
        self.last_issued += 1;
        let id = self.last_issued;

        let style = match self.registry.lookup(style_id) {
            Ok(style) => style.clone(),
            Err(error) => {
                tracing::debug!(request = id, style_id, "unknown style");
                self.latest = None;
                self.state = GenerationState::Failed { error, request: id };
                return None;
            }
        };

        let request = GenerationRequest {
            id,
            content: content.to_string(),
            style,
        };
        self.latest = Some(request.clone());

        if content.trim().is_empty() {
            tracing::debug!(request = id, "blank content, skipping encoder");
            self.state = GenerationState::Failed {
                error: GenerationError::EmptyContent,
                request: id,
            };
            return None;
        }

        tracing::debug!(request = id, style = %request.style.id, "generation started");
        self.state = GenerationState::Generating { request: id };
        Some(request)
    }

    /// Encode, decode and style one request. Leaves the state untouched.
    ///
    /// An invalid [`RenderConfig`] fails with `GenerationError::Config`
    /// before the encoder is called.
    pub fn run(&self, request: &GenerationRequest) -> Result<StyledImage, GenerationError> {
        let config = self.renderer.config();
        config.validate()?;
        let options = EncodeOptions::for_style(config, &request.style);
        let encoded = self.encoder.encode_to_raster(&request.content, &options)?;
        let raster = RasterImage::decode(&encoded, config.canvas_size)?;
        self.renderer.render(&raster, &request.style)
    }

    /// Apply a finished result. Returns `false` if `request` is stale.
    pub fn complete(
        &mut self,
        request: RequestId,
        result: Result<StyledImage, GenerationError>,
    ) -> bool {
        let current = matches!(self.state, GenerationState::Generating { request: r } if r == request);
        if request != self.last_issued || !current {
            tracing::warn!(
                request,
                latest = self.last_issued,
                "discarding stale generation result"
            );
            return false;
        }

        self.state = match result {
            Ok(image) => {
                tracing::debug!(request, "generation ready");
                GenerationState::Ready { image, request }
            }
            Err(error) => {
                tracing::debug!(request, %error, "generation failed");
                GenerationState::Failed { error, request }
            }
        };
        true
    }

    /// `begin` + `run` + `complete` for synchronous callers.
    pub fn generate(&mut self, content: &str, style_id: &str) -> &GenerationState {
        if let Some(request) = self.begin(content, style_id) {
            let result = self.run(&request);
            self.complete(request.id, result);
        }
        &self.state
    }

    /// PNG bytes of the current preview.
    pub fn export_png(&self) -> Result<Vec<u8>, GenerationError> {
        let image = self.preview().ok_or_else(GenerationError::nothing_to_export)?;
        export::to_png(image)
    }

    /// Plain SVG for the latest content and style.
    ///
    /// After an input with an unknown style this reports that style again
    /// rather than asking for content.
    pub fn export_svg(&self) -> Result<String, GenerationError> {
        let Some(request) = self.latest.as_ref() else {
            return Err(match &self.state {
                GenerationState::Failed {
                    error: GenerationError::UnknownStyle(id),
                    ..
                } => GenerationError::UnknownStyle(id.clone()),
                _ => GenerationError::empty_export(),
            });
        };
        export::to_svg(
            &self.encoder,
            &request.content,
            self.renderer.config(),
            &request.style,
        )
    }

    /// Style id of the latest input, for file naming.
    pub fn style_id(&self) -> Option<&str> {
        self.latest.as_ref().map(|r| r.style.id.as_str())
    }
}
