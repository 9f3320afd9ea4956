pub mod control;
pub mod entities;
pub mod scheme;

use std::sync::LazyLock;

use crate::config::SanitizerPolicy;
use crate::error::Result;
use crate::verdict::{Disposition, Verdict};

/// A single text normalization layer.
pub trait Sanitizer: Send + Sync {
    /// Rewrite the input, removing whatever this layer is responsible for.
    fn sanitize(&self, input: &str) -> String;

    /// Name of this layer (for logging/debugging).
    fn name(&self) -> &str;
}

/// Runs normalization layers in sequence.
pub struct NormalizePipeline {
    layers: Vec<Box<dyn Sanitizer>>,
}

impl NormalizePipeline {
    /// Create the default pipeline.
    /// Order: character reference decoding -> control/zero-width stripping.
    pub fn default_pipeline() -> Self {
        Self {
            layers: vec![
                Box::new(entities::EntityDecoder::new()),
                Box::new(control::ControlStripper::new()),
            ],
        }
    }

    /// Create a pipeline from custom layers.
    pub fn new(layers: Vec<Box<dyn Sanitizer>>) -> Self {
        Self { layers }
    }

    /// Run all layers in sequence.
    pub fn sanitize(&self, input: &str) -> String {
        let mut result = input.to_string();
        for layer in &self.layers {
            result = layer.sanitize(&result);
        }
        result
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name()).collect()
    }
}

/// Turns untrusted href/src values into values safe for an attribute.
///
/// Every input produces a string: the placeholder, a relative path, or a URL
/// carrying an explicit scheme that is not on the denylist.
pub struct UrlSanitizer {
    pipeline: NormalizePipeline,
    guard: scheme::SchemeGuard,
    policy: SanitizerPolicy,
}

impl UrlSanitizer {
    pub fn new(policy: SanitizerPolicy) -> Result<Self> {
        policy.validate()?;
        let guard = scheme::SchemeGuard::new(policy.blocked_schemes.clone())?;
        Ok(Self {
            pipeline: NormalizePipeline::default_pipeline(),
            guard,
            policy,
        })
    }

    /// Sanitizer with the built-in policy.
    pub fn with_defaults() -> Self {
        Self::new(SanitizerPolicy::default()).expect("default policy should be valid")
    }

    /// Replace the normalization layers, keeping the policy.
    pub fn with_pipeline(mut self, pipeline: NormalizePipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn policy(&self) -> &SanitizerPolicy {
        &self.policy
    }

    /// Decode, strip and trim, without any scheme decision.
    pub fn normalize(&self, url: Option<&str>) -> String {
        self.pipeline.sanitize(url.unwrap_or_default()).trim().to_string()
    }

    pub fn sanitize(&self, url: Option<&str>) -> String {
        self.classify(url).output
    }

    /// Sanitize and report which rule decided the output.
    pub fn classify(&self, url: Option<&str>) -> Verdict {
        let input = url.unwrap_or_default().to_string();
        let cleaned = self.normalize(url);

        let Some(first) = cleaned.chars().next() else {
            return self.rejected(input, Disposition::Blank, None);
        };

        if self.policy.relative_prefixes.contains(&first) {
            return Verdict {
                input,
                output: cleaned,
                disposition: Disposition::Relative,
                blocked_scheme: None,
            };
        }

        // Denylist runs before the upgrade so `javascript:` is never
        // rescued into `https://javascript:`.
        if let Some(scheme) = self.guard.blocked_scheme(&cleaned) {
            tracing::debug!(scheme, "blocked url scheme");
            let scheme = scheme.to_string();
            return self.rejected(input, Disposition::Blocked, Some(scheme));
        }

        if !scheme::has_web_scheme(&cleaned) {
            let output = format!("{}://{}", self.policy.upgrade_scheme, cleaned);
            return Verdict {
                input,
                output,
                disposition: Disposition::Upgraded,
                blocked_scheme: None,
            };
        }

        Verdict {
            input,
            output: cleaned,
            disposition: Disposition::Passthrough,
            blocked_scheme: None,
        }
    }

    fn rejected(
        &self,
        input: String,
        disposition: Disposition,
        blocked_scheme: Option<String>,
    ) -> Verdict {
        Verdict {
            input,
            output: self.policy.placeholder.clone(),
            disposition,
            blocked_scheme,
        }
    }
}

impl Default for UrlSanitizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

static DEFAULT_SANITIZER: LazyLock<UrlSanitizer> = LazyLock::new(UrlSanitizer::with_defaults);

/// Sanitize with the built-in policy. Never fails.
pub fn sanitize_url(url: Option<&str>) -> String {
    DEFAULT_SANITIZER.sanitize(url)
}

/// Classify with the built-in policy.
pub fn classify_url(url: Option<&str>) -> Verdict {
    DEFAULT_SANITIZER.classify(url)
}
