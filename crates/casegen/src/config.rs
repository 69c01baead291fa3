//! Emission options shared by all emitters.

use serde::{Deserialize, Serialize};

/// Default application URL used when the IR does not name one
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default per-test timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Load profile for performance emitters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadProfile {
    /// Concurrent virtual users at steady state
    pub vus: u32,
    /// Steady-state duration in seconds
    pub duration_secs: u64,
    /// Ramp-up duration in seconds (0 = start at full load)
    pub ramp_up_secs: u64,
    /// Think time between requests in milliseconds
    pub think_time_ms: u64,
    /// 95th percentile response-time threshold in milliseconds
    pub p95_ms: u64,
}

impl Default for LoadProfile {
    fn default() -> Self {
        Self {
            vus: 10,
            duration_secs: 30,
            ramp_up_secs: 10,
            think_time_ms: 1000,
            p95_ms: 2000,
        }
    }
}

impl LoadProfile {
    /// Total run time including ramp-up
    #[must_use]
    pub const fn total_secs(&self) -> u64 {
        self.ramp_up_secs + self.duration_secs
    }

    /// Arrival rate used by rate-based tools (at least 1/s)
    #[must_use]
    pub fn arrival_rate(&self) -> u32 {
        self.vus.max(1)
    }

    /// Think time in seconds
    #[must_use]
    pub fn think_secs(&self) -> f64 {
        self.think_time_ms as f64 / 1000.0
    }
}

/// Options that shape generated artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Application base URL; relative paths in steps are resolved against it
    pub base_url: String,
    /// Per-test timeout in milliseconds
    pub timeout_ms: u64,
    /// Load profile for performance targets
    pub load: LoadProfile,
    /// Mobile application id (bundle id / package name)
    pub app_id: String,
    /// Accessibility standard for scanner configs
    pub a11y_standard: String,
    /// Minimum accessibility score (0.0 - 1.0) for Lighthouse assertions
    pub a11y_min_score: f64,
    /// Browser projects for scaffolded web configs
    pub browsers: Vec<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            load: LoadProfile::default(),
            app_id: "com.example.app".to_string(),
            a11y_standard: "WCAG2AA".to_string(),
            a11y_min_score: 0.9,
            browsers: vec!["chromium".to_string()],
        }
    }
}

impl EmitOptions {
    /// Create default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL (a trailing slash is dropped)
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set timeout
    #[must_use]
    pub const fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// Set load profile
    #[must_use]
    pub const fn with_load(mut self, load: LoadProfile) -> Self {
        self.load = load;
        self
    }

    /// Set mobile app id
    #[must_use]
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    /// Set browser projects
    #[must_use]
    pub fn with_browsers<I, S>(mut self, browsers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.browsers = browsers.into_iter().map(Into::into).collect();
        self
    }

    /// Parse options from YAML (JSON is valid YAML)
    ///
    /// # Errors
    ///
    /// Returns the YAML error for malformed input
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(yaml)
    }

    /// Resolve a step URL against the base URL.
    ///
    /// Absolute URLs pass through; `/path` and `path` are joined.
    #[must_use]
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if url.is_empty() {
            base.to_string()
        } else if url.starts_with('/') {
            format!("{base}{url}")
        } else {
            format!("{base}/{url}")
        }
    }
}
