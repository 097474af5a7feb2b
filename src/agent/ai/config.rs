//! Search agent configuration.
//!
//! An agent picks its search method and depth control once, at construction.
//! Nothing here falls back to a default on bad input: an unknown method name,
//! a zero fixed depth or a negative threshold is a [`ConfigError`].

use std::fmt;
use std::str::FromStr;

/// Errors raised while building an agent configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Fixed-depth search needs at least one ply
    #[error("fixed search depth must be a positive integer, got {0}")]
    InvalidDepth(u32),

    #[error("unknown search method '{0}' (expected 'minimax' or 'alphabeta')")]
    UnknownMethod(String),

    #[error("unknown depth mode '{0}' (expected 'fixed' or 'iterative')")]
    UnknownDepthMode(String),

    /// Abort threshold must be a finite, non-negative number of milliseconds
    #[error("timeout threshold must be a finite non-negative number of milliseconds, got {0}")]
    InvalidThreshold(f64),
}

/// Tree walker used by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMethod {
    Minimax,
    AlphaBeta,
}

impl SearchMethod {
    pub fn name(&self) -> &'static str {
        match self {
            SearchMethod::Minimax => "minimax",
            SearchMethod::AlphaBeta => "alphabeta",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimax" => Ok(SearchMethod::Minimax),
            "alphabeta" => Ok(SearchMethod::AlphaBeta),
            other => Err(ConfigError::UnknownMethod(other.to_string())),
        }
    }
}

/// How deep the agent searches on each move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthMode {
    /// One search at exactly this many plies
    Fixed(u32),
    /// Depth 1, 2, 3, ... until the time runs out
    Iterative,
}

impl DepthMode {
    /// Build from a mode name plus the depth used in fixed mode.
    pub fn parse(mode: &str, depth: u32) -> Result<Self, ConfigError> {
        match mode {
            "fixed" => Ok(DepthMode::Fixed(depth)),
            "iterative" => Ok(DepthMode::Iterative),
            other => Err(ConfigError::UnknownDepthMode(other.to_string())),
        }
    }
}

/// Default abort margin, in milliseconds left on the clock.
pub const DEFAULT_TIMEOUT_THRESHOLD_MS: f64 = 10.0;

/// Default depth for fixed-depth agents.
pub const DEFAULT_SEARCH_DEPTH: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentConfig {
    pub method: SearchMethod,
    pub depth_mode: DepthMode,
    /// The search gives up once fewer than this many milliseconds remain.
    /// Must cover the cost of expanding one node.
    pub timeout_threshold_ms: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            method: SearchMethod::Minimax,
            depth_mode: DepthMode::Iterative,
            timeout_threshold_ms: DEFAULT_TIMEOUT_THRESHOLD_MS,
        }
    }
}

impl AgentConfig {
    pub fn fixed(method: SearchMethod, depth: u32) -> Self {
        Self {
            method,
            depth_mode: DepthMode::Fixed(depth),
            ..Self::default()
        }
    }

    pub fn iterative(method: SearchMethod) -> Self {
        Self {
            method,
            depth_mode: DepthMode::Iterative,
            ..Self::default()
        }
    }

    pub fn with_threshold(mut self, threshold_ms: f64) -> Self {
        self.timeout_threshold_ms = threshold_ms;
        self
    }

    /// Build from the string form used on command lines.
    pub fn parse(method: &str, mode: &str, depth: u32, threshold_ms: f64) -> Result<Self, ConfigError> {
        let config = Self {
            method: method.parse()?,
            depth_mode: DepthMode::parse(mode, depth)?,
            timeout_threshold_ms: threshold_ms,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let DepthMode::Fixed(0) = self.depth_mode {
            return Err(ConfigError::InvalidDepth(0));
        }
        if !self.timeout_threshold_ms.is_finite() || self.timeout_threshold_ms < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.timeout_threshold_ms));
        }
        Ok(())
    }
}
