// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for recognition requests and configuration.

use thiserror::Error;

/// Outcome of a recognition request that did not update the session.
#[derive(Debug, Error)]
pub enum PenError {
    /// The trail is too short to be worth rasterizing.
    #[error("not enough points to {action}: have {points}, need {required}")]
    NotEnoughData {
        action: &'static str,
        points: usize,
        required: usize,
    },

    /// The text recognition engine itself failed.
    #[error("text recognizer failed: {0}")]
    Recognizer(#[source] anyhow::Error),
}

/// An invalid configuration value.
#[derive(Debug, Error)]
#[error("invalid config: {0}")]
pub struct ConfigError(pub String);
