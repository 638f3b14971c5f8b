// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! HandPen core library
//!
//! Turns a tracked fingertip into a drawn stroke, wipes it on an open-hand
//! gesture, and on request classifies the stroke as a geometric shape or
//! hands it to an OCR engine.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod util;
pub mod vision;

pub use app::{Command, Flow, HandPenApp};
pub use config::PenConfig;
pub use error::PenError;
pub use models::session::SessionState;
pub use models::shape::ShapeLabel;
pub use models::stroke::{Point, PointTrail};
pub use pipeline::{Pipeline, ShapeUpdate, TextUpdate};
