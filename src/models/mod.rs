// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for the drawing session.

pub mod pose;
pub mod recording;
pub mod session;
pub mod shape;
pub mod stroke;
