// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for recordings, trails and canvas images.

pub mod media;
pub mod serialization;
