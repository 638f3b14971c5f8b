// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Recorded tracker sessions.
//!
//! A recording stores what the camera, hand tracker and keyboard produced
//! for each frame, so a drawing session can be replayed without hardware.

use super::pose::HandPose;
use serde::{Deserialize, Serialize};

/// One frame of tracker output plus the key pressed during it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    #[serde(default)]
    pub hands: Vec<HandPose>,
    #[serde(default)]
    pub key: Option<char>,
}

/// Complete recording for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    /// Create an empty recording with the given frame dimensions.
    pub fn new(frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            frames: Vec::new(),
        }
    }

    /// Add a frame to the end of the recording.
    pub fn push(&mut self, frame: RecordedFrame) {
        self.frames.push(frame);
    }
}
