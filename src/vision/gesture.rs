// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clear gesture detection from hand landmarks.
//!
//! A finger counts as raised when its tip sits above the joint two
//! positions below it; the thumb counts when its tip is on the configured
//! side of the adjacent joint. An open hand (all five raised) clears the
//! drawing. The interpreter is a pure per-frame function; [`DebouncedClear`]
//! adds an optional hold requirement on top of it.

use crate::config::{GestureConfig, ThumbSide};
use crate::models::pose::{HandLandmark, HandPose};
use crate::models::stroke::Point;
use crate::util::geometry::denormalize_coordinates;

/// Per-frame gesture signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    None,
    Clear,
}

/// Stateless pose-to-gesture mapping.
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    clear_finger_count: u32,
    thumb_side: ThumbSide,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(&GestureConfig::default())
    }
}

impl GestureInterpreter {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            clear_finger_count: config.clear_finger_count,
            thumb_side: config.thumb_side,
        }
    }

    /// Count raised digits, thumb included.
    pub fn raised_fingers(&self, pose: &HandPose) -> u32 {
        let mut fingers = HandLandmark::finger_chains()
            .iter()
            .filter(|(tip, joint)| pose.landmark(*tip).y < pose.landmark(*joint).y)
            .count() as u32;

        let thumb_tip = pose.landmark(HandLandmark::ThumbTip).x;
        let thumb_joint = pose.landmark(HandLandmark::ThumbIp).x;
        let thumb_raised = match self.thumb_side {
            ThumbSide::Left => thumb_tip < thumb_joint,
            ThumbSide::Right => thumb_tip > thumb_joint,
        };
        if thumb_raised {
            fingers += 1;
        }
        fingers
    }

    /// Index fingertip in pixels, and whether this pose is a clear.
    pub fn interpret(&self, pose: &HandPose, frame_width: u32, frame_height: u32) -> (Point, Gesture) {
        let fingertip = denormalize_coordinates(
            &pose.landmark(HandLandmark::IndexTip),
            frame_width,
            frame_height,
        );
        let gesture = if self.raised_fingers(pose) == self.clear_finger_count {
            Gesture::Clear
        } else {
            Gesture::None
        };
        (fingertip, gesture)
    }
}

/// Requires a clear to be held for several consecutive frames.
///
/// With a hold of one frame it behaves exactly like the bare interpreter.
#[derive(Debug, Clone)]
pub struct DebouncedClear {
    interpreter: GestureInterpreter,
    hold_frames: u32,
    streak: u32,
}

impl DebouncedClear {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            interpreter: GestureInterpreter::new(config),
            hold_frames: config.clear_hold_frames.max(1),
            streak: 0,
        }
    }

    /// Interpret this frame's pose, if a hand was seen.
    ///
    /// A frame without a hand breaks the streak and yields `None`.
    pub fn interpret(
        &mut self,
        pose: Option<&HandPose>,
        frame_width: u32,
        frame_height: u32,
    ) -> Option<(Point, Gesture)> {
        let Some(pose) = pose else {
            self.streak = 0;
            return None;
        };

        let (fingertip, raw) = self.interpreter.interpret(pose, frame_width, frame_height);
        if raw != Gesture::Clear {
            self.streak = 0;
            return Some((fingertip, Gesture::None));
        }

        self.streak += 1;
        if self.streak >= self.hold_frames {
            self.streak = 0;
            Some((fingertip, Gesture::Clear))
        } else {
            Some((fingertip, Gesture::None))
        }
    }
}
