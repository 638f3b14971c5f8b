// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! External collaborators of the drawing pipeline.
//!
//! Camera capture, hand tracking and keyboard input arrive together through
//! [`FrameSource`]; OCR sits behind [`TextRecognizer`]. Failures of these
//! services are reported as errors and are fatal to the frame loop.

use crate::models::pose::HandPose;
use crate::models::recording::Recording;
use anyhow::{Context, Result};
use image::{GrayImage, ImageFormat};
use std::io::{Cursor, Write};
use std::path::PathBuf;
use std::process::{Command as ProcessCommand, Stdio};

/// Everything the outside world produced for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub width: u32,
    pub height: u32,
    /// Tracked hands; only the first is used.
    pub hands: Vec<HandPose>,
    /// Key pressed during this frame, if any.
    pub key: Option<char>,
}

/// A stream of tracked frames.
pub trait FrameSource {
    /// Next frame, or `None` once the stream has ended.
    fn next_frame(&mut self) -> Result<Option<FrameInput>>;
}

/// Replays a [`Recording`] frame by frame.
pub struct Replay {
    recording: Recording,
    cursor: usize,
}

impl Replay {
    pub fn new(recording: Recording) -> Self {
        Self {
            recording,
            cursor: 0,
        }
    }
}

impl FrameSource for Replay {
    fn next_frame(&mut self) -> Result<Option<FrameInput>> {
        let Some(frame) = self.recording.frames.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;
        Ok(Some(FrameInput {
            width: self.recording.frame_width,
            height: self.recording.frame_height,
            hands: frame.hands.clone(),
            key: frame.key,
        }))
    }
}

/// Turns a smoothed grayscale canvas into text.
pub trait TextRecognizer {
    /// Best-effort text; an empty string means nothing was legible.
    fn recognize(&mut self, image: &GrayImage) -> Result<String>;
}

/// Recognizer used when no OCR engine is configured. Always reads nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecognizer;

impl TextRecognizer for NoRecognizer {
    fn recognize(&mut self, _image: &GrayImage) -> Result<String> {
        Ok(String::new())
    }
}

/// Runs the `tesseract` executable, piping the canvas in as PNG.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    program: PathBuf,
    page_segmentation_mode: u8,
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new(PathBuf::from("tesseract"))
    }
}

impl TesseractCli {
    /// Use the given tesseract binary with single-block page segmentation.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            page_segmentation_mode: 6,
        }
    }

    fn args(&self) -> Vec<String> {
        vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "--psm".to_string(),
            self.page_segmentation_mode.to_string(),
        ]
    }
}

impl TextRecognizer for TesseractCli {
    fn recognize(&mut self, image: &GrayImage) -> Result<String> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .context("Failed to encode canvas as PNG")?;

        let mut child = ProcessCommand::new(&self.program)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.program.display()))?;

        // Dropping stdin after the write signals end of input
        child
            .stdin
            .take()
            .context("tesseract stdin unavailable")?
            .write_all(&png)
            .context("Failed to send canvas to tesseract")?;

        let output = child.wait_with_output()?;
        if !output.status.success() {
            anyhow::bail!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recording::RecordedFrame;

    #[test]
    fn test_replay_yields_frames_in_order_then_ends() {
        let mut recording = Recording::new(640, 480);
        recording.push(RecordedFrame::default());
        recording.push(RecordedFrame {
            hands: Vec::new(),
            key: Some('s'),
        });

        let mut replay = Replay::new(recording);
        let first = replay.next_frame().unwrap().unwrap();
        assert_eq!((first.width, first.height, first.key), (640, 480, None));
        let second = replay.next_frame().unwrap().unwrap();
        assert_eq!(second.key, Some('s'));
        assert!(replay.next_frame().unwrap().is_none());
        assert!(replay.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_no_recognizer_reads_nothing() {
        let text = NoRecognizer.recognize(&GrayImage::new(4, 4)).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_tesseract_uses_single_block_mode() {
        assert_eq!(TesseractCli::default().args(), ["stdin", "stdout", "--psm", "6"]);
    }

    #[test]
    fn test_missing_tesseract_binary_is_an_error() {
        let mut ocr = TesseractCli::new(PathBuf::from("/nonexistent/tesseract-binary"));
        assert!(ocr.recognize(&GrayImage::new(4, 4)).is_err());
    }
}
