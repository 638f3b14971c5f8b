// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and frame loop.
//!
//! This module contains the application structure that owns the drawing
//! session and drives it one frame at a time: the first tracked hand feeds
//! the trail and may clear it, and key presses trigger shape or text
//! recognition or end the loop. Everything runs synchronously on the
//! caller's thread.

use crate::config::PenConfig;
use crate::error::PenError;
use crate::models::session::SessionState;
use crate::pipeline::Pipeline;
use crate::services::{FrameInput, FrameSource, TextRecognizer};
use crate::vision::{DebouncedClear, Gesture};
use anyhow::Result;

/// User commands from the trigger surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ClassifyShape,
    RecognizeText,
    Quit,
}

impl Command {
    /// Map a key press to a command: 's', 't' and 'q'.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            's' => Some(Self::ClassifyShape),
            't' => Some(Self::RecognizeText),
            'q' => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Whether the frame loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main application state.
pub struct HandPenApp {
    /// Trail and recognition results
    session: SessionState,

    /// Rasterizer and classifier
    pipeline: Pipeline,

    /// Clear gesture detection
    gestures: DebouncedClear,

    /// OCR engine
    recognizer: Box<dyn TextRecognizer>,
}

impl HandPenApp {
    /// Create a new application instance.
    pub fn new(config: &PenConfig, recognizer: Box<dyn TextRecognizer>) -> Self {
        Self {
            session: SessionState::new(),
            pipeline: Pipeline::new(config),
            gestures: DebouncedClear::new(&config.gesture),
            recognizer,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Feed one frame's tracker output into the session.
    ///
    /// The fingertip of a clearing frame is appended before the clear, so
    /// the trail is always empty afterwards.
    pub fn track(&mut self, frame: &FrameInput) {
        let pose = frame.hands.first();
        if let Some((fingertip, gesture)) = self.gestures.interpret(pose, frame.width, frame.height) {
            self.session.append(fingertip);
            if gesture == Gesture::Clear {
                self.session.clear();
            }
        }
    }

    /// Execute a user command.
    ///
    /// A too-short trail is logged and ignored; only a failing OCR engine
    /// is returned as an error.
    pub fn handle_command(&mut self, command: Command) -> Result<Flow> {
        let outcome = match command {
            Command::ClassifyShape => {
                log::info!("Shape recognition triggered");
                self.pipeline.classify_shape(&mut self.session).map(|_| ())
            }
            Command::RecognizeText => {
                log::info!("Text recognition triggered");
                self.pipeline
                    .recognize_text(&mut self.session, self.recognizer.as_mut())
                    .map(|_| ())
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        match outcome {
            Ok(()) | Err(PenError::NotEnoughData { .. }) => Ok(Flow::Continue),
            Err(e) => Err(e.into()),
        }
    }

    /// Track one frame, then act on its key press.
    pub fn process_frame(&mut self, frame: &FrameInput) -> Result<Flow> {
        self.track(frame);
        match frame.key.and_then(Command::from_key) {
            Some(command) => self.handle_command(command),
            None => Ok(Flow::Continue),
        }
    }

    /// Process frames until the source ends or the user quits.
    ///
    /// Returns the number of frames processed.
    pub fn run(&mut self, source: &mut dyn FrameSource) -> Result<usize> {
        let mut frames = 0;
        while let Some(frame) = source.next_frame()? {
            frames += 1;
            if self.process_frame(&frame)? == Flow::Quit {
                log::info!("Quit requested after {} frames", frames);
                break;
            }
        }
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GestureConfig;
    use crate::models::pose::HandPose;
    use crate::models::recording::{RecordedFrame, Recording};
    use crate::models::shape::ShapeLabel;
    use crate::models::stroke::Point;
    use crate::services::{NoRecognizer, Replay};
    use crate::vision::gesture::tests::{open_hand, pointing_hand};
    use image::GrayImage;

    const FRAME: u32 = 1024;

    struct FixedText(&'static str);

    impl TextRecognizer for FixedText {
        fn recognize(&mut self, _image: &GrayImage) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn pointing_at(x: i32, y: i32) -> HandPose {
        pointing_hand(x as f64 / FRAME as f64, y as f64 / FRAME as f64)
    }

    fn hand_frame(pose: HandPose, key: Option<char>) -> RecordedFrame {
        RecordedFrame {
            hands: vec![pose],
            key,
        }
    }

    fn square_recording() -> Recording {
        let mut recording = Recording::new(FRAME, FRAME);
        let corners = [(400, 200), (700, 200), (700, 500), (400, 500)];
        for (i, &(x0, y0)) in corners.iter().enumerate() {
            let (x1, y1) = corners[(i + 1) % corners.len()];
            for step in 0..6 {
                let pose = pointing_at(x0 + (x1 - x0) * step / 6, y0 + (y1 - y0) * step / 6);
                recording.push(hand_frame(pose, None));
            }
        }
        recording.push(hand_frame(pointing_at(400, 200), None));
        recording
    }

    fn app() -> HandPenApp {
        HandPenApp::new(&PenConfig::default(), Box::new(NoRecognizer))
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(Command::from_key('s'), Some(Command::ClassifyShape));
        assert_eq!(Command::from_key('t'), Some(Command::RecognizeText));
        assert_eq!(Command::from_key('q'), Some(Command::Quit));
        assert_eq!(Command::from_key('x'), None);
    }

    #[test]
    fn test_fingertip_appended_each_tracked_frame() {
        let mut app = app();
        app.track(&FrameInput {
            width: FRAME,
            height: FRAME,
            hands: vec![pointing_at(256, 512)],
            key: None,
        });
        app.track(&FrameInput {
            width: FRAME,
            height: FRAME,
            hands: Vec::new(),
            key: None,
        });

        assert_eq!(app.session().trail().snapshot(), &[Point::new(256, 512)]);
    }

    #[test]
    fn test_replayed_square_then_classify() {
        let mut recording = square_recording();
        recording.push(RecordedFrame {
            hands: Vec::new(),
            key: Some('s'),
        });

        let mut app = app();
        let frames = app.run(&mut Replay::new(recording)).unwrap();

        assert_eq!(frames, 26);
        assert_eq!(app.session().trail().len(), 25);
        assert_eq!(app.session().shape(), ShapeLabel::Square);
    }

    #[test]
    fn test_open_hand_clears_everything() {
        let mut app = HandPenApp::new(&PenConfig::default(), Box::new(FixedText("SQ")));
        app.run(&mut Replay::new(square_recording())).unwrap();
        app.handle_command(Command::ClassifyShape).unwrap();
        app.handle_command(Command::RecognizeText).unwrap();
        assert_eq!(app.session().shape(), ShapeLabel::Square);
        assert_eq!(app.session().recognized_text(), "SQ");

        let flow = app
            .process_frame(&FrameInput {
                width: FRAME,
                height: FRAME,
                hands: vec![open_hand()],
                key: None,
            })
            .unwrap();

        assert_eq!(flow, Flow::Continue);
        assert!(app.session().trail().is_empty());
        assert_eq!(app.session().shape(), ShapeLabel::None);
        assert_eq!(app.session().recognized_text(), "");
    }

    #[test]
    fn test_held_clear_with_debounce() {
        let config = PenConfig {
            gesture: GestureConfig {
                clear_hold_frames: 2,
                ..GestureConfig::default()
            },
            ..PenConfig::default()
        };
        let mut app = HandPenApp::new(&config, Box::new(NoRecognizer));
        let open = FrameInput {
            width: FRAME,
            height: FRAME,
            hands: vec![open_hand()],
            key: None,
        };

        app.process_frame(&open).unwrap();
        assert_eq!(app.session().trail().len(), 1);
        app.process_frame(&open).unwrap();
        assert!(app.session().trail().is_empty());
    }

    #[test]
    fn test_short_trail_commands_are_ignored() {
        let mut app = app();
        for i in 0..10 {
            app.track(&FrameInput {
                width: FRAME,
                height: FRAME,
                hands: vec![pointing_at(100 + 20 * i, 300)],
                key: None,
            });
        }

        assert_eq!(app.handle_command(Command::ClassifyShape).unwrap(), Flow::Continue);
        assert_eq!(app.handle_command(Command::RecognizeText).unwrap(), Flow::Continue);
        assert_eq!(app.session().shape(), ShapeLabel::None);
        assert_eq!(app.session().trail().len(), 10);
    }

    #[test]
    fn test_quit_stops_the_loop() {
        let mut recording = Recording::new(FRAME, FRAME);
        recording.push(hand_frame(pointing_at(10, 10), None));
        recording.push(hand_frame(pointing_at(20, 20), Some('q')));
        recording.push(hand_frame(pointing_at(30, 30), None));

        let mut app = app();
        let frames = app.run(&mut Replay::new(recording)).unwrap();

        assert_eq!(frames, 2);
        assert_eq!(app.session().trail().len(), 2);
    }
}
