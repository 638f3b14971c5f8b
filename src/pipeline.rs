// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! On-demand recognition requests against a session.
//!
//! Both requests work on the trail as it is at call time, refuse trails
//! that are too short, and write their result into the session only on
//! success.

use crate::config::PenConfig;
use crate::error::PenError;
use crate::models::session::SessionState;
use crate::models::shape::ShapeLabel;
use crate::services::TextRecognizer;
use crate::vision::classify::smooth;
use crate::vision::{RasterCanvas, Rasterizer, ShapeClassifier};

/// Result of a shape classification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeUpdate {
    /// The session now holds this label.
    Updated(ShapeLabel),
    /// No contour qualified; the previous label was kept.
    Unchanged,
}

/// Result of a text recognition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextUpdate {
    Recognized(String),
    /// The recognizer found nothing legible; the session text is now empty.
    Empty,
}

/// Rasterizer and classifier configured for one session.
#[derive(Debug, Clone)]
pub struct Pipeline {
    rasterizer: Rasterizer,
    classifier: ShapeClassifier,
    min_points: usize,
    blur_kernel_size: usize,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&PenConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: &PenConfig) -> Self {
        Self {
            rasterizer: Rasterizer::new(&config.raster),
            classifier: ShapeClassifier::new(&config.classifier),
            min_points: config.classifier.min_points,
            blur_kernel_size: config.classifier.blur_kernel_size,
        }
    }

    fn ensure_enough_points(&self, session: &SessionState, action: &'static str) -> Result<(), PenError> {
        let points = session.trail().len();
        if points < self.min_points {
            log::warn!("Not enough points to {} ({} < {})", action, points, self.min_points);
            return Err(PenError::NotEnoughData {
                action,
                points,
                required: self.min_points,
            });
        }
        Ok(())
    }

    /// Rasterize the current trail.
    pub fn render(&self, session: &SessionState) -> RasterCanvas {
        self.rasterizer.rasterize(session.trail().snapshot())
    }

    /// Classify the current trail and store the label.
    pub fn classify_shape(&self, session: &mut SessionState) -> Result<ShapeUpdate, PenError> {
        self.ensure_enough_points(session, "detect a shape")?;

        let canvas = self.render(session);
        match self.classifier.classify(&canvas) {
            Some(label) => {
                session.set_shape(label);
                log::info!("Recognized shape: {}", label);
                Ok(ShapeUpdate::Updated(label))
            }
            None => {
                log::info!("No qualifying contour, keeping shape {}", session.shape());
                Ok(ShapeUpdate::Unchanged)
            }
        }
    }

    /// Run OCR over the current trail and store the trimmed text.
    pub fn recognize_text(
        &self,
        session: &mut SessionState,
        recognizer: &mut dyn TextRecognizer,
    ) -> Result<TextUpdate, PenError> {
        self.ensure_enough_points(session, "recognize text")?;

        let canvas = self.render(session);
        let smoothed = smooth(canvas.image(), self.blur_kernel_size);
        let text = recognizer
            .recognize(&smoothed)
            .map_err(PenError::Recognizer)?
            .trim()
            .to_string();

        session.set_recognized_text(text.clone());
        if text.is_empty() {
            log::info!("No legible text");
            Ok(TextUpdate::Empty)
        } else {
            log::info!("Recognized text: {}", text);
            Ok(TextUpdate::Recognized(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stroke::Point;
    use crate::services::NoRecognizer;
    use image::GrayImage;

    struct FixedText(&'static str);

    impl TextRecognizer for FixedText {
        fn recognize(&mut self, _image: &GrayImage) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Broken;

    impl TextRecognizer for Broken {
        fn recognize(&mut self, _image: &GrayImage) -> anyhow::Result<String> {
            anyhow::bail!("engine unavailable")
        }
    }

    fn square_session() -> SessionState {
        let mut session = SessionState::new();
        let corners = [(400, 200), (700, 200), (700, 500), (400, 500)];
        for (i, &(x0, y0)) in corners.iter().enumerate() {
            let (x1, y1) = corners[(i + 1) % corners.len()];
            for step in 0..6 {
                session.append(Point::new(x0 + (x1 - x0) * step / 6, y0 + (y1 - y0) * step / 6));
            }
        }
        session.append(Point::new(400, 200));
        session
    }

    fn short_session(points: i32) -> SessionState {
        let mut session = SessionState::new();
        for i in 0..points {
            session.append(Point::new(100 + 10 * i, 100));
        }
        session
    }

    #[test]
    fn test_square_trail_classifies_as_square() {
        let mut session = square_session();
        assert_eq!(session.trail().len(), 25);

        let update = Pipeline::default().classify_shape(&mut session).unwrap();
        assert_eq!(update, ShapeUpdate::Updated(ShapeLabel::Square));
        assert_eq!(session.shape(), ShapeLabel::Square);
    }

    #[test]
    fn test_short_trail_is_not_enough_data() {
        let pipeline = Pipeline::default();
        let mut session = short_session(10);
        session.set_shape(ShapeLabel::Circle);
        session.set_recognized_text("prior".to_string());

        let err = pipeline.classify_shape(&mut session).unwrap_err();
        assert!(matches!(err, PenError::NotEnoughData { points: 10, required: 20, .. }));

        let err = pipeline
            .recognize_text(&mut session, &mut FixedText("new"))
            .unwrap_err();
        assert!(matches!(err, PenError::NotEnoughData { points: 10, .. }));

        assert_eq!(session.shape(), ShapeLabel::Circle);
        assert_eq!(session.recognized_text(), "prior");
    }

    #[test]
    fn test_nineteen_points_rejected_twenty_accepted() {
        let pipeline = Pipeline::default();
        assert!(pipeline.classify_shape(&mut short_session(19)).is_err());
        assert!(pipeline.classify_shape(&mut short_session(20)).is_ok());
    }

    #[test]
    fn test_no_qualifying_contour_keeps_label() {
        let mut session = SessionState::new();
        // Twenty-five points on one spot draw a dot far below the area threshold
        for _ in 0..25 {
            session.append(Point::new(300, 300));
        }
        session.set_shape(ShapeLabel::Triangle);

        let update = Pipeline::default().classify_shape(&mut session).unwrap();
        assert_eq!(update, ShapeUpdate::Unchanged);
        assert_eq!(session.shape(), ShapeLabel::Triangle);
    }

    #[test]
    fn test_recognized_text_is_trimmed() {
        let mut session = square_session();
        let update = Pipeline::default()
            .recognize_text(&mut session, &mut FixedText("  HI\n"))
            .unwrap();
        assert_eq!(update, TextUpdate::Recognized("HI".to_string()));
        assert_eq!(session.recognized_text(), "HI");
    }

    #[test]
    fn test_empty_recognition_clears_text() {
        let mut session = square_session();
        session.set_recognized_text("old".to_string());

        let update = Pipeline::default()
            .recognize_text(&mut session, &mut NoRecognizer)
            .unwrap();
        assert_eq!(update, TextUpdate::Empty);
        assert_eq!(session.recognized_text(), "");
    }

    #[test]
    fn test_recognizer_failure_leaves_session_untouched() {
        let mut session = square_session();
        session.set_recognized_text("old".to_string());

        let err = Pipeline::default()
            .recognize_text(&mut session, &mut Broken)
            .unwrap_err();
        assert!(matches!(err, PenError::Recognizer(_)));
        assert_eq!(session.recognized_text(), "old");
    }

    #[test]
    fn test_classification_and_text_are_independent() {
        let pipeline = Pipeline::default();
        let mut session = square_session();

        pipeline.recognize_text(&mut session, &mut FixedText("box")).unwrap();
        pipeline.classify_shape(&mut session).unwrap();

        assert_eq!(session.shape(), ShapeLabel::Square);
        assert_eq!(session.recognized_text(), "box");
    }
}
