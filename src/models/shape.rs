// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape labels produced by contour classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned to a classified stroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeLabel {
    #[default]
    None,
    Triangle,
    Square,
    Rectangle,
    Circle,
    Polygon,
}

impl ShapeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Triangle => "Triangle",
            Self::Square => "Square",
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
            Self::Polygon => "Polygon",
        }
    }
}

impl fmt::Display for ShapeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
