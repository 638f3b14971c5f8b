// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Command-line interface.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Draw in the air with a tracked fingertip and recognize what was drawn
#[derive(Parser, Debug)]
#[command(name = "handpen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded tracker session through the frame loop
    Replay {
        /// Recording file (YAML or JSON)
        recording: PathBuf,

        /// Text recognition engine for the 't' key
        #[arg(long, value_enum, default_value_t = OcrEngine::None)]
        ocr: OcrEngine,

        /// Path to the tesseract executable
        #[arg(long, default_value = "tesseract")]
        tesseract_path: PathBuf,

        /// Write the final trail's canvas to this image file
        #[arg(long)]
        dump_canvas: Option<PathBuf>,

        /// Write the final trail to this YAML or JSON file
        #[arg(long)]
        save_trail: Option<PathBuf>,
    },

    /// Classify a stored trail as a shape
    Classify {
        /// Trail file (YAML or JSON list of points)
        trail: PathBuf,
    },

    /// Rasterize a stored trail to an image
    Rasterize {
        /// Trail file (YAML or JSON list of points)
        trail: PathBuf,

        /// Output image path
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Text recognition backends.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrEngine {
    /// Never recognize any text
    None,
    /// Run the tesseract executable
    Tesseract,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_replay_defaults() {
        let cli = Cli::try_parse_from(["handpen", "replay", "session.yaml"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Replay {
                recording,
                ocr,
                tesseract_path,
                dump_canvas,
                save_trail,
            } => {
                assert_eq!(recording, PathBuf::from("session.yaml"));
                assert_eq!(ocr, OcrEngine::None);
                assert_eq!(tesseract_path, PathBuf::from("tesseract"));
                assert!(dump_canvas.is_none());
                assert!(save_trail.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "handpen", "classify", "trail.json", "--verbose", "--config", "pen.yaml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("pen.yaml")));
    }

    #[test]
    fn test_rasterize_requires_output() {
        assert!(Cli::try_parse_from(["handpen", "rasterize", "trail.json"]).is_err());
    }
}
