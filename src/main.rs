// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! HandPen - air drawing with shape and text recognition
//!
//! Replays tracked fingertip strokes, clears them on an open-hand gesture,
//! and classifies finished strokes as geometric shapes or reads them as
//! text.

use anyhow::Result;
use clap::Parser;
use handpen::cli::{Cli, Commands, OcrEngine};
use handpen::io;
use handpen::services::{NoRecognizer, Replay, TesseractCli, TextRecognizer};
use handpen::vision::Rasterizer;
use handpen::{HandPenApp, PenConfig, PenError, Pipeline, SessionState, ShapeUpdate};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = PenConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Replay {
            recording,
            ocr,
            tesseract_path,
            dump_canvas,
            save_trail,
        } => run_replay(
            &config,
            &recording,
            ocr,
            tesseract_path,
            dump_canvas.as_deref(),
            save_trail.as_deref(),
        ),
        Commands::Classify { trail } => run_classify(&config, &trail),
        Commands::Rasterize { trail, output } => run_rasterize(&config, &trail, &output),
    }
}

fn run_replay(
    config: &PenConfig,
    recording: &Path,
    ocr: OcrEngine,
    tesseract_path: PathBuf,
    dump_canvas: Option<&Path>,
    save_trail: Option<&Path>,
) -> Result<()> {
    let recording = io::serialization::import_recording(recording)?;
    let recognizer: Box<dyn TextRecognizer> = match ocr {
        OcrEngine::None => Box::new(NoRecognizer),
        OcrEngine::Tesseract => Box::new(TesseractCli::new(tesseract_path)),
    };

    let mut app = HandPenApp::new(config, recognizer);
    let frames = app.run(&mut Replay::new(recording))?;

    let session = app.session();
    println!("Frames: {}", frames);
    println!("Points: {}", session.trail().len());
    println!("Shape: {}", session.shape());
    println!("Text: {}", session.recognized_text());

    if let Some(path) = dump_canvas {
        io::media::save_canvas(&app.pipeline().render(session), path)?;
    }
    if let Some(path) = save_trail {
        io::serialization::export_trail(session.trail().snapshot(), path)?;
    }
    Ok(())
}

fn run_classify(config: &PenConfig, trail: &Path) -> Result<()> {
    let points = io::serialization::import_trail(trail)?;
    let mut session = SessionState::new();
    for point in points {
        session.append(point);
    }

    match Pipeline::new(config).classify_shape(&mut session) {
        Ok(ShapeUpdate::Updated(label)) => println!("{}", label),
        Ok(ShapeUpdate::Unchanged) => println!("{}", session.shape()),
        Err(e @ PenError::NotEnoughData { .. }) => println!("{}", e),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn run_rasterize(config: &PenConfig, trail: &Path, output: &Path) -> Result<()> {
    let points = io::serialization::import_trail(trail)?;
    let canvas = Rasterizer::new(&config.raster).rasterize(&points);
    io::media::save_canvas(&canvas, output)
}
