use log::{info, warn};
use sprite_splitter::config::split;
use sprite_splitter::image::io::{frame_file_name, load_rgba_image, save_rgba_png, write_json_file};
use sprite_splitter::metrics::has_meaningful_transparency;
use sprite_splitter::SpriteSplitter;
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = split::load_config(Path::new(&config_path))?;

    let sheet = load_rgba_image(&config.input)?;
    let transparent = has_meaningful_transparency(
        &sheet,
        config.transparency.alpha_ratio_threshold,
        config.transparency.alpha_value_threshold,
    )
    .map_err(|e| e.to_string())?;
    if !transparent {
        warn!(
            "{} has almost no transparency; background is estimated from the sheet edges",
            config.input.display()
        );
    }

    let splitter = SpriteSplitter::new(config.params.clone());
    let report = splitter
        .split_with_diagnostics(&sheet)
        .map_err(|e| format!("Failed to split {}: {e}", config.input.display()))?;
    info!("{}", report.trace.summary());

    let prefix = config.frame_prefix();
    for (i, frame) in report.result.frames.iter().enumerate() {
        let path = config
            .output
            .frames_dir
            .join(frame_file_name(&prefix, i + 1));
        save_rgba_png(&frame.image, &path)?;
    }
    println!(
        "Saved {} frames to {}",
        report.result.frames.len(),
        config.output.frames_dir.display()
    );

    if let Some(report_path) = &config.output.report_json {
        write_json_file(report_path, &report.trace)?;
        println!("Saved split report to {}", report_path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: split_demo <config.json>".to_string()
}
