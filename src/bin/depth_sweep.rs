use depth_highlight::config::sweep::load_config;
use depth_highlight::diagnostics::{FrameRecord, InputDescriptor, SweepManifest, TimingBreakdown};
use depth_highlight::image::io::{save_color_image, write_json_file};
use depth_highlight::sequence::RenderedFrame;
use depth_highlight::{Error, Result, Scene};
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = env::args()
        .nth(1)
        .ok_or_else(|| Error::Config(usage()))?;
    let config = load_config(Path::new(&config_path))?;

    let mut timings = TimingBreakdown::default();
    let scene = timings.measure("load", || Scene::open(&config.depth, &config.image))?;
    let input = InputDescriptor::from_scene(&scene);
    if !input.depth_stats.is_normalized() {
        log::warn!(
            "depth values span [{}, {}], outside the [0, 1] target range",
            input.depth_stats.min,
            input.depth_stats.max
        );
    }

    let frames = timings.measure("render", || config.render(&scene))?;
    let records = timings.measure("export", || export_frames(&frames, &config.output.frames_dir))?;

    println!(
        "Saved {} frame(s) to {} ({}x{}, {:.1} ms)",
        records.len(),
        config.output.frames_dir.display(),
        input.width,
        input.height,
        timings.total_ms
    );

    if let Some(path) = &config.output.manifest_json {
        let manifest = SweepManifest {
            input,
            tolerance: config.tolerance,
            frames: records,
            timings,
        };
        write_json_file(path, &manifest)?;
        println!("Manifest written to {}", path.display());
    }

    Ok(())
}

fn export_frames(frames: &[RenderedFrame], dir: &Path) -> Result<Vec<FrameRecord>> {
    frames
        .iter()
        .map(|frame| {
            let path = frame_path(dir, frame.label.index);
            save_color_image(&frame.image, &path)?;
            Ok(FrameRecord::from_frame(frame, Some(path)))
        })
        .collect()
}

fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("frame_{index:04}.png"))
}

fn usage() -> String {
    "Usage: depth_sweep <config.json>".to_string()
}
