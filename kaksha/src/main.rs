//! Run a synthetic room through the depth mapping pipeline.
//!
//! ```bash
//! kaksha --frames 90 --output output/
//! RUST_LOG=debug kaksha --config configs/config.yaml --sensor-hz 60
//! ```
//!
//! Writes `intensity.png` (last processed frame) and `flat_map.png` to the
//! output directory.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use kaksha::io::{save_flat_map_png, save_intensity_png};
use kaksha::{
    DepthMapper, FrameOutcome, KakshaConfig, Point2D, SensorStatus, SimulationConfig,
    SyntheticRoom,
};

#[derive(Parser)]
#[command(author, version, about = "Depth frames to a top-down band map and k-d tree index")]
struct Args {
    /// YAML configuration (default: configs/config.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to generate
    #[arg(short, long, default_value = "90")]
    frames: usize,

    /// Simulated sensor frame rate (Hz)
    #[arg(long, default_value = "30")]
    sensor_hz: f32,

    /// Output directory for PNG images
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Noise seed (0 = random)
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Disable range noise and dropouts
    #[arg(long)]
    clean: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => KakshaConfig::load(path)?,
        None => KakshaConfig::load_default()?,
    };

    let mut mapper = DepthMapper::from_config(&config)?;

    let mut sim_config = SimulationConfig {
        sensor_hz: args.sensor_hz,
        ..SimulationConfig::default()
    };
    if !args.clean {
        sim_config = sim_config.with_noise(args.seed);
    }
    let intrinsics = config.sensor.to_intrinsics();
    let mut room = SyntheticRoom::new(sim_config, intrinsics, mapper.pose());

    log::info!("kaksha starting...");
    log::info!(
        "  Sensor: {}x{} @ {} Hz, focal {} px",
        intrinsics.width,
        intrinsics.height,
        args.sensor_hz,
        intrinsics.focal_length_px
    );
    log::info!(
        "  Camera: ({:.2}, {:.2}, {:.2}) yaw {:.3}",
        config.camera.x,
        config.camera.y,
        config.camera.z,
        config.camera.yaw
    );
    log::info!("  Target rate: {} fps", config.scheduler.target_fps);
    log::info!(
        "  Map: {}x{} cells over {}x{} m",
        config.map.columns,
        config.map.rows,
        config.map.extent_width_m,
        config.map.extent_height_m
    );

    mapper.set_sensor_status(SensorStatus::Running);

    let mut processed = 0usize;
    let mut dropped = 0usize;
    let mut skipped = 0usize;
    for _ in 0..args.frames {
        let frame = room.next_frame();
        match mapper.process_frame(&frame) {
            FrameOutcome::Processed(_) => processed += 1,
            FrameOutcome::Dropped => dropped += 1,
            FrameOutcome::Skipped(_) => skipped += 1,
        }
    }
    mapper.set_sensor_status(SensorStatus::NotAvailable);

    let totals = mapper.totals();
    log::info!(
        "Frames: {} processed, {} dropped, {} skipped (acceptance {:.0}%)",
        processed,
        dropped,
        skipped,
        mapper.scheduler().acceptance_rate() * 100.0
    );
    if processed > 0 {
        log::info!(
            "Per frame: {} in range, {} out of range, {} out of band",
            totals.in_range / processed,
            totals.out_of_range / processed,
            totals.out_of_band / processed
        );
    }
    for (band, count) in config.bands.iter().zip(&totals.band_points) {
        log::info!("  Band {:<8} {} points", band.name, count);
    }
    log::info!(
        "Cells written {}, off-map {}, painted now {}",
        totals.cells_written,
        totals.cells_dropped,
        mapper.flat_map().read().painted_count()
    );

    if let Some(tree) = mapper.index().map_tree() {
        let camera = mapper.pose().position.to_2d();
        if let Some(hit) = tree.nearest(&camera) {
            log::info!(
                "Nearest indexed point to camera: ({:.3}, {:.3}) at {:.3} m",
                hit.point.x,
                hit.point.y,
                hit.distance()
            );
        }
        let nearby = tree.within_radius(&Point2D::new(camera.x, camera.y + 1.5), 0.25);
        log::info!("{} indexed points within 0.25 m of camera + 1.5 m in Y", nearby.len());
    }

    std::fs::create_dir_all(&args.output)?;
    save_intensity_png(
        &args.output.join("intensity.png"),
        mapper.intensity(),
        intrinsics.width,
        intrinsics.height,
    )?;
    save_flat_map_png(&args.output.join("flat_map.png"), &mapper.flat_map().read())?;

    Ok(())
}
