// What you SEE:
// • Live camera feed with bold outlines wherever the image changes sharply.
// • Between the outlines, one of sixteen stylizations (blur cells, gray, posterize...).
// • Double-click (or Space) cycles the stylization; the title shows which one.
// • ESC quits.

mod camera;
mod draw;

use camera::CameraCapture;
use clap::Parser;
use draw::Drawer;
use log::{debug, error, info};
use std::time::{Duration, Instant};
use toon_up::logging::init_logger;
use toon_up::{Config, Error, FrameBuffer, ToonSession, VideoFormat};

fn main() {
    if let Err(e) = run() {
        error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    // clap prints --help / usage errors itself and exits.
    let cfg = Config::parse();
    cfg.validate()?;
    init_logger(cfg.log_level());
    info!(
        "threshold {} | edge color #{:06X} | cell factor {}",
        cfg.threshold,
        cfg.edge_color.to_0rgb(),
        cfg.factor
    );

    /* --- Camera + window setup ---
       Visual: window opens at the size the camera actually delivers. */
    let mut cam = CameraCapture::new(&cfg)?;
    let (w, h) = cam.resolution();
    let mut session = ToonSession::new(cfg);
    let mut drawer = Drawer::new(&session.title(), w as usize, h as usize)?;

    /* --- Reusable frame buffer ---
       Captured into, toonified in place, then presented. Reallocated only when
       the camera switches resolution. */
    let mut frame = FrameBuffer::new(VideoFormat::packed(w as usize, h as usize));

    // FPS / timing, reported once per second
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut busy_this_second = Duration::ZERO;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        // 1) Input first so the title updates before the next frame lands.
        if drawer.rotate_requested() {
            let title = session.rotate();
            drawer.set_title(&title);
        }

        // 2) Grab a fresh frame (blocks until the camera has one).
        if cam.next_frame(&mut frame)? {
            session.on_format_change(frame.format())?;
            drawer.set_title(&session.title());
        }

        // 3) Outline + stylize in place.
        let started = Instant::now();
        session.on_sample(&mut frame)?;
        busy_this_second += started.elapsed();

        // 4) Present.
        drawer.present(&frame)?;

        // 5) FPS + average processing time
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            let avg_ms = busy_this_second.as_secs_f32() * 1000.0 / frames_this_second as f32;
            debug!("FPS: {fps:.1} | toon pass {avg_ms:.2} ms/frame");
            frames_this_second = 0;
            busy_this_second = Duration::ZERO;
            last_fps_time = now;
        }
    }

    info!("window closed, stopping capture");
    Ok(())
}
