// Run-time knobs. Defaults reproduce the classic look:
// 640x480 @ 30 fps, red outlines at threshold 32, 16-pixel blur cells.

use crate::error::Error;
use crate::sampler::DEFAULT_FACTOR;
use crate::types::Color;
use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "toon-up")]
#[command(about = "Cartoon-style live camera filter: edge outlines over a stylized frame")]
pub struct Config {
    /// Camera device index
    #[arg(long = "camera", default_value_t = 0)]
    pub camera_index: u32,

    /// Requested frame width; the device may pick something close
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Requested frame height
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Requested frame rate
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Edge metric at or above this paints the edge color
    #[arg(long, default_value_t = 32.0, allow_negative_numbers = true)]
    pub threshold: f32,

    /// Outline color as RRGGBB or #RRGGBB hex
    #[arg(long, default_value = "FF0000", value_parser = parse_hex_color)]
    pub edge_color: Color,

    /// Cell size for the blur samplers
    #[arg(long, default_value_t = DEFAULT_FACTOR)]
    pub factor: usize,

    /// Log per-second FPS and timing
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera_index: 0,
            width: 640,
            height: 480,
            fps: 30,
            threshold: 32.0,
            edge_color: Color::RED,
            factor: DEFAULT_FACTOR,
            verbose: false,
        }
    }
}

impl Config {
    /// Checks clap cannot express per flag.
    pub fn validate(&self) -> Result<(), Error> {
        if self.factor == 0 {
            return Err(Error::Config("--factor must be at least 1".into()));
        }
        if self.width == 0 || self.height == 0 || self.fps == 0 {
            return Err(Error::Config("--width, --height and --fps must be positive".into()));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(Error::Config(format!(
                "--threshold {} is not a usable value",
                self.threshold
            )));
        }
        Ok(())
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose { LevelFilter::Debug } else { LevelFilter::Info }
    }
}

/// "RRGGBB" or "#RRGGBB", always opaque.
pub fn parse_hex_color(s: &str) -> Result<Color, Error> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    let bad = || Error::Config(format!("edge color `{s}` is not RRGGBB hex"));
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let word = u32::from_str_radix(hex, 16).map_err(|_| bad())?;
    Ok(Color::rgb((word >> 16) as u8, (word >> 8) as u8, word as u8))
}
