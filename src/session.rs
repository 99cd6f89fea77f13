// One capture session: the sink that every camera frame goes through.
// Holds the sampler (and its cell mask) for the current video format and runs
// the edge pass in place on each delivered frame. One frame at a time.

use crate::config::Config;
use crate::edge;
use crate::error::Error;
use crate::sampler::DownSampler;
use crate::types::{FrameBuffer, VideoFormat};
use log::{debug, info};

pub struct ToonSession {
    config: Config,
    sampler: Option<DownSampler>, // None until the first format is known
}

impl ToonSession {
    pub fn new(config: Config) -> Self {
        Self { config, sampler: None }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn format(&self) -> Option<VideoFormat> {
        self.sampler.as_ref().map(DownSampler::format)
    }

    pub fn sampler(&self) -> Option<&DownSampler> {
        self.sampler.as_ref()
    }

    /// New format: fresh mask sized for it.
    ///
    /// The selected variant carries over rather than resetting to PassThrough,
    /// so a resolution switch does not undo the user's choice.
    pub fn on_format_change(&mut self, format: VideoFormat) -> Result<(), Error> {
        format.validate()?;
        let mut next = DownSampler::new(format, self.config.factor)?;
        if let Some(prev) = &self.sampler {
            next.select(prev.kind());
        }
        info!(
            "video format {}x{} stride {} -> mask {}x{} cells",
            format.width,
            format.height,
            format.stride,
            next.mask().width(),
            next.mask().height()
        );
        self.sampler = Some(next);
        Ok(())
    }

    /// Toonify one frame in place.
    pub fn on_sample(&mut self, frame: &mut FrameBuffer) -> Result<(), Error> {
        let format = frame.format();
        if self.format() != Some(format) {
            self.on_format_change(format)?;
        }
        let Some(sampler) = self.sampler.as_mut() else {
            return Err(Error::Frame("no sampler for the current format".into()));
        };

        edge::detect_in_place(
            frame.as_bytes_mut(),
            format.width,
            format.height,
            format.stride,
            self.config.threshold,
            self.config.edge_color,
            sampler,
        );
        Ok(())
    }

    /// Cycle to the next stylization; returns the new window title.
    /// Before the first frame there is nothing to rotate and the title stays put.
    pub fn rotate(&mut self) -> String {
        match self.sampler.as_mut() {
            Some(sampler) => {
                sampler.rotate();
                let title = sampler.title();
                info!("sampler -> {} {}", sampler.current_index(), sampler.current_name());
                title
            }
            None => {
                debug!("rotate ignored: no frame yet");
                self.title()
            }
        }
    }

    pub fn title(&self) -> String {
        match &self.sampler {
            Some(sampler) => sampler.title(),
            None => "Toon Up".to_string(),
        }
    }
}
