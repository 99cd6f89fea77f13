// Opens the camera and fills the reusable BGRA frame the pipeline works on.
// Visual expectation: every `next_frame()` call leaves the newest camera image
// in the frame buffer, ready for the toon pass.

use toon_up::convert::rgb_into_frame;
use toon_up::{Config, Error, FrameBuffer};

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// A small wrapper around nokhwa::Camera so our main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open the configured camera near the requested resolution and frame rate.
    /// No device (or no usable format) aborts start-up: there is nothing to toonify.
    pub fn new(cfg: &Config) -> Result<Self, Error> {
        let idx = CameraIndex::Index(cfg.camera_index);

        let fmt = CameraFormat::new(
            Resolution::new(cfg.width, cfg.height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            cfg.fps,
        );

        // Ask for RGB frames in the format closest to our request.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera {}: {e}", cfg.camera_index)))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();
        log::info!(
            "camera {} streaming {}x{} (asked for {}x{} @ {} fps)",
            cfg.camera_index,
            actual.width(),
            actual.height(),
            cfg.width,
            cfg.height,
            cfg.fps
        );

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Grab one frame into `frame` (blocks until the camera has one).
    /// Returns true when the frame size changed and the buffer was reallocated.
    pub fn next_frame(&mut self, frame: &mut FrameBuffer) -> Result<bool, Error> {
        let raw = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        // Decode to an ImageBuffer<Rgb<u8>, Vec<u8>> (handles various raw formats safely).
        let rgb_img = raw
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let changed = rgb_into_frame(&rgb_img, frame);
        if changed {
            let (w, h) = rgb_img.dimensions();
            self.width = w;
            self.height = h;
        }
        Ok(changed)
    }

    /// Report the resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
