// Pixel format glue between the camera, the pipeline and the window.
// camera: RGB image -> BGRA frame (what the pipeline works on)
// window: BGRA frame -> 0x00RRGGBB words (what minifb shows)

use crate::types::{Color, FrameBuffer, VideoFormat};
use image::RgbImage;

/// Copy a decoded camera image into `frame` as opaque BGRA.
/// Returns true when the frame had to be reallocated for a new size.
pub fn rgb_into_frame(rgb: &RgbImage, frame: &mut FrameBuffer) -> bool {
    let (w, h) = rgb.dimensions();
    let changed = frame.reformat(VideoFormat::packed(w as usize, h as usize));

    for (x, y, pixel) in rgb.enumerate_pixels() {
        // Each `pixel` is Rgb<u8>; alpha is always full for camera frames.
        frame.set_pixel(x as usize, y as usize, Color::rgb(pixel[0], pixel[1], pixel[2]));
    }
    changed
}

/// Pack a processed frame for the window, reusing `out`.
pub fn frame_to_0rgb(frame: &FrameBuffer, out: &mut Vec<u32>) {
    out.clear();
    out.reserve(frame.width() * frame.height());
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            out.push(frame.pixel(x, y).to_0rgb());
        }
    }
}
