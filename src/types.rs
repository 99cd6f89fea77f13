// Core value types shared by the pipeline: colors, video formats and raw frames.
// Frames are BGRA bytes, exactly what the capture side hands over.

use crate::error::Error;

/// Bytes per pixel in a frame buffer, laid out as [B, G, R, A].
pub const BYTES_PER_PIXEL: usize = 4;

/// Four 8-bit channels. Passed around by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Same alpha, new RGB. Most samplers only touch the color channels.
    #[inline]
    pub const fn with_rgb(self, r: u8, g: u8, b: u8) -> Self {
        Self { a: self.a, r, g, b }
    }

    /// Pack as 0x00RRGGBB (the window's native pixel word).
    #[inline]
    pub fn to_0rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Shape of the frames a capture session delivers.
/// Fixed for a session; a change means every per-format buffer is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFormat {
    pub width: usize,
    pub height: usize,
    pub stride: usize, // bytes per row, >= width * 4
}

impl VideoFormat {
    /// Rows with no padding.
    pub fn packed(width: usize, height: usize) -> Self {
        Self { width, height, stride: width * BYTES_PER_PIXEL }
    }

    pub fn byte_len(&self) -> usize {
        self.height * self.stride
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.stride < self.width * BYTES_PER_PIXEL {
            return Err(Error::Frame(format!(
                "stride {} is shorter than a {}-pixel row",
                self.stride, self.width
            )));
        }
        Ok(())
    }
}

/// Read the pixel at (x, y) from a BGRA buffer.
#[inline]
pub fn read_color(buf: &[u8], x: usize, y: usize, stride: usize) -> Color {
    let i = y * stride + x * BYTES_PER_PIXEL;
    Color::from_argb(buf[i + 3], buf[i + 2], buf[i + 1], buf[i])
}

/// Write `color` to (x, y) in a BGRA buffer.
#[inline]
pub fn write_color(buf: &mut [u8], x: usize, y: usize, stride: usize, color: Color) {
    let i = y * stride + x * BYTES_PER_PIXEL;
    buf[i] = color.b;
    buf[i + 1] = color.g;
    buf[i + 2] = color.r;
    buf[i + 3] = color.a;
}

/// One video frame. Allocated once per format and reused every frame;
/// the pipeline rewrites it in place.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    format: VideoFormat,
    data: Vec<u8>, // length >= format.height * format.stride
}

impl FrameBuffer {
    /// Zero-filled (transparent black) frame.
    pub fn new(format: VideoFormat) -> Self {
        Self { format, data: vec![0u8; format.byte_len()] }
    }

    /// Wrap bytes that already hold a frame.
    pub fn from_vec(format: VideoFormat, data: Vec<u8>) -> Result<Self, Error> {
        format.validate()?;
        if data.len() < format.byte_len() {
            return Err(Error::Frame(format!(
                "buffer holds {} bytes, format needs {}",
                data.len(),
                format.byte_len()
            )));
        }
        Ok(Self { format, data })
    }

    /// Frame of a single color.
    pub fn filled(format: VideoFormat, color: Color) -> Self {
        let mut frame = Self::new(format);
        for y in 0..format.height {
            for x in 0..format.width {
                frame.set_pixel(x, y, color);
            }
        }
        frame
    }

    pub fn format(&self) -> VideoFormat {
        self.format
    }

    pub fn width(&self) -> usize {
        self.format.width
    }

    pub fn height(&self) -> usize {
        self.format.height
    }

    pub fn stride(&self) -> usize {
        self.format.stride
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        read_color(&self.data, x, y, self.format.stride)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        write_color(&mut self.data, x, y, self.format.stride, color);
    }

    /// Switch to `format`, reallocating only if it actually differs.
    /// Returns true when a reallocation happened (old pixels are gone).
    pub fn reformat(&mut self, format: VideoFormat) -> bool {
        if self.format == format {
            return false;
        }
        self.format = format;
        self.data = vec![0u8; format.byte_len()];
        true
    }
}
