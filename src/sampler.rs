// The stylization stage: picks a substitute color for every pixel that is not an edge.
// Visual: whatever you see *between* the red outlines comes from here.
//
// Sixteen variants, cycled by `DownSampler::rotate`. Two of them (the cell blurs)
// remember one "seed" color per factor×factor cell in a small mask that lives
// across frames.

use crate::error::Error;
use crate::types::{Color, VideoFormat};

/// Default cell size used by the capture session.
pub const DEFAULT_FACTOR: usize = 16;

/// Per-cell reference colors for the blur-style samplers.
/// One entry per factor×factor cell, row-major, sized with ceiling division.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerMask {
    width: usize,
    height: usize,
    factor: usize,
    cells: Vec<Color>,
}

impl SamplerMask {
    pub fn new(format: &VideoFormat, factor: usize) -> Result<Self, Error> {
        if factor == 0 {
            return Err(Error::Config("down-sample factor must be at least 1".into()));
        }
        let width = format.width.div_ceil(factor);
        let height = format.height.div_ceil(factor);
        Ok(Self { width, height, factor, cells: vec![Color::default(); width * height] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn factor(&self) -> usize {
        self.factor
    }

    /// The top-left pixel of a cell anchors that cell's blur.
    #[inline]
    pub fn is_seed(&self, x: usize, y: usize) -> bool {
        x % self.factor == 0 && y % self.factor == 0
    }

    #[inline]
    pub fn cell_index(&self, x: usize, y: usize) -> usize {
        (y / self.factor) * self.width + x / self.factor
    }

    pub fn cell(&self, x: usize, y: usize) -> Color {
        self.cells[self.cell_index(x, y)]
    }

    pub fn set_cell(&mut self, x: usize, y: usize, color: Color) {
        let i = self.cell_index(x, y);
        self.cells[i] = color;
    }
}

/// The stylization variants, in rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerKind {
    PassThrough,
    CellBlur,
    WeightedCellBlur,
    Darkening,
    Brightening,
    Gray,
    ColorChannelSwap,
    ColorInversion,
    ColorMorph,
    PureBlack,
    PureWhite,
    Quantized,
    MoreQuantized,
    EvenMoreQuantized,
    WayMoreQuantized,
    Polarized,
}

impl SamplerKind {
    pub const ALL: [SamplerKind; 16] = [
        SamplerKind::PassThrough,
        SamplerKind::CellBlur,
        SamplerKind::WeightedCellBlur,
        SamplerKind::Darkening,
        SamplerKind::Brightening,
        SamplerKind::Gray,
        SamplerKind::ColorChannelSwap,
        SamplerKind::ColorInversion,
        SamplerKind::ColorMorph,
        SamplerKind::PureBlack,
        SamplerKind::PureWhite,
        SamplerKind::Quantized,
        SamplerKind::MoreQuantized,
        SamplerKind::EvenMoreQuantized,
        SamplerKind::WayMoreQuantized,
        SamplerKind::Polarized,
    ];

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name, shown in the window title.
    pub fn name(self) -> &'static str {
        match self {
            SamplerKind::PassThrough => "PassThrough",
            SamplerKind::CellBlur => "CellBlur",
            SamplerKind::WeightedCellBlur => "WeightedCellBlur",
            SamplerKind::Darkening => "Darkening",
            SamplerKind::Brightening => "Brightening",
            SamplerKind::Gray => "Gray",
            SamplerKind::ColorChannelSwap => "ColorChannelSwap",
            SamplerKind::ColorInversion => "ColorInversion",
            SamplerKind::ColorMorph => "ColorMorph",
            SamplerKind::PureBlack => "PureBlack",
            SamplerKind::PureWhite => "PureWhite",
            SamplerKind::Quantized => "Quantized",
            SamplerKind::MoreQuantized => "MoreQuantized",
            SamplerKind::EvenMoreQuantized => "EvenMoreQuantized",
            SamplerKind::WayMoreQuantized => "WayMoreQuantized",
            SamplerKind::Polarized => "Polarized",
        }
    }

    /// Substitute color for `pixel` at (x, y).
    /// Only the cell blurs touch `mask`, and only at seed pixels.
    pub fn apply(self, x: usize, y: usize, pixel: Color, mask: &mut SamplerMask) -> Color {
        match self {
            SamplerKind::PassThrough => pixel,
            SamplerKind::CellBlur => cell_blur(x, y, pixel, mask, |seed, cur| (seed * 2 + cur) / 3),
            SamplerKind::WeightedCellBlur => {
                cell_blur(x, y, pixel, mask, |seed, cur| (seed + cur * 2) / 3)
            }
            SamplerKind::Darkening => pixel.with_rgb(pixel.r >> 1, pixel.g >> 1, pixel.b >> 1),
            SamplerKind::Brightening => {
                pixel.with_rgb(brighten(pixel.r), brighten(pixel.g), brighten(pixel.b))
            }
            SamplerKind::Gray => {
                let gray = luminance(pixel) as u8;
                pixel.with_rgb(gray, gray, gray)
            }
            // Cyclic permutation: R <- G, G <- B, B <- R.
            SamplerKind::ColorChannelSwap => pixel.with_rgb(pixel.g, pixel.b, pixel.r),
            SamplerKind::ColorInversion => {
                pixel.with_rgb(255 - pixel.r, 255 - pixel.g, 255 - pixel.b)
            }
            SamplerKind::ColorMorph => color_morph(pixel),
            SamplerKind::PureBlack => pixel.with_rgb(0, 0, 0),
            SamplerKind::PureWhite => pixel.with_rgb(255, 255, 255),
            SamplerKind::Quantized => quantize(pixel, 16),
            SamplerKind::MoreQuantized => quantize(pixel, 32),
            SamplerKind::EvenMoreQuantized => quantize(pixel, 64),
            SamplerKind::WayMoreQuantized => quantize(pixel, 128),
            SamplerKind::Polarized => polarize(pixel),
        }
    }
}

/// Seeds store themselves and pass through; everything else in the cell mixes
/// with the stored seed. Alpha comes from the seed.
#[inline]
fn cell_blur(
    x: usize,
    y: usize,
    pixel: Color,
    mask: &mut SamplerMask,
    mix: impl Fn(u32, u32) -> u32,
) -> Color {
    if mask.is_seed(x, y) {
        mask.set_cell(x, y, pixel);
        return pixel;
    }
    let seed = mask.cell(x, y);
    seed.with_rgb(
        mix(seed.r as u32, pixel.r as u32) as u8,
        mix(seed.g as u32, pixel.g as u32) as u8,
        mix(seed.b as u32, pixel.b as u32) as u8,
    )
}

#[inline]
fn brighten(c: u8) -> u8 {
    ((c as u32) << 1).min(255) as u8
}

#[inline]
fn luminance(p: Color) -> u32 {
    (p.r as u32 + p.g as u32 + p.b as u32) / 3
}

#[inline]
fn quantize(p: Color, step: u8) -> Color {
    p.with_rgb((p.r / step) * step, (p.g / step) * step, (p.b / step) * step)
}

// Pairwise products of the normalized *input* channels.
fn color_morph(p: Color) -> Color {
    let r = p.r as f32 / 255.0;
    let g = p.g as f32 / 255.0;
    let b = p.b as f32 / 255.0;
    p.with_rgb((r * g * 255.0) as u8, (g * b * 255.0) as u8, (b * r * 255.0) as u8)
}

// The dark branch divides blue by 33, not 3. Kept as-is: existing output
// depends on the strong yellow cast it produces.
fn polarize(p: Color) -> Color {
    let (r, g, b) = (p.r as u32, p.g as u32, p.b as u32);
    if luminance(p) > 128 {
        p.with_rgb((r * 2 / 3) as u8, (g * 2 / 3) as u8, (b * 2 / 3) as u8)
    } else {
        p.with_rgb(
            ((r * 2 + 255) / 3) as u8,
            ((g * 2 + 255) / 3) as u8,
            ((b * 2 + 255) / 33) as u8,
        )
    }
}

/// The sampler stage handed to the edge detector: the selected variant plus
/// the cell mask it may update. Rebuilt whenever the video format changes.
#[derive(Debug, Clone)]
pub struct DownSampler {
    format: VideoFormat,
    mask: SamplerMask,
    selected: usize, // index into SamplerKind::ALL
}

impl DownSampler {
    pub fn new(format: VideoFormat, factor: usize) -> Result<Self, Error> {
        let mask = SamplerMask::new(&format, factor)?;
        Ok(Self { format, mask, selected: 0 })
    }

    #[inline]
    pub fn sample_pixel(&mut self, x: usize, y: usize, pixel: Color) -> Color {
        SamplerKind::ALL[self.selected].apply(x, y, pixel, &mut self.mask)
    }

    /// Next variant, wrapping after the last one.
    pub fn rotate(&mut self) {
        self.selected = (self.selected + 1) % SamplerKind::ALL.len();
    }

    pub fn select(&mut self, kind: SamplerKind) {
        self.selected = kind.index();
    }

    pub fn kind(&self) -> SamplerKind {
        SamplerKind::ALL[self.selected]
    }

    pub fn current_index(&self) -> usize {
        self.selected
    }

    pub fn current_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Window title for the current selection.
    pub fn title(&self) -> String {
        format!("Toon Up - {} {}", self.current_index(), self.current_name())
    }

    pub fn format(&self) -> VideoFormat {
        self.format
    }

    pub fn mask(&self) -> &SamplerMask {
        &self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler(kind: SamplerKind) -> DownSampler {
        let mut s =
            DownSampler::new(VideoFormat::packed(64, 48), DEFAULT_FACTOR).expect("valid sampler");
        s.select(kind);
        s
    }

    #[test]
    fn mask_dimensions_round_up() {
        let mask = SamplerMask::new(&VideoFormat::packed(33, 17), 16).expect("valid mask");
        assert_eq!((mask.width(), mask.height()), (3, 2));
        assert_eq!(mask.cell_index(32, 16), 5);
        assert_eq!(mask.cell_index(15, 15), 0);
    }

    #[test]
    fn zero_factor_is_rejected() {
        assert!(matches!(DownSampler::new(VideoFormat::packed(4, 4), 0), Err(Error::Config(_))));
    }

    #[test]
    fn rotation_wraps_after_sixteen_steps() {
        let mut s = sampler(SamplerKind::PassThrough);
        let mut seen = Vec::new();
        for _ in 0..16 {
            seen.push(s.current_name());
            s.rotate();
        }
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.current_name(), "PassThrough");
        assert_eq!(seen.len(), 16);
        assert_eq!(seen[15], "Polarized");
    }

    #[test]
    fn kinds_index_matches_rotation_order() {
        for (i, kind) in SamplerKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn title_shows_index_and_name() {
        let mut s = sampler(SamplerKind::PassThrough);
        s.rotate();
        assert_eq!(s.title(), "Toon Up - 1 CellBlur");
    }

    #[test]
    fn cell_blur_seed_passes_through_and_is_stored() {
        let mut s = sampler(SamplerKind::CellBlur);
        let seed = Color::rgb(30, 60, 90);
        assert_eq!(s.sample_pixel(16, 32, seed), seed);
        assert_eq!(s.mask().cell(16, 32), seed);
        assert_eq!(s.mask().cell(31, 47), seed);
    }

    #[test]
    fn cell_blur_mixes_with_stored_seed() {
        let mut s = sampler(SamplerKind::CellBlur);
        s.sample_pixel(0, 0, Color::rgb(30, 60, 90));
        let out = s.sample_pixel(3, 5, Color::rgb(0, 0, 255));
        assert_eq!(out, Color::rgb(20, 40, 145));
        // Non-seed pixels never update the mask.
        assert_eq!(s.mask().cell(3, 5), Color::rgb(30, 60, 90));
    }

    #[test]
    fn weighted_cell_blur_favors_current_pixel() {
        let mut s = sampler(SamplerKind::WeightedCellBlur);
        s.sample_pixel(0, 0, Color::rgb(30, 60, 90));
        let out = s.sample_pixel(1, 0, Color::rgb(0, 0, 255));
        assert_eq!(out, Color::rgb(10, 20, 200));
    }

    #[test]
    fn cell_blur_mask_persists_across_frames() {
        let mut s = sampler(SamplerKind::CellBlur);
        s.sample_pixel(0, 0, Color::rgb(90, 90, 90));
        // Next "frame" reads the cell before its seed is revisited.
        let out = s.sample_pixel(5, 5, Color::rgb(0, 0, 0));
        assert_eq!(out, Color::rgb(60, 60, 60));
    }

    #[test]
    fn light_and_dark_variants_keep_alpha() {
        let p = Color::from_argb(77, 201, 100, 3);
        let mut mask = SamplerMask::new(&VideoFormat::packed(1, 1), 1).expect("valid mask");
        let mut run = |kind: SamplerKind| kind.apply(0, 0, p, &mut mask);
        assert_eq!(run(SamplerKind::Darkening), Color::from_argb(77, 100, 50, 1));
        assert_eq!(run(SamplerKind::Brightening), Color::from_argb(77, 255, 200, 6));
        assert_eq!(run(SamplerKind::Gray), Color::from_argb(77, 101, 101, 101));
        assert_eq!(run(SamplerKind::PureBlack), Color::from_argb(77, 0, 0, 0));
        assert_eq!(run(SamplerKind::PureWhite), Color::from_argb(77, 255, 255, 255));
    }

    #[test]
    fn channel_swap_and_inversion() {
        let p = Color::from_argb(9, 1, 2, 3);
        let mut mask = SamplerMask::new(&VideoFormat::packed(1, 1), 1).expect("valid mask");
        let mut run = |kind: SamplerKind| kind.apply(0, 0, p, &mut mask);
        assert_eq!(run(SamplerKind::ColorChannelSwap), Color::from_argb(9, 2, 3, 1));
        assert_eq!(run(SamplerKind::ColorInversion), Color::from_argb(9, 254, 253, 252));
    }

    #[test]
    fn color_morph_multiplies_input_channels() {
        let mut mask = SamplerMask::new(&VideoFormat::packed(1, 1), 1).expect("valid mask");
        let out = SamplerKind::ColorMorph.apply(0, 0, Color::rgb(255, 255, 0), &mut mask);
        assert_eq!(out, Color::rgb(255, 0, 0));
        let white = SamplerKind::ColorMorph.apply(0, 0, Color::WHITE, &mut mask);
        assert_eq!(white, Color::WHITE);
        // 128/255 * 128/255 * 255 = 64.25, floored.
        let mid = SamplerKind::ColorMorph.apply(0, 0, Color::rgb(128, 128, 128), &mut mask);
        assert_eq!(mid, Color::rgb(64, 64, 64));
        // Uses the input channels: r*g, g*b, b*r.
        let mixed = SamplerKind::ColorMorph.apply(0, 0, Color::rgb(255, 128, 0), &mut mask);
        assert_eq!((mixed.g, mixed.b), (0, 0));
    }

    #[test]
    fn quantizers_floor_to_their_step() {
        let mut mask = SamplerMask::new(&VideoFormat::packed(1, 1), 1).expect("valid mask");
        let cases = [
            (SamplerKind::Quantized, 16u8),
            (SamplerKind::MoreQuantized, 32),
            (SamplerKind::EvenMoreQuantized, 64),
            (SamplerKind::WayMoreQuantized, 128),
        ];
        for (kind, step) in cases {
            for v in 0..=255u8 {
                let out = kind.apply(0, 0, Color::rgb(v, v, v), &mut mask);
                assert_eq!(out.r, (v / step) * step);
                assert!(out.r <= v);
                assert_eq!(out.r % step, 0);
                assert_eq!((out.g, out.b), (out.r, out.r));
            }
        }
    }

    #[test]
    fn polarized_splits_on_luminance() {
        let mut mask = SamplerMask::new(&VideoFormat::packed(1, 1), 1).expect("valid mask");
        assert_eq!(
            SamplerKind::Polarized.apply(0, 0, Color::WHITE, &mut mask),
            Color::rgb(170, 170, 170)
        );
        // Dark branch: blue uses the /33 divisor.
        assert_eq!(
            SamplerKind::Polarized.apply(0, 0, Color::BLACK, &mut mask),
            Color::rgb(85, 85, 7)
        );
        // Exactly 128 counts as dark.
        assert_eq!(
            SamplerKind::Polarized.apply(0, 0, Color::rgb(128, 128, 128), &mut mask),
            Color::rgb(170, 170, 15)
        );
    }
}
