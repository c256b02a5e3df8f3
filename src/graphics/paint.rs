use anyhow::{Result, ensure};
use image::{DynamicImage, ImageBuffer, Rgba};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::code::Code;
use crate::tape::{TRACKS, Track};

/// Five-level tape is 11/16" wide.
const TAPE_WIDTH_IN: f32 = 0.6875;
/// Frame and track spacing.
const PITCH_IN: f32 = 0.1;
/// Blank tape before the first and after the last frame.
const LEADER_IN: f32 = 0.3;
const DATA_HOLE_DIAMETER_IN: f32 = 0.072;
const SPROCKET_HOLE_DIAMETER_IN: f32 = 0.046;
/// Upper bound on the RGBA buffer, 256 MiB.
const MAX_IMAGE_PIXELS: u64 = 64 * 1024 * 1024;

/// Tape stock colours for PNG rendering.
#[derive(Debug, Clone, Copy, Default)]
pub enum TapeImageStyle {
    #[default]
    Paper,
    /// Yellow oiled tape.
    Oiled,
}

/// Options controlling PNG generation.
#[derive(Debug, Clone, Copy)]
pub struct TapeImageOptions {
    pub style: TapeImageStyle,
    pub dpi: u32,
}

impl Default for TapeImageOptions {
    fn default() -> Self {
        Self {
            style: TapeImageStyle::Paper,
            dpi: 300,
        }
    }
}

struct Palette {
    tape_bg: Rgba<u8>,
    hole: Rgba<u8>,
    sprocket: Rgba<u8>,
    edge: Rgba<u8>,
}

/// Render frames as a strip of punched tape. DPI is clamped to 72..=1200.
pub fn render_tape_image(frames: &[Code], options: &TapeImageOptions) -> Result<DynamicImage> {
    let dpi = options.dpi.clamp(72, 1200);
    let palette = palette(options.style);
    let dpi_f = dpi as f32;

    let pitch = PITCH_IN * dpi_f;
    let leader = LEADER_IN * dpi_f;
    let width_px = (2.0 * leader + frames.len() as f32 * pitch).round() as u32;
    let height_px = inches_to_px(TAPE_WIDTH_IN, dpi);
    ensure!(
        u64::from(width_px) * u64::from(height_px) <= MAX_IMAGE_PIXELS,
        "tape of {} frames is too long for a {} DPI image",
        frames.len(),
        dpi
    );

    let mut tape_img = ImageBuffer::from_pixel(width_px, height_px, palette.tape_bg);

    let bottom = (height_px - 1) as f32;
    let right = (width_px.max(1) - 1) as f32;
    draw_line_segment_mut(&mut tape_img, (0.0, 0.0), (right, 0.0), palette.edge);
    draw_line_segment_mut(&mut tape_img, (0.0, bottom), (right, bottom), palette.edge);

    let track_span = PITCH_IN * (TRACKS.len() - 1) as f32;
    let top_margin = (TAPE_WIDTH_IN - track_span) / 2.0 * dpi_f;
    let data_radius = ((DATA_HOLE_DIAMETER_IN * dpi_f / 2.0).round() as i32).max(2);
    let sprocket_radius = ((SPROCKET_HOLE_DIAMETER_IN * dpi_f / 2.0).round() as i32).max(1);

    for (frame_idx, frame) in frames.iter().enumerate() {
        let center_x = (leader + (frame_idx as f32 + 0.5) * pitch).round() as i32;
        for (row_idx, track) in TRACKS.iter().enumerate() {
            let center_y = (top_margin + row_idx as f32 * pitch).round() as i32;
            match *track {
                Track::Sprocket => draw_filled_circle_mut(
                    &mut tape_img,
                    (center_x, center_y),
                    sprocket_radius,
                    palette.sprocket,
                ),
                Track::Data(bit) if frame.bit(bit) => draw_filled_circle_mut(
                    &mut tape_img,
                    (center_x, center_y),
                    data_radius,
                    palette.hole,
                ),
                Track::Data(_) => {}
            }
        }
    }

    Ok(DynamicImage::ImageRgba8(tape_img))
}

fn inches_to_px(inches: f32, dpi: u32) -> u32 {
    (inches * dpi as f32).round() as u32
}

fn palette(style: TapeImageStyle) -> Palette {
    match style {
        TapeImageStyle::Paper => Palette {
            tape_bg: rgba(0xf4, 0xee, 0xdc, 0xff),
            hole: rgba(0x1d, 0x1b, 0x18, 0xff),
            sprocket: rgba(0x3a, 0x36, 0x30, 0xff),
            edge: rgba(0xb8, 0xad, 0x94, 0xff),
        },
        TapeImageStyle::Oiled => Palette {
            tape_bg: rgba(0xf2, 0xd8, 0x7a, 0xff),
            hole: rgba(0x22, 0x1c, 0x10, 0xff),
            sprocket: rgba(0x40, 0x34, 0x1c, 0xff),
            edge: rgba(0xc9, 0xa8, 0x45, 0xff),
        },
    }
}

fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}
