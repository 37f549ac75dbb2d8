// Still and animation encoding, delegated to the `image` codecs.

use std::io::{Seek, Write};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, ImageFormat, RgbaImage};

use crate::error::{Error, Result};

/// Options that only make sense for multi-frame output.
/// The default (all off / zero) is the only value a still export accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Spend more encoder effort on a better palette
    pub optimize: bool,
    /// Repeat forever instead of playing once
    pub looping: bool,
    /// Delay between frames, in milliseconds
    pub frame_duration_ms: u32,
}

impl ExportOptions {
    /// Name of the first animation-only option that is set, if any.
    pub fn animation_only_option(&self) -> Option<&'static str> {
        if self.optimize {
            Some("optimize")
        } else if self.looping {
            Some("loop")
        } else if self.frame_duration_ms != 0 {
            Some("frame duration")
        } else {
            None
        }
    }
}

/// What `Surface::save` should write.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptions {
    /// Explicit format; otherwise guessed from the file extension
    pub format: Option<ImageFormat>,
    /// On an animated surface, write only the current frame
    pub still_only: bool,
    pub export: ExportOptions,
}

// gif encoder speed: 1 is slowest/best quantization, 10 is the crate default
const GIF_SPEED_OPTIMIZED: i32 = 1;
const GIF_SPEED_DEFAULT: i32 = 10;

pub(crate) fn write_still<W: Write + Seek>(
    buffer: &RgbaImage,
    target: &mut W,
    format: ImageFormat,
) -> Result<()> {
    let image = DynamicImage::ImageRgba8(buffer.clone());
    // JPEG has no alpha channel
    let image = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ => image,
    };
    image.write_to(target, format)?;
    Ok(())
}

pub(crate) fn write_animation<W: Write>(
    frames: &[RgbaImage],
    target: W,
    format: ImageFormat,
    options: &ExportOptions,
) -> Result<()> {
    if format != ImageFormat::Gif {
        return Err(Error::UnsupportedOperation(format!(
            "animations can only be written as GIF, not {format:?}"
        )));
    }
    let speed = if options.optimize { GIF_SPEED_OPTIMIZED } else { GIF_SPEED_DEFAULT };
    let repeat = if options.looping { Repeat::Infinite } else { Repeat::Finite(0) };
    let delay = Delay::from_numer_denom_ms(options.frame_duration_ms, 1);

    // The trailer is written when the encoder drops at the end of this scope.
    let mut encoder = GifEncoder::new_with_speed(target, speed);
    encoder.set_repeat(repeat)?;
    encoder.encode_frames(
        frames
            .iter()
            .map(|f| Frame::from_parts(f.clone(), 0, 0, delay)),
    )?;
    Ok(())
}
