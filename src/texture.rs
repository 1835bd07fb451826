use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureTarget {
    #[default]
    Texture2d,
    Texture3d,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    #[default]
    Linear,
    LinearMipmapLinear,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureWrap {
    #[default]
    Repeat,
    Clamp,
}

/// Pixel layout of a decoded texture, chosen from the image's channel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    R,
    Rgb,
    Rgba,
}

/// Sampling parameters for a watched texture file. `size` is only meaningful
/// for 3D targets, where the file is a flat slice stack and the dimensions
/// cannot be inferred; 2D sizes come from the decoded image itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextureSettings {
    pub target: TextureTarget,
    pub filter: TextureFilter,
    pub wrap: TextureWrap,
    pub size: [u32; 3],
}

#[derive(Debug, Clone)]
pub struct DecodedTexture {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pixels: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum TextureError {
    /// Gray+alpha images have no matching GPU format here.
    #[error("unsupported channel count {0} (expected 1, 3 or 4)")]
    UnsupportedChannelCount(u8),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decode image bytes into a tightly packed pixel buffer. The channel count
/// picks the format: 1 is `R`, 3 is `Rgb`, 4 is `Rgba`; 2-channel images are
/// rejected.
pub fn decode_texture(bytes: &[u8]) -> Result<DecodedTexture, TextureError> {
    let decoded = image::load_from_memory(bytes)?;
    let channels = decoded.color().channel_count();
    let format = match channels {
        1 => PixelFormat::R,
        3 => PixelFormat::Rgb,
        4 => PixelFormat::Rgba,
        other => return Err(TextureError::UnsupportedChannelCount(other)),
    };

    let width = decoded.width();
    let height = decoded.height();
    let pixels = match format {
        PixelFormat::R => decoded.into_luma8().into_raw(),
        PixelFormat::Rgb => decoded.into_rgb8().into_raw(),
        PixelFormat::Rgba => decoded.into_rgba8().into_raw(),
    };

    Ok(DecodedTexture {
        width,
        height,
        format,
        pixels,
    })
}
