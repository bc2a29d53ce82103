use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Errors from loading texture images.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to load texture {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("texture {0} has zero size")]
    Empty(PathBuf),
}

/// How a texture repeats outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    ClampToEdge,
    Repeat,
}

impl Wrap {
    fn address_mode(self) -> wgpu::AddressMode {
        match self {
            Self::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            Self::Repeat => wgpu::AddressMode::Repeat,
        }
    }
}

/// Decode an image file to RGBA8, optionally flipping rows so the first row
/// is the bottom of the picture.
pub fn load_image(path: impl AsRef<Path>, flip_vertically: bool) -> Result<RgbaImage, TextureError> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = if flip_vertically {
        decoded.flipv()
    } else {
        decoded
    };
    let rgba = decoded.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(TextureError::Empty(path.to_path_buf()));
    }
    tracing::debug!(
        "loaded texture {} ({}x{})",
        path.display(),
        rgba.width(),
        rgba.height()
    );
    Ok(rgba)
}

/// Load an image, or log the failure and substitute a checkerboard so the
/// scene still renders.
pub fn load_or_checkerboard(path: impl AsRef<Path>, flip_vertically: bool) -> RgbaImage {
    match load_image(path, flip_vertically) {
        Ok(image) => image,
        Err(e) => {
            tracing::error!("{e}; using checkerboard");
            checkerboard(64, 8, [200, 120, 40, 255], [40, 40, 40, 255])
        }
    }
}

/// Square two-color checkerboard of `size` pixels with `cell`-pixel squares.
pub fn checkerboard(size: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> RgbaImage {
    let cell = cell.max(1);
    RgbaImage::from_fn(size.max(1), size.max(1), |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Rgba(a)
        } else {
            Rgba(b)
        }
    })
}

/// A texture uploaded to the GPU, ready to bind.
pub struct GpuTexture {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    /// Upload `image` as an sRGB texture with nearest filtering and the given wrap.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        wrap: Wrap,
        label: &str,
    ) -> Self {
        let (width, height) = image.dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let address_mode = wrap.address_mode();
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            sampler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    #[test]
    fn checkerboard_alternates_cells() {
        let img = checkerboard(4, 2, RED, BLUE);
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(img.get_pixel(0, 0).0, RED);
        assert_eq!(img.get_pixel(2, 0).0, BLUE);
        assert_eq!(img.get_pixel(2, 2).0, RED);
    }

    #[test]
    fn missing_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(dir.path().join("container.jpg"), false).unwrap_err();
        assert!(matches!(err, TextureError::Decode { .. }));
        assert!(err.to_string().contains("container.jpg"));
    }

    #[test]
    fn fallback_is_used_when_decoding_fails() {
        let dir = tempfile::tempdir().unwrap();
        let img = load_or_checkerboard(dir.path().join("awesomeface.png"), true);
        assert_eq!(img.dimensions(), (64, 64));
    }

    #[test]
    fn flip_reverses_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stripes.png");
        let mut img = RgbaImage::new(1, 2);
        img.put_pixel(0, 0, Rgba(RED));
        img.put_pixel(0, 1, Rgba(BLUE));
        img.save(&path).unwrap();

        let upright = load_image(&path, false).unwrap();
        assert_eq!(upright.get_pixel(0, 0).0, RED);

        let flipped = load_image(&path, true).unwrap();
        assert_eq!(flipped.get_pixel(0, 0).0, BLUE);
        assert_eq!(flipped.get_pixel(0, 1).0, RED);
    }
}
