use std::path::Path;

use anyhow::{bail, Context};
use log::info;

use crate::niced3d12 as n12;
use crate::typeyd3d12 as t12;
use crate::typeyd3d12::TBackend;
use crate::utils;

pub const TEXTURE_FORMAT: t12::EDXGIFormat = t12::EDXGIFormat::R8G8B8A8UNormSRGB;

// -- tightly packed RGBA8 mips, largest first, down to 1x1
pub struct STextureData {
    pub width: u32,
    pub height: u32,
    pub mips: Vec<Vec<u8>>,
}

impl STextureData {
    pub fn new_with_mips(width: u32, height: u32, rgba: Vec<u8>) -> anyhow::Result<Self> {
        if width == 0 || height == 0 {
            bail!("Texture must be non-empty, got {}x{}", width, height);
        }
        if rgba.len() != (width * height * 4) as usize {
            bail!(
                "Texture data is {} bytes, {}x{} RGBA8 needs {}",
                rgba.len(),
                width,
                height,
                width * height * 4
            );
        }

        let mipcount = utils::full_mip_count(width, height);
        let mut mips = Vec::with_capacity(mipcount as usize);
        mips.push(rgba);

        for level in 1..mipcount {
            let prev = &mips[(level - 1) as usize];
            let next = downsample_box(
                prev,
                utils::mip_extent(width, level - 1),
                utils::mip_extent(height, level - 1),
            );
            mips.push(next);
        }

        Ok(Self {
            width: width,
            height: height,
            mips: mips,
        })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Loading texture {}", path.display()))?
            .to_rgba8();
        let (width, height) = image.dimensions();

        let result = Self::new_with_mips(width, height, image.into_raw())?;
        info!(
            "Loaded texture {} ({}x{}, {} mips)",
            path.display(),
            width,
            height,
            result.mip_count()
        );
        Ok(result)
    }

    pub fn mip_count(&self) -> u16 {
        self.mips.len() as u16
    }

    pub fn mip_slices(&self) -> Vec<&[u8]> {
        self.mips.iter().map(|m| &m[..]).collect()
    }

    pub fn create_resource<B: TBackend>(
        &self,
        device: &n12::SDevice<B>,
    ) -> anyhow::Result<n12::SResource<B>> {
        device.create_committed_resource(
            t12::EHeapType::Default,
            &t12::SResourceDesc::create_texture_2d(
                self.width,
                self.height,
                self.mip_count(),
                TEXTURE_FORMAT,
                t12::SResourceFlags::NONE,
            ),
            t12::EResourceStates::CopyDest,
            None,
            n12::EResourceMetadata::Texture2DResource {
                width: self.width,
                height: self.height,
                mip_levels: self.mip_count(),
                format: TEXTURE_FORMAT,
            },
        )
    }
}

// -- 2x2 box filter, edge texels repeat when a dimension is odd or already 1
fn downsample_box(src: &[u8], srcwidth: u32, srcheight: u32) -> Vec<u8> {
    let dstwidth = std::cmp::max(srcwidth / 2, 1);
    let dstheight = std::cmp::max(srcheight / 2, 1);
    let mut dst = vec![0u8; (dstwidth * dstheight * 4) as usize];

    let texel = |x: u32, y: u32, c: u32| -> u32 {
        let x = std::cmp::min(x, srcwidth - 1);
        let y = std::cmp::min(y, srcheight - 1);
        src[((y * srcwidth + x) * 4 + c) as usize] as u32
    };

    for y in 0..dstheight {
        for x in 0..dstwidth {
            for c in 0..4 {
                let sum = texel(2 * x, 2 * y, c)
                    + texel(2 * x + 1, 2 * y, c)
                    + texel(2 * x, 2 * y + 1, c)
                    + texel(2 * x + 1, 2 * y + 1, c);
                dst[((y * dstwidth + x) * 4 + c) as usize] = ((sum + 2) / 4) as u8;
            }
        }
    }

    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mip_chain_sizes() {
        let texture = STextureData::new_with_mips(4, 4, vec![0; 64]).unwrap();
        assert_eq!(texture.mip_count(), 3);
        let sizes: Vec<usize> = texture.mips.iter().map(|m| m.len()).collect();
        assert_eq!(sizes, vec![64, 16, 4]);
    }

    #[test]
    fn test_non_square_chain() {
        let texture = STextureData::new_with_mips(4, 1, vec![0; 16]).unwrap();
        let sizes: Vec<usize> = texture.mips.iter().map(|m| m.len()).collect();
        assert_eq!(sizes, vec![16, 8, 4]);
    }

    #[test]
    fn test_box_filter_averages() {
        #[rustfmt::skip]
        let src = vec![
            0, 0, 0, 255,     255, 255, 255, 255,
            255, 255, 255, 255, 0, 0, 0, 255,
        ];
        let dst = downsample_box(&src, 2, 2);
        assert_eq!(dst, vec![128, 128, 128, 255]);
    }

    #[test]
    fn test_wrong_size_rejected() {
        assert!(STextureData::new_with_mips(2, 2, vec![0; 15]).is_err());
        assert!(STextureData::new_with_mips(0, 2, vec![]).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(STextureData::load(Path::new("no/such/texture.png")).is_err());
    }
}
