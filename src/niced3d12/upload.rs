use super::*;

use crate::utils;

pub const TEXTURE_DATA_PITCH_ALIGNMENT: usize = 256;
pub const TEXTURE_DATA_PLACEMENT_ALIGNMENT: usize = 512;

#[derive(Clone, Debug, PartialEq)]
pub struct SUploadLayout {
    pub footprints: Vec<t12::SPlacedSubresourceFootprint>,
    pub total_bytes: u64,
}

// -- where each mip of a 2D texture lands in a linear staging buffer: rows padded to the
// -- pitch alignment, subresources starting on the placement alignment
pub fn compute_upload_footprints(
    format: t12::EDXGIFormat,
    width: u32,
    height: u32,
    mip_levels: u32,
) -> SUploadLayout {
    let bytes_per_pixel = format.bytes_per_pixel();

    let mut footprints = Vec::with_capacity(mip_levels as usize);
    let mut offset: usize = 0;
    let mut total_bytes: usize = 0;

    for mip in 0..mip_levels {
        let mipwidth = utils::mip_extent(width, mip);
        let mipheight = utils::mip_extent(height, mip);

        let row_size = mipwidth as usize * bytes_per_pixel;
        let row_pitch = utils::align_up(row_size, TEXTURE_DATA_PITCH_ALIGNMENT);

        offset = utils::align_up(offset, TEXTURE_DATA_PLACEMENT_ALIGNMENT);
        footprints.push(t12::SPlacedSubresourceFootprint {
            offset: offset as u64,
            format: format,
            width: mipwidth,
            height: mipheight,
            row_pitch: row_pitch as u32,
            num_rows: mipheight,
            row_size_in_bytes: row_size as u64,
        });

        offset += row_pitch * mipheight as usize;
        total_bytes = offset;
    }

    SUploadLayout {
        footprints: footprints,
        total_bytes: total_bytes as u64,
    }
}

// -- A CPU visible buffer that a copy on the GPU reads from. It can only be let go with a
// -- completion for the ticket its upload was signalled on.
pub struct SStagingResource<B: TBackend> {
    resource: Option<SResource<B>>,
    size_in_bytes: u64,
    ticket: Option<u64>,
}

impl<B: TBackend> SStagingResource<B> {
    fn new(resource: SResource<B>, size_in_bytes: u64) -> Self {
        Self {
            resource: Some(resource),
            size_in_bytes: size_in_bytes,
            ticket: None,
        }
    }

    pub fn size_in_bytes(&self) -> u64 {
        self.size_in_bytes
    }

    pub fn ticket(&self) -> Option<u64> {
        self.ticket
    }

    pub fn is_released(&self) -> bool {
        self.resource.is_none()
    }

    // -- closes the list holding the copies, submits it and signals, so the ticket kept here is
    // -- always one the upload itself was signalled on
    pub fn submit(
        &mut self,
        list: &mut SCommandList<B>,
        queue: &SCommandQueue<B>,
        fence: &mut SFence<B>,
    ) -> anyhow::Result<u64> {
        if let Some(ticket) = self.ticket {
            bail!("Staging resource upload already submitted on ticket {}", ticket);
        }

        list.close()?;
        queue.execute_command_list(list)?;
        let ticket = fence.signal(queue)?;
        self.ticket = Some(ticket);
        Ok(ticket)
    }

    pub fn release(&mut self, completion: &SFenceCompletion) -> anyhow::Result<()> {
        let ticket = match self.ticket {
            Some(t) => t,
            None => bail!("Staging resource released before its upload was signalled"),
        };

        if !completion.covers(ticket) {
            bail!(
                "Staging resource released with completion {} before its ticket {}",
                completion.value(),
                ticket
            );
        }

        if self.resource.take().is_some() {
            debug!(
                "Released {} byte staging resource after ticket {}",
                self.size_in_bytes, ticket
            );
        }
        Ok(())
    }
}

impl<B: TBackend> Drop for SStagingResource<B> {
    fn drop(&mut self) {
        // -- the GPU may still be reading it, leaking is the only safe option
        if let Some(resource) = self.resource.take() {
            error!(
                "Staging resource of {} bytes dropped without a fence completion, leaking it",
                self.size_in_bytes
            );
            std::mem::forget(resource);
        }
    }
}

// -- Records the copy of every mip into destination, which must be a CopyDest 2D texture, and
// -- the transition to GenericRead. mips are tightly packed rows, largest first. The list goes
// -- to the GPU through SStagingResource::submit on the returned staging resource.
pub fn upload_texture<B: TBackend>(
    device: &SDevice<B>,
    list: &mut SCommandList<B>,
    destination: &mut SResource<B>,
    mips: &[&[u8]],
) -> anyhow::Result<SStagingResource<B>> {
    let (width, height, mip_levels, format) = match destination.metadata() {
        EResourceMetadata::Texture2DResource {
            width,
            height,
            mip_levels,
            format,
        } => (*width, *height, *mip_levels as u32, *format),
        _ => bail!("Texture upload destination is not a 2D texture"),
    };

    if mips.len() != mip_levels as usize {
        bail!(
            "Texture has {} mips but {} were supplied",
            mip_levels,
            mips.len()
        );
    }

    let layout = compute_upload_footprints(format, width, height, mip_levels);

    let mut stagingbytes = vec![0u8; layout.total_bytes as usize];
    for (footprint, mipdata) in layout.footprints.iter().zip(mips.iter()) {
        let row_size = footprint.row_size_in_bytes as usize;
        if mipdata.len() != row_size * footprint.num_rows as usize {
            bail!(
                "Mip of {}x{} needs {} bytes, got {}",
                footprint.width,
                footprint.height,
                row_size * footprint.num_rows as usize,
                mipdata.len()
            );
        }

        for row in 0..footprint.num_rows as usize {
            let dst = footprint.offset as usize + row * footprint.row_pitch as usize;
            let src = row * row_size;
            stagingbytes[dst..dst + row_size].copy_from_slice(&mipdata[src..src + row_size]);
        }
    }

    let staging = device.create_committed_resource(
        t12::EHeapType::Upload,
        &t12::SResourceDesc::create_buffer(layout.total_bytes as usize),
        t12::EResourceStates::GenericRead,
        None,
        EResourceMetadata::BufferResource {
            count: layout.total_bytes as usize,
            sizeofentry: 1,
        },
    )?;
    staging.write_bytes(0, &stagingbytes)?;

    for (mip, footprint) in layout.footprints.iter().enumerate() {
        list.copy_buffer_to_texture(destination, mip as u32, &staging, footprint)?;
    }

    list.transition_resource(
        destination,
        t12::EResourceStates::CopyDest,
        t12::EResourceStates::GenericRead,
    )?;

    info!(
        "Recorded upload of {}x{} texture, {} mips, {} staging bytes",
        width, height, mip_levels, layout.total_bytes
    );

    Ok(SStagingResource::new(staging, layout.total_bytes))
}

// -- persistent CPU writable buffer initialised with data, used for vertices and constants
pub fn create_upload_buffer<B: TBackend, T: Copy>(
    device: &SDevice<B>,
    data: &[T],
) -> anyhow::Result<SResource<B>> {
    let sizeofentry = std::mem::size_of::<T>();
    let bytes = utils::as_bytes(data);

    let buffer = device.create_committed_resource(
        t12::EHeapType::Upload,
        &t12::SResourceDesc::create_buffer(bytes.len()),
        t12::EResourceStates::GenericRead,
        None,
        EResourceMetadata::BufferResource {
            count: data.len(),
            sizeofentry: sizeofentry,
        },
    )?;
    buffer.write_bytes(0, bytes)?;

    trace!("Created {} byte upload buffer", bytes.len());
    Ok(buffer)
}
