use super::*;

use std::fmt;

// -- returned instead of handing out a slot past the end of a heap
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SDescriptorHeapFull {
    pub type_: t12::EDescriptorHeapType,
    pub capacity: usize,
}

impl fmt::Display for SDescriptorHeapFull {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} descriptor heap is full ({} descriptors)",
            self.type_, self.capacity
        )
    }
}

impl std::error::Error for SDescriptorHeapFull {}

// -- append-only slot bookkeeping, nothing is ever freed
#[derive(Clone, Debug)]
pub struct SDescriptorBumpAllocator {
    type_: t12::EDescriptorHeapType,
    capacity: usize,
    next: usize,
}

impl SDescriptorBumpAllocator {
    pub fn new(type_: t12::EDescriptorHeapType, capacity: usize) -> Self {
        Self {
            type_: type_,
            capacity: capacity,
            next: 0,
        }
    }

    pub fn alloc(&mut self) -> Result<usize, SDescriptorHeapFull> {
        if self.next >= self.capacity {
            return Err(SDescriptorHeapFull {
                type_: self.type_,
                capacity: self.capacity,
            });
        }

        let result = self.next;
        self.next += 1;
        Ok(result)
    }

    pub fn allocated(&self) -> usize {
        self.next
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SDescriptorAllocation {
    pub index: usize,
    pub cpu: t12::SCPUDescriptorHandle,
    // -- only for shader visible heaps
    pub gpu: Option<t12::SGPUDescriptorHandle>,
}

pub struct SDescriptorHeap<B: TBackend> {
    raw: B::DescriptorHeap,

    allocator: SDescriptorBumpAllocator,
    descriptorsize: usize,
    cpu_start: t12::SCPUDescriptorHandle,
    gpu_start: Option<t12::SGPUDescriptorHandle>,
}

impl<B: TBackend> SDescriptorHeap<B> {
    pub fn new_from_raw(
        raw: B::DescriptorHeap,
        desc: &t12::SDescriptorHeapDesc,
        descriptorsize: usize,
    ) -> Self {
        let cpu_start = raw.getcpudescriptorhandleforheapstart();
        let gpu_start = if desc.shader_visible() {
            Some(raw.getgpudescriptorhandleforheapstart())
        } else {
            None
        };

        Self {
            raw: raw,
            allocator: SDescriptorBumpAllocator::new(desc.type_, desc.num_descriptors),
            descriptorsize: descriptorsize,
            cpu_start: cpu_start,
            gpu_start: gpu_start,
        }
    }

    pub fn raw(&self) -> &B::DescriptorHeap {
        &self.raw
    }

    pub fn descriptor_size(&self) -> usize {
        self.descriptorsize
    }

    pub fn allocated(&self) -> usize {
        self.allocator.allocated()
    }

    pub fn capacity(&self) -> usize {
        self.allocator.capacity()
    }

    pub fn alloc(&mut self) -> Result<SDescriptorAllocation, SDescriptorHeapFull> {
        let index = self.allocator.alloc()?;
        Ok(SDescriptorAllocation {
            index: index,
            cpu: self.cpu_handle(index),
            gpu: self.gpu_handle(index),
        })
    }

    pub fn cpu_handle(&self, index: usize) -> t12::SCPUDescriptorHandle {
        self.cpu_start.offset(index * self.descriptorsize)
    }

    pub fn gpu_handle(&self, index: usize) -> Option<t12::SGPUDescriptorHandle> {
        self.gpu_start
            .map(|start| start.offset(index * self.descriptorsize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::niced3d12::testbackend::*;

    #[test]
    fn test_bump_allocator_overflow() {
        let mut allocator =
            SDescriptorBumpAllocator::new(t12::EDescriptorHeapType::DepthStencil, 1);

        assert_eq!(allocator.alloc(), Ok(0));
        assert_eq!(
            allocator.alloc(),
            Err(SDescriptorHeapFull {
                type_: t12::EDescriptorHeapType::DepthStencil,
                capacity: 1,
            })
        );
        assert_eq!(allocator.allocated(), 1);
    }

    #[test]
    fn test_allocation_injective_and_increasing() {
        let ctx = STestContext::new();
        let mut heap = ctx
            .device
            .create_descriptor_heap(
                t12::EDescriptorHeapType::ConstantBufferShaderResourceUnorderedAccess,
                128,
                true,
            )
            .unwrap();

        let increment = heap.descriptor_size();
        let mut previous: Option<SDescriptorAllocation> = None;
        for i in 0..128 {
            let allocation = heap.alloc().unwrap();
            assert_eq!(allocation.index, i);

            if let Some(prev) = previous {
                assert_eq!(allocation.cpu.ptr, prev.cpu.ptr + increment);
                let gpu = allocation.gpu.unwrap();
                assert_eq!(gpu.ptr, prev.gpu.unwrap().ptr + increment as u64);
            }
            previous = Some(allocation);
        }

        let err = heap.alloc().unwrap_err();
        assert_eq!(err.capacity, 128);
    }

    #[test]
    fn test_non_shader_visible_heap_has_no_gpu_handles() {
        let ctx = STestContext::new();
        let mut heap = ctx
            .device
            .create_descriptor_heap(t12::EDescriptorHeapType::RenderTarget, 2, false)
            .unwrap();

        let first = heap.alloc().unwrap();
        let second = heap.alloc().unwrap();
        assert!(first.gpu.is_none());
        assert!(second.cpu > first.cpu);
        assert!(heap.alloc().is_err());
    }

    #[test]
    fn test_heap_full_downcasts_through_anyhow() {
        let ctx = STestContext::new();
        let mut heap = ctx
            .device
            .create_descriptor_heap(t12::EDescriptorHeapType::DepthStencil, 1, false)
            .unwrap();

        let alloc_two = |heap: &mut SDescriptorHeap<STestBackend>| -> anyhow::Result<()> {
            heap.alloc()?;
            heap.alloc()?;
            Ok(())
        };

        let err = alloc_two(&mut heap).unwrap_err();
        assert!(err.downcast_ref::<SDescriptorHeapFull>().is_some());
    }
}
