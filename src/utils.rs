pub fn align_up(size: usize, align: usize) -> usize {
    if size % align == 0 {
        return size;
    }

    let result = ((size / align) + 1) * align;

    assert!(result >= size);
    assert!(result % align == 0);

    result
}

// -- size of a mip level, never below 1
pub fn mip_extent(base: u32, level: u32) -> u32 {
    std::cmp::max(base >> level, 1)
}

// -- number of levels in a full chain down to 1x1
pub fn full_mip_count(width: u32, height: u32) -> u32 {
    let largest = std::cmp::max(width, height).max(1);
    32 - largest.leading_zeros()
}

pub fn as_bytes<T: Copy>(data: &[T]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(
            data.as_ptr() as *const u8,
            data.len() * std::mem::size_of::<T>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 256), 0);
        assert_eq!(align_up(16, 256), 256);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(1025, 512), 1536);
    }

    #[test]
    fn test_mip_counts() {
        assert_eq!(full_mip_count(4, 4), 3);
        assert_eq!(full_mip_count(1, 1), 1);
        assert_eq!(full_mip_count(512, 256), 10);
        assert_eq!(mip_extent(4, 2), 1);
        assert_eq!(mip_extent(4, 5), 1);
        assert_eq!(mip_extent(6, 1), 3);
    }

    #[test]
    fn test_as_bytes() {
        let data = [1.0f32, 2.0];
        assert_eq!(as_bytes(&data).len(), 8);
    }
}
