//! Border extrapolation for neighbourhood operators.

/// Maps an out-of-range coordinate with reflect-101 extrapolation:
/// `gfedcb|abcdefgh|gfedcba`.
#[inline]
pub(crate) fn reflect_101(p: isize, len: usize) -> usize {
    let len = len as isize;
    if len == 1 {
        return 0;
    }
    let mut p = p;
    loop {
        if p < 0 {
            p = -p;
        } else if p >= len {
            p = 2 * len - 2 - p;
        } else {
            return p as usize;
        }
    }
}

/// Clamps a coordinate to the image: `aaaaaa|abcdefgh|hhhhhhh`.
#[inline]
pub(crate) fn replicate(p: isize, len: usize) -> usize {
    p.clamp(0, len as isize - 1) as usize
}
