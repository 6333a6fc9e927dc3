/// Spreads the low 16 bits of `x` over the even bit positions of the result.
/// Bits above the 16th are discarded.
#[inline]
pub fn intersperse_zeroes(x: u32) -> u32 {
    let mut x = x & 0x0000ffff;
    x = (x | (x << 8)) & 0x00ff00ff;
    x = (x | (x << 4)) & 0x0f0f0f0f;
    x = (x | (x << 2)) & 0x33333333;
    x = (x | (x << 1)) & 0x55555555;
    x
}

/// Morton code of a grid cell: `x` lands on the even bit planes, `y` on the odd ones.
#[inline]
pub fn interleave(x: u32, y: u32) -> u32 {
    intersperse_zeroes(x) | (intersperse_zeroes(y) << 1)
}

#[inline]
pub fn deinterleave_x(z: u32) -> u32 {
    let mut z = z & 0x55555555;
    z = (z | (z >> 1)) & 0x33333333;
    z = (z | (z >> 2)) & 0x0f0f0f0f;
    z = (z | (z >> 4)) & 0x00ff00ff;
    z = (z | (z >> 8)) & 0x0000ffff;
    z
}

#[inline]
pub fn deinterleave_y(z: u32) -> u32 {
    deinterleave_x(z >> 1)
}

pub fn deinterleave(z: u32) -> (u32, u32) {
    (deinterleave_x(z), deinterleave_y(z))
}

const DEBRUIJN_MUL: u32 = 0x07c4acdd;
const DEBRUIJN_TABLE: [u8; 32] = [
    0, 9, 1, 10, 13, 21, 2, 29, 11, 14, 16, 18, 22, 25, 3, 30,
    8, 12, 20, 28, 15, 17, 24, 7, 19, 27, 23, 6, 26, 5, 4, 31,
];

/// Index of the most significant set bit of `v`.
///
/// Rounds `v` up to the next `2^k - 1` and uses that as a de Bruijn lookup key.
/// The result for `v == 0` is meaningless (it happens to be 0).
#[inline]
pub fn highest_bit_position(mut v: u32) -> u32 {
    debug_assert!(v != 0);
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    DEBRUIJN_TABLE[(v.wrapping_mul(DEBRUIJN_MUL) >> 27) as usize] as u32
}
