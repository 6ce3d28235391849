/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! Y800 and Y16 (greyscale) kernels.
//!
//! Y16 is little-endian with the 8-bit data in the high byte, so scaling
//! between the two widths is a byte shift. Conversions into chroma-bearing
//! formats write neutral chroma (128); conversions out simply drop chroma.

use crate::packed_to_packed::flip_row;
use crate::yuv_support::{pack_cljr, write_u32_le, PackedY422Order, PlanarView};

const NEUTRAL_CHROMA: u8 = 128;

#[inline(always)]
fn luma_stride(width: usize, stride: usize, wide: bool) -> usize {
    if stride != 0 {
        stride
    } else if wide {
        width * 2
    } else {
        width
    }
}

#[inline(always)]
fn read_luma(row: &[u8], x: usize, wide: bool) -> u8 {
    if wide {
        row[x * 2 + 1]
    } else {
        row[x]
    }
}

#[inline(always)]
fn write_luma(row: &mut [u8], x: usize, value: u8, wide: bool) {
    if wide {
        row[x * 2] = 0;
        row[x * 2 + 1] = value;
    } else {
        row[x] = value;
    }
}

pub(crate) fn luma_to_packed_422(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_order: PackedY422Order,
    src: &[u8],
    src_stride: usize,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width * 2 } else { dst_stride };
    let src_stride = luma_stride(width, src_stride, wide);
    let (y0, y1, u, v) = (
        dst_order.y0_offset(),
        dst_order.y1_offset(),
        dst_order.u_offset(),
        dst_order.v_offset(),
    );
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for px in 0..width / 2 {
            let d = &mut dst[d_base + px * 4..d_base + px * 4 + 4];
            d[y0] = read_luma(s_row, px * 2, wide);
            d[y1] = read_luma(s_row, px * 2 + 1, wide);
            d[u] = NEUTRAL_CHROMA;
            d[v] = NEUTRAL_CHROMA;
        }
    }
}

pub(crate) fn packed_422_to_luma(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    src_order: PackedY422Order,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = luma_stride(width, dst_stride, wide);
    let src_stride = if src_stride == 0 { width * 2 } else { src_stride };
    let (y0, y1) = (src_order.y0_offset(), src_order.y1_offset());
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for px in 0..width / 2 {
            let s = &s_row[px * 4..px * 4 + 4];
            write_luma(d_row, px * 2, s[y0], wide);
            write_luma(d_row, px * 2 + 1, s[y1], wide);
        }
    }
}

pub(crate) fn luma_to_planar(
    width: usize,
    height: usize,
    dst: &mut [u8],
    view: PlanarView,
    src: &[u8],
    src_stride: usize,
    wide: bool,
    flipped: bool,
) {
    let src_stride = luma_stride(width, src_stride, wide);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let dy = flip_row(y, height, flipped);
        for x in 0..width {
            dst[view.y_at(x, dy)] = read_luma(s_row, x, wide);
        }
    }
    for cy in 0..view.uv_height(height) {
        for cx in 0..view.uv_width(width) {
            dst[view.u_at(cx, cy)] = NEUTRAL_CHROMA;
            dst[view.v_at(cx, cy)] = NEUTRAL_CHROMA;
        }
    }
}

pub(crate) fn planar_to_luma(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    view: PlanarView,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = luma_stride(width, dst_stride, wide);
    for y in 0..height {
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for x in 0..width {
            write_luma(d_row, x, src[view.y_at(x, y)], wide);
        }
    }
}

pub(crate) fn luma_to_iyu1(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 {
        width * 12 / 8
    } else {
        dst_stride
    };
    let src_stride = luma_stride(width, src_stride, wide);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 4 {
            let d = &mut dst[d_base + bx * 6..d_base + bx * 6 + 6];
            d[0] = NEUTRAL_CHROMA;
            d[3] = NEUTRAL_CHROMA;
            d[1] = read_luma(s_row, bx * 4, wide);
            d[2] = read_luma(s_row, bx * 4 + 1, wide);
            d[4] = read_luma(s_row, bx * 4 + 2, wide);
            d[5] = read_luma(s_row, bx * 4 + 3, wide);
        }
    }
}

pub(crate) fn iyu1_to_luma(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = luma_stride(width, dst_stride, wide);
    let src_stride = if src_stride == 0 {
        width * 12 / 8
    } else {
        src_stride
    };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for bx in 0..width / 4 {
            let s = &s_row[bx * 6..bx * 6 + 6];
            write_luma(d_row, bx * 4, s[1], wide);
            write_luma(d_row, bx * 4 + 1, s[2], wide);
            write_luma(d_row, bx * 4 + 2, s[4], wide);
            write_luma(d_row, bx * 4 + 3, s[5], wide);
        }
    }
}

pub(crate) fn luma_to_iyu2(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width * 3 } else { dst_stride };
    let src_stride = luma_stride(width, src_stride, wide);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for x in 0..width {
            let d = &mut dst[d_base + x * 3..d_base + x * 3 + 3];
            d[0] = NEUTRAL_CHROMA;
            d[1] = read_luma(s_row, x, wide);
            d[2] = NEUTRAL_CHROMA;
        }
    }
}

pub(crate) fn iyu2_to_luma(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = luma_stride(width, dst_stride, wide);
    let src_stride = if src_stride == 0 { width * 3 } else { src_stride };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for x in 0..width {
            write_luma(d_row, x, s_row[x * 3 + 1], wide);
        }
    }
}

pub(crate) fn luma_to_y41p(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 {
        width / 8 * 12
    } else {
        dst_stride
    };
    let src_stride = luma_stride(width, src_stride, wide);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 8 {
            let d = &mut dst[d_base + bx * 12..d_base + bx * 12 + 12];
            d[0] = NEUTRAL_CHROMA;
            d[2] = NEUTRAL_CHROMA;
            d[4] = NEUTRAL_CHROMA;
            d[6] = NEUTRAL_CHROMA;
            for (i, slot) in [1usize, 3, 5, 7, 8, 9, 10, 11].into_iter().enumerate() {
                d[slot] = read_luma(s_row, bx * 8 + i, wide);
            }
        }
    }
}

pub(crate) fn y41p_to_luma(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = luma_stride(width, dst_stride, wide);
    let src_stride = if src_stride == 0 {
        width / 8 * 12
    } else {
        src_stride
    };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for bx in 0..width / 8 {
            let s = &s_row[bx * 12..bx * 12 + 12];
            for (i, slot) in [1usize, 3, 5, 7, 8, 9, 10, 11].into_iter().enumerate() {
                write_luma(d_row, bx * 8 + i, s[slot], wide);
            }
        }
    }
}

pub(crate) fn luma_to_cljr(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width } else { dst_stride };
    let src_stride = luma_stride(width, src_stride, wide);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 4 {
            write_u32_le(
                dst,
                d_base + bx * 4,
                pack_cljr(
                    NEUTRAL_CHROMA,
                    NEUTRAL_CHROMA,
                    read_luma(s_row, bx * 4, wide),
                    read_luma(s_row, bx * 4 + 1, wide),
                    read_luma(s_row, bx * 4 + 2, wide),
                    read_luma(s_row, bx * 4 + 3, wide),
                ),
            );
        }
    }
}

pub(crate) fn cljr_to_luma(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    wide: bool,
    flipped: bool,
) {
    use crate::yuv_support::{cljr_y, read_u32_le};
    let dst_stride = luma_stride(width, dst_stride, wide);
    let src_stride = if src_stride == 0 { width } else { src_stride };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for bx in 0..width / 4 {
            let word = read_u32_le(s_row, bx * 4);
            for i in 0..4 {
                write_luma(d_row, bx * 4 + i, cljr_y(word, i), wide);
            }
        }
    }
}

pub(crate) fn luma_to_ayuv(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width * 4 } else { dst_stride };
    let src_stride = luma_stride(width, src_stride, wide);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for x in 0..width {
            let d = &mut dst[d_base + x * 4..d_base + x * 4 + 4];
            d[0] = NEUTRAL_CHROMA;
            d[1] = NEUTRAL_CHROMA;
            d[2] = read_luma(s_row, x, wide);
            d[3] = 0xFF;
        }
    }
}

pub(crate) fn ayuv_to_luma(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = luma_stride(width, dst_stride, wide);
    let src_stride = if src_stride == 0 { width * 4 } else { src_stride };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for x in 0..width {
            write_luma(d_row, x, s_row[x * 4 + 2], wide);
        }
    }
}

/// Scales 8-bit luma up to 16-bit (data in the high byte).
pub(crate) fn y800_to_y16(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = luma_stride(width, dst_stride, true);
    let src_stride = luma_stride(width, src_stride, false);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for x in 0..width {
            write_luma(d_row, x, s_row[x], true);
        }
    }
}

/// Drops the low byte of 16-bit luma.
pub(crate) fn y16_to_y800(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = luma_stride(width, dst_stride, false);
    let src_stride = luma_stride(width, src_stride, true);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for x in 0..width {
            d_row[x] = read_luma(s_row, x, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yuv_support::PackedY422Order::YUY2;
    use crate::yuv_support::PlanarKind;

    #[test]
    fn y800_to_yuy2_writes_neutral_chroma() {
        let src = vec![10, 20, 30, 40];
        let mut dst = vec![0u8; 8];
        luma_to_packed_422(4, 1, &mut dst, 0, YUY2, &src, 0, false, false);
        assert_eq!(dst, vec![10, 128, 20, 128, 30, 128, 40, 128]);
    }

    #[test]
    fn y16_scales_by_byte_shift() {
        let src = vec![7, 9];
        let mut wide = vec![0u8; 4];
        y800_to_y16(2, 1, &mut wide, 0, &src, 0, false);
        assert_eq!(wide, vec![0, 7, 0, 9]);
        let mut back = vec![0u8; 2];
        y16_to_y800(2, 1, &mut back, 0, &wide, 0, false);
        assert_eq!(back, src);
    }

    #[test]
    fn y800_to_i420_neutralizes_the_chroma_planes() {
        let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
        let view = PlanarView::new(
            PlanarKind::Contiguous {
                decimation: 2,
                u_first: true,
            },
            4,
            4,
            0,
        );
        let mut dst = vec![0u8; 24];
        luma_to_planar(4, 4, &mut dst, view, &src, 0, false, false);
        assert_eq!(&dst[..16], &src[..]);
        assert!(dst[16..].iter().all(|&b| b == 128));
    }

    #[test]
    fn y41p_luma_round_trip() {
        let src: Vec<u8> = (0..8).map(|v| v * 9).collect();
        let mut y41p = vec![0u8; 12];
        luma_to_y41p(8, 1, &mut y41p, 0, &src, 0, false, false);
        let mut back = vec![0u8; 8];
        y41p_to_luma(8, 1, &mut back, 0, &y41p, 0, false, false);
        assert_eq!(back, src);
    }

    #[test]
    fn cljr_luma_keeps_high_five_bits() {
        let src = vec![0xFF, 0x80, 0x40, 0x08];
        let mut cljr = vec![0u8; 4];
        luma_to_cljr(4, 1, &mut cljr, 0, &src, 0, false, false);
        let mut back = vec![0u8; 4];
        cljr_to_luma(4, 1, &mut back, 0, &cljr, 0, false, false);
        assert_eq!(back, vec![0xF8, 0x80, 0x40, 0x08]);
    }
}
