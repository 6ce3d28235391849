/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! Kernels that only permute bytes: packed 4:2:2 to packed 4:2:2, identity
//! row copies, field interlacing, and the transparent-format opacity pass.

use crate::yuv_support::PackedY422Order;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::ParallelSliceMut;

#[inline(always)]
pub(crate) fn flip_row(y: usize, height: usize, flipped: bool) -> usize {
    if flipped {
        height - 1 - y
    } else {
        y
    }
}

/// Copies one packed 4:2:2 stream into another, re-ordering the four bytes
/// of each macropixel. No arithmetic is involved.
pub(crate) fn packed_422_to_packed_422(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_order: PackedY422Order,
    src: &[u8],
    src_stride: usize,
    src_order: PackedY422Order,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width * 2 } else { dst_stride };
    let src_stride = if src_stride == 0 { width * 2 } else { src_stride };

    let (in_y0, in_y1, in_u, in_v) = (
        src_order.y0_offset(),
        src_order.y1_offset(),
        src_order.u_offset(),
        src_order.v_offset(),
    );
    let (out_y0, out_y1, out_u, out_v) = (
        dst_order.y0_offset(),
        dst_order.y1_offset(),
        dst_order.u_offset(),
        dst_order.v_offset(),
    );

    let rows = &mut dst[..dst_stride * height];

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = rows.par_chunks_exact_mut(dst_stride);
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = rows.chunks_exact_mut(dst_stride);
    }

    iter.enumerate().for_each(|(y, dst_row)| {
        let src_row = &src[flip_row(y, height, flipped) * src_stride..];
        for x in 0..width / 2 {
            let s = &src_row[x * 4..x * 4 + 4];
            let d = &mut dst_row[x * 4..x * 4 + 4];
            d[out_y0] = s[in_y0];
            d[out_y1] = s[in_y1];
            d[out_u] = s[in_u];
            d[out_v] = s[in_v];
        }
    });
}

/// Byte-for-byte copy of `row_bytes` per row; the identity transform.
pub(crate) fn copy_rows(
    height: usize,
    row_bytes: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { row_bytes } else { dst_stride };
    let src_stride = if src_stride == 0 { row_bytes } else { src_stride };
    for y in 0..height {
        let d = flip_row(y, height, flipped) * dst_stride;
        let s = y * src_stride;
        dst[d..d + row_bytes].copy_from_slice(&src[s..s + row_bytes]);
    }
}

/// Re-orders progressive rows into two fields: even rows first, odd rows
/// after them.
pub(crate) fn progressive_to_interlaced(
    height: usize,
    row_bytes: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    debug_assert_eq!(height & 1, 0, "field interlacing needs an even height");
    let half = height / 2;
    for y in 0..height {
        let field_row = if y & 1 == 0 { y / 2 } else { half + y / 2 };
        let d = flip_row(field_row, height, flipped) * dst_stride;
        let s = y * src_stride;
        dst[d..d + row_bytes].copy_from_slice(&src[s..s + row_bytes]);
    }
}

/// Inverse of [`progressive_to_interlaced`].
pub(crate) fn interlaced_to_progressive(
    height: usize,
    row_bytes: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    debug_assert_eq!(height & 1, 0, "field interlacing needs an even height");
    let half = height / 2;
    for y in 0..height {
        let field_row = if y & 1 == 0 { y / 2 } else { half + y / 2 };
        let d = flip_row(y, height, flipped) * dst_stride;
        let s = field_row * src_stride;
        dst[d..d + row_bytes].copy_from_slice(&src[s..s + row_bytes]);
    }
}

/// Sets the transparency bit (bit 0) of every Y sample of a packed 4:2:2
/// buffer in UYVY order. Conversions into Y42T run this after the carrier
/// kernel.
pub(crate) fn set_opacity_bits_422(width: usize, height: usize, buf: &mut [u8], stride: usize) {
    let stride = if stride == 0 { width * 2 } else { stride };
    for y in 0..height {
        let row = &mut buf[y * stride..y * stride + width * 2];
        for x in 0..width / 2 {
            row[x * 4 + 1] |= 0x01;
            row[x * 4 + 3] |= 0x01;
        }
    }
}

/// Same for the Y41P layout (Y bytes at 1,3,5,7,8,9,10,11 of each 12-byte
/// group); used by conversions into Y41T.
pub(crate) fn set_opacity_bits_y41p(width: usize, height: usize, buf: &mut [u8], stride: usize) {
    let stride = if stride == 0 { width / 8 * 12 } else { stride };
    for y in 0..height {
        let row = &mut buf[y * stride..y * stride + width / 8 * 12];
        for group in row.chunks_exact_mut(12) {
            for &i in &[1usize, 3, 5, 7, 8, 9, 10, 11] {
                group[i] |= 0x01;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yuv_support::PackedY422Order::{UYVY, VYUY, YUY2, YVYU};

    fn sample_row() -> Vec<u8> {
        // Two YUY2 macropixels: (y0 y1 u v) = (10 20 30 40), (50 60 70 80)
        vec![10, 30, 20, 40, 50, 70, 60, 80]
    }

    #[test]
    fn yuy2_to_uyvy_permutes_each_macropixel() {
        let src = sample_row();
        let mut dst = vec![0u8; 8];
        packed_422_to_packed_422(4, 1, &mut dst, 0, UYVY, &src, 0, YUY2, false);
        assert_eq!(dst, vec![30, 10, 40, 20, 70, 50, 80, 60]);
    }

    #[test]
    fn permutation_round_trip_is_identity() {
        let src = sample_row();
        for order in [UYVY, YVYU, VYUY] {
            let mut mid = vec![0u8; 8];
            let mut back = vec![0u8; 8];
            packed_422_to_packed_422(4, 1, &mut mid, 0, order, &src, 0, YUY2, false);
            packed_422_to_packed_422(4, 1, &mut back, 0, YUY2, &mid, 0, order, false);
            assert_eq!(back, src, "{:?} round trip", order);
        }
    }

    #[test]
    fn flipped_reverses_destination_rows() {
        let mut src = sample_row();
        src.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let mut dst = vec![0u8; 16];
        packed_422_to_packed_422(4, 2, &mut dst, 0, YUY2, &src, 0, YUY2, true);
        assert_eq!(&dst[..8], &src[8..]);
        assert_eq!(&dst[8..], &src[..8]);
    }

    #[test]
    fn interlace_round_trip_is_identity() {
        let src: Vec<u8> = (0..6 * 4).map(|v| v as u8).collect();
        let mut fields = vec![0u8; src.len()];
        let mut back = vec![0u8; src.len()];
        progressive_to_interlaced(6, 4, &mut fields, 4, &src, 4, false);
        // Even rows land in the top field.
        assert_eq!(&fields[..4], &src[..4]);
        assert_eq!(&fields[4..8], &src[8..12]);
        assert_eq!(&fields[12..16], &src[4..8]);
        interlaced_to_progressive(6, 4, &mut back, 4, &fields, 4, false);
        assert_eq!(back, src);
    }

    #[test]
    fn opacity_pass_touches_only_y_bytes() {
        let mut buf = vec![0u8; 8];
        set_opacity_bits_422(4, 1, &mut buf, 0);
        assert_eq!(buf, vec![0, 1, 0, 1, 0, 1, 0, 1]);
    }
}
