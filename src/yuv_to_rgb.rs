/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! YUV sources into the RGB layouts.
//!
//! Chroma is replicated across its lattice cell (nearest sample) and every
//! pixel runs through [`fast_yuv_to_rgb`]. Greyscale sources replicate raw
//! luma into all three channels without touching the colorspace matrix.
//! The transparent formats map their opacity bit onto the alpha channel.

use crate::colorspace::fast_yuv_to_rgb;
use crate::packed_to_packed::flip_row;
use crate::rgb_to_rgb::write_rgb;
use crate::yuv_support::{cljr_u, cljr_v, cljr_y, read_u32_le, PackedY422Order, PlanarView, RgbLayout};

#[inline(always)]
fn rgb_stride(width: usize, stride: usize, layout: RgbLayout) -> usize {
    if stride == 0 {
        width * layout.bytes_per_pixel()
    } else {
        stride
    }
}

#[inline(always)]
fn bit_alpha(luma: u8, from_bit: bool) -> u8 {
    if !from_bit || luma & 1 == 1 {
        0xFF
    } else {
        0x00
    }
}

pub(crate) fn packed_422_to_rgb(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_layout: RgbLayout,
    src: &[u8],
    src_stride: usize,
    src_order: PackedY422Order,
    flipped: bool,
    alpha_from_bit: bool,
) {
    let dst_stride = rgb_stride(width, dst_stride, dst_layout);
    let src_stride = if src_stride == 0 { width * 2 } else { src_stride };
    let (y0, y1, u, v) = (
        src_order.y0_offset(),
        src_order.y1_offset(),
        src_order.u_offset(),
        src_order.v_offset(),
    );
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for px in 0..width / 2 {
            let s = &s_row[px * 4..px * 4 + 4];
            for (i, luma) in [s[y0], s[y1]].into_iter().enumerate() {
                let (r, g, b) = fast_yuv_to_rgb(luma, s[u], s[v]);
                write_rgb(
                    d_row,
                    px * 2 + i,
                    dst_layout,
                    r,
                    g,
                    b,
                    bit_alpha(luma, alpha_from_bit),
                );
            }
        }
    }
}

pub(crate) fn planar_to_rgb(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_layout: RgbLayout,
    src: &[u8],
    view: PlanarView,
    flipped: bool,
) {
    let dst_stride = rgb_stride(width, dst_stride, dst_layout);
    for y in 0..height {
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        let cy = y / view.vdec;
        for x in 0..width {
            let cx = x / view.hdec;
            let (r, g, b) = fast_yuv_to_rgb(
                src[view.y_at(x, y)],
                src[view.u_at(cx, cy)],
                src[view.v_at(cx, cy)],
            );
            write_rgb(d_row, x, dst_layout, r, g, b, 0xFF);
        }
    }
}

pub(crate) fn iyu1_to_rgb(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_layout: RgbLayout,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = rgb_stride(width, dst_stride, dst_layout);
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
            for (i, luma) in [s[1], s[2], s[4], s[5]].into_iter().enumerate() {
                let (r, g, b) = fast_yuv_to_rgb(luma, s[0], s[3]);
                write_rgb(d_row, bx * 4 + i, dst_layout, r, g, b, 0xFF);
            }
        }
    }
}

pub(crate) fn iyu2_to_rgb(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_layout: RgbLayout,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = rgb_stride(width, dst_stride, dst_layout);
    let src_stride = if src_stride == 0 { width * 3 } else { src_stride };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for x in 0..width {
            let s = &s_row[x * 3..x * 3 + 3];
            let (r, g, b) = fast_yuv_to_rgb(s[1], s[0], s[2]);
            write_rgb(d_row, x, dst_layout, r, g, b, 0xFF);
        }
    }
}

pub(crate) fn ayuv_to_rgb(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_layout: RgbLayout,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = rgb_stride(width, dst_stride, dst_layout);
    let src_stride = if src_stride == 0 { width * 4 } else { src_stride };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for x in 0..width {
            let s = &s_row[x * 4..x * 4 + 4];
            let (r, g, b) = fast_yuv_to_rgb(s[2], s[1], s[0]);
            write_rgb(d_row, x, dst_layout, r, g, b, s[3]);
        }
    }
}

pub(crate) fn y41p_to_rgb(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_layout: RgbLayout,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
    alpha_from_bit: bool,
) {
    let dst_stride = rgb_stride(width, dst_stride, dst_layout);
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
            let cells = [
                (s[0], s[2], [s[1], s[3], s[5], s[7]]),
                (s[4], s[6], [s[8], s[9], s[10], s[11]]),
            ];
            for (cell, (u, v, luma)) in cells.into_iter().enumerate() {
                for (i, ly) in luma.into_iter().enumerate() {
                    let (r, g, b) = fast_yuv_to_rgb(ly, u, v);
                    write_rgb(
                        d_row,
                        bx * 8 + cell * 4 + i,
                        dst_layout,
                        r,
                        g,
                        b,
                        bit_alpha(ly, alpha_from_bit),
                    );
                }
            }
        }
    }
}

pub(crate) fn cljr_to_rgb(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_layout: RgbLayout,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = rgb_stride(width, dst_stride, dst_layout);
    let src_stride = if src_stride == 0 { width } else { src_stride };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for bx in 0..width / 4 {
            let word = read_u32_le(s_row, bx * 4);
            for i in 0..4 {
                let (r, g, b) = fast_yuv_to_rgb(cljr_y(word, i), cljr_u(word), cljr_v(word));
                write_rgb(d_row, bx * 4 + i, dst_layout, r, g, b, 0xFF);
            }
        }
    }
}

/// Y800/Y16 to RGB replicates the raw luma byte into R, G and B.
pub(crate) fn luma_to_rgb(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_layout: RgbLayout,
    src: &[u8],
    src_stride: usize,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = rgb_stride(width, dst_stride, dst_layout);
    let src_stride = if src_stride != 0 {
        src_stride
    } else if wide {
        width * 2
    } else {
        width
    };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        let d_row = &mut dst[d_base..];
        for x in 0..width {
            let luma = if wide { s_row[x * 2 + 1] } else { s_row[x] };
            write_rgb(d_row, x, dst_layout, luma, luma, luma, 0xFF);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorspace::fast_yuv_to_rgb;

    #[test]
    fn uyvy_grey_decodes_through_the_fast_function() {
        let (er, eg, eb) = fast_yuv_to_rgb(128, 128, 128);
        let src = vec![128u8; 2 * 2 * 2]; // 2x2 UYVY, everything 128
        let mut dst = vec![0u8; 2 * 2 * 4];
        packed_422_to_rgb(
            2,
            2,
            &mut dst,
            0,
            RgbLayout::Rgb32,
            &src,
            0,
            PackedY422Order::UYVY,
            false,
            false,
        );
        for px in dst.chunks_exact(4) {
            assert_eq!(px, &[eb, eg, er, 0xFF]);
        }
    }

    #[test]
    fn y800_to_rgb_replicates_raw_luma() {
        let src = vec![100u8, 200];
        let mut dst = vec![0u8; 8];
        luma_to_rgb(2, 1, &mut dst, 0, RgbLayout::Rgb32, &src, 0, false, false);
        assert_eq!(&dst[..4], &[100, 100, 100, 0xFF]);
        assert_eq!(&dst[4..], &[200, 200, 200, 0xFF]);
    }

    #[test]
    fn y42t_bit_drives_rgba_alpha() {
        let src = vec![128, 129, 128, 128]; // UYVY carrier, Y0 opaque, Y1 not
        let mut dst = vec![0u8; 8];
        packed_422_to_rgb(
            2,
            1,
            &mut dst,
            0,
            RgbLayout::Rgba,
            &src,
            0,
            PackedY422Order::UYVY,
            false,
            true,
        );
        assert_eq!(dst[3], 0xFF);
        assert_eq!(dst[7], 0x00);
    }

    #[test]
    fn ayuv_alpha_carries_through() {
        let src = vec![128, 128, 50, 77]; // V,U,Y,A
        let mut dst = vec![0u8; 4];
        ayuv_to_rgb(1, 1, &mut dst, 0, RgbLayout::Rgba, &src, 0, false);
        assert_eq!(dst[3], 77);
    }

    #[test]
    fn planar_chroma_replicates_within_the_cell() {
        // 2x2 I420: one chroma sample must color all four pixels alike.
        let mut src = vec![120u8; 4];
        src.push(90); // U
        src.push(170); // V
        let view = PlanarView::new(
            crate::yuv_support::PlanarKind::Contiguous {
                decimation: 2,
                u_first: true,
            },
            2,
            2,
            0,
        );
        let mut dst = vec![0u8; 16];
        planar_to_rgb(2, 2, &mut dst, 0, RgbLayout::Rgb32, &src, view, false);
        let first = &dst[..4].to_vec();
        for px in dst.chunks_exact(4) {
            assert_eq!(px, &first[..]);
        }
    }
}
