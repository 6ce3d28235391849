/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! RGB sources into the YUV families.
//!
//! Every pixel runs through [`fast_rgb_to_yuv`]; chroma is then averaged
//! over whatever lattice cell the destination uses (pairs, 2x2, 4x4 or a
//! 4:1:1 run of four). Palettized sources resolve through the caller's
//! palette before conversion.

use crate::colorspace::fast_rgb_to_yuv;
use crate::packed_to_packed::flip_row;
use crate::rgb_to_rgb::{read_rgb, PixelSource};
use crate::yuv_support::{pack_cljr, write_u32_le, PackedY422Order, PlanarView};

#[inline(always)]
fn pixel_yuv(row: &[u8], x: usize, source: PixelSource<'_>) -> (u8, u8, u8) {
    let (r, g, b, _) = read_rgb(row, x, source);
    fast_rgb_to_yuv(r, g, b)
}

/// Average the chroma of `count` horizontally adjacent pixels, returning
/// the per-pixel luma alongside.
#[inline]
fn row_cell(
    row: &[u8],
    x0: usize,
    count: usize,
    source: PixelSource<'_>,
    luma: &mut [u8],
) -> (u8, u8) {
    let mut u_sum = 0u16;
    let mut v_sum = 0u16;
    for (i, slot) in luma.iter_mut().enumerate().take(count) {
        let (y, u, v) = pixel_yuv(row, x0 + i, source);
        *slot = y;
        u_sum += u as u16;
        v_sum += v as u16;
    }
    let shift = count.trailing_zeros();
    ((u_sum >> shift) as u8, (v_sum >> shift) as u8)
}

pub(crate) fn rgb_to_packed_422(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_order: PackedY422Order,
    src: &[u8],
    src_stride: usize,
    source: PixelSource<'_>,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width * 2 } else { dst_stride };
    let src_stride = if src_stride == 0 {
        source.min_stride(width)
    } else {
        src_stride
    };
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
            let mut luma = [0u8; 2];
            let (cu, cv) = row_cell(s_row, px * 2, 2, source, &mut luma);
            let d = &mut dst[d_base + px * 4..d_base + px * 4 + 4];
            d[y0] = luma[0];
            d[y1] = luma[1];
            d[u] = cu;
            d[v] = cv;
        }
    }
}

pub(crate) fn rgb_to_planar(
    width: usize,
    height: usize,
    dst: &mut [u8],
    view: PlanarView,
    src: &[u8],
    src_stride: usize,
    source: PixelSource<'_>,
    flipped: bool,
) {
    let src_stride = if src_stride == 0 {
        source.min_stride(width)
    } else {
        src_stride
    };
    let uv_height = view.uv_height(height);
    for cy in 0..uv_height {
        let dcy = flip_row(cy, uv_height, flipped);
        for cx in 0..view.uv_width(width) {
            let mut u_sum = 0u16;
            let mut v_sum = 0u16;
            for row in 0..view.vdec {
                let sy = cy * view.vdec + row;
                let s_row = &src[sy * src_stride..];
                let dy = flip_row(sy, height, flipped);
                for col in 0..view.hdec {
                    let x = cx * view.hdec + col;
                    let (py, pu, pv) = pixel_yuv(s_row, x, source);
                    dst[view.y_at(x, dy)] = py;
                    u_sum += pu as u16;
                    v_sum += pv as u16;
                }
            }
            let shift = (view.hdec * view.vdec).trailing_zeros();
            dst[view.u_at(cx, dcy)] = (u_sum >> shift) as u8;
            dst[view.v_at(cx, dcy)] = (v_sum >> shift) as u8;
        }
    }
}

pub(crate) fn rgb_to_iyu1(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    source: PixelSource<'_>,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 {
        width * 12 / 8
    } else {
        dst_stride
    };
    let src_stride = if src_stride == 0 {
        source.min_stride(width)
    } else {
        src_stride
    };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 4 {
            let mut luma = [0u8; 4];
            let (cu, cv) = row_cell(s_row, bx * 4, 4, source, &mut luma);
            let d = &mut dst[d_base + bx * 6..d_base + bx * 6 + 6];
            d[0] = cu;
            d[3] = cv;
            d[1] = luma[0];
            d[2] = luma[1];
            d[4] = luma[2];
            d[5] = luma[3];
        }
    }
}

pub(crate) fn rgb_to_iyu2(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    source: PixelSource<'_>,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width * 3 } else { dst_stride };
    let src_stride = if src_stride == 0 {
        source.min_stride(width)
    } else {
        src_stride
    };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for x in 0..width {
            let (py, pu, pv) = pixel_yuv(s_row, x, source);
            let d = &mut dst[d_base + x * 3..d_base + x * 3 + 3];
            d[0] = pu;
            d[1] = py;
            d[2] = pv;
        }
    }
}

pub(crate) fn rgb_to_ayuv(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    source: PixelSource<'_>,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width * 4 } else { dst_stride };
    let src_stride = if src_stride == 0 {
        source.min_stride(width)
    } else {
        src_stride
    };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for x in 0..width {
            let (r, g, b, a) = read_rgb(s_row, x, source);
            let (py, pu, pv) = fast_rgb_to_yuv(r, g, b);
            let d = &mut dst[d_base + x * 4..d_base + x * 4 + 4];
            d[0] = pv;
            d[1] = pu;
            d[2] = py;
            d[3] = a;
        }
    }
}

pub(crate) fn rgb_to_y41p(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    source: PixelSource<'_>,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 {
        width / 8 * 12
    } else {
        dst_stride
    };
    let src_stride = if src_stride == 0 {
        source.min_stride(width)
    } else {
        src_stride
    };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 8 {
            let mut first = [0u8; 4];
            let mut second = [0u8; 4];
            let (u0, v0) = row_cell(s_row, bx * 8, 4, source, &mut first);
            let (u4, v4) = row_cell(s_row, bx * 8 + 4, 4, source, &mut second);
            let d = &mut dst[d_base + bx * 12..d_base + bx * 12 + 12];
            d[0] = u0;
            d[2] = v0;
            d[4] = u4;
            d[6] = v4;
            d[1] = first[0];
            d[3] = first[1];
            d[5] = first[2];
            d[7] = first[3];
            d[8] = second[0];
            d[9] = second[1];
            d[10] = second[2];
            d[11] = second[3];
        }
    }
}

pub(crate) fn rgb_to_cljr(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    source: PixelSource<'_>,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width } else { dst_stride };
    let src_stride = if src_stride == 0 {
        source.min_stride(width)
    } else {
        src_stride
    };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 4 {
            let mut luma = [0u8; 4];
            let (cu, cv) = row_cell(s_row, bx * 4, 4, source, &mut luma);
            write_u32_le(
                dst,
                d_base + bx * 4,
                pack_cljr(cu, cv, luma[0], luma[1], luma[2], luma[3]),
            );
        }
    }
}

pub(crate) fn rgb_to_luma(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    source: PixelSource<'_>,
    wide: bool,
    flipped: bool,
) {
    let dst_stride = if dst_stride != 0 {
        dst_stride
    } else if wide {
        width * 2
    } else {
        width
    };
    let src_stride = if src_stride == 0 {
        source.min_stride(width)
    } else {
        src_stride
    };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for x in 0..width {
            let (py, _, _) = pixel_yuv(s_row, x, source);
            if wide {
                dst[d_base + x * 2] = 0;
                dst[d_base + x * 2 + 1] = py;
            } else {
                dst[d_base + x] = py;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorspace::fast_rgb_to_yuv;
    use crate::yuv_support::{PlanarKind, RgbLayout};

    fn rgb32(r: u8, g: u8, b: u8) -> [u8; 4] {
        [b, g, r, 0]
    }

    #[test]
    fn uniform_rgb32_becomes_uniform_yuy2() {
        let (ey, eu, ev) = fast_rgb_to_yuv(200, 50, 90);
        let mut src = Vec::new();
        for _ in 0..8 {
            src.extend_from_slice(&rgb32(200, 50, 90));
        }
        let mut dst = vec![0u8; 16];
        rgb_to_packed_422(
            8,
            1,
            &mut dst,
            0,
            crate::yuv_support::PackedY422Order::YUY2,
            &src,
            0,
            PixelSource::Direct(RgbLayout::Rgb32),
            false,
        );
        for px in dst.chunks_exact(4) {
            assert_eq!(px, &[ey, eu, ey, ev]);
        }
    }

    #[test]
    fn chroma_averages_across_the_pair() {
        let mut src = Vec::new();
        src.extend_from_slice(&rgb32(255, 0, 0));
        src.extend_from_slice(&rgb32(0, 0, 255));
        let (_, u_red, v_red) = fast_rgb_to_yuv(255, 0, 0);
        let (_, u_blue, v_blue) = fast_rgb_to_yuv(0, 0, 255);
        let mut dst = vec![0u8; 4];
        rgb_to_packed_422(
            2,
            1,
            &mut dst,
            0,
            crate::yuv_support::PackedY422Order::YUY2,
            &src,
            0,
            PixelSource::Direct(RgbLayout::Rgb32),
            false,
        );
        assert_eq!(dst[1], ((u_red as u16 + u_blue as u16) >> 1) as u8);
        assert_eq!(dst[3], ((v_red as u16 + v_blue as u16) >> 1) as u8);
    }

    #[test]
    fn rgb_to_i420_covers_both_planes() {
        let (ey, eu, ev) = fast_rgb_to_yuv(30, 60, 90);
        let mut src = Vec::new();
        for _ in 0..4 {
            src.extend_from_slice(&rgb32(30, 60, 90));
        }
        let view = PlanarView::new(
            PlanarKind::Contiguous {
                decimation: 2,
                u_first: true,
            },
            2,
            2,
            0,
        );
        let mut dst = vec![0u8; 6];
        rgb_to_planar(
            2,
            2,
            &mut dst,
            view,
            &src,
            0,
            PixelSource::Direct(RgbLayout::Rgb32),
            false,
        );
        assert_eq!(&dst[..4], &[ey; 4]);
        assert_eq!(dst[4], eu);
        assert_eq!(dst[5], ev);
    }

    #[test]
    fn rgba_alpha_survives_into_ayuv() {
        let src = vec![1, 2, 3, 200]; // B,G,R,A
        let mut dst = vec![0u8; 4];
        rgb_to_ayuv(
            1,
            1,
            &mut dst,
            0,
            &src,
            0,
            PixelSource::Direct(RgbLayout::Rgba),
            false,
        );
        assert_eq!(dst[3], 200);
        let (ey, _, _) = fast_rgb_to_yuv(3, 2, 1);
        assert_eq!(dst[2], ey);
    }

    #[test]
    fn rgb_to_y800_is_the_luma_channel() {
        let src = vec![10, 20, 30, 0]; // B,G,R
        let mut dst = vec![0u8; 1];
        rgb_to_luma(
            1,
            1,
            &mut dst,
            0,
            &src,
            0,
            PixelSource::Direct(RgbLayout::Rgb32),
            false,
            false,
        );
        let (ey, _, _) = fast_rgb_to_yuv(30, 20, 10);
        assert_eq!(dst[0], ey);
    }
}
