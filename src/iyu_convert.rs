/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! IYU1 (packed 4:1:1, U Y0 Y1 V Y2 Y3) and IYU2 (packed 4:4:4, U Y V)
//! kernels: to and from packed 4:2:2, the multi-plane layouts, and each
//! other.
//!
//! Chroma reads that would cross a row's last macropixel, or the bottom
//! chroma row of a plane, clamp to the last sample. For the bottom row this
//! collapses the averaging windows onto the current row, duplicating the
//! last line.

use crate::packed_to_packed::flip_row;
use crate::yuv_support::{avg2, avg4, mix_768_256, PackedY422Order, PlanarView};

const IYU1_BLOCK: usize = 6; // bytes per 4 pixels
const IYU2_BPP: usize = 3;

#[inline(always)]
fn iyu1_stride(width: usize, stride: usize) -> usize {
    if stride == 0 {
        width * 12 / 8
    } else {
        stride
    }
}

#[inline(always)]
fn iyu2_stride(width: usize, stride: usize) -> usize {
    if stride == 0 {
        width * 3
    } else {
        stride
    }
}

pub(crate) fn packed_422_to_iyu1(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    src_order: PackedY422Order,
    flipped: bool,
) {
    let dst_stride = iyu1_stride(width, dst_stride);
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
        for bx in 0..width / 4 {
            let s = &s_row[bx * 8..bx * 8 + 8];
            let d = &mut dst[d_base + bx * IYU1_BLOCK..d_base + bx * IYU1_BLOCK + IYU1_BLOCK];
            d[0] = avg2(s[u], s[u + 4]);
            d[3] = avg2(s[v], s[v + 4]);
            d[1] = s[y0];
            d[2] = s[y1];
            d[4] = s[y0 + 4];
            d[5] = s[y1 + 4];
        }
    }
}

pub(crate) fn iyu1_to_packed_422(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_order: PackedY422Order,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width * 2 } else { dst_stride };
    let src_stride = iyu1_stride(width, src_stride);
    let (y0, y1, u, v) = (
        dst_order.y0_offset(),
        dst_order.y1_offset(),
        dst_order.u_offset(),
        dst_order.v_offset(),
    );
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 4 {
            let s = &s_row[bx * IYU1_BLOCK..bx * IYU1_BLOCK + IYU1_BLOCK];
            let d = &mut dst[d_base + bx * 8..d_base + bx * 8 + 8];
            d[y0] = s[1];
            d[y1] = s[2];
            d[u] = s[0];
            d[v] = s[3];
            d[y0 + 4] = s[4];
            d[y1 + 4] = s[5];
            d[u + 4] = s[0];
            d[v + 4] = s[3];
        }
    }
}

pub(crate) fn packed_422_to_iyu2(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    src_order: PackedY422Order,
    flipped: bool,
) {
    let dst_stride = iyu2_stride(width, dst_stride);
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
        for px in 0..width / 2 {
            let s = &s_row[px * 4..px * 4 + 4];
            let d = &mut dst[d_base + px * 6..d_base + px * 6 + 6];
            d[0] = s[u];
            d[1] = s[y0];
            d[2] = s[v];
            d[3] = s[u];
            d[4] = s[y1];
            d[5] = s[v];
        }
    }
}

pub(crate) fn iyu2_to_packed_422(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_order: PackedY422Order,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width * 2 } else { dst_stride };
    let src_stride = iyu2_stride(width, src_stride);
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
            let s = &s_row[px * 6..px * 6 + 6];
            let d = &mut dst[d_base + px * 4..d_base + px * 4 + 4];
            d[u] = avg2(s[0], s[3]);
            d[y0] = s[1];
            d[v] = avg2(s[2], s[5]);
            d[y1] = s[4];
        }
    }
}

pub(crate) fn iyu1_to_iyu2(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = iyu2_stride(width, dst_stride);
    let src_stride = iyu1_stride(width, src_stride);
    let blocks = width / 4;
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..blocks {
            let s = &s_row[bx * IYU1_BLOCK..];
            let last = bx + 1 == blocks;
            let (u0, v0) = (s[0], s[3]);
            let (u4, v4) = if last { (u0, v0) } else { (s[6], s[9]) };
            let d = &mut dst[d_base + bx * 12..d_base + bx * 12 + 12];
            d[0] = u0;
            d[1] = s[1];
            d[2] = v0;
            d[3] = if last { u0 } else { mix_768_256(u0, u4) };
            d[4] = s[2];
            d[5] = if last { v0 } else { mix_768_256(v0, v4) };
            d[6] = if last { u0 } else { avg2(u0, u4) };
            d[7] = s[4];
            d[8] = if last { v0 } else { avg2(v0, v4) };
            d[9] = if last { u0 } else { mix_768_256(u4, u0) };
            d[10] = s[5];
            d[11] = if last { v0 } else { mix_768_256(v4, v0) };
        }
    }
}

pub(crate) fn iyu2_to_iyu1(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = iyu1_stride(width, dst_stride);
    let src_stride = iyu2_stride(width, src_stride);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 4 {
            let s = &s_row[bx * 12..bx * 12 + 12];
            let d = &mut dst[d_base + bx * IYU1_BLOCK..d_base + bx * IYU1_BLOCK + IYU1_BLOCK];
            d[0] = avg4(s[0], s[3], s[6], s[9]);
            d[3] = avg4(s[2], s[5], s[8], s[11]);
            d[1] = s[1];
            d[2] = s[4];
            d[4] = s[7];
            d[5] = s[10];
        }
    }
}

pub(crate) fn planar_to_iyu1(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    view: PlanarView,
    flipped: bool,
) {
    let dst_stride = iyu1_stride(width, dst_stride);
    let uv_height = view.uv_height(height);
    for y in 0..height {
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 4 {
            // The IYU1 chroma cell spans four pixels; gather the source
            // chroma covering it for this row.
            let (u, v) = match view.vdec {
                1 => (
                    avg2(src[view.u_at(bx * 2, y)], src[view.u_at(bx * 2 + 1, y)]),
                    avg2(src[view.v_at(bx * 2, y)], src[view.v_at(bx * 2 + 1, y)]),
                ),
                2 => {
                    let cy = y / 2;
                    if y & 1 == 0 {
                        (
                            avg2(src[view.u_at(bx * 2, cy)], src[view.u_at(bx * 2 + 1, cy)]),
                            avg2(src[view.v_at(bx * 2, cy)], src[view.v_at(bx * 2 + 1, cy)]),
                        )
                    } else {
                        // Odd rows take the mean of the full 2x2 window in
                        // one pass; pairing the averages first would lose a
                        // truncation bit.
                        let next = (cy + 1).min(uv_height - 1);
                        (
                            avg4(
                                src[view.u_at(bx * 2, cy)],
                                src[view.u_at(bx * 2 + 1, cy)],
                                src[view.u_at(bx * 2, next)],
                                src[view.u_at(bx * 2 + 1, next)],
                            ),
                            avg4(
                                src[view.v_at(bx * 2, cy)],
                                src[view.v_at(bx * 2 + 1, cy)],
                                src[view.v_at(bx * 2, next)],
                                src[view.v_at(bx * 2 + 1, next)],
                            ),
                        )
                    }
                }
                4 => {
                    let cy = y / 4;
                    let next = (cy + 1).min(uv_height - 1);
                    let a_u = src[view.u_at(bx, cy)];
                    let a_v = src[view.v_at(bx, cy)];
                    let b_u = src[view.u_at(bx, next)];
                    let b_v = src[view.v_at(bx, next)];
                    match y & 3 {
                        0 => (a_u, a_v),
                        1 => (mix_768_256(a_u, b_u), mix_768_256(a_v, b_v)),
                        2 => (avg2(a_u, b_u), avg2(a_v, b_v)),
                        _ => (mix_768_256(b_u, a_u), mix_768_256(b_v, a_v)),
                    }
                }
                _ => unreachable!(),
            };
            let d = &mut dst[d_base + bx * IYU1_BLOCK..d_base + bx * IYU1_BLOCK + IYU1_BLOCK];
            d[0] = u;
            d[3] = v;
            d[1] = src[view.y_at(bx * 4, y)];
            d[2] = src[view.y_at(bx * 4 + 1, y)];
            d[4] = src[view.y_at(bx * 4 + 2, y)];
            d[5] = src[view.y_at(bx * 4 + 3, y)];
        }
    }
}

pub(crate) fn iyu1_to_planar(
    width: usize,
    height: usize,
    dst: &mut [u8],
    view: PlanarView,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let src_stride = iyu1_stride(width, src_stride);
    let uv_height = view.uv_height(height);
    // Luma plane.
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let dy = flip_row(y, height, flipped);
        for bx in 0..width / 4 {
            let s = &s_row[bx * IYU1_BLOCK..bx * IYU1_BLOCK + IYU1_BLOCK];
            dst[view.y_at(bx * 4, dy)] = s[1];
            dst[view.y_at(bx * 4 + 1, dy)] = s[2];
            dst[view.y_at(bx * 4 + 2, dy)] = s[4];
            dst[view.y_at(bx * 4 + 3, dy)] = s[5];
        }
    }
    // Chroma planes: the IYU1 cell covers 4 pixels of one row; the
    // destination lattice decides how many cells collapse onto a sample.
    for cy in 0..uv_height {
        let dcy = flip_row(cy, uv_height, flipped);
        for bx in 0..width / 4 {
            match view.vdec {
                1 => {
                    let s = &src[cy * src_stride + bx * IYU1_BLOCK..];
                    for col in 0..2 {
                        dst[view.u_at(bx * 2 + col, dcy)] = s[0];
                        dst[view.v_at(bx * 2 + col, dcy)] = s[3];
                    }
                }
                2 => {
                    let top = &src[cy * 2 * src_stride + bx * IYU1_BLOCK..];
                    let bot = &src[(cy * 2 + 1) * src_stride + bx * IYU1_BLOCK..];
                    let u = avg2(top[0], bot[0]);
                    let v = avg2(top[3], bot[3]);
                    for col in 0..2 {
                        dst[view.u_at(bx * 2 + col, dcy)] = u;
                        dst[view.v_at(bx * 2 + col, dcy)] = v;
                    }
                }
                4 => {
                    let mut u_sum = 0u16;
                    let mut v_sum = 0u16;
                    for row in 0..4 {
                        let s = &src[(cy * 4 + row) * src_stride + bx * IYU1_BLOCK..];
                        u_sum += s[0] as u16;
                        v_sum += s[3] as u16;
                    }
                    dst[view.u_at(bx, dcy)] = (u_sum >> 2) as u8;
                    dst[view.v_at(bx, dcy)] = (v_sum >> 2) as u8;
                }
                _ => unreachable!(),
            }
        }
    }
}

pub(crate) fn planar_to_iyu2(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    view: PlanarView,
    flipped: bool,
) {
    let dst_stride = iyu2_stride(width, dst_stride);
    let uv_width = view.uv_width(width);
    let uv_height = view.uv_height(height);
    for y in 0..height {
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for x in 0..width {
            let cx = x / view.hdec;
            let right = (cx + 1).min(uv_width - 1);
            let fx = x % view.hdec;
            let (u, v) = match view.vdec {
                1 => horizontal_mix(
                    src[view.u_at(cx, y)],
                    src[view.u_at(right, y)],
                    src[view.v_at(cx, y)],
                    src[view.v_at(right, y)],
                    fx,
                    view.hdec,
                ),
                2 => {
                    let cy = y / 2;
                    let below = (cy + 1).min(uv_height - 1);
                    match (fx, y & 1) {
                        (0, 0) => (src[view.u_at(cx, cy)], src[view.v_at(cx, cy)]),
                        (_, 0) => (
                            avg2(src[view.u_at(cx, cy)], src[view.u_at(right, cy)]),
                            avg2(src[view.v_at(cx, cy)], src[view.v_at(right, cy)]),
                        ),
                        (0, _) => (
                            avg2(src[view.u_at(cx, cy)], src[view.u_at(cx, below)]),
                            avg2(src[view.v_at(cx, cy)], src[view.v_at(cx, below)]),
                        ),
                        _ => (
                            avg4(
                                src[view.u_at(cx, cy)],
                                src[view.u_at(right, cy)],
                                src[view.u_at(cx, below)],
                                src[view.u_at(right, below)],
                            ),
                            avg4(
                                src[view.v_at(cx, cy)],
                                src[view.v_at(right, cy)],
                                src[view.v_at(cx, below)],
                                src[view.v_at(right, below)],
                            ),
                        ),
                    }
                }
                4 => {
                    let cy = y / 4;
                    let below = (cy + 1).min(uv_height - 1);
                    // Bilinear: horizontal quarter mixes against the next
                    // column, vertical quarter mixes against the next row,
                    // then the mean of the two axes.
                    let u_cols = quarter_profile(src[view.u_at(cx, cy)], src[view.u_at(right, cy)]);
                    let v_cols = quarter_profile(src[view.v_at(cx, cy)], src[view.v_at(right, cy)]);
                    let u_rows = quarter_profile(src[view.u_at(cx, cy)], src[view.u_at(cx, below)]);
                    let v_rows = quarter_profile(src[view.v_at(cx, cy)], src[view.v_at(cx, below)]);
                    (
                        avg2(u_cols[fx], u_rows[y & 3]),
                        avg2(v_cols[fx], v_rows[y & 3]),
                    )
                }
                _ => unreachable!(),
            };
            let d = &mut dst[d_base + x * IYU2_BPP..d_base + x * IYU2_BPP + IYU2_BPP];
            d[0] = u;
            d[1] = src[view.y_at(x, y)];
            d[2] = v;
        }
    }
}

#[inline(always)]
fn horizontal_mix(u_a: u8, u_b: u8, v_a: u8, v_b: u8, fx: usize, hdec: usize) -> (u8, u8) {
    debug_assert_eq!(hdec, 2);
    if fx == 0 {
        (u_a, v_a)
    } else {
        (avg2(u_a, u_b), avg2(v_a, v_b))
    }
}

/// The four phase values of the 4:1:0 reconstruction between two samples.
#[inline(always)]
fn quarter_profile(a: u8, b: u8) -> [u8; 4] {
    [a, mix_768_256(a, b), avg2(a, b), mix_768_256(b, a)]
}

pub(crate) fn iyu2_to_planar(
    width: usize,
    height: usize,
    dst: &mut [u8],
    view: PlanarView,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let src_stride = iyu2_stride(width, src_stride);
    let uv_height = view.uv_height(height);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let dy = flip_row(y, height, flipped);
        for x in 0..width {
            dst[view.y_at(x, dy)] = s_row[x * IYU2_BPP + 1];
        }
    }
    for cy in 0..uv_height {
        let dcy = flip_row(cy, uv_height, flipped);
        for cx in 0..view.uv_width(width) {
            let mut u_sum = 0u16;
            let mut v_sum = 0u16;
            for row in 0..view.vdec {
                let s_row = &src[(cy * view.vdec + row) * src_stride..];
                for col in 0..view.hdec {
                    let px = (cx * view.hdec + col) * IYU2_BPP;
                    u_sum += s_row[px] as u16;
                    v_sum += s_row[px + 2] as u16;
                }
            }
            let shift = (view.hdec * view.vdec).trailing_zeros();
            dst[view.u_at(cx, dcy)] = (u_sum >> shift) as u8;
            dst[view.v_at(cx, dcy)] = (v_sum >> shift) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yuv_support::PackedY422Order::{UYVY, YUY2};
    use crate::yuv_support::PlanarKind;

    #[test]
    fn uyvy_to_iyu1_averages_chroma_pairs() {
        // One row, four pixels: U values 100 and 104, V values 10 and 14.
        let src = vec![100, 1, 10, 2, 104, 3, 14, 4];
        let mut dst = vec![0u8; 6];
        packed_422_to_iyu1(4, 1, &mut dst, 0, &src, 0, UYVY, false);
        assert_eq!(dst, vec![102, 1, 2, 12, 3, 4]);
    }

    #[test]
    fn iyu1_to_yuy2_replicates_chroma() {
        let src = vec![80, 1, 2, 160, 3, 4];
        let mut dst = vec![0u8; 16];
        iyu1_to_packed_422(4, 1, &mut dst, 0, YUY2, &src, 0, false);
        assert_eq!(dst, vec![1, 80, 2, 160, 3, 80, 4, 160]);
    }

    #[test]
    fn iyu1_to_iyu2_interpolates_between_blocks() {
        // Two blocks: U 0 then 128.
        let src = vec![0, 1, 2, 0, 3, 4, 128, 5, 6, 0, 7, 8];
        let mut dst = vec![0u8; 8 * 3];
        iyu1_to_iyu2(8, 1, &mut dst, 0, &src, 0, false);
        let u: Vec<u8> = dst.chunks_exact(3).map(|p| p[0]).collect();
        assert_eq!(u[0], 0);
        assert_eq!(u[1], ((128u32 * 256) >> 10) as u8); // quarter of the way
        assert_eq!(u[2], 64);
        assert_eq!(u[3], ((128u32 * 768) >> 10) as u8);
        // Last block holds its own chroma.
        assert_eq!(&u[4..], &[128, 128, 128, 128]);
        let ys: Vec<u8> = dst.chunks_exact(3).map(|p| p[1]).collect();
        assert_eq!(ys, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn iyu2_round_trip_through_iyu1_preserves_luma() {
        let src: Vec<u8> = (0..24).map(|i| (i * 7) as u8).collect(); // 8 px
        let mut iyu1 = vec![0u8; 12];
        iyu2_to_iyu1(8, 1, &mut iyu1, 0, &src, 0, false);
        let mut back = vec![0u8; 24];
        iyu1_to_iyu2(8, 1, &mut back, 0, &iyu1, 0, false);
        for x in 0..8 {
            assert_eq!(back[x * 3 + 1], src[x * 3 + 1], "luma at {}", x);
        }
    }

    #[test]
    fn i420_to_iyu1_duplicates_last_chroma_row() {
        // 4x4 I420, U rows 40 then 80.
        let mut src = vec![0u8; 16];
        src.extend_from_slice(&[40, 40, 80, 80]); // U 2x2
        src.extend_from_slice(&[0, 0, 0, 0]); // V
        let view = PlanarView::new(
            PlanarKind::Contiguous {
                decimation: 2,
                u_first: true,
            },
            4,
            4,
            0,
        );
        let mut dst = vec![0u8; 4 * 6];
        planar_to_iyu1(4, 4, &mut dst, 0, &src, view, false);
        assert_eq!(dst[0], 40);
        assert_eq!(dst[6], 60); // between rows
        assert_eq!(dst[12], 80);
        assert_eq!(dst[18], 80); // clamped
    }

    #[test]
    fn iyu1_to_i420_averages_vertically() {
        let mut src = vec![0u8; 12];
        src[0] = 100; // row 0 U
        src[6] = 104; // row 1 U
        let view = PlanarView::new(
            PlanarKind::Contiguous {
                decimation: 2,
                u_first: true,
            },
            4,
            2,
            0,
        );
        let mut dst = vec![0u8; 8 + 4];
        iyu1_to_planar(4, 2, &mut dst, view, &src, 0, false);
        assert_eq!(&dst[8..10], &[102, 102]);
    }

    #[test]
    fn iyu2_to_i420_boxes_the_2x2_cell() {
        // 2x2 IYU2 with U = 10,20,30,40.
        let src = vec![10, 1, 0, 20, 2, 0, 30, 3, 0, 40, 4, 0];
        let view = PlanarView::new(
            PlanarKind::Contiguous {
                decimation: 2,
                u_first: true,
            },
            2,
            2,
            0,
        );
        let mut dst = vec![0u8; 4 + 2];
        iyu2_to_planar(2, 2, &mut dst, view, &src, 6, false);
        assert_eq!(dst[4], 25);
    }
}
