/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! Y41P (packed 4:1:1, eight pixels in twelve bytes) and CLJR (four pixels
//! in one dword) kernels.
//!
//! Both formats put a chroma pair on every four luma samples. Reads of the
//! following macropixel's chroma clamp at the end of the row, holding the
//! last value, so the final block never reads past its line.

use crate::packed_to_packed::flip_row;
use crate::yuv_support::{
    avg2, avg4, cljr_u, cljr_v, cljr_y, mix_768_256, pack_cljr, read_u32_le, write_u32_le,
    PackedY422Order, PlanarView,
};

#[inline(always)]
fn y41p_stride(width: usize, stride: usize) -> usize {
    if stride == 0 {
        width / 8 * 12
    } else {
        stride
    }
}

#[inline(always)]
fn cljr_stride(width: usize, stride: usize) -> usize {
    if stride == 0 {
        width
    } else {
        stride
    }
}

/// The four phases of chroma reconstruction between two 4:1:1 cells.
#[inline(always)]
fn quarter_profile(a: u8, b: u8) -> [u8; 4] {
    [a, mix_768_256(a, b), avg2(a, b), mix_768_256(b, a)]
}

pub(crate) fn packed_422_to_y41p(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    src_order: PackedY422Order,
    flipped: bool,
) {
    let dst_stride = y41p_stride(width, dst_stride);
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
        for bx in 0..width / 8 {
            let s = &s_row[bx * 16..bx * 16 + 16];
            let d = &mut dst[d_base + bx * 12..d_base + bx * 12 + 12];
            d[0] = avg2(s[u], s[u + 4]);
            d[2] = avg2(s[v], s[v + 4]);
            d[1] = s[y0];
            d[3] = s[y1];
            d[5] = s[y0 + 4];
            d[7] = s[y1 + 4];
            d[4] = avg2(s[u + 8], s[u + 12]);
            d[6] = avg2(s[v + 8], s[v + 12]);
            d[8] = s[y0 + 8];
            d[9] = s[y1 + 8];
            d[10] = s[y0 + 12];
            d[11] = s[y1 + 12];
        }
    }
}

pub(crate) fn y41p_to_packed_422(
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
    let src_stride = y41p_stride(width, src_stride);
    let (y0, y1, u, v) = (
        dst_order.y0_offset(),
        dst_order.y1_offset(),
        dst_order.u_offset(),
        dst_order.v_offset(),
    );
    let blocks = width / 8;
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..blocks {
            let s = &s_row[bx * 12..];
            let (next_u, next_v) = if bx + 1 == blocks {
                (s[4], s[6])
            } else {
                (s[12], s[14])
            };
            let d = &mut dst[d_base + bx * 16..d_base + bx * 16 + 16];
            d[u] = s[0];
            d[v] = s[2];
            d[y0] = s[1];
            d[y1] = s[3];
            d[u + 4] = avg2(s[0], s[4]);
            d[v + 4] = avg2(s[2], s[6]);
            d[y0 + 4] = s[5];
            d[y1 + 4] = s[7];
            d[u + 8] = s[4];
            d[v + 8] = s[6];
            d[y0 + 8] = s[8];
            d[y1 + 8] = s[9];
            d[u + 12] = avg2(s[4], next_u);
            d[v + 12] = avg2(s[6], next_v);
            d[y0 + 12] = s[10];
            d[y1 + 12] = s[11];
        }
    }
}

/// Reads the chroma value the destination row `y` should use from a planar
/// source whose cell at `(cx_u, cx_v)` covers four pixels.
#[inline(always)]
fn planar_cell_chroma(
    src: &[u8],
    view: PlanarView,
    height: usize,
    cell: usize,
    y: usize,
) -> (u8, u8) {
    let uv_height = view.uv_height(height);
    match view.vdec {
        1 => (
            avg2(
                src[view.u_at(cell * 2, y)],
                src[view.u_at(cell * 2 + 1, y)],
            ),
            avg2(
                src[view.v_at(cell * 2, y)],
                src[view.v_at(cell * 2 + 1, y)],
            ),
        ),
        2 => {
            let cy = y / 2;
            if y & 1 == 0 {
                (
                    avg2(
                        src[view.u_at(cell * 2, cy)],
                        src[view.u_at(cell * 2 + 1, cy)],
                    ),
                    avg2(
                        src[view.v_at(cell * 2, cy)],
                        src[view.v_at(cell * 2 + 1, cy)],
                    ),
                )
            } else {
                let next = (cy + 1).min(uv_height - 1);
                (
                    avg4(
                        src[view.u_at(cell * 2, cy)],
                        src[view.u_at(cell * 2 + 1, cy)],
                        src[view.u_at(cell * 2, next)],
                        src[view.u_at(cell * 2 + 1, next)],
                    ),
                    avg4(
                        src[view.v_at(cell * 2, cy)],
                        src[view.v_at(cell * 2 + 1, cy)],
                        src[view.v_at(cell * 2, next)],
                        src[view.v_at(cell * 2 + 1, next)],
                    ),
                )
            }
        }
        4 => {
            let cy = y / 4;
            let next = (cy + 1).min(uv_height - 1);
            let u = quarter_profile(src[view.u_at(cell, cy)], src[view.u_at(cell, next)]);
            let v = quarter_profile(src[view.v_at(cell, cy)], src[view.v_at(cell, next)]);
            (u[y & 3], v[y & 3])
        }
        _ => unreachable!(),
    }
}

pub(crate) fn planar_to_y41p(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    view: PlanarView,
    flipped: bool,
) {
    let dst_stride = y41p_stride(width, dst_stride);
    for y in 0..height {
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 8 {
            let (u0, v0) = planar_cell_chroma(src, view, height, bx * 2, y);
            let (u4, v4) = planar_cell_chroma(src, view, height, bx * 2 + 1, y);
            let d = &mut dst[d_base + bx * 12..d_base + bx * 12 + 12];
            d[0] = u0;
            d[2] = v0;
            d[4] = u4;
            d[6] = v4;
            for (i, slot) in [1usize, 3, 5, 7, 8, 9, 10, 11].into_iter().enumerate() {
                d[slot] = src[view.y_at(bx * 8 + i, y)];
            }
        }
    }
}

pub(crate) fn y41p_to_planar(
    width: usize,
    height: usize,
    dst: &mut [u8],
    view: PlanarView,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let src_stride = y41p_stride(width, src_stride);
    let uv_height = view.uv_height(height);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let dy = flip_row(y, height, flipped);
        for bx in 0..width / 8 {
            let s = &s_row[bx * 12..bx * 12 + 12];
            for (i, slot) in [1usize, 3, 5, 7, 8, 9, 10, 11].into_iter().enumerate() {
                dst[view.y_at(bx * 8 + i, dy)] = s[slot];
            }
        }
    }
    for cy in 0..uv_height {
        let dcy = flip_row(cy, uv_height, flipped);
        for bx in 0..width / 8 {
            for cell in 0..2 {
                let (uo, vo) = (cell * 4, cell * 4 + 2);
                let (u, v) = match view.vdec {
                    1 => {
                        let s = &src[cy * src_stride + bx * 12..];
                        (s[uo], s[vo])
                    }
                    2 => {
                        let top = &src[cy * 2 * src_stride + bx * 12..];
                        let bot = &src[(cy * 2 + 1) * src_stride + bx * 12..];
                        (avg2(top[uo], bot[uo]), avg2(top[vo], bot[vo]))
                    }
                    4 => {
                        let mut u_sum = 0u16;
                        let mut v_sum = 0u16;
                        for row in 0..4 {
                            let s = &src[(cy * 4 + row) * src_stride + bx * 12..];
                            u_sum += s[uo] as u16;
                            v_sum += s[vo] as u16;
                        }
                        ((u_sum >> 2) as u8, (v_sum >> 2) as u8)
                    }
                    _ => unreachable!(),
                };
                // One 4:1:1 cell spans hdec-wide destination cells.
                let cells = 4 / view.hdec;
                for col in 0..cells {
                    dst[view.u_at((bx * 2 + cell) * cells + col, dcy)] = u;
                    dst[view.v_at((bx * 2 + cell) * cells + col, dcy)] = v;
                }
            }
        }
    }
}

pub(crate) fn packed_422_to_cljr(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    src_order: PackedY422Order,
    flipped: bool,
) {
    let dst_stride = cljr_stride(width, dst_stride);
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
            let word = pack_cljr(
                avg2(s[u], s[u + 4]),
                avg2(s[v], s[v + 4]),
                s[y0],
                s[y1],
                s[y0 + 4],
                s[y1 + 4],
            );
            write_u32_le(dst, d_base + bx * 4, word);
        }
    }
}

pub(crate) fn cljr_to_packed_422(
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
    let src_stride = cljr_stride(width, src_stride);
    let (y0, y1, u, v) = (
        dst_order.y0_offset(),
        dst_order.y1_offset(),
        dst_order.u_offset(),
        dst_order.v_offset(),
    );
    let blocks = width / 4;
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..blocks {
            let word = read_u32_le(s_row, bx * 4);
            let next = if bx + 1 == blocks {
                word
            } else {
                read_u32_le(s_row, bx * 4 + 4)
            };
            let d = &mut dst[d_base + bx * 8..d_base + bx * 8 + 8];
            d[u] = cljr_u(word);
            d[v] = cljr_v(word);
            d[y0] = cljr_y(word, 0);
            d[y1] = cljr_y(word, 1);
            d[u + 4] = avg2(cljr_u(word), cljr_u(next));
            d[v + 4] = avg2(cljr_v(word), cljr_v(next));
            d[y0 + 4] = cljr_y(word, 2);
            d[y1 + 4] = cljr_y(word, 3);
        }
    }
}

pub(crate) fn planar_to_cljr(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    view: PlanarView,
    flipped: bool,
) {
    let dst_stride = cljr_stride(width, dst_stride);
    for y in 0..height {
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 4 {
            let (u, v) = planar_cell_chroma(src, view, height, bx, y);
            let word = pack_cljr(
                u,
                v,
                src[view.y_at(bx * 4, y)],
                src[view.y_at(bx * 4 + 1, y)],
                src[view.y_at(bx * 4 + 2, y)],
                src[view.y_at(bx * 4 + 3, y)],
            );
            write_u32_le(dst, d_base + bx * 4, word);
        }
    }
}

pub(crate) fn cljr_to_planar(
    width: usize,
    height: usize,
    dst: &mut [u8],
    view: PlanarView,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let src_stride = cljr_stride(width, src_stride);
    let uv_height = view.uv_height(height);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let dy = flip_row(y, height, flipped);
        for bx in 0..width / 4 {
            let word = read_u32_le(s_row, bx * 4);
            for i in 0..4 {
                dst[view.y_at(bx * 4 + i, dy)] = cljr_y(word, i);
            }
        }
    }
    for cy in 0..uv_height {
        let dcy = flip_row(cy, uv_height, flipped);
        for bx in 0..width / 4 {
            let (u, v) = match view.vdec {
                1 => {
                    let word = read_u32_le(&src[cy * src_stride..], bx * 4);
                    (cljr_u(word), cljr_v(word))
                }
                2 => {
                    let top = read_u32_le(&src[cy * 2 * src_stride..], bx * 4);
                    let bot = read_u32_le(&src[(cy * 2 + 1) * src_stride..], bx * 4);
                    (
                        avg2(cljr_u(top), cljr_u(bot)),
                        avg2(cljr_v(top), cljr_v(bot)),
                    )
                }
                4 => {
                    let mut u_sum = 0u16;
                    let mut v_sum = 0u16;
                    for row in 0..4 {
                        let word = read_u32_le(&src[(cy * 4 + row) * src_stride..], bx * 4);
                        u_sum += cljr_u(word) as u16;
                        v_sum += cljr_v(word) as u16;
                    }
                    ((u_sum >> 2) as u8, (v_sum >> 2) as u8)
                }
                _ => unreachable!(),
            };
            let cells = 4 / view.hdec;
            for col in 0..cells {
                dst[view.u_at(bx * cells + col, dcy)] = u;
                dst[view.v_at(bx * cells + col, dcy)] = v;
            }
        }
    }
}

pub(crate) fn y41p_to_cljr(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = cljr_stride(width, dst_stride);
    let src_stride = y41p_stride(width, src_stride);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 8 {
            let s = &s_row[bx * 12..bx * 12 + 12];
            write_u32_le(
                dst,
                d_base + bx * 8,
                pack_cljr(s[0], s[2], s[1], s[3], s[5], s[7]),
            );
            write_u32_le(
                dst,
                d_base + bx * 8 + 4,
                pack_cljr(s[4], s[6], s[8], s[9], s[10], s[11]),
            );
        }
    }
}

pub(crate) fn cljr_to_y41p(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = y41p_stride(width, dst_stride);
    let src_stride = cljr_stride(width, src_stride);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 8 {
            let first = read_u32_le(s_row, bx * 8);
            let second = read_u32_le(s_row, bx * 8 + 4);
            let d = &mut dst[d_base + bx * 12..d_base + bx * 12 + 12];
            d[0] = cljr_u(first);
            d[2] = cljr_v(first);
            d[1] = cljr_y(first, 0);
            d[3] = cljr_y(first, 1);
            d[5] = cljr_y(first, 2);
            d[7] = cljr_y(first, 3);
            d[4] = cljr_u(second);
            d[6] = cljr_v(second);
            d[8] = cljr_y(second, 0);
            d[9] = cljr_y(second, 1);
            d[10] = cljr_y(second, 2);
            d[11] = cljr_y(second, 3);
        }
    }
}

pub(crate) fn iyu1_to_y41p(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = y41p_stride(width, dst_stride);
    let src_stride = if src_stride == 0 {
        width * 12 / 8
    } else {
        src_stride
    };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 8 {
            let s = &s_row[bx * 12..bx * 12 + 12];
            let d = &mut dst[d_base + bx * 12..d_base + bx * 12 + 12];
            d[0] = s[0];
            d[2] = s[3];
            d[1] = s[1];
            d[3] = s[2];
            d[5] = s[4];
            d[7] = s[5];
            d[4] = s[6];
            d[6] = s[9];
            d[8] = s[7];
            d[9] = s[8];
            d[10] = s[10];
            d[11] = s[11];
        }
    }
}

pub(crate) fn y41p_to_iyu1(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 {
        width * 12 / 8
    } else {
        dst_stride
    };
    let src_stride = y41p_stride(width, src_stride);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 8 {
            let s = &s_row[bx * 12..bx * 12 + 12];
            let d = &mut dst[d_base + bx * 12..d_base + bx * 12 + 12];
            d[0] = s[0];
            d[1] = s[1];
            d[2] = s[3];
            d[3] = s[2];
            d[4] = s[5];
            d[5] = s[7];
            d[6] = s[4];
            d[7] = s[8];
            d[8] = s[9];
            d[9] = s[6];
            d[10] = s[10];
            d[11] = s[11];
        }
    }
}

pub(crate) fn iyu1_to_cljr(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = cljr_stride(width, dst_stride);
    let src_stride = if src_stride == 0 {
        width * 12 / 8
    } else {
        src_stride
    };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 4 {
            let s = &s_row[bx * 6..bx * 6 + 6];
            write_u32_le(
                dst,
                d_base + bx * 4,
                pack_cljr(s[0], s[3], s[1], s[2], s[4], s[5]),
            );
        }
    }
}

pub(crate) fn cljr_to_iyu1(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 {
        width * 12 / 8
    } else {
        dst_stride
    };
    let src_stride = cljr_stride(width, src_stride);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 4 {
            let word = read_u32_le(s_row, bx * 4);
            let d = &mut dst[d_base + bx * 6..d_base + bx * 6 + 6];
            d[0] = cljr_u(word);
            d[1] = cljr_y(word, 0);
            d[2] = cljr_y(word, 1);
            d[3] = cljr_v(word);
            d[4] = cljr_y(word, 2);
            d[5] = cljr_y(word, 3);
        }
    }
}

pub(crate) fn iyu2_to_y41p(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = y41p_stride(width, dst_stride);
    let src_stride = if src_stride == 0 { width * 3 } else { src_stride };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 8 {
            let s = &s_row[bx * 24..bx * 24 + 24];
            let d = &mut dst[d_base + bx * 12..d_base + bx * 12 + 12];
            d[0] = avg4(s[0], s[3], s[6], s[9]);
            d[2] = avg4(s[2], s[5], s[8], s[11]);
            d[4] = avg4(s[12], s[15], s[18], s[21]);
            d[6] = avg4(s[14], s[17], s[20], s[23]);
            d[1] = s[1];
            d[3] = s[4];
            d[5] = s[7];
            d[7] = s[10];
            d[8] = s[13];
            d[9] = s[16];
            d[10] = s[19];
            d[11] = s[22];
        }
    }
}

pub(crate) fn y41p_to_iyu2(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width * 3 } else { dst_stride };
    let src_stride = y41p_stride(width, src_stride);
    let blocks = width / 8;
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..blocks {
            let s = &s_row[bx * 12..];
            let (next_u, next_v) = if bx + 1 == blocks {
                (s[4], s[6])
            } else {
                (s[12], s[14])
            };
            let u_first = quarter_profile(s[0], s[4]);
            let v_first = quarter_profile(s[2], s[6]);
            let u_second = quarter_profile(s[4], next_u);
            let v_second = quarter_profile(s[6], next_v);
            let luma = [s[1], s[3], s[5], s[7], s[8], s[9], s[10], s[11]];
            let d = &mut dst[d_base + bx * 24..d_base + bx * 24 + 24];
            for px in 0..8 {
                let (u, v) = if px < 4 {
                    (u_first[px], v_first[px])
                } else {
                    (u_second[px - 4], v_second[px - 4])
                };
                d[px * 3] = u;
                d[px * 3 + 1] = luma[px];
                d[px * 3 + 2] = v;
            }
        }
    }
}

pub(crate) fn iyu2_to_cljr(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = cljr_stride(width, dst_stride);
    let src_stride = if src_stride == 0 { width * 3 } else { src_stride };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 4 {
            let s = &s_row[bx * 12..bx * 12 + 12];
            write_u32_le(
                dst,
                d_base + bx * 4,
                pack_cljr(
                    avg4(s[0], s[3], s[6], s[9]),
                    avg4(s[2], s[5], s[8], s[11]),
                    s[1],
                    s[4],
                    s[7],
                    s[10],
                ),
            );
        }
    }
}

pub(crate) fn cljr_to_iyu2(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width * 3 } else { dst_stride };
    let src_stride = cljr_stride(width, src_stride);
    let blocks = width / 4;
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..blocks {
            let word = read_u32_le(s_row, bx * 4);
            let next = if bx + 1 == blocks {
                word
            } else {
                read_u32_le(s_row, bx * 4 + 4)
            };
            let u = quarter_profile(cljr_u(word), cljr_u(next));
            let v = quarter_profile(cljr_v(word), cljr_v(next));
            let d = &mut dst[d_base + bx * 12..d_base + bx * 12 + 12];
            for px in 0..4 {
                d[px * 3] = u[px];
                d[px * 3 + 1] = cljr_y(word, px);
                d[px * 3 + 2] = v[px];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yuv_support::PackedY422Order::UYVY;
    use crate::yuv_support::PlanarKind;

    #[test]
    fn uyvy_to_y41p_averages_cell_chroma() {
        // 8 px UYVY row; U values 100,102 then 110,114.
        let mut src = vec![0u8; 16];
        src[0] = 100;
        src[4] = 102;
        src[8] = 110;
        src[12] = 114;
        for (i, b) in src.iter_mut().enumerate() {
            if i % 2 == 1 {
                *b = i as u8; // luma ramp
            }
        }
        let mut dst = vec![0u8; 12];
        packed_422_to_y41p(8, 1, &mut dst, 0, &src, 0, UYVY, false);
        assert_eq!(dst[0], 101);
        assert_eq!(dst[4], 112);
        assert_eq!([dst[1], dst[3], dst[5], dst[7]], [1, 3, 5, 7]);
        assert_eq!([dst[8], dst[9], dst[10], dst[11]], [9, 11, 13, 15]);
    }

    #[test]
    fn y41p_to_uyvy_holds_last_block_chroma() {
        // Single block: the trailing pair may not read a next block.
        let src = vec![60, 1, 160, 2, 80, 3, 200, 4, 5, 6, 7, 8];
        let mut dst = vec![0u8; 16];
        y41p_to_packed_422(8, 1, &mut dst, 0, UYVY, &src, 0, false);
        assert_eq!(dst[0], 60);
        assert_eq!(dst[4], avg2(60, 80));
        assert_eq!(dst[8], 80);
        assert_eq!(dst[12], avg2(80, 80)); // held
        assert_eq!([dst[1], dst[3]], [1, 2]);
        assert_eq!([dst[13], dst[15]], [7, 8]);
    }

    #[test]
    fn cljr_round_trips_quantized_values() {
        // Values already on the 5/6-bit lattice survive CLJR exactly.
        let src = vec![64, 8, 16, 128, 24, 32];
        let mut cljr = vec![0u8; 4];
        iyu1_to_cljr(4, 1, &mut cljr, 0, &src, 0, false);
        let mut back = vec![0u8; 6];
        cljr_to_iyu1(4, 1, &mut back, 0, &cljr, 0, false);
        assert_eq!(back, src);
    }

    #[test]
    fn y41p_iyu1_permutation_round_trip() {
        let src: Vec<u8> = (1..=12).collect();
        let mut y41p = vec![0u8; 12];
        iyu1_to_y41p(8, 1, &mut y41p, 0, &src, 0, false);
        let mut back = vec![0u8; 12];
        y41p_to_iyu1(8, 1, &mut back, 0, &y41p, 0, false);
        assert_eq!(back, src);
    }

    #[test]
    fn i420_to_cljr_packs_rows() {
        let mut src = vec![8u8; 16]; // Y 4x4
        src.extend_from_slice(&[64, 64, 64, 64]); // U
        src.extend_from_slice(&[32, 32, 32, 32]); // V
        let view = PlanarView::new(
            PlanarKind::Contiguous {
                decimation: 2,
                u_first: true,
            },
            4,
            4,
            0,
        );
        let mut dst = vec![0u8; 16];
        planar_to_cljr(4, 4, &mut dst, 0, &src, view, false);
        for row in 0..4 {
            let word = read_u32_le(&dst, row * 4);
            assert_eq!(cljr_u(word), 64);
            assert_eq!(cljr_v(word), 32);
            assert_eq!(cljr_y(word, 0), 8);
        }
    }

    #[test]
    fn cljr_to_iyu2_interpolates_between_dwords() {
        let mut src = vec![0u8; 8];
        write_u32_le(&mut src, 0, pack_cljr(0, 0, 0, 0, 0, 0));
        write_u32_le(&mut src, 4, pack_cljr(128, 0, 0, 0, 0, 0));
        let mut dst = vec![0u8; 8 * 3];
        cljr_to_iyu2(8, 1, &mut dst, 0, &src, 0, false);
        let u: Vec<u8> = dst.chunks_exact(3).map(|p| p[0]).collect();
        assert_eq!(u[0], 0);
        assert_eq!(u[1], 32);
        assert_eq!(u[2], 64);
        assert_eq!(u[3], 96);
        assert_eq!(&u[4..], &[128; 4]);
    }
}
