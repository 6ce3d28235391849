/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! AYUV (packed 4:4:4:4, bytes V,U,Y,A) kernels.
//!
//! Chroma averages over the destination lattice on the way out and is
//! reconstructed with the shared horizontal/vertical mixes on the way back
//! in. Alpha is carried where both sides have it and synthesized as opaque
//! where only the destination does.

use crate::packed_to_packed::flip_row;
use crate::yuv_support::{
    avg2, avg4, mix_768_256, pack_cljr, write_u32_le, PackedY422Order, PlanarView,
};

const BPP: usize = 4;

#[inline(always)]
fn ayuv_stride(width: usize, stride: usize) -> usize {
    if stride == 0 {
        width * 4
    } else {
        stride
    }
}

#[inline(always)]
fn quarter_profile(a: u8, b: u8) -> [u8; 4] {
    [a, mix_768_256(a, b), avg2(a, b), mix_768_256(b, a)]
}

pub(crate) fn ayuv_to_packed_422(
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
    let src_stride = ayuv_stride(width, src_stride);
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
            let s = &s_row[px * 8..px * 8 + 8];
            let d = &mut dst[d_base + px * 4..d_base + px * 4 + 4];
            d[u] = avg2(s[1], s[5]);
            d[v] = avg2(s[0], s[4]);
            d[y0] = s[2];
            d[y1] = s[6];
        }
    }
}

/// `alpha_from_bit` maps the Y42T opacity bit of the source luma onto the
/// alpha byte; otherwise alpha is opaque.
pub(crate) fn packed_422_to_ayuv(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    src_order: PackedY422Order,
    flipped: bool,
    alpha_from_bit: bool,
) {
    let dst_stride = ayuv_stride(width, dst_stride);
    let src_stride = if src_stride == 0 { width * 2 } else { src_stride };
    let (y0, y1, u, v) = (
        src_order.y0_offset(),
        src_order.y1_offset(),
        src_order.u_offset(),
        src_order.v_offset(),
    );
    let alpha = |luma: u8| {
        if alpha_from_bit {
            if luma & 1 == 1 {
                0xFF
            } else {
                0x00
            }
        } else {
            0xFF
        }
    };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for px in 0..width / 2 {
            let s = &s_row[px * 4..px * 4 + 4];
            let d = &mut dst[d_base + px * 8..d_base + px * 8 + 8];
            d[0] = s[v];
            d[1] = s[u];
            d[2] = s[y0];
            d[3] = alpha(s[y0]);
            d[4] = s[v];
            d[5] = s[u];
            d[6] = s[y1];
            d[7] = alpha(s[y1]);
        }
    }
}

pub(crate) fn ayuv_to_planar(
    width: usize,
    height: usize,
    dst: &mut [u8],
    view: PlanarView,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let src_stride = ayuv_stride(width, src_stride);
    let uv_height = view.uv_height(height);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let dy = flip_row(y, height, flipped);
        for x in 0..width {
            dst[view.y_at(x, dy)] = s_row[x * BPP + 2];
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
                    let px = (cx * view.hdec + col) * BPP;
                    v_sum += s_row[px] as u16;
                    u_sum += s_row[px + 1] as u16;
                }
            }
            let shift = (view.hdec * view.vdec).trailing_zeros();
            dst[view.u_at(cx, dcy)] = (u_sum >> shift) as u8;
            dst[view.v_at(cx, dcy)] = (v_sum >> shift) as u8;
        }
    }
}

pub(crate) fn planar_to_ayuv(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    view: PlanarView,
    flipped: bool,
) {
    let dst_stride = ayuv_stride(width, dst_stride);
    let uv_width = view.uv_width(width);
    let uv_height = view.uv_height(height);
    for y in 0..height {
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for x in 0..width {
            let cx = x / view.hdec;
            let right = (cx + 1).min(uv_width - 1);
            let fx = x % view.hdec;
            let (u, v) = match view.vdec {
                1 => {
                    if fx == 0 {
                        (src[view.u_at(cx, y)], src[view.v_at(cx, y)])
                    } else {
                        (
                            avg2(src[view.u_at(cx, y)], src[view.u_at(right, y)]),
                            avg2(src[view.v_at(cx, y)], src[view.v_at(right, y)]),
                        )
                    }
                }
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
            let d = &mut dst[d_base + x * BPP..d_base + x * BPP + BPP];
            d[0] = v;
            d[1] = u;
            d[2] = src[view.y_at(x, y)];
            d[3] = 0xFF;
        }
    }
}

pub(crate) fn ayuv_to_iyu2(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width * 3 } else { dst_stride };
    let src_stride = ayuv_stride(width, src_stride);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for x in 0..width {
            let s = &s_row[x * BPP..x * BPP + BPP];
            let d = &mut dst[d_base + x * 3..d_base + x * 3 + 3];
            d[0] = s[1];
            d[1] = s[2];
            d[2] = s[0];
        }
    }
}

pub(crate) fn iyu2_to_ayuv(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = ayuv_stride(width, dst_stride);
    let src_stride = if src_stride == 0 { width * 3 } else { src_stride };
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for x in 0..width {
            let s = &s_row[x * 3..x * 3 + 3];
            let d = &mut dst[d_base + x * BPP..d_base + x * BPP + BPP];
            d[0] = s[2];
            d[1] = s[0];
            d[2] = s[1];
            d[3] = 0xFF;
        }
    }
}

pub(crate) fn ayuv_to_iyu1(
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
    let src_stride = ayuv_stride(width, src_stride);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 4 {
            let s = &s_row[bx * 16..bx * 16 + 16];
            let d = &mut dst[d_base + bx * 6..d_base + bx * 6 + 6];
            d[0] = avg4(s[1], s[5], s[9], s[13]);
            d[3] = avg4(s[0], s[4], s[8], s[12]);
            d[1] = s[2];
            d[2] = s[6];
            d[4] = s[10];
            d[5] = s[14];
        }
    }
}

pub(crate) fn iyu1_to_ayuv(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = ayuv_stride(width, dst_stride);
    let src_stride = if src_stride == 0 {
        width * 12 / 8
    } else {
        src_stride
    };
    let blocks = width / 4;
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..blocks {
            let s = &s_row[bx * 6..];
            let (next_u, next_v) = if bx + 1 == blocks {
                (s[0], s[3])
            } else {
                (s[6], s[9])
            };
            let u = quarter_profile(s[0], next_u);
            let v = quarter_profile(s[3], next_v);
            let luma = [s[1], s[2], s[4], s[5]];
            let d = &mut dst[d_base + bx * 16..d_base + bx * 16 + 16];
            for px in 0..4 {
                d[px * 4] = v[px];
                d[px * 4 + 1] = u[px];
                d[px * 4 + 2] = luma[px];
                d[px * 4 + 3] = 0xFF;
            }
        }
    }
}

pub(crate) fn ayuv_to_y41p(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 {
        width / 8 * 12
    } else {
        dst_stride
    };
    let src_stride = ayuv_stride(width, src_stride);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 8 {
            let s = &s_row[bx * 32..bx * 32 + 32];
            let d = &mut dst[d_base + bx * 12..d_base + bx * 12 + 12];
            d[0] = avg4(s[1], s[5], s[9], s[13]);
            d[2] = avg4(s[0], s[4], s[8], s[12]);
            d[4] = avg4(s[17], s[21], s[25], s[29]);
            d[6] = avg4(s[16], s[20], s[24], s[28]);
            for (i, slot) in [1usize, 3, 5, 7, 8, 9, 10, 11].into_iter().enumerate() {
                d[slot] = s[i * 4 + 2];
            }
        }
    }
}

pub(crate) fn y41p_to_ayuv(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
    alpha_from_bit: bool,
) {
    let dst_stride = ayuv_stride(width, dst_stride);
    let src_stride = if src_stride == 0 {
        width / 8 * 12
    } else {
        src_stride
    };
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
            let d = &mut dst[d_base + bx * 32..d_base + bx * 32 + 32];
            for px in 0..8 {
                let (u, v) = if px < 4 {
                    (u_first[px], v_first[px])
                } else {
                    (u_second[px - 4], v_second[px - 4])
                };
                d[px * 4] = v;
                d[px * 4 + 1] = u;
                d[px * 4 + 2] = luma[px];
                d[px * 4 + 3] = if alpha_from_bit {
                    if luma[px] & 1 == 1 {
                        0xFF
                    } else {
                        0x00
                    }
                } else {
                    0xFF
                };
            }
        }
    }
}

pub(crate) fn ayuv_to_cljr(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width } else { dst_stride };
    let src_stride = ayuv_stride(width, src_stride);
    for y in 0..height {
        let s_row = &src[y * src_stride..];
        let d_base = flip_row(y, height, flipped) * dst_stride;
        for bx in 0..width / 4 {
            let s = &s_row[bx * 16..bx * 16 + 16];
            write_u32_le(
                dst,
                d_base + bx * 4,
                pack_cljr(
                    avg4(s[1], s[5], s[9], s[13]),
                    avg4(s[0], s[4], s[8], s[12]),
                    s[2],
                    s[6],
                    s[10],
                    s[14],
                ),
            );
        }
    }
}

pub(crate) fn cljr_to_ayuv(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    flipped: bool,
) {
    use crate::yuv_support::{cljr_u, cljr_v, cljr_y, read_u32_le};
    let dst_stride = ayuv_stride(width, dst_stride);
    let src_stride = if src_stride == 0 { width } else { src_stride };
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
            let d = &mut dst[d_base + bx * 16..d_base + bx * 16 + 16];
            for px in 0..4 {
                d[px * 4] = v[px];
                d[px * 4 + 1] = u[px];
                d[px * 4 + 2] = cljr_y(word, px);
                d[px * 4 + 3] = 0xFF;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yuv_support::{PackedY422Order, PlanarKind};

    fn ayuv_pixel(y: u8, u: u8, v: u8, a: u8) -> [u8; 4] {
        [v, u, y, a]
    }

    #[test]
    fn ayuv_round_trips_through_iyu2() {
        let mut src = Vec::new();
        for x in 0..4u8 {
            src.extend_from_slice(&ayuv_pixel(x * 10, x * 20, x * 30, 0xFF));
        }
        let mut iyu2 = vec![0u8; 12];
        ayuv_to_iyu2(4, 1, &mut iyu2, 0, &src, 0, false);
        let mut back = vec![0u8; 16];
        iyu2_to_ayuv(4, 1, &mut back, 0, &iyu2, 0, false);
        assert_eq!(back, src);
    }

    #[test]
    fn ayuv_to_uyvy_averages_pairs() {
        let mut src = Vec::new();
        src.extend_from_slice(&ayuv_pixel(10, 100, 200, 0xFF));
        src.extend_from_slice(&ayuv_pixel(20, 104, 210, 0xFF));
        let mut dst = vec![0u8; 4];
        ayuv_to_packed_422(
            2,
            1,
            &mut dst,
            0,
            PackedY422Order::UYVY,
            &src,
            0,
            false,
        );
        assert_eq!(dst, vec![102, 10, 205, 20]);
    }

    #[test]
    fn y42t_bit_becomes_alpha() {
        // UYVY carrier with Y bit0 set on the first sample only.
        let src = vec![100, 11, 120, 10];
        let mut dst = vec![0u8; 8];
        packed_422_to_ayuv(2, 1, &mut dst, 0, &src, 0, PackedY422Order::UYVY, false, true);
        assert_eq!(dst[3], 0xFF);
        assert_eq!(dst[7], 0x00);
    }

    #[test]
    fn ayuv_to_i420_boxes_chroma() {
        let mut src = Vec::new();
        for y in 0..2 {
            for x in 0..2 {
                src.extend_from_slice(&ayuv_pixel(50, 10 + (y * 2 + x) * 4, 200, 0xFF));
            }
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
        ayuv_to_planar(2, 2, &mut dst, view, &src, 0, false);
        assert_eq!(&dst[..4], &[50; 4]);
        assert_eq!(dst[4], (10 + 14 + 18 + 22) / 4);
        assert_eq!(dst[5], 200);
    }

    #[test]
    fn planar_to_ayuv_writes_opaque_alpha() {
        let mut src = vec![77u8; 4]; // Y 2x2
        src.extend_from_slice(&[120]); // U
        src.extend_from_slice(&[130]); // V
        let view = PlanarView::new(
            PlanarKind::Contiguous {
                decimation: 2,
                u_first: true,
            },
            2,
            2,
            0,
        );
        let mut dst = vec![0u8; 16];
        planar_to_ayuv(2, 2, &mut dst, 0, &src, view, false);
        for px in dst.chunks_exact(4) {
            assert_eq!(px, &[130, 120, 77, 0xFF]);
        }
    }
}
