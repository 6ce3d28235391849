/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! Multi-plane sources into packed 4:2:2 destinations.
//!
//! Luma copies verbatim. Sub-sampled chroma is reconstructed vertically:
//! the 4:2:0 odd row takes `(a+b)>>1` of the bracketing chroma rows, the
//! 4:1:0 quad uses the `{1, 3/4, 1/2, 1/4}` mixes implemented as
//! `(a*768 + b*256) >> 10` and its mirror. Reads of the "next" chroma row
//! or column clamp at the plane edge, which duplicates the last sample.

use crate::packed_to_packed::flip_row;
use crate::yuv_support::{avg2, mix_768_256, PackedY422Order, PlanarView};

pub(crate) fn planar_to_packed_422(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_order: PackedY422Order,
    src: &[u8],
    view: PlanarView,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 { width * 2 } else { dst_stride };
    let (out_y0, out_y1, out_u, out_v) = (
        dst_order.y0_offset(),
        dst_order.y1_offset(),
        dst_order.u_offset(),
        dst_order.v_offset(),
    );

    let uv_width = view.uv_width(width);
    let uv_height = view.uv_height(height);

    let store = |dy: usize, x_pair: usize, y0: u8, y1: u8, u: u8, v: u8, dst: &mut [u8]| {
        let d = &mut dst[dy * dst_stride + x_pair * 4..dy * dst_stride + x_pair * 4 + 4];
        d[out_y0] = y0;
        d[out_y1] = y1;
        d[out_u] = u;
        d[out_v] = v;
    };

    match view.vdec {
        1 => {
            for y in 0..height {
                let dy = flip_row(y, height, flipped);
                for cx in 0..uv_width {
                    store(
                        dy,
                        cx,
                        src[view.y_at(cx * 2, y)],
                        src[view.y_at(cx * 2 + 1, y)],
                        src[view.u_at(cx, y)],
                        src[view.v_at(cx, y)],
                        dst,
                    );
                }
            }
        }
        2 => {
            for cy in 0..uv_height {
                let next = (cy + 1).min(uv_height - 1);
                let dy0 = flip_row(cy * 2, height, flipped);
                let dy1 = flip_row(cy * 2 + 1, height, flipped);
                for cx in 0..uv_width {
                    let u_top = src[view.u_at(cx, cy)];
                    let v_top = src[view.v_at(cx, cy)];
                    let u_bot = src[view.u_at(cx, next)];
                    let v_bot = src[view.v_at(cx, next)];
                    store(
                        dy0,
                        cx,
                        src[view.y_at(cx * 2, cy * 2)],
                        src[view.y_at(cx * 2 + 1, cy * 2)],
                        u_top,
                        v_top,
                        dst,
                    );
                    store(
                        dy1,
                        cx,
                        src[view.y_at(cx * 2, cy * 2 + 1)],
                        src[view.y_at(cx * 2 + 1, cy * 2 + 1)],
                        avg2(u_top, u_bot),
                        avg2(v_top, v_bot),
                        dst,
                    );
                }
            }
        }
        4 => {
            for cy in 0..uv_height {
                let next = (cy + 1).min(uv_height - 1);
                for cx in 0..uv_width {
                    let right = (cx + 1).min(uv_width - 1);
                    // Chroma corners of this 4x4 cell.
                    let u_a = src[view.u_at(cx, cy)];
                    let v_a = src[view.v_at(cx, cy)];
                    let u_b = src[view.u_at(cx, next)];
                    let v_b = src[view.v_at(cx, next)];
                    // The right-hand pixel pair sits halfway to the next
                    // chroma column; average horizontally first.
                    let u_right_top = avg2(u_a, src[view.u_at(right, cy)]);
                    let v_right_top = avg2(v_a, src[view.v_at(right, cy)]);
                    let u_right_bot = avg2(u_b, src[view.u_at(right, next)]);
                    let v_right_bot = avg2(v_b, src[view.v_at(right, next)]);

                    for row in 0..4 {
                        let sy = cy * 4 + row;
                        let dy = flip_row(sy, height, flipped);
                        let (u_l, v_l, u_r, v_r) = match row {
                            0 => (u_a, v_a, u_right_top, v_right_top),
                            1 => (
                                mix_768_256(u_a, u_b),
                                mix_768_256(v_a, v_b),
                                mix_768_256(u_right_top, u_right_bot),
                                mix_768_256(v_right_top, v_right_bot),
                            ),
                            2 => (
                                avg2(u_a, u_b),
                                avg2(v_a, v_b),
                                avg2(u_right_top, u_right_bot),
                                avg2(v_right_top, v_right_bot),
                            ),
                            _ => (
                                mix_768_256(u_b, u_a),
                                mix_768_256(v_b, v_a),
                                mix_768_256(u_right_bot, u_right_top),
                                mix_768_256(v_right_bot, v_right_top),
                            ),
                        };
                        store(
                            dy,
                            cx * 2,
                            src[view.y_at(cx * 4, sy)],
                            src[view.y_at(cx * 4 + 1, sy)],
                            u_l,
                            v_l,
                            dst,
                        );
                        store(
                            dy,
                            cx * 2 + 1,
                            src[view.y_at(cx * 4 + 2, sy)],
                            src[view.y_at(cx * 4 + 3, sy)],
                            u_r,
                            v_r,
                            dst,
                        );
                    }
                }
            }
        }
        _ => unreachable!("unsupported vertical decimation {}", view.vdec),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yuv_support::{PackedY422Order, PlanarKind};

    fn i420_frame(width: usize, height: usize, y: u8, u: u8, v: u8) -> Vec<u8> {
        let mut buf = vec![y; width * height];
        buf.extend(std::iter::repeat(u).take(width * height / 4));
        buf.extend(std::iter::repeat(v).take(width * height / 4));
        buf
    }

    #[test]
    fn i420_to_yuy2_fills_macropixels() {
        let src = i420_frame(4, 4, 40, 90, 180);
        let view = PlanarView::new(
            PlanarKind::Contiguous {
                decimation: 2,
                u_first: true,
            },
            4,
            4,
            0,
        );
        let mut dst = vec![0u8; 4 * 4 * 2];
        planar_to_packed_422(4, 4, &mut dst, 0, PackedY422Order::YUY2, &src, view, false);
        for px in dst.chunks_exact(4) {
            assert_eq!(px, &[40, 90, 40, 180]);
        }
    }

    #[test]
    fn odd_rows_average_bracketing_chroma_rows() {
        let mut src = i420_frame(2, 4, 0, 0, 0);
        // U plane rows: 100 then 120. Row 1 must read (100+120)>>1.
        src[8] = 100;
        src[9] = 120;
        let view = PlanarView::new(
            PlanarKind::Contiguous {
                decimation: 2,
                u_first: true,
            },
            2,
            4,
            0,
        );
        let mut dst = vec![0u8; 2 * 4 * 2];
        planar_to_packed_422(2, 4, &mut dst, 0, PackedY422Order::YUY2, &src, view, false);
        assert_eq!(dst[1], 100); // row 0
        assert_eq!(dst[4 + 1], 110); // row 1: between the chroma rows
        assert_eq!(dst[8 + 1], 120); // row 2
        assert_eq!(dst[12 + 1], 120); // row 3: clamped at the last row
    }

    #[test]
    fn yuv9_quarter_mixes_match_the_768_256_kernel() {
        // 4x8 4:1:0 frame, U rows 64 then 192.
        let mut src = vec![0u8; 4 * 8];
        src.extend_from_slice(&[64, 192]); // U plane: 1x2
        src.extend_from_slice(&[0, 0]); // V plane
        let view = PlanarView::new(
            PlanarKind::Contiguous {
                decimation: 4,
                u_first: true,
            },
            4,
            8,
            0,
        );
        let mut dst = vec![0u8; 4 * 8 * 2];
        planar_to_packed_422(4, 8, &mut dst, 0, PackedY422Order::YUY2, &src, view, false);
        let u_of_row = |r: usize| dst[r * 8 + 1];
        assert_eq!(u_of_row(0), 64);
        assert_eq!(u_of_row(1), ((64u32 * 768 + 192 * 256) >> 10) as u8);
        assert_eq!(u_of_row(2), ((64u32 + 192) >> 1) as u8);
        assert_eq!(u_of_row(3), ((192u32 * 768 + 64 * 256) >> 10) as u8);
        // Second quad clamps to the last chroma row.
        assert_eq!(u_of_row(4), 192);
        assert_eq!(u_of_row(7), 192);
    }

    #[test]
    fn yv16_source_is_a_pure_permutation() {
        let mut src = vec![10u8; 4 * 2]; // Y
        src.extend_from_slice(&[1, 2, 3, 4]); // V rows
        src.extend_from_slice(&[5, 6, 7, 8]); // U rows
        let view = PlanarView::new(PlanarKind::Yv16, 4, 2, 0);
        let mut dst = vec![0u8; 4 * 2 * 2];
        planar_to_packed_422(4, 2, &mut dst, 0, PackedY422Order::UYVY, &src, view, false);
        assert_eq!(&dst[..8], &[5, 10, 1, 10, 6, 10, 2, 10]);
        assert_eq!(&dst[8..], &[7, 10, 3, 10, 8, 10, 4, 10]);
    }
}
