/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! Packed 4:2:2 sources into multi-plane destinations.
//!
//! Luma copies verbatim; chroma is decimated onto the destination lattice
//! with truncating box filters: a 2-tap vertical average for 4:2:0, an
//! 8-sample average for 4:1:0, and a plain permutation for the full-height
//! 4:2:2 planar layout.

use crate::packed_to_packed::flip_row;
use crate::yuv_support::{avg2, PackedY422Order, PlanarView};

pub(crate) fn packed_422_to_planar(
    width: usize,
    height: usize,
    dst: &mut [u8],
    view: PlanarView,
    src: &[u8],
    src_stride: usize,
    src_order: PackedY422Order,
    flipped: bool,
) {
    let src_stride = if src_stride == 0 { width * 2 } else { src_stride };
    let (in_y0, in_y1, in_u, in_v) = (
        src_order.y0_offset(),
        src_order.y1_offset(),
        src_order.u_offset(),
        src_order.v_offset(),
    );

    let uv_width = view.uv_width(width);
    let uv_height = view.uv_height(height);

    match view.vdec {
        1 => {
            // Full-height chroma: a pure permutation into three planes.
            for y in 0..height {
                let src_row = &src[y * src_stride..];
                let dy = flip_row(y, height, flipped);
                for cx in 0..uv_width {
                    let s = &src_row[cx * 4..cx * 4 + 4];
                    dst[view.y_at(cx * 2, dy)] = s[in_y0];
                    dst[view.y_at(cx * 2 + 1, dy)] = s[in_y1];
                    dst[view.u_at(cx, dy)] = s[in_u];
                    dst[view.v_at(cx, dy)] = s[in_v];
                }
            }
        }
        2 => {
            for cy in 0..uv_height {
                let top = &src[cy * 2 * src_stride..];
                let bottom = &src[(cy * 2 + 1) * src_stride..];
                let dy0 = flip_row(cy * 2, height, flipped);
                let dy1 = flip_row(cy * 2 + 1, height, flipped);
                let dcy = flip_row(cy, uv_height, flipped);
                for cx in 0..uv_width {
                    let st = &top[cx * 4..cx * 4 + 4];
                    let sb = &bottom[cx * 4..cx * 4 + 4];
                    dst[view.y_at(cx * 2, dy0)] = st[in_y0];
                    dst[view.y_at(cx * 2 + 1, dy0)] = st[in_y1];
                    dst[view.y_at(cx * 2, dy1)] = sb[in_y0];
                    dst[view.y_at(cx * 2 + 1, dy1)] = sb[in_y1];
                    dst[view.u_at(cx, dcy)] = avg2(st[in_u], sb[in_u]);
                    dst[view.v_at(cx, dcy)] = avg2(st[in_v], sb[in_v]);
                }
            }
        }
        4 => {
            for cy in 0..uv_height {
                let dcy = flip_row(cy, uv_height, flipped);
                for cx in 0..uv_width {
                    let mut u_sum = 0u16;
                    let mut v_sum = 0u16;
                    for row in 0..4 {
                        let src_row = &src[(cy * 4 + row) * src_stride..];
                        let dy = flip_row(cy * 4 + row, height, flipped);
                        for half in 0..2 {
                            let s = &src_row[cx * 8 + half * 4..cx * 8 + half * 4 + 4];
                            dst[view.y_at(cx * 4 + half * 2, dy)] = s[in_y0];
                            dst[view.y_at(cx * 4 + half * 2 + 1, dy)] = s[in_y1];
                            u_sum += s[in_u] as u16;
                            v_sum += s[in_v] as u16;
                        }
                    }
                    dst[view.u_at(cx, dcy)] = (u_sum >> 3) as u8;
                    dst[view.v_at(cx, dcy)] = (v_sum >> 3) as u8;
                }
            }
        }
        _ => unreachable!("unsupported vertical decimation {}", view.vdec),
    }
}
