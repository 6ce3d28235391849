/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! Multi-plane to multi-plane conversion.
//!
//! The luma plane always copies. Chroma either copies (same lattice),
//! collapses with a truncating box filter (finer to coarser), or expands
//! bilinearly (coarser to finer). The 4:1:0 to 4:2:0 expansion runs in two
//! passes: duplicate rows first, then re-average the odd produced rows
//! against their successors.

use crate::packed_to_packed::flip_row;
use crate::yuv_support::{avg2, avg4, mix_768_256, PlanarView};

fn copy_luma(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dv: PlanarView,
    src: &[u8],
    sv: PlanarView,
    flipped: bool,
) {
    for y in 0..height {
        let dy = flip_row(y, height, flipped);
        let d = dv.y_at(0, dy);
        let s = sv.y_at(0, y);
        dst[d..d + width].copy_from_slice(&src[s..s + width]);
    }
}

#[allow(clippy::too_many_arguments)]
fn for_each_chroma_sample(
    uv_width: usize,
    uv_height: usize,
    flipped: bool,
    mut sample: impl FnMut(usize, usize) -> (u8, u8),
    dst: &mut [u8],
    dv: PlanarView,
) {
    for cy in 0..uv_height {
        let dcy = flip_row(cy, uv_height, flipped);
        for cx in 0..uv_width {
            let (u, v) = sample(cx, cy);
            dst[dv.u_at(cx, dcy)] = u;
            dst[dv.v_at(cx, dcy)] = v;
        }
    }
}

pub(crate) fn planar_to_planar(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dv: PlanarView,
    src: &[u8],
    sv: PlanarView,
    flipped: bool,
) {
    copy_luma(width, height, dst, dv, src, sv, flipped);

    let duv_w = dv.uv_width(width);
    let duv_h = dv.uv_height(height);
    let suv_w = sv.uv_width(width);
    let suv_h = sv.uv_height(height);

    match ((sv.hdec, sv.vdec), (dv.hdec, dv.vdec)) {
        ((sh, svd), (dh, dvd)) if sh == dh && svd == dvd => {
            for_each_chroma_sample(
                duv_w,
                duv_h,
                flipped,
                |cx, cy| (src[sv.u_at(cx, cy)], src[sv.v_at(cx, cy)]),
                dst,
                dv,
            );
        }
        ((2, 2), (4, 4)) => {
            // 2x2 box of the finer lattice.
            for_each_chroma_sample(
                duv_w,
                duv_h,
                flipped,
                |cx, cy| {
                    let (x, y) = (cx * 2, cy * 2);
                    (
                        avg4(
                            src[sv.u_at(x, y)],
                            src[sv.u_at(x + 1, y)],
                            src[sv.u_at(x, y + 1)],
                            src[sv.u_at(x + 1, y + 1)],
                        ),
                        avg4(
                            src[sv.v_at(x, y)],
                            src[sv.v_at(x + 1, y)],
                            src[sv.v_at(x, y + 1)],
                            src[sv.v_at(x + 1, y + 1)],
                        ),
                    )
                },
                dst,
                dv,
            );
        }
        ((2, 1), (4, 4)) => {
            // Two columns by four full-height rows: eight samples.
            for_each_chroma_sample(
                duv_w,
                duv_h,
                flipped,
                |cx, cy| {
                    let mut u_sum = 0u16;
                    let mut v_sum = 0u16;
                    for row in 0..4 {
                        for col in 0..2 {
                            u_sum += src[sv.u_at(cx * 2 + col, cy * 4 + row)] as u16;
                            v_sum += src[sv.v_at(cx * 2 + col, cy * 4 + row)] as u16;
                        }
                    }
                    ((u_sum >> 3) as u8, (v_sum >> 3) as u8)
                },
                dst,
                dv,
            );
        }
        ((2, 1), (2, 2)) => {
            // Full-height chroma down to half height: vertical pairs.
            for_each_chroma_sample(
                duv_w,
                duv_h,
                flipped,
                |cx, cy| {
                    (
                        avg2(src[sv.u_at(cx, cy * 2)], src[sv.u_at(cx, cy * 2 + 1)]),
                        avg2(src[sv.v_at(cx, cy * 2)], src[sv.v_at(cx, cy * 2 + 1)]),
                    )
                },
                dst,
                dv,
            );
        }
        ((2, 2), (2, 1)) => {
            // Half-height chroma up to full height.
            for_each_chroma_sample(
                duv_w,
                duv_h,
                flipped,
                |cx, cy| {
                    let scy = cy / 2;
                    if cy & 1 == 0 {
                        (src[sv.u_at(cx, scy)], src[sv.v_at(cx, scy)])
                    } else {
                        let next = (scy + 1).min(suv_h - 1);
                        (
                            avg2(src[sv.u_at(cx, scy)], src[sv.u_at(cx, next)]),
                            avg2(src[sv.v_at(cx, scy)], src[sv.v_at(cx, next)]),
                        )
                    }
                },
                dst,
                dv,
            );
        }
        ((4, 4), (2, 2)) => {
            // Bilinear expansion. First pass: each source chroma row fills a
            // pair of destination rows, odd columns halfway to the next
            // source column.
            for cy in 0..suv_h {
                for cx in 0..suv_w {
                    let right = (cx + 1).min(suv_w - 1);
                    let u0 = src[sv.u_at(cx, cy)];
                    let v0 = src[sv.v_at(cx, cy)];
                    let u1 = avg2(u0, src[sv.u_at(right, cy)]);
                    let v1 = avg2(v0, src[sv.v_at(right, cy)]);
                    for row in 0..2 {
                        let dcy = flip_row(cy * 2 + row, duv_h, flipped);
                        dst[dv.u_at(cx * 2, dcy)] = u0;
                        dst[dv.v_at(cx * 2, dcy)] = v0;
                        dst[dv.u_at(cx * 2 + 1, dcy)] = u1;
                        dst[dv.v_at(cx * 2 + 1, dcy)] = v1;
                    }
                }
            }
            // Second pass: blend each odd produced row into its successor.
            for cy in (2..duv_h).step_by(2) {
                let prev = flip_row(cy - 1, duv_h, flipped);
                let this = flip_row(cy, duv_h, flipped);
                for cx in 0..duv_w {
                    let u = avg2(dst[dv.u_at(cx, prev)], dst[dv.u_at(cx, this)]);
                    let v = avg2(dst[dv.v_at(cx, prev)], dst[dv.v_at(cx, this)]);
                    dst[dv.u_at(cx, prev)] = u;
                    dst[dv.v_at(cx, prev)] = v;
                }
            }
        }
        ((4, 4), (2, 1)) => {
            // Coarsest lattice up to full-height 4:2:2 chroma.
            for_each_chroma_sample(
                duv_w,
                duv_h,
                flipped,
                |cx, cy| {
                    let scx = cx / 2;
                    let scy = cy / 4;
                    let right = (scx + 1).min(suv_w - 1);
                    let below = (scy + 1).min(suv_h - 1);
                    let mix_h = |a: u8, b: u8| if cx & 1 == 0 { a } else { avg2(a, b) };
                    let u_top = mix_h(src[sv.u_at(scx, scy)], src[sv.u_at(right, scy)]);
                    let v_top = mix_h(src[sv.v_at(scx, scy)], src[sv.v_at(right, scy)]);
                    let u_bot = mix_h(src[sv.u_at(scx, below)], src[sv.u_at(right, below)]);
                    let v_bot = mix_h(src[sv.v_at(scx, below)], src[sv.v_at(right, below)]);
                    match cy & 3 {
                        0 => (u_top, v_top),
                        1 => (mix_768_256(u_top, u_bot), mix_768_256(v_top, v_bot)),
                        2 => (avg2(u_top, u_bot), avg2(v_top, v_bot)),
                        _ => (mix_768_256(u_bot, u_top), mix_768_256(v_bot, v_top)),
                    }
                },
                dst,
                dv,
            );
        }
        (s, d) => unreachable!("unsupported chroma rescale {:?} -> {:?}", s, d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yuv_support::PlanarKind;

    fn contiguous(dec: usize, u_first: bool, w: usize, h: usize) -> PlanarView {
        PlanarView::new(
            PlanarKind::Contiguous {
                decimation: dec,
                u_first,
            },
            w,
            h,
            0,
        )
    }

    #[test]
    fn i420_to_yv12_swaps_chroma_planes() {
        let mut src = vec![9u8; 16]; // Y 4x4
        src.extend_from_slice(&[1, 2, 3, 4]); // U
        src.extend_from_slice(&[5, 6, 7, 8]); // V
        let sv = contiguous(2, true, 4, 4);
        let dv = contiguous(2, false, 4, 4);
        let mut dst = vec![0u8; 24];
        planar_to_planar(4, 4, &mut dst, dv, &src, sv, false);
        assert_eq!(&dst[..16], &src[..16]);
        assert_eq!(&dst[16..20], &[5, 6, 7, 8]); // V now first
        assert_eq!(&dst[20..24], &[1, 2, 3, 4]);
    }

    #[test]
    fn i420_to_yuv9_boxes_2x2_chroma() {
        let mut src = vec![0u8; 16];
        src.extend_from_slice(&[10, 20, 30, 44]); // U 2x2
        src.extend_from_slice(&[0, 0, 0, 0]); // V
        let sv = contiguous(2, true, 4, 4);
        let dv = contiguous(4, true, 4, 4);
        let mut dst = vec![0u8; 16 + 2];
        planar_to_planar(4, 4, &mut dst, dv, &src, sv, false);
        assert_eq!(dst[16], (10 + 20 + 30 + 44) / 4);
    }

    #[test]
    fn yuv9_to_i420_expands_and_reblends() {
        // 8x8 frame: 4:1:0 chroma is 2x2.
        let mut src = vec![0u8; 64];
        src.extend_from_slice(&[0, 64, 128, 255]); // U 2x2
        src.extend_from_slice(&[50, 50, 50, 50]); // V 2x2
        let sv = contiguous(4, true, 8, 8);
        let dv = contiguous(2, true, 8, 8);
        let mut dst = vec![0u8; 64 + 32];
        planar_to_planar(8, 8, &mut dst, dv, &src, sv, false);
        let u = |cx: usize, cy: usize| dst[64 + cy * 4 + cx];
        // Row 0 expands source row 0 horizontally.
        assert_eq!(u(0, 0), 0);
        assert_eq!(u(1, 0), 32);
        assert_eq!(u(2, 0), 64);
        assert_eq!(u(3, 0), 64); // clamped at the right edge
        // Row 1 was duplicated from row 0 then blended with row 2.
        assert_eq!(u(0, 1), avg2(0, 128));
        // Constant V stays constant.
        assert!(dst[96..].iter().all(|&b| b == 50));
    }

    #[test]
    fn yv16_round_trip_through_i420_duplicates_rows() {
        // YV16 (full-height chroma) -> I420 -> YV16.
        let mut src = vec![0u8; 8]; // Y 4x2
        src.extend_from_slice(&[100, 200]); // V rows
        src.extend_from_slice(&[10, 30]); // U rows
        let yv16 = PlanarView::new(PlanarKind::Yv16, 4, 2, 0);
        let i420 = contiguous(2, true, 4, 2);
        let mut mid = vec![0u8; 8 + 4];
        planar_to_planar(4, 2, &mut mid, i420, &src, yv16, false);
        assert_eq!(&mid[8..10], &[20, 20]); // (10+30)>>1
        let mut back = vec![0u8; 16];
        planar_to_planar(4, 2, &mut back, yv16, &mid, i420, false);
        assert_eq!(&back[12..], &[20, 20, 20, 20]);
    }

    #[test]
    fn nv12_to_i420_deinterleaves() {
        let mut src = vec![3u8; 8]; // Y 4x2
        src.extend_from_slice(&[11, 22, 33, 44]); // UVUV
        let nv = PlanarView::new(PlanarKind::SemiPlanar { u_first: true }, 4, 2, 0);
        let i420 = contiguous(2, true, 4, 2);
        let mut dst = vec![0u8; 12];
        planar_to_planar(4, 2, &mut dst, i420, &src, nv, false);
        assert_eq!(&dst[8..10], &[11, 33]);
        assert_eq!(&dst[10..12], &[22, 44]);
    }
}
