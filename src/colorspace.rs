/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! BT.601 studio-swing colorspace arithmetic.
//!
//! One fixed matrix is used throughout the crate. The fast path works on
//! precomputed Q15 per-channel tables summed and arithmetic-shifted right by
//! 15; the slow path evaluates the same coefficients in `f64` and exists as
//! the reference the fast path is tested against (agreement within ±1 per
//! channel over the full 2^24 cube).

use crate::yuv_support::{pack_rgb555, pack_rgb565};
use once_cell::sync::Lazy;

/// Fixed-point scale of the coefficient tables.
const PRECISION: u32 = 15;
const SCALE: f64 = (1i64 << PRECISION) as f64;

struct ForwardTables {
    yr: [i32; 256],
    yg: [i32; 256],
    yb: [i32; 256],
    ur: [i32; 256],
    ug: [i32; 256],
    ub: [i32; 256],
    vr: [i32; 256],
    vg: [i32; 256],
    vb: [i32; 256],
}

struct InverseTables {
    luma: [i32; 256],
    rv: [i32; 256],
    gu: [i32; 256],
    gv: [i32; 256],
    bu: [i32; 256],
}

fn coefficient_table(coefficient: f64, bias: f64) -> [i32; 256] {
    let mut table = [0i32; 256];
    for (i, slot) in table.iter_mut().enumerate() {
        *slot = (coefficient * (i as f64 - bias) * SCALE).round() as i32;
    }
    table
}

static FORWARD: Lazy<ForwardTables> = Lazy::new(|| ForwardTables {
    yr: coefficient_table(0.257, 0.0),
    yg: coefficient_table(0.504, 0.0),
    yb: coefficient_table(0.098, 0.0),
    ur: coefficient_table(-0.148, 0.0),
    ug: coefficient_table(-0.291, 0.0),
    ub: coefficient_table(0.439, 0.0),
    vr: coefficient_table(0.439, 0.0),
    vg: coefficient_table(-0.368, 0.0),
    vb: coefficient_table(-0.071, 0.0),
});

static INVERSE: Lazy<InverseTables> = Lazy::new(|| InverseTables {
    luma: coefficient_table(1.164, 16.0),
    rv: coefficient_table(1.596, 128.0),
    gu: coefficient_table(-0.391, 128.0),
    gv: coefficient_table(-0.813, 128.0),
    bu: coefficient_table(2.018, 128.0),
});

#[inline(always)]
fn saturate(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// RGB to YUV using the fixed-point tables.
#[inline]
pub fn fast_rgb_to_yuv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let t = &*FORWARD;
    let (r, g, b) = (r as usize, g as usize, b as usize);
    let y = ((t.yr[r] + t.yg[g] + t.yb[b]) >> PRECISION) + 16;
    let u = ((t.ur[r] + t.ug[g] + t.ub[b]) >> PRECISION) + 128;
    let v = ((t.vr[r] + t.vg[g] + t.vb[b]) >> PRECISION) + 128;
    (y as u8, u as u8, v as u8)
}

/// YUV to RGB using the fixed-point tables, saturating to `[0, 255]`.
#[inline]
pub fn fast_yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let t = &*INVERSE;
    let (y, u, v) = (y as usize, u as usize, v as usize);
    let luma = t.luma[y];
    let r = saturate((luma + t.rv[v]) >> PRECISION);
    let g = saturate((luma + t.gu[u] + t.gv[v]) >> PRECISION);
    let b = saturate((luma + t.bu[u]) >> PRECISION);
    (r, g, b)
}

/// Floating-point reference for [`fast_rgb_to_yuv`].
pub fn slow_rgb_to_yuv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let y = 0.257 * r + 0.504 * g + 0.098 * b + 16.0;
    let u = -0.148 * r - 0.291 * g + 0.439 * b + 128.0;
    let v = 0.439 * r - 0.368 * g - 0.071 * b + 128.0;
    (y, u, v)
}

/// Floating-point reference for [`fast_yuv_to_rgb`], clamped to `[0, 255]`.
pub fn slow_yuv_to_rgb(y: u8, u: u8, v: u8) -> (f64, f64, f64) {
    let y = 1.164 * (y as f64 - 16.0);
    let u = u as f64 - 128.0;
    let v = v as f64 - 128.0;
    let r = (y + 1.596 * v).clamp(0.0, 255.0);
    let g = (y - 0.813 * v - 0.391 * u).clamp(0.0, 255.0);
    let b = (y + 2.018 * u).clamp(0.0, 255.0);
    (r, g, b)
}

/// Studio-swing luma of an RGB triple, as used by the greyscale routines.
#[inline]
pub(crate) fn rgb_luma(r: u8, g: u8, b: u8) -> u8 {
    let t = &*FORWARD;
    (((t.yr[r as usize] + t.yg[g as usize] + t.yb[b as usize]) >> PRECISION) + 16) as u8
}

pub(crate) struct GreyscaleTables {
    pub rgb32: [u32; 256],
    pub rgba: [u32; 256],
    pub rgb565: [u16; 256],
    pub rgb555: [u16; 256],
}

/// Grey pixel values re-encoding a luma byte into each RGB layout.
pub(crate) static GREYSCALE: Lazy<GreyscaleTables> = Lazy::new(|| {
    let mut t = GreyscaleTables {
        rgb32: [0; 256],
        rgba: [0; 256],
        rgb565: [0; 256],
        rgb555: [0; 256],
    };
    for y in 0..256usize {
        let v = y as u32;
        t.rgba[y] = (v << 16) | (v << 8) | v;
        t.rgb32[y] = 0xFF00_0000 | t.rgba[y];
        t.rgb565[y] = pack_rgb565(y as u8, y as u8, y as u8);
        t.rgb555[y] = pack_rgb555(y as u8, y as u8, y as u8);
    }
    t
});

/// Forces the lazy tables. Idempotent; conversions initialize them on first
/// use anyway, this only front-loads the work.
pub fn initialize_library() {
    Lazy::force(&FORWARD);
    Lazy::force(&INVERSE);
    Lazy::force(&GREYSCALE);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(fast: u8, slow: f64) -> i32 {
        (fast as i32 - slow as u8 as i32).abs()
    }

    #[test]
    fn forward_matches_slow_on_grid() {
        let mut max = 0;
        for r in (0..256).step_by(5) {
            for g in (0..256).step_by(5) {
                for b in (0..256).step_by(5) {
                    let (fy, fu, fv) = fast_rgb_to_yuv(r as u8, g as u8, b as u8);
                    let (sy, su, sv) = slow_rgb_to_yuv(r as u8, g as u8, b as u8);
                    max = max
                        .max(delta(fy, sy))
                        .max(delta(fu, su))
                        .max(delta(fv, sv));
                }
            }
        }
        assert!(max <= 1, "max deviation {} from slow conversion", max);
    }

    #[test]
    fn inverse_matches_slow_on_grid() {
        let mut max = 0;
        for y in (0..256).step_by(5) {
            for u in (0..256).step_by(5) {
                for v in (0..256).step_by(5) {
                    let (fr, fg, fb) = fast_yuv_to_rgb(y as u8, u as u8, v as u8);
                    let (sr, sg, sb) = slow_yuv_to_rgb(y as u8, u as u8, v as u8);
                    max = max
                        .max(delta(fr, sr))
                        .max(delta(fg, sg))
                        .max(delta(fb, sb));
                }
            }
        }
        assert!(max <= 1, "max deviation {} from slow conversion", max);
    }

    #[test]
    #[ignore = "exhaustive 2^24 sweep, run on demand"]
    fn forward_matches_slow_exhaustively() {
        for r in 0..256 {
            for g in 0..256 {
                for b in 0..256 {
                    let (fy, fu, fv) = fast_rgb_to_yuv(r as u8, g as u8, b as u8);
                    let (sy, su, sv) = slow_rgb_to_yuv(r as u8, g as u8, b as u8);
                    assert!(delta(fy, sy) <= 1 && delta(fu, su) <= 1 && delta(fv, sv) <= 1);
                }
            }
        }
    }

    #[test]
    #[ignore = "exhaustive 2^24 sweep, run on demand"]
    fn inverse_matches_slow_exhaustively() {
        for y in 0..256 {
            for u in 0..256 {
                for v in 0..256 {
                    let (fr, fg, fb) = fast_yuv_to_rgb(y as u8, u as u8, v as u8);
                    let (sr, sg, sb) = slow_yuv_to_rgb(y as u8, u as u8, v as u8);
                    assert!(delta(fr, sr) <= 1 && delta(fg, sg) <= 1 && delta(fb, sb) <= 1);
                }
            }
        }
    }

    #[test]
    fn black_white_and_grey_anchor_points() {
        assert_eq!(fast_rgb_to_yuv(0, 0, 0), (16, 128, 128));
        let (y, u, v) = fast_rgb_to_yuv(255, 255, 255);
        assert!(y >= 234 && u == 128 && v == 128);
        let (r, g, b) = fast_yuv_to_rgb(16, 128, 128);
        assert_eq!((r, g, b), (0, 0, 0));
    }
}
