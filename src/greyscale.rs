/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! In-place greyscale reduction.
//!
//! RGB formats replace each pixel with its BT.601 luma re-encoded through
//! the greyscale tables. YUV formats zero their chroma samples and leave
//! luma alone. Palettized formats rewrite the caller's palette instead of
//! the image bytes; callers must pass the palette they will keep using.

use crate::colorspace::{rgb_luma, GREYSCALE};
use crate::yuv_support::{
    read_u16_le, read_u32_le, write_u16_le, write_u32_le, BgrQuad, PackedY422Order, PlanarView,
    CLJR_LUMA_MASK, RGB555_ALPHA_MASK,
};

pub(crate) fn greyscale_rgba(width: usize, height: usize, buf: &mut [u8], stride: usize) {
    let stride = if stride == 0 { width * 4 } else { stride };
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for x in 0..width {
            let p = read_u32_le(row, x * 4);
            let luma = rgb_luma(
                (p >> 16) as u8,
                (p >> 8) as u8,
                p as u8,
            );
            write_u32_le(row, x * 4, (p & 0xFF00_0000) | GREYSCALE.rgba[luma as usize]);
        }
    }
}

pub(crate) fn greyscale_rgb32(width: usize, height: usize, buf: &mut [u8], stride: usize) {
    let stride = if stride == 0 { width * 4 } else { stride };
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for x in 0..width {
            let p = read_u32_le(row, x * 4);
            let luma = rgb_luma((p >> 16) as u8, (p >> 8) as u8, p as u8);
            write_u32_le(row, x * 4, GREYSCALE.rgb32[luma as usize]);
        }
    }
}

pub(crate) fn greyscale_rgb24(width: usize, height: usize, buf: &mut [u8], stride: usize) {
    let stride = if stride == 0 { width * 3 } else { stride };
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for x in 0..width {
            let p = &mut row[x * 3..x * 3 + 3];
            let luma = rgb_luma(p[2], p[1], p[0]);
            p[0] = luma;
            p[1] = luma;
            p[2] = luma;
        }
    }
}

pub(crate) fn greyscale_rgb565(width: usize, height: usize, buf: &mut [u8], stride: usize) {
    let stride = if stride == 0 { width * 2 } else { stride };
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for x in 0..width {
            let w = read_u16_le(row, x * 2);
            // Luma of the shifted-up channel values, low bits zero.
            let luma = rgb_luma(
                ((w >> 11) << 3) as u8,
                (((w >> 5) & 0x3F) << 2) as u8,
                ((w & 0x1F) << 3) as u8,
            );
            write_u16_le(row, x * 2, GREYSCALE.rgb565[luma as usize]);
        }
    }
}

pub(crate) fn greyscale_rgb555(width: usize, height: usize, buf: &mut [u8], stride: usize) {
    let stride = if stride == 0 { width * 2 } else { stride };
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for x in 0..width {
            let w = read_u16_le(row, x * 2);
            let luma = rgb_luma(
                (((w >> 10) & 0x1F) << 3) as u8,
                (((w >> 5) & 0x1F) << 3) as u8,
                ((w & 0x1F) << 3) as u8,
            );
            write_u16_le(
                row,
                x * 2,
                (w & RGB555_ALPHA_MASK) | GREYSCALE.rgb555[luma as usize],
            );
        }
    }
}

/// Palettized rasters grey out by rewriting every palette entry; the image
/// bytes stay untouched. The caller's palette is mutated in place.
pub(crate) fn greyscale_palette(palette: &mut [BgrQuad]) {
    for entry in palette.iter_mut() {
        let luma = rgb_luma(entry.red, entry.green, entry.blue);
        entry.red = luma;
        entry.green = luma;
        entry.blue = luma;
    }
}

pub(crate) fn greyscale_packed_422(
    width: usize,
    height: usize,
    buf: &mut [u8],
    stride: usize,
    order: PackedY422Order,
) {
    let stride = if stride == 0 { width * 2 } else { stride };
    let (u, v) = (order.u_offset(), order.v_offset());
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for px in 0..width / 2 {
            row[px * 4 + u] = 0;
            row[px * 4 + v] = 0;
        }
    }
}

pub(crate) fn greyscale_ayuv(width: usize, height: usize, buf: &mut [u8], stride: usize) {
    let stride = if stride == 0 { width * 4 } else { stride };
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for x in 0..width {
            row[x * 4] = 0;
            row[x * 4 + 1] = 0;
        }
    }
}

pub(crate) fn greyscale_planar(width: usize, height: usize, buf: &mut [u8], view: PlanarView) {
    for cy in 0..view.uv_height(height) {
        for cx in 0..view.uv_width(width) {
            buf[view.u_at(cx, cy)] = 0;
            buf[view.v_at(cx, cy)] = 0;
        }
    }
}

pub(crate) fn greyscale_iyu1(width: usize, height: usize, buf: &mut [u8], stride: usize) {
    let stride = if stride == 0 { width * 12 / 8 } else { stride };
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for bx in 0..width / 4 {
            row[bx * 6] = 0;
            row[bx * 6 + 3] = 0;
        }
    }
}

pub(crate) fn greyscale_iyu2(width: usize, height: usize, buf: &mut [u8], stride: usize) {
    let stride = if stride == 0 { width * 3 } else { stride };
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for x in 0..width {
            row[x * 3] = 0;
            row[x * 3 + 2] = 0;
        }
    }
}

pub(crate) fn greyscale_y41p(width: usize, height: usize, buf: &mut [u8], stride: usize) {
    let stride = if stride == 0 { width / 8 * 12 } else { stride };
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for bx in 0..width / 8 {
            let group = &mut row[bx * 12..bx * 12 + 12];
            group[0] = 0;
            group[2] = 0;
            group[4] = 0;
            group[6] = 0;
        }
    }
}

/// Clears the 12 chroma bits of every CLJR dword, keeping the 20 luma bits.
pub(crate) fn greyscale_cljr(width: usize, height: usize, buf: &mut [u8], stride: usize) {
    let stride = if stride == 0 { width } else { stride };
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for bx in 0..width / 4 {
            let word = read_u32_le(row, bx * 4);
            write_u32_le(row, bx * 4, word & CLJR_LUMA_MASK);
        }
    }
}

/// Y800 and Y16 carry no chroma; greyscale is the identity.
pub(crate) fn greyscale_noop(_width: usize, _height: usize, _buf: &mut [u8], _stride: usize) {}
