/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! Solid-color fill and verify routines, one pair per format.
//!
//! The test harness builds known inputs with `fill` and proves conversion
//! results with `check`; for sub-sampled formats the chroma arguments land
//! on the lattice sites.

use crate::yuv_support::{
    pack_cljr, pack_rgb555, pack_rgb565, read_u32_le, write_u32_le, PackedY422Order, PlanarView,
    RgbLayout, RGB555_ALPHA_MASK,
};

#[inline(always)]
fn resolve(width_bytes: usize, stride: usize) -> usize {
    if stride == 0 {
        width_bytes
    } else {
        stride
    }
}

pub(crate) fn fill_rgb(
    layout: RgbLayout,
    r: u8,
    g: u8,
    b: u8,
    a: u8,
    width: usize,
    height: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = resolve(width * layout.bytes_per_pixel(), stride);
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for x in 0..width {
            crate::rgb_to_rgb::write_rgb(row, x, layout, r, g, b, a);
        }
    }
}

pub(crate) fn check_rgb(
    layout: RgbLayout,
    r: u8,
    g: u8,
    b: u8,
    a: u8,
    width: usize,
    height: usize,
    buf: &[u8],
    stride: usize,
) -> bool {
    let stride = resolve(width * layout.bytes_per_pixel(), stride);
    let expected: Vec<u8> = match layout {
        RgbLayout::Rgba => vec![b, g, r, a],
        RgbLayout::Rgb32 => vec![b, g, r, 0xFF],
        RgbLayout::Rgb24 => vec![b, g, r],
        RgbLayout::Rgb565 => pack_rgb565(r, g, b).to_le_bytes().to_vec(),
        RgbLayout::Rgb555 => pack_rgb555(r, g, b).to_le_bytes().to_vec(),
        RgbLayout::Argb1555 => {
            let alpha = if a > 127 { RGB555_ALPHA_MASK } else { 0 };
            (alpha | pack_rgb555(r, g, b)).to_le_bytes().to_vec()
        }
    };
    let bpp = layout.bytes_per_pixel();
    for y in 0..height {
        let row = &buf[y * stride..];
        for x in 0..width {
            if row[x * bpp..x * bpp + bpp] != expected[..] {
                return false;
            }
        }
    }
    true
}

pub(crate) fn fill_packed_422(
    order: PackedY422Order,
    y_level: u8,
    u_level: u8,
    v_level: u8,
    width: usize,
    height: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = resolve(width * 2, stride);
    let mut macropixel = [0u8; 4];
    macropixel[order.y0_offset()] = y_level;
    macropixel[order.y1_offset()] = y_level;
    macropixel[order.u_offset()] = u_level;
    macropixel[order.v_offset()] = v_level;
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for px in 0..width / 2 {
            row[px * 4..px * 4 + 4].copy_from_slice(&macropixel);
        }
    }
}

pub(crate) fn check_packed_422(
    order: PackedY422Order,
    y_level: u8,
    u_level: u8,
    v_level: u8,
    width: usize,
    height: usize,
    buf: &[u8],
    stride: usize,
) -> bool {
    let stride = resolve(width * 2, stride);
    let mut macropixel = [0u8; 4];
    macropixel[order.y0_offset()] = y_level;
    macropixel[order.y1_offset()] = y_level;
    macropixel[order.u_offset()] = u_level;
    macropixel[order.v_offset()] = v_level;
    for y in 0..height {
        let row = &buf[y * stride..];
        for px in 0..width / 2 {
            if row[px * 4..px * 4 + 4] != macropixel {
                return false;
            }
        }
    }
    true
}

pub(crate) fn fill_planar(
    view: PlanarView,
    y_level: u8,
    u_level: u8,
    v_level: u8,
    width: usize,
    height: usize,
    buf: &mut [u8],
) {
    for y in 0..height {
        let offset = view.y_at(0, y);
        buf[offset..offset + width].fill(y_level);
    }
    for cy in 0..view.uv_height(height) {
        for cx in 0..view.uv_width(width) {
            buf[view.u_at(cx, cy)] = u_level;
            buf[view.v_at(cx, cy)] = v_level;
        }
    }
}

pub(crate) fn check_planar(
    view: PlanarView,
    y_level: u8,
    u_level: u8,
    v_level: u8,
    width: usize,
    height: usize,
    buf: &[u8],
) -> bool {
    for y in 0..height {
        let offset = view.y_at(0, y);
        if buf[offset..offset + width].iter().any(|&b| b != y_level) {
            return false;
        }
    }
    for cy in 0..view.uv_height(height) {
        for cx in 0..view.uv_width(width) {
            if buf[view.u_at(cx, cy)] != u_level || buf[view.v_at(cx, cy)] != v_level {
                return false;
            }
        }
    }
    true
}

pub(crate) fn fill_iyu1(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    width: usize,
    height: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = resolve(width * 12 / 8, stride);
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for bx in 0..width / 4 {
            let g = &mut row[bx * 6..bx * 6 + 6];
            g[0] = u_level;
            g[1] = y_level;
            g[2] = y_level;
            g[3] = v_level;
            g[4] = y_level;
            g[5] = y_level;
        }
    }
}

pub(crate) fn check_iyu1(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    width: usize,
    height: usize,
    buf: &[u8],
    stride: usize,
) -> bool {
    let stride = resolve(width * 12 / 8, stride);
    for y in 0..height {
        let row = &buf[y * stride..];
        for bx in 0..width / 4 {
            let g = &row[bx * 6..bx * 6 + 6];
            if g != [u_level, y_level, y_level, v_level, y_level, y_level] {
                return false;
            }
        }
    }
    true
}

pub(crate) fn fill_iyu2(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    width: usize,
    height: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = resolve(width * 3, stride);
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for x in 0..width {
            row[x * 3] = u_level;
            row[x * 3 + 1] = y_level;
            row[x * 3 + 2] = v_level;
        }
    }
}

pub(crate) fn check_iyu2(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    width: usize,
    height: usize,
    buf: &[u8],
    stride: usize,
) -> bool {
    let stride = resolve(width * 3, stride);
    for y in 0..height {
        let row = &buf[y * stride..];
        for x in 0..width {
            if row[x * 3] != u_level || row[x * 3 + 1] != y_level || row[x * 3 + 2] != v_level {
                return false;
            }
        }
    }
    true
}

pub(crate) fn fill_ayuv(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    alpha: u8,
    width: usize,
    height: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = resolve(width * 4, stride);
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for x in 0..width {
            let p = &mut row[x * 4..x * 4 + 4];
            p[0] = v_level;
            p[1] = u_level;
            p[2] = y_level;
            p[3] = alpha;
        }
    }
}

pub(crate) fn check_ayuv(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    alpha: u8,
    width: usize,
    height: usize,
    buf: &[u8],
    stride: usize,
) -> bool {
    let stride = resolve(width * 4, stride);
    for y in 0..height {
        let row = &buf[y * stride..];
        for x in 0..width {
            if row[x * 4..x * 4 + 4] != [v_level, u_level, y_level, alpha] {
                return false;
            }
        }
    }
    true
}

pub(crate) fn fill_luma(
    y_level: u8,
    width: usize,
    height: usize,
    buf: &mut [u8],
    stride: usize,
    wide: bool,
) {
    let stride = resolve(if wide { width * 2 } else { width }, stride);
    for y in 0..height {
        let row = &mut buf[y * stride..];
        if wide {
            for x in 0..width {
                row[x * 2] = 0;
                row[x * 2 + 1] = y_level;
            }
        } else {
            row[..width].fill(y_level);
        }
    }
}

pub(crate) fn check_luma(
    y_level: u8,
    width: usize,
    height: usize,
    buf: &[u8],
    stride: usize,
    wide: bool,
) -> bool {
    let stride = resolve(if wide { width * 2 } else { width }, stride);
    for y in 0..height {
        let row = &buf[y * stride..];
        for x in 0..width {
            let ok = if wide {
                row[x * 2] == 0 && row[x * 2 + 1] == y_level
            } else {
                row[x] == y_level
            };
            if !ok {
                return false;
            }
        }
    }
    true
}

pub(crate) fn fill_y41p(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    width: usize,
    height: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = resolve(width / 8 * 12, stride);
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for bx in 0..width / 8 {
            let g = &mut row[bx * 12..bx * 12 + 12];
            g[0] = u_level;
            g[2] = v_level;
            g[4] = u_level;
            g[6] = v_level;
            for &i in &[1usize, 3, 5, 7, 8, 9, 10, 11] {
                g[i] = y_level;
            }
        }
    }
}

pub(crate) fn check_y41p(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    width: usize,
    height: usize,
    buf: &[u8],
    stride: usize,
) -> bool {
    let stride = resolve(width / 8 * 12, stride);
    for y in 0..height {
        let row = &buf[y * stride..];
        for bx in 0..width / 8 {
            let g = &row[bx * 12..bx * 12 + 12];
            if g[0] != u_level || g[4] != u_level || g[2] != v_level || g[6] != v_level {
                return false;
            }
            if [1usize, 3, 5, 7, 8, 9, 10, 11]
                .iter()
                .any(|&i| g[i] != y_level)
            {
                return false;
            }
        }
    }
    true
}

pub(crate) fn fill_cljr(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    width: usize,
    height: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = resolve(width, stride);
    let word = pack_cljr(u_level, v_level, y_level, y_level, y_level, y_level);
    for y in 0..height {
        let row = &mut buf[y * stride..];
        for bx in 0..width / 4 {
            write_u32_le(row, bx * 4, word);
        }
    }
}

pub(crate) fn check_cljr(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    width: usize,
    height: usize,
    buf: &[u8],
    stride: usize,
) -> bool {
    let stride = resolve(width, stride);
    let word = pack_cljr(u_level, v_level, y_level, y_level, y_level, y_level);
    for y in 0..height {
        let row = &buf[y * stride..];
        for bx in 0..width / 4 {
            if read_u32_le(row, bx * 4) != word {
                return false;
            }
        }
    }
    true
}

/// Y42T: a UYVY fill whose Y samples carry the opacity bit from `alpha`.
pub(crate) fn fill_y42t(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    alpha: u8,
    width: usize,
    height: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let y_level = if alpha > 127 {
        y_level | 0x01
    } else {
        y_level & 0xFE
    };
    fill_packed_422(
        PackedY422Order::UYVY,
        y_level,
        u_level,
        v_level,
        width,
        height,
        buf,
        stride,
    );
}

pub(crate) fn fill_y41t(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    alpha: u8,
    width: usize,
    height: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let y_level = if alpha > 127 {
        y_level | 0x01
    } else {
        y_level & 0xFE
    };
    fill_y41p(y_level, u_level, v_level, width, height, buf, stride);
}
