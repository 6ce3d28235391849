/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! Single-pixel writers, macropixel-aware.
//!
//! Writing one pixel of a sub-sampled format also writes the chroma shared
//! by its lattice cell, so painting pixels left to right leaves the same
//! bytes a fill would.

use crate::rgb_to_rgb::write_rgb;
use crate::yuv_support::{
    pack_cljr, read_u32_le, write_u32_le, PackedY422Order, PlanarView, RgbLayout,
};

pub(crate) fn set_pixel_rgb(
    layout: RgbLayout,
    r: u8,
    g: u8,
    b: u8,
    a: u8,
    x: usize,
    y: usize,
    width: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = if stride == 0 {
        width * layout.bytes_per_pixel()
    } else {
        stride
    };
    write_rgb(&mut buf[y * stride..], x, layout, r, g, b, a);
}

pub(crate) fn set_pixel_packed_422(
    order: PackedY422Order,
    y_level: u8,
    u_level: u8,
    v_level: u8,
    x: usize,
    y: usize,
    width: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = if stride == 0 { width * 2 } else { stride };
    let m = &mut buf[y * stride + x / 2 * 4..];
    m[order.u_offset()] = u_level;
    m[order.v_offset()] = v_level;
    if x & 1 == 1 {
        m[order.y1_offset()] = y_level;
    } else {
        m[order.y0_offset()] = y_level;
    }
}

pub(crate) fn set_pixel_planar(
    view: PlanarView,
    y_level: u8,
    u_level: u8,
    v_level: u8,
    x: usize,
    y: usize,
    buf: &mut [u8],
) {
    buf[view.y_at(x, y)] = y_level;
    buf[view.u_at(x / view.hdec, y / view.vdec)] = u_level;
    buf[view.v_at(x / view.hdec, y / view.vdec)] = v_level;
}

pub(crate) fn set_pixel_iyu1(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    x: usize,
    y: usize,
    width: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = if stride == 0 { width * 12 / 8 } else { stride };
    let m = &mut buf[y * stride + x / 4 * 6..];
    m[0] = u_level;
    m[3] = v_level;
    m[[1usize, 2, 4, 5][x % 4]] = y_level;
}

pub(crate) fn set_pixel_iyu2(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    x: usize,
    y: usize,
    width: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = if stride == 0 { width * 3 } else { stride };
    let p = &mut buf[y * stride + x * 3..];
    p[0] = u_level;
    p[1] = y_level;
    p[2] = v_level;
}

pub(crate) fn set_pixel_ayuv(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    alpha: u8,
    x: usize,
    y: usize,
    width: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = if stride == 0 { width * 4 } else { stride };
    let p = &mut buf[y * stride + x * 4..];
    p[0] = v_level;
    p[1] = u_level;
    p[2] = y_level;
    p[3] = alpha;
}

pub(crate) fn set_pixel_luma(
    y_level: u8,
    x: usize,
    y: usize,
    width: usize,
    buf: &mut [u8],
    stride: usize,
    wide: bool,
) {
    let stride = if stride != 0 {
        stride
    } else if wide {
        width * 2
    } else {
        width
    };
    if wide {
        buf[y * stride + x * 2] = 0;
        buf[y * stride + x * 2 + 1] = y_level;
    } else {
        buf[y * stride + x] = y_level;
    }
}

pub(crate) fn set_pixel_y41p(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    x: usize,
    y: usize,
    width: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = if stride == 0 { width / 8 * 12 } else { stride };
    let m = &mut buf[y * stride + x / 8 * 12..];
    let cell = (x % 8) / 4;
    m[cell * 4] = u_level;
    m[cell * 4 + 2] = v_level;
    m[[1usize, 3, 5, 7, 8, 9, 10, 11][x % 8]] = y_level;
}

pub(crate) fn set_pixel_cljr(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    x: usize,
    y: usize,
    width: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let stride = if stride == 0 { width } else { stride };
    let offset = y * stride + x / 4 * 4;
    let pixel = x % 4;
    // Clear this pixel's luma field and all chroma, then merge.
    let keep_luma = !(0x1F << (12 + pixel * 5)) & crate::yuv_support::CLJR_LUMA_MASK;
    let mut levels = [0u8; 4];
    levels[pixel] = y_level;
    let or_mask = pack_cljr(u_level, v_level, levels[0], levels[1], levels[2], levels[3]);
    let word = (read_u32_le(buf, offset) & keep_luma) | or_mask;
    write_u32_le(buf, offset, word);
}

pub(crate) fn set_pixel_y42t(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    alpha: u8,
    x: usize,
    y: usize,
    width: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let y_level = if alpha > 127 {
        y_level | 0x01
    } else {
        y_level & 0xFE
    };
    set_pixel_packed_422(
        PackedY422Order::UYVY,
        y_level,
        u_level,
        v_level,
        x,
        y,
        width,
        buf,
        stride,
    );
}

pub(crate) fn set_pixel_y41t(
    y_level: u8,
    u_level: u8,
    v_level: u8,
    alpha: u8,
    x: usize,
    y: usize,
    width: usize,
    buf: &mut [u8],
    stride: usize,
) {
    let y_level = if alpha > 127 {
        y_level | 0x01
    } else {
        y_level & 0xFE
    };
    set_pixel_y41p(y_level, u_level, v_level, x, y, width, buf, stride);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yuv_support::{cljr_u, cljr_v, cljr_y, PlanarKind};

    #[test]
    fn painting_every_pixel_equals_a_fill() {
        let mut painted = vec![0u8; 8 * 2 * 2];
        for y in 0..2 {
            for x in 0..8 {
                set_pixel_packed_422(
                    PackedY422Order::YUY2,
                    60,
                    70,
                    80,
                    x,
                    y,
                    8,
                    &mut painted,
                    0,
                );
            }
        }
        let mut filled = vec![0u8; 8 * 2 * 2];
        crate::fill_check::fill_packed_422(
            PackedY422Order::YUY2,
            60,
            70,
            80,
            8,
            2,
            &mut filled,
            0,
        );
        assert_eq!(painted, filled);
    }

    #[test]
    fn cljr_pixel_updates_only_its_luma_slot() {
        let mut buf = vec![0u8; 4];
        write_u32_le(&mut buf, 0, pack_cljr(0, 0, 8, 16, 24, 32));
        set_pixel_cljr(0xF8, 64, 32, 2, 0, 4, &mut buf, 0);
        let word = read_u32_le(&buf, 0);
        assert_eq!(cljr_y(word, 0), 8);
        assert_eq!(cljr_y(word, 1), 16);
        assert_eq!(cljr_y(word, 2), 0xF8);
        assert_eq!(cljr_y(word, 3), 32);
        assert_eq!(cljr_u(word), 64);
        assert_eq!(cljr_v(word), 32);
    }

    #[test]
    fn nv12_pixel_lands_in_the_interleaved_plane() {
        let view = PlanarView::new(PlanarKind::SemiPlanar { u_first: true }, 4, 2, 0);
        let mut buf = vec![0u8; 12];
        set_pixel_planar(view, 50, 60, 70, 2, 1, &mut buf);
        assert_eq!(buf[4 + 2], 50);
        assert_eq!(buf[8 + 2], 60);
        assert_eq!(buf[8 + 3], 70);
    }

    #[test]
    fn y41t_clears_the_bit_for_transparent_pixels() {
        let mut buf = vec![0u8; 12];
        set_pixel_y41t(101, 0, 0, 0, 0, 0, 8, &mut buf, 0);
        assert_eq!(buf[1], 100);
    }
}
