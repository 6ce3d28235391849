/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! RGB layout conversion and the shared RGB pixel accessors.
//!
//! 5-bit and 6-bit channels widen by bit replication, so a saturated
//! channel stays saturated. Palettized rasters (8/4/1 bit) resolve through
//! the caller's palette and act as sources only.

use crate::yuv_support::{
    pack_rgb555, pack_rgb565, read_u16_le, rgb555_b, rgb555_g, rgb555_r, rgb565_b, rgb565_g,
    rgb565_r, write_u16_le, BgrQuad, PaletteDepth, RgbLayout, RGB555_ALPHA_MASK,
};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::ParallelSliceMut;

use crate::packed_to_packed::flip_row;

/// Where RGB pixel values come from.
#[derive(Copy, Clone)]
pub(crate) enum PixelSource<'a> {
    Direct(RgbLayout),
    Palettized(PaletteDepth, &'a [BgrQuad]),
}

impl PixelSource<'_> {
    pub(crate) fn min_stride(&self, width: usize) -> usize {
        match self {
            PixelSource::Direct(layout) => width * layout.bytes_per_pixel(),
            PixelSource::Palettized(PaletteDepth::Bits8, _) => width,
            PixelSource::Palettized(PaletteDepth::Bits4, _) => width / 2,
            PixelSource::Palettized(PaletteDepth::Bits1, _) => width / 8,
        }
    }
}

/// Reads `(r, g, b, a)` of the pixel at `x` in `row`.
#[inline]
pub(crate) fn read_rgb(row: &[u8], x: usize, source: PixelSource<'_>) -> (u8, u8, u8, u8) {
    match source {
        PixelSource::Direct(RgbLayout::Rgba) => {
            let p = &row[x * 4..x * 4 + 4];
            (p[2], p[1], p[0], p[3])
        }
        PixelSource::Direct(RgbLayout::Rgb32) => {
            let p = &row[x * 4..x * 4 + 4];
            (p[2], p[1], p[0], 0xFF)
        }
        PixelSource::Direct(RgbLayout::Rgb24) => {
            let p = &row[x * 3..x * 3 + 3];
            (p[2], p[1], p[0], 0xFF)
        }
        PixelSource::Direct(RgbLayout::Rgb565) => {
            let w = read_u16_le(row, x * 2);
            (rgb565_r(w), rgb565_g(w), rgb565_b(w), 0xFF)
        }
        PixelSource::Direct(RgbLayout::Rgb555) => {
            let w = read_u16_le(row, x * 2);
            (rgb555_r(w), rgb555_g(w), rgb555_b(w), 0xFF)
        }
        PixelSource::Direct(RgbLayout::Argb1555) => {
            let w = read_u16_le(row, x * 2);
            let a = if w & RGB555_ALPHA_MASK != 0 { 0xFF } else { 0 };
            (rgb555_r(w), rgb555_g(w), rgb555_b(w), a)
        }
        PixelSource::Palettized(depth, palette) => {
            let index = match depth {
                PaletteDepth::Bits8 => row[x] as usize,
                PaletteDepth::Bits4 => ((row[x / 2] >> (4 * (1 - (x & 1)))) & 0x0F) as usize,
                PaletteDepth::Bits1 => ((row[x / 8] >> (7 - (x & 7))) & 0x01) as usize,
            };
            let entry = palette[index];
            (entry.red, entry.green, entry.blue, 0xFF)
        }
    }
}

/// Writes an `(r, g, b, a)` pixel at `x` in `row`.
#[inline]
pub(crate) fn write_rgb(row: &mut [u8], x: usize, layout: RgbLayout, r: u8, g: u8, b: u8, a: u8) {
    match layout {
        RgbLayout::Rgba => {
            let p = &mut row[x * 4..x * 4 + 4];
            p[0] = b;
            p[1] = g;
            p[2] = r;
            p[3] = a;
        }
        RgbLayout::Rgb32 => {
            let p = &mut row[x * 4..x * 4 + 4];
            p[0] = b;
            p[1] = g;
            p[2] = r;
            p[3] = 0xFF;
        }
        RgbLayout::Rgb24 => {
            let p = &mut row[x * 3..x * 3 + 3];
            p[0] = b;
            p[1] = g;
            p[2] = r;
        }
        RgbLayout::Rgb565 => write_u16_le(row, x * 2, pack_rgb565(r, g, b)),
        RgbLayout::Rgb555 => write_u16_le(row, x * 2, pack_rgb555(r, g, b)),
        RgbLayout::Argb1555 => {
            let alpha = if a > 127 { RGB555_ALPHA_MASK } else { 0 };
            write_u16_le(row, x * 2, alpha | pack_rgb555(r, g, b));
        }
    }
}

pub(crate) fn rgb_to_rgb(
    width: usize,
    height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_layout: RgbLayout,
    src: &[u8],
    src_stride: usize,
    source: PixelSource<'_>,
    flipped: bool,
) {
    let dst_stride = if dst_stride == 0 {
        width * dst_layout.bytes_per_pixel()
    } else {
        dst_stride
    };
    let src_stride = if src_stride == 0 {
        source.min_stride(width)
    } else {
        src_stride
    };

    let rows = &mut dst[..dst_stride * height];

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = rows.par_chunks_exact_mut(dst_stride);
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = rows.chunks_exact_mut(dst_stride);
    }

    iter.enumerate().for_each(|(y, dst_row)| {
        let src_row = &src[flip_row(y, height, flipped) * src_stride..];
        for x in 0..width {
            let (r, g, b, a) = read_rgb(src_row, x, source);
            write_rgb(dst_row, x, dst_layout, r, g, b, a);
        }
    });
}
