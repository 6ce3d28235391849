/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! In-place vertical flip.
//!
//! Single-plane formats reverse their row order; multi-plane formats flip
//! every plane independently with that plane's own stride and height.

use crate::formats::{Family, PixelFormat};
use crate::yuv_support::{PlanarKind, PlanarView};

/// Reverses the order of `height` rows of `stride` bytes starting at
/// `offset`.
fn flip_plane(buf: &mut [u8], offset: usize, height: usize, stride: usize) {
    for y in 0..height / 2 {
        let top = offset + y * stride;
        let bottom = offset + (height - 1 - y) * stride;
        let (head, tail) = buf.split_at_mut(bottom);
        head[top..top + stride].swap_with_slice(&mut tail[..stride]);
    }
}

/// Flips a raster upside down in place.
pub fn flip_vertical(format: PixelFormat, width: u32, height: u32, buf: &mut [u8], stride: i32) {
    debug_assert!(stride >= 0, "stride is a byte count");
    let width = width as usize;
    let height = height as usize;
    let stride = stride as usize;
    match format.family() {
        Family::Planar(kind) => {
            let view = PlanarView::new(kind, width, height, stride);
            flip_plane(buf, view.y_offset, height, view.y_stride);
            match kind {
                PlanarKind::SemiPlanar { .. } => {
                    let base = view.u_offset.min(view.v_offset);
                    flip_plane(buf, base, height / 2, view.uv_stride);
                }
                PlanarKind::Imc { interlaced: true, .. } => {
                    // V and U live side by side in the same rows.
                    let base = view.u_offset.min(view.v_offset);
                    flip_plane(buf, base, height / 2, view.uv_stride);
                }
                _ => {
                    let uv_height = view.uv_height(height);
                    flip_plane(buf, view.u_offset, uv_height, view.uv_stride);
                    flip_plane(buf, view.v_offset, uv_height, view.uv_stride);
                }
            }
        }
        _ => {
            let stride = if stride == 0 {
                format.info().min_stride(width)
            } else {
                stride
            };
            flip_plane(buf, 0, height, stride);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn noise(len: usize, seed: u64) -> Vec<u8> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen()).collect()
    }

    #[test]
    fn flip_is_an_involution_on_packed_formats() {
        for format in [PixelFormat::YUY2, PixelFormat::RGB24, PixelFormat::Y800] {
            let (bytes, _) = crate::buffer_size::calculate_buffer_size(format, 16, 8, 0);
            let original = noise(bytes, 7);
            let mut buf = original.clone();
            flip_vertical(format, 16, 8, &mut buf, 0);
            assert_ne!(buf, original, "{:?} flip changed nothing", format);
            flip_vertical(format, 16, 8, &mut buf, 0);
            assert_eq!(buf, original, "{:?} flip is not an involution", format);
        }
    }

    #[test]
    fn flip_reverses_rows() {
        let mut buf = vec![1u8, 1, 2, 2, 3, 3];
        flip_vertical(PixelFormat::Y800, 2, 3, &mut buf, 0);
        assert_eq!(buf, vec![3, 3, 2, 2, 1, 1]);
    }

    #[test]
    fn planar_planes_flip_independently() {
        // 2x4 I420: Y rows 1,2,3,4; U rows a,b; V rows c,d.
        let mut buf = vec![
            1, 1, 2, 2, 3, 3, 4, 4, // Y
            0xA, 0xB, // U (1 byte per row)
            0xC, 0xD, // V
        ];
        flip_vertical(PixelFormat::IYUV, 2, 4, &mut buf, 0);
        assert_eq!(
            buf,
            vec![4, 4, 3, 3, 2, 2, 1, 1, 0xB, 0xA, 0xD, 0xC]
        );
    }

    #[test]
    fn flip_is_an_involution_on_multi_plane_formats() {
        for format in [
            PixelFormat::IYUV,
            PixelFormat::YV12,
            PixelFormat::YVU9,
            PixelFormat::NV12,
            PixelFormat::IMC1,
            PixelFormat::IMC2,
            PixelFormat::YV16,
        ] {
            let (bytes, _) = crate::buffer_size::calculate_buffer_size(format, 16, 16, 0);
            let original = noise(bytes, 11);
            let mut buf = original.clone();
            flip_vertical(format, 16, 16, &mut buf, 0);
            flip_vertical(format, 16, 16, &mut buf, 0);
            assert_eq!(buf, original, "{:?} flip is not an involution", format);
        }
    }
}
