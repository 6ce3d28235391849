/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! Minimum allocation sizes per format.
//!
//! A stride hint of 0 means "tightly packed"; a hint below the format's
//! minimum stride is clamped up to it, a larger hint is applied to every
//! plane of multi-plane formats. The returned effective stride is what the
//! conversion kernels will assume for the same hint.

use crate::formats::PixelFormat;
use crate::yuv_support::align_imc_rows;
use std::sync::atomic::{AtomicBool, Ordering};

static USE_FASTER_LOOPING: AtomicBool = AtomicBool::new(false);

/// Whether the size calculator reserves the one-byte loop sentinel for
/// RGB24 and IYU2.
pub fn get_use_faster_looping() -> bool {
    USE_FASTER_LOOPING.load(Ordering::Relaxed)
}

/// Enables the one-byte over-allocation for RGB24 and IYU2.
///
/// Process-wide. Set it once at startup, before buffers are sized; flipping
/// it while another thread sizes buffers yields whichever value that thread
/// happens to read.
pub fn set_use_faster_looping(enabled: bool) {
    USE_FASTER_LOOPING.store(enabled, Ordering::Relaxed);
}

fn single_plane(height: usize, stride: usize, min_stride: usize) -> (usize, usize) {
    let stride = stride.max(min_stride);
    (height * stride, stride)
}

fn contiguous_planar(
    width: usize,
    height: usize,
    stride: usize,
    decimation: usize,
) -> (usize, usize) {
    let uv_width = width / decimation;
    let uv_height = height / decimation;
    let (y_stride, uv_stride) = if stride <= width {
        (width, uv_width)
    } else {
        (stride, stride)
    };
    (
        height * y_stride + uv_stride * uv_height * 2,
        y_stride.max(stride),
    )
}

/// Returns `(bytes, effective_stride)` for a raster of `width` x `height`
/// pixels. `stride_hint` of 0 requests tight packing.
pub fn calculate_buffer_size(
    format: PixelFormat,
    width: usize,
    height: usize,
    stride_hint: usize,
) -> (usize, usize) {
    let min_stride = format.info().min_stride(width);
    match format {
        PixelFormat::RGB24 | PixelFormat::IYU2 => {
            let (mut bytes, stride) = single_plane(height, stride_hint, min_stride);
            if get_use_faster_looping() {
                bytes += 1;
            }
            (bytes, stride)
        }
        PixelFormat::IYUV | PixelFormat::YV12 => {
            contiguous_planar(width, height, stride_hint, 2)
        }
        PixelFormat::YUV9 | PixelFormat::YVU9 => {
            contiguous_planar(width, height, stride_hint, 4)
        }
        PixelFormat::YV16 => {
            let uv_width = width / 2;
            let (y_stride, uv_stride) = if stride_hint <= width {
                (width, uv_width)
            } else {
                (stride_hint, stride_hint)
            };
            (
                y_stride * height + uv_stride * height * 2,
                y_stride.max(stride_hint),
            )
        }
        PixelFormat::NV12 | PixelFormat::NV21 => {
            let stride = stride_hint.max(width);
            ((height + height / 2) * stride, stride)
        }
        PixelFormat::IMC1 | PixelFormat::IMC3 => {
            let stride = stride_hint.max(width);
            let rows = align_imc_rows(height * 3 / 2) + height / 2;
            (rows * stride, stride)
        }
        PixelFormat::IMC2 | PixelFormat::IMC4 => {
            let stride = stride_hint.max(width);
            ((height + height / 2) * stride, stride)
        }
        _ => single_plane(height, stride_hint, min_stride),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_422_sizes() {
        assert_eq!(
            calculate_buffer_size(PixelFormat::UYVY, 2592, 1944, 0).0,
            10_077_696
        );
        assert_eq!(
            calculate_buffer_size(PixelFormat::UYVY, 2592, 1944, 5500).0,
            5500 * 1944
        );
    }

    #[test]
    fn faster_looping_adds_the_sentinel_byte() {
        set_use_faster_looping(false);
        assert_eq!(calculate_buffer_size(PixelFormat::RGB24, 12, 12, 0).0, 432);
        set_use_faster_looping(true);
        assert_eq!(calculate_buffer_size(PixelFormat::RGB24, 12, 12, 0).0, 433);
        assert_eq!(
            calculate_buffer_size(PixelFormat::IYU2, 12, 12, 0).0,
            12 * 36 + 1
        );
        set_use_faster_looping(false);
        assert_eq!(calculate_buffer_size(PixelFormat::YUY2, 12, 12, 0).0, 288);
    }

    #[test]
    fn sub_byte_and_planar_sizes() {
        assert_eq!(calculate_buffer_size(PixelFormat::IYU1, 12, 12, 0).0, 216);
        assert_eq!(
            calculate_buffer_size(PixelFormat::IYUV, 16, 16, 0).0,
            16 * 16 * 3 / 2
        );
        assert_eq!(
            calculate_buffer_size(PixelFormat::YVU9, 16, 16, 0).0,
            16 * 16 + 2 * 4 * 4
        );
        assert_eq!(
            calculate_buffer_size(PixelFormat::NV12, 16, 16, 0).0,
            16 * 16 * 3 / 2
        );
        assert_eq!(
            calculate_buffer_size(PixelFormat::YV16, 16, 16, 0).0,
            16 * 16 * 2
        );
    }

    #[test]
    fn imc_sizes_are_16_row_aligned() {
        // 3/2 * 16 = 24 rows, aligned to 32, plus 8 chroma rows.
        assert_eq!(
            calculate_buffer_size(PixelFormat::IMC1, 16, 16, 0).0,
            (32 + 8) * 16
        );
        assert_eq!(
            calculate_buffer_size(PixelFormat::IMC2, 16, 16, 0).0,
            24 * 16
        );
    }

    #[test]
    fn size_is_monotone_in_stride() {
        for format in crate::formats::video_formats() {
            let base = calculate_buffer_size(format, 32, 32, 0).0;
            let padded = calculate_buffer_size(format, 32, 32, 256).0;
            assert!(
                padded >= base,
                "{:?}: {} < {} with a larger stride",
                format,
                padded,
                base
            );
        }
    }
}
