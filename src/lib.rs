/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! In-memory pixel-format conversion between fourcc-identified RGB and YUV
//! raster layouts: packed, planar, semi-planar and sub-byte-packed, with
//! their sub-sampling lattices, byte orders, strides and vertical
//! orientation handled per format.
//!
//! The crate never allocates pixel memory; callers size their buffers with
//! [`calculate_buffer_size`] and hand slices to the transform returned by
//! [`find_video_transform`].
//!
//! ```
//! use pixelfmt::{calculate_buffer_size, find_video_transform, PixelFormat};
//!
//! let (src_len, _) = calculate_buffer_size(PixelFormat::UYVY, 64, 48, 0);
//! let (dst_len, _) = calculate_buffer_size(PixelFormat::IYUV, 64, 48, 0);
//! let src = vec![128u8; src_len];
//! let mut dst = vec![0u8; dst_len];
//! let transform = find_video_transform(PixelFormat::UYVY, PixelFormat::IYUV).unwrap();
//! transform.run(64, 48, &mut dst, 0, &src, 0, false, None);
//! ```
//!
//! A note on the palettized formats: their greyscale routine rewrites the
//! caller-supplied palette in place rather than the pixel bytes. This
//! mirrors the behavior of the libraries this crate interoperates with;
//! keep it in mind when sharing palettes.

mod ayuv_convert;
mod buffer_size;
mod colorspace;
mod dispatch;
mod error;
mod fill_check;
mod flip;
mod formats;
mod greyscale;
mod iyu_convert;
mod luma_convert;
mod packed_to_packed;
mod packed_to_planar;
mod planar_to_packed;
mod planar_to_planar;
mod rgb_to_rgb;
mod rgb_to_yuv;
mod set_pixel;
mod y41p_cljr;
mod yuv_support;
mod yuv_to_rgb;

pub use buffer_size::calculate_buffer_size;
pub use buffer_size::get_use_faster_looping;
pub use buffer_size::set_use_faster_looping;

pub use colorspace::fast_rgb_to_yuv;
pub use colorspace::fast_yuv_to_rgb;
pub use colorspace::initialize_library;
pub use colorspace::slow_rgb_to_yuv;
pub use colorspace::slow_yuv_to_rgb;

pub use error::PixelFmtError;

pub use formats::get_video_format_info;
pub use formats::lookup_video_format;
pub use formats::video_formats;
pub use formats::Family;
pub use formats::FormatInfo;
pub use formats::FourCC;
pub use formats::PixelFormat;

pub use dispatch::find_buffer_check;
pub use dispatch::find_fill_color_transform;
pub use dispatch::find_flip_transform;
pub use dispatch::find_greyscale_transform;
pub use dispatch::find_set_pixel_transform;
pub use dispatch::find_video_transform;
pub use dispatch::BufferCheck;
pub use dispatch::FillTransform;
pub use dispatch::FlipTransform;
pub use dispatch::GreyscaleTransform;
pub use dispatch::SetPixelTransform;
pub use dispatch::Transform;

pub use flip::flip_vertical;

pub use yuv_support::BgrQuad;
pub use yuv_support::PackedY422Order;
pub use yuv_support::PaletteDepth;
pub use yuv_support::PlanarKind;
pub use yuv_support::PlanarView;
pub use yuv_support::RgbLayout;
pub use yuv_support::IMC_ROW_ALIGN;
