/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! Transform lookup.
//!
//! Every supported `(source, target)` pair maps onto one generic kernel
//! plus its parameters; [`find_video_transform`] performs that mapping once
//! and returns a [`Transform`] that carries it. The per-format greyscale,
//! fill, check, set-pixel and flip hooks are looked up the same way.

use crate::ayuv_convert as ayuv;
use crate::formats::{Family, PixelFormat};
use crate::iyu_convert as iyu;
use crate::luma_convert as luma;
use crate::packed_to_packed as packed;
use crate::packed_to_planar::packed_422_to_planar;
use crate::planar_to_packed::planar_to_packed_422;
use crate::planar_to_planar::planar_to_planar;
use crate::rgb_to_rgb::{rgb_to_rgb, PixelSource};
use crate::rgb_to_yuv as r2y;
use crate::y41p_cljr as y41p;
use crate::yuv_support::{
    BgrQuad, PackedY422Order, PaletteDepth, PlanarKind, PlanarView, RgbLayout,
};
use crate::yuv_to_rgb as y2r;

/// RGB pixels either live in a direct layout or go through a palette.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum RgbSourceKind {
    Direct(RgbLayout),
    Palettized(PaletteDepth),
}

impl RgbSourceKind {
    fn resolve<'a>(&self, palette: Option<&'a [BgrQuad]>) -> PixelSource<'a> {
        match *self {
            RgbSourceKind::Direct(layout) => PixelSource::Direct(layout),
            RgbSourceKind::Palettized(depth) => PixelSource::Palettized(
                depth,
                palette.expect("palettized source conversion requires a palette"),
            ),
        }
    }
}

/// The conversion-relevant shape of a format. Y42T and Y41T collapse onto
/// their carrier layouts here; the opacity bit is handled around the
/// carrier kernel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Conv {
    Rgb(RgbSourceKind),
    P422(PackedY422Order),
    Planar(PlanarKind),
    Iyu1,
    Iyu2,
    Ayuv,
    Y41p,
    Cljr,
    Luma { wide: bool },
}

fn conv_of(format: PixelFormat) -> Option<Conv> {
    Some(match format.family() {
        Family::Rgb(layout) => Conv::Rgb(RgbSourceKind::Direct(layout)),
        Family::Palettized(depth) => Conv::Rgb(RgbSourceKind::Palettized(depth)),
        Family::Packed422(order) => Conv::P422(order),
        Family::Transparent422 => Conv::P422(PackedY422Order::UYVY),
        Family::Planar(kind) => Conv::Planar(kind),
        Family::Iyu1 => Conv::Iyu1,
        Family::Iyu2 => Conv::Iyu2,
        Family::Ayuv => Conv::Ayuv,
        Family::Y41p | Family::Y41t => Conv::Y41p,
        Family::Cljr => Conv::Cljr,
        Family::Grey8 => Conv::Luma { wide: false },
        Family::Grey16 => Conv::Luma { wide: true },
        // The interlaced layouts only pair with their progressive partner
        // and are matched on the PixelFormat level.
        Family::InterlacedUyvy | Family::InterlacedY41p => return None,
    })
}

/// Extra pass run after the carrier kernel when the destination carries an
/// opacity bit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum OpacityPass {
    Packed422,
    Y41p,
}

/// How a pair of formats is connected.
#[derive(Debug, Copy, Clone)]
enum Route {
    /// Same layout: a plain row copy.
    Identity,
    /// Progressive rows woven into fields, or back.
    Weave,
    Unweave,
    /// A generic kernel dispatched on the conversion shapes.
    Kernel { src: Conv, dst: Conv },
}

/// A conversion between one pair of formats.
///
/// Obtained from [`find_video_transform`]; [`Transform::run`] executes it.
#[derive(Debug, Copy, Clone)]
pub struct Transform {
    pub source: PixelFormat,
    pub target: PixelFormat,
    route: Route,
    /// Source carries an opacity bit to map onto alpha outputs.
    alpha_from_bit: bool,
    opacity_pass: Option<OpacityPass>,
}

/// Looks up the conversion kernel for a format pair. `None` when the pair
/// is unsupported.
pub fn find_video_transform(source: PixelFormat, target: PixelFormat) -> Option<Transform> {
    let transform = |route| Transform {
        source,
        target,
        route,
        alpha_from_bit: matches!(source.family(), Family::Transparent422 | Family::Y41t),
        opacity_pass: match target.family() {
            Family::Transparent422 => Some(OpacityPass::Packed422),
            Family::Y41t => Some(OpacityPass::Y41p),
            _ => None,
        },
    };

    if source == target {
        // Multi-plane layouts go through the plane-aware copy; a bare row
        // copy of `height` rows would miss their chroma planes.
        if let Family::Planar(kind) = source.family() {
            return Some(transform(Route::Kernel {
                src: Conv::Planar(kind),
                dst: Conv::Planar(kind),
            }));
        }
        return Some(transform(Route::Identity));
    }

    // The interlaced layouts convert to and from their progressive partner
    // only.
    match (source, target) {
        (PixelFormat::UYVY, PixelFormat::IUYV) | (PixelFormat::Y41P, PixelFormat::IY41) => {
            return Some(transform(Route::Weave));
        }
        (PixelFormat::IUYV, PixelFormat::UYVY) | (PixelFormat::IY41, PixelFormat::Y41P) => {
            return Some(transform(Route::Unweave));
        }
        _ => {}
    }

    let src = conv_of(source)?;
    let dst = conv_of(target)?;

    // Palettized formats are sources only; RGB targets must be direct.
    if matches!(dst, Conv::Rgb(RgbSourceKind::Palettized(_))) {
        return None;
    }

    Some(transform(Route::Kernel { src, dst }))
}

impl Transform {
    /// Result-flavored variant of [`find_video_transform`].
    pub fn between(
        source: PixelFormat,
        target: PixelFormat,
    ) -> Result<Transform, crate::error::PixelFmtError> {
        find_video_transform(source, target)
            .ok_or(crate::error::PixelFmtError::UnsupportedPair(source, target))
    }

    /// Converts `width` x `height` pixels from `src` into `dst`.
    ///
    /// A stride of 0 means tightly packed. `flipped` writes the destination
    /// bottom-up (every plane independently for multi-plane targets).
    /// `palette` is required when the source is palettized.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &self,
        width: u32,
        height: u32,
        dst: &mut [u8],
        dst_stride: i32,
        src: &[u8],
        src_stride: i32,
        flipped: bool,
        palette: Option<&[BgrQuad]>,
    ) {
        debug_assert!(dst_stride >= 0 && src_stride >= 0, "strides are byte counts");
        debug_assert!(width > 0 && height > 0, "dimensions are in pixels");
        let w = width as usize;
        let h = height as usize;
        let ds = dst_stride as usize;
        let ss = src_stride as usize;

        match self.route {
            Route::Identity => {
                let row_bytes = self.source.info().min_stride(w);
                packed::copy_rows(h, row_bytes, dst, ds, src, ss, flipped);
                return;
            }
            Route::Weave | Route::Unweave => {
                let row_bytes = self.source.info().min_stride(w);
                let ds = if ds == 0 { row_bytes } else { ds };
                let ss = if ss == 0 { row_bytes } else { ss };
                if matches!(self.route, Route::Weave) {
                    packed::progressive_to_interlaced(h, row_bytes, dst, ds, src, ss, flipped);
                } else {
                    packed::interlaced_to_progressive(h, row_bytes, dst, ds, src, ss, flipped);
                }
                return;
            }
            Route::Kernel { src: s, dst: d } => {
                self.run_kernel(s, d, w, h, dst, ds, src, ss, flipped, palette);
            }
        }

        if let Some(pass) = self.opacity_pass {
            match pass {
                OpacityPass::Packed422 => packed::set_opacity_bits_422(w, h, dst, ds),
                OpacityPass::Y41p => packed::set_opacity_bits_y41p(w, h, dst, ds),
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn run_kernel(
        &self,
        kernel_src: Conv,
        kernel_dst: Conv,
        w: usize,
        h: usize,
        dst: &mut [u8],
        ds: usize,
        src: &[u8],
        ss: usize,
        flipped: bool,
        palette: Option<&[BgrQuad]>,
    ) {
        let wide = |conv: Conv| matches!(conv, Conv::Luma { wide: true });
        match (kernel_src, kernel_dst) {
            // RGB source.
            (Conv::Rgb(s), Conv::Rgb(RgbSourceKind::Direct(d))) => {
                rgb_to_rgb(w, h, dst, ds, d, src, ss, s.resolve(palette), flipped)
            }
            (Conv::Rgb(s), Conv::P422(d)) => {
                r2y::rgb_to_packed_422(w, h, dst, ds, d, src, ss, s.resolve(palette), flipped)
            }
            (Conv::Rgb(s), Conv::Planar(d)) => {
                let view = PlanarView::new(d, w, h, ds);
                r2y::rgb_to_planar(w, h, dst, view, src, ss, s.resolve(palette), flipped)
            }
            (Conv::Rgb(s), Conv::Iyu1) => {
                r2y::rgb_to_iyu1(w, h, dst, ds, src, ss, s.resolve(palette), flipped)
            }
            (Conv::Rgb(s), Conv::Iyu2) => {
                r2y::rgb_to_iyu2(w, h, dst, ds, src, ss, s.resolve(palette), flipped)
            }
            (Conv::Rgb(s), Conv::Ayuv) => {
                r2y::rgb_to_ayuv(w, h, dst, ds, src, ss, s.resolve(palette), flipped)
            }
            (Conv::Rgb(s), Conv::Y41p) => {
                r2y::rgb_to_y41p(w, h, dst, ds, src, ss, s.resolve(palette), flipped)
            }
            (Conv::Rgb(s), Conv::Cljr) => {
                r2y::rgb_to_cljr(w, h, dst, ds, src, ss, s.resolve(palette), flipped)
            }
            (Conv::Rgb(s), d @ Conv::Luma { .. }) => r2y::rgb_to_luma(
                w,
                h,
                dst,
                ds,
                src,
                ss,
                s.resolve(palette),
                wide(d),
                flipped,
            ),

            // RGB target.
            (Conv::P422(s), Conv::Rgb(RgbSourceKind::Direct(d))) => y2r::packed_422_to_rgb(
                w,
                h,
                dst,
                ds,
                d,
                src,
                ss,
                s,
                flipped,
                self.alpha_from_bit,
            ),
            (Conv::Planar(s), Conv::Rgb(RgbSourceKind::Direct(d))) => {
                let view = PlanarView::new(s, w, h, ss);
                y2r::planar_to_rgb(w, h, dst, ds, d, src, view, flipped)
            }
            (Conv::Iyu1, Conv::Rgb(RgbSourceKind::Direct(d))) => {
                y2r::iyu1_to_rgb(w, h, dst, ds, d, src, ss, flipped)
            }
            (Conv::Iyu2, Conv::Rgb(RgbSourceKind::Direct(d))) => {
                y2r::iyu2_to_rgb(w, h, dst, ds, d, src, ss, flipped)
            }
            (Conv::Ayuv, Conv::Rgb(RgbSourceKind::Direct(d))) => {
                y2r::ayuv_to_rgb(w, h, dst, ds, d, src, ss, flipped)
            }
            (Conv::Y41p, Conv::Rgb(RgbSourceKind::Direct(d))) => {
                y2r::y41p_to_rgb(w, h, dst, ds, d, src, ss, flipped, self.alpha_from_bit)
            }
            (Conv::Cljr, Conv::Rgb(RgbSourceKind::Direct(d))) => {
                y2r::cljr_to_rgb(w, h, dst, ds, d, src, ss, flipped)
            }
            (s @ Conv::Luma { .. }, Conv::Rgb(RgbSourceKind::Direct(d))) => {
                y2r::luma_to_rgb(w, h, dst, ds, d, src, ss, wide(s), flipped)
            }

            // Packed 4:2:2 source.
            (Conv::P422(s), Conv::P422(d)) => {
                packed::packed_422_to_packed_422(w, h, dst, ds, d, src, ss, s, flipped)
            }
            (Conv::P422(s), Conv::Planar(d)) => {
                let view = PlanarView::new(d, w, h, ds);
                packed_422_to_planar(w, h, dst, view, src, ss, s, flipped)
            }
            (Conv::P422(s), Conv::Iyu1) => {
                iyu::packed_422_to_iyu1(w, h, dst, ds, src, ss, s, flipped)
            }
            (Conv::P422(s), Conv::Iyu2) => {
                iyu::packed_422_to_iyu2(w, h, dst, ds, src, ss, s, flipped)
            }
            (Conv::P422(s), Conv::Ayuv) => ayuv::packed_422_to_ayuv(
                w,
                h,
                dst,
                ds,
                src,
                ss,
                s,
                flipped,
                self.alpha_from_bit,
            ),
            (Conv::P422(s), Conv::Y41p) => {
                y41p::packed_422_to_y41p(w, h, dst, ds, src, ss, s, flipped)
            }
            (Conv::P422(s), Conv::Cljr) => {
                y41p::packed_422_to_cljr(w, h, dst, ds, src, ss, s, flipped)
            }
            (Conv::P422(s), d @ Conv::Luma { .. }) => {
                luma::packed_422_to_luma(w, h, dst, ds, src, ss, s, wide(d), flipped)
            }

            // Planar source.
            (Conv::Planar(s), Conv::P422(d)) => {
                let view = PlanarView::new(s, w, h, ss);
                planar_to_packed_422(w, h, dst, ds, d, src, view, flipped)
            }
            (Conv::Planar(s), Conv::Planar(d)) => {
                let sv = PlanarView::new(s, w, h, ss);
                let dv = PlanarView::new(d, w, h, ds);
                planar_to_planar(w, h, dst, dv, src, sv, flipped)
            }
            (Conv::Planar(s), Conv::Iyu1) => {
                let view = PlanarView::new(s, w, h, ss);
                iyu::planar_to_iyu1(w, h, dst, ds, src, view, flipped)
            }
            (Conv::Planar(s), Conv::Iyu2) => {
                let view = PlanarView::new(s, w, h, ss);
                iyu::planar_to_iyu2(w, h, dst, ds, src, view, flipped)
            }
            (Conv::Planar(s), Conv::Ayuv) => {
                let view = PlanarView::new(s, w, h, ss);
                ayuv::planar_to_ayuv(w, h, dst, ds, src, view, flipped)
            }
            (Conv::Planar(s), Conv::Y41p) => {
                let view = PlanarView::new(s, w, h, ss);
                y41p::planar_to_y41p(w, h, dst, ds, src, view, flipped)
            }
            (Conv::Planar(s), Conv::Cljr) => {
                let view = PlanarView::new(s, w, h, ss);
                y41p::planar_to_cljr(w, h, dst, ds, src, view, flipped)
            }
            (Conv::Planar(s), d @ Conv::Luma { .. }) => {
                let view = PlanarView::new(s, w, h, ss);
                luma::planar_to_luma(w, h, dst, ds, src, view, wide(d), flipped)
            }

            // IYU1 source.
            (Conv::Iyu1, Conv::P422(d)) => {
                iyu::iyu1_to_packed_422(w, h, dst, ds, d, src, ss, flipped)
            }
            (Conv::Iyu1, Conv::Planar(d)) => {
                let view = PlanarView::new(d, w, h, ds);
                iyu::iyu1_to_planar(w, h, dst, view, src, ss, flipped)
            }
            (Conv::Iyu1, Conv::Iyu2) => iyu::iyu1_to_iyu2(w, h, dst, ds, src, ss, flipped),
            (Conv::Iyu1, Conv::Ayuv) => ayuv::iyu1_to_ayuv(w, h, dst, ds, src, ss, flipped),
            (Conv::Iyu1, Conv::Y41p) => y41p::iyu1_to_y41p(w, h, dst, ds, src, ss, flipped),
            (Conv::Iyu1, Conv::Cljr) => y41p::iyu1_to_cljr(w, h, dst, ds, src, ss, flipped),
            (Conv::Iyu1, d @ Conv::Luma { .. }) => {
                luma::iyu1_to_luma(w, h, dst, ds, src, ss, wide(d), flipped)
            }

            // IYU2 source.
            (Conv::Iyu2, Conv::P422(d)) => {
                iyu::iyu2_to_packed_422(w, h, dst, ds, d, src, ss, flipped)
            }
            (Conv::Iyu2, Conv::Planar(d)) => {
                let view = PlanarView::new(d, w, h, ds);
                iyu::iyu2_to_planar(w, h, dst, view, src, ss, flipped)
            }
            (Conv::Iyu2, Conv::Iyu1) => iyu::iyu2_to_iyu1(w, h, dst, ds, src, ss, flipped),
            (Conv::Iyu2, Conv::Ayuv) => ayuv::iyu2_to_ayuv(w, h, dst, ds, src, ss, flipped),
            (Conv::Iyu2, Conv::Y41p) => y41p::iyu2_to_y41p(w, h, dst, ds, src, ss, flipped),
            (Conv::Iyu2, Conv::Cljr) => y41p::iyu2_to_cljr(w, h, dst, ds, src, ss, flipped),
            (Conv::Iyu2, d @ Conv::Luma { .. }) => {
                luma::iyu2_to_luma(w, h, dst, ds, src, ss, wide(d), flipped)
            }

            // AYUV source.
            (Conv::Ayuv, Conv::P422(d)) => {
                ayuv::ayuv_to_packed_422(w, h, dst, ds, d, src, ss, flipped)
            }
            (Conv::Ayuv, Conv::Planar(d)) => {
                let view = PlanarView::new(d, w, h, ds);
                ayuv::ayuv_to_planar(w, h, dst, view, src, ss, flipped)
            }
            (Conv::Ayuv, Conv::Iyu1) => ayuv::ayuv_to_iyu1(w, h, dst, ds, src, ss, flipped),
            (Conv::Ayuv, Conv::Iyu2) => ayuv::ayuv_to_iyu2(w, h, dst, ds, src, ss, flipped),
            (Conv::Ayuv, Conv::Y41p) => ayuv::ayuv_to_y41p(w, h, dst, ds, src, ss, flipped),
            (Conv::Ayuv, Conv::Cljr) => ayuv::ayuv_to_cljr(w, h, dst, ds, src, ss, flipped),
            (Conv::Ayuv, d @ Conv::Luma { .. }) => {
                luma::ayuv_to_luma(w, h, dst, ds, src, ss, wide(d), flipped)
            }

            // Y41P source.
            (Conv::Y41p, Conv::P422(d)) => {
                y41p::y41p_to_packed_422(w, h, dst, ds, d, src, ss, flipped)
            }
            (Conv::Y41p, Conv::Planar(d)) => {
                let view = PlanarView::new(d, w, h, ds);
                y41p::y41p_to_planar(w, h, dst, view, src, ss, flipped)
            }
            (Conv::Y41p, Conv::Iyu1) => y41p::y41p_to_iyu1(w, h, dst, ds, src, ss, flipped),
            (Conv::Y41p, Conv::Iyu2) => y41p::y41p_to_iyu2(w, h, dst, ds, src, ss, flipped),
            (Conv::Y41p, Conv::Ayuv) => {
                ayuv::y41p_to_ayuv(w, h, dst, ds, src, ss, flipped, self.alpha_from_bit)
            }
            (Conv::Y41p, Conv::Cljr) => y41p::y41p_to_cljr(w, h, dst, ds, src, ss, flipped),
            (Conv::Y41p, d @ Conv::Luma { .. }) => {
                luma::y41p_to_luma(w, h, dst, ds, src, ss, wide(d), flipped)
            }

            // CLJR source.
            (Conv::Cljr, Conv::P422(d)) => {
                y41p::cljr_to_packed_422(w, h, dst, ds, d, src, ss, flipped)
            }
            (Conv::Cljr, Conv::Planar(d)) => {
                let view = PlanarView::new(d, w, h, ds);
                y41p::cljr_to_planar(w, h, dst, view, src, ss, flipped)
            }
            (Conv::Cljr, Conv::Iyu1) => y41p::cljr_to_iyu1(w, h, dst, ds, src, ss, flipped),
            (Conv::Cljr, Conv::Iyu2) => y41p::cljr_to_iyu2(w, h, dst, ds, src, ss, flipped),
            (Conv::Cljr, Conv::Ayuv) => ayuv::cljr_to_ayuv(w, h, dst, ds, src, ss, flipped),
            (Conv::Cljr, Conv::Y41p) => y41p::cljr_to_y41p(w, h, dst, ds, src, ss, flipped),
            (Conv::Cljr, d @ Conv::Luma { .. }) => {
                luma::cljr_to_luma(w, h, dst, ds, src, ss, wide(d), flipped)
            }

            // Greyscale source.
            (s @ Conv::Luma { .. }, Conv::P422(d)) => {
                luma::luma_to_packed_422(w, h, dst, ds, d, src, ss, wide(s), flipped)
            }
            (s @ Conv::Luma { .. }, Conv::Planar(d)) => {
                let view = PlanarView::new(d, w, h, ds);
                luma::luma_to_planar(w, h, dst, view, src, ss, wide(s), flipped)
            }
            (s @ Conv::Luma { .. }, Conv::Iyu1) => {
                luma::luma_to_iyu1(w, h, dst, ds, src, ss, wide(s), flipped)
            }
            (s @ Conv::Luma { .. }, Conv::Iyu2) => {
                luma::luma_to_iyu2(w, h, dst, ds, src, ss, wide(s), flipped)
            }
            (s @ Conv::Luma { .. }, Conv::Ayuv) => {
                luma::luma_to_ayuv(w, h, dst, ds, src, ss, wide(s), flipped)
            }
            (s @ Conv::Luma { .. }, Conv::Y41p) => {
                luma::luma_to_y41p(w, h, dst, ds, src, ss, wide(s), flipped)
            }
            (s @ Conv::Luma { .. }, Conv::Cljr) => {
                luma::luma_to_cljr(w, h, dst, ds, src, ss, wide(s), flipped)
            }
            (Conv::Luma { wide: false }, Conv::Luma { wide: true }) => {
                luma::y800_to_y16(w, h, dst, ds, src, ss, flipped)
            }
            (Conv::Luma { wide: true }, Conv::Luma { wide: false }) => {
                luma::y16_to_y800(w, h, dst, ds, src, ss, flipped)
            }

            // Same carrier layout under different format names (Y41P and
            // Y41T): a row copy, the opacity pass does the rest.
            (Conv::Y41p, Conv::Y41p) => {
                packed::copy_rows(h, w / 8 * 12, dst, ds, src, ss, flipped)
            }

            (s, d) => unreachable!("unsupported kernel pair {:?} -> {:?}", s, d),
        }
    }
}

/// In-place greyscale reduction of one format.
#[derive(Debug, Copy, Clone)]
pub struct GreyscaleTransform {
    pub format: PixelFormat,
}

/// Looks up the greyscale routine for a format.
pub fn find_greyscale_transform(format: PixelFormat) -> Option<GreyscaleTransform> {
    Some(GreyscaleTransform { format })
}

impl GreyscaleTransform {
    /// Reduces the buffer to greyscale in place. Palettized formats mutate
    /// `palette` instead of the image bytes and panic without one.
    pub fn run(
        &self,
        width: u32,
        height: u32,
        buf: &mut [u8],
        stride: i32,
        palette: Option<&mut [BgrQuad]>,
    ) {
        use crate::greyscale::*;
        let w = width as usize;
        let h = height as usize;
        let s = stride as usize;
        match self.format.family() {
            Family::Rgb(RgbLayout::Rgba) => greyscale_rgba(w, h, buf, s),
            Family::Rgb(RgbLayout::Rgb32) => greyscale_rgb32(w, h, buf, s),
            Family::Rgb(RgbLayout::Rgb24) => greyscale_rgb24(w, h, buf, s),
            Family::Rgb(RgbLayout::Rgb565) => greyscale_rgb565(w, h, buf, s),
            Family::Rgb(RgbLayout::Rgb555) | Family::Rgb(RgbLayout::Argb1555) => {
                greyscale_rgb555(w, h, buf, s)
            }
            Family::Palettized(_) => {
                greyscale_palette(palette.expect("palettized greyscale requires the palette"))
            }
            Family::Packed422(order) => greyscale_packed_422(w, h, buf, s, order),
            Family::Transparent422 => {
                greyscale_packed_422(w, h, buf, s, PackedY422Order::UYVY)
            }
            Family::InterlacedUyvy => greyscale_packed_422(w, h, buf, s, PackedY422Order::UYVY),
            Family::Planar(kind) => greyscale_planar(w, h, buf, PlanarView::new(kind, w, h, s)),
            Family::Iyu1 => greyscale_iyu1(w, h, buf, s),
            Family::Iyu2 => greyscale_iyu2(w, h, buf, s),
            Family::Ayuv => greyscale_ayuv(w, h, buf, s),
            Family::Y41p | Family::Y41t | Family::InterlacedY41p => greyscale_y41p(w, h, buf, s),
            Family::Cljr => greyscale_cljr(w, h, buf, s),
            Family::Grey8 | Family::Grey16 => greyscale_noop(w, h, buf, s),
        }
    }
}

/// Solid-color fill of one format.
#[derive(Debug, Copy, Clone)]
pub struct FillTransform {
    pub format: PixelFormat,
}

/// Looks up the fill routine; `None` for palettized formats, whose pixel
/// values depend on a caller palette.
pub fn find_fill_color_transform(format: PixelFormat) -> Option<FillTransform> {
    match format.family() {
        Family::Palettized(_) => None,
        _ => Some(FillTransform { format }),
    }
}

impl FillTransform {
    /// Fills the buffer with one color. The first three components are
    /// R,G,B for RGB formats and Y,U,V for YUV formats.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &self,
        ry: u8,
        gu: u8,
        bv: u8,
        alpha: u8,
        width: u32,
        height: u32,
        buf: &mut [u8],
        stride: i32,
    ) {
        use crate::fill_check::*;
        let w = width as usize;
        let h = height as usize;
        let s = stride as usize;
        match self.format.family() {
            Family::Rgb(layout) => fill_rgb(layout, ry, gu, bv, alpha, w, h, buf, s),
            Family::Palettized(_) => unreachable!("filtered by the lookup"),
            Family::Packed422(order) => fill_packed_422(order, ry, gu, bv, w, h, buf, s),
            Family::InterlacedUyvy => {
                fill_packed_422(PackedY422Order::UYVY, ry, gu, bv, w, h, buf, s)
            }
            Family::Transparent422 => fill_y42t(ry, gu, bv, alpha, w, h, buf, s),
            Family::Planar(kind) => {
                fill_planar(PlanarView::new(kind, w, h, s), ry, gu, bv, w, h, buf)
            }
            Family::Iyu1 => fill_iyu1(ry, gu, bv, w, h, buf, s),
            Family::Iyu2 => fill_iyu2(ry, gu, bv, w, h, buf, s),
            Family::Ayuv => fill_ayuv(ry, gu, bv, alpha, w, h, buf, s),
            Family::Y41p | Family::InterlacedY41p => fill_y41p(ry, gu, bv, w, h, buf, s),
            Family::Y41t => fill_y41t(ry, gu, bv, alpha, w, h, buf, s),
            Family::Cljr => fill_cljr(ry, gu, bv, w, h, buf, s),
            Family::Grey8 => fill_luma(ry, w, h, buf, s, false),
            Family::Grey16 => fill_luma(ry, w, h, buf, s, true),
        }
    }
}

/// Uniform-color verification of one format, the inverse of
/// [`FillTransform`].
#[derive(Debug, Copy, Clone)]
pub struct BufferCheck {
    pub format: PixelFormat,
}

/// Looks up the buffer check routine used by the test harness.
pub fn find_buffer_check(format: PixelFormat) -> Option<BufferCheck> {
    match format.family() {
        Family::Palettized(_) => None,
        _ => Some(BufferCheck { format }),
    }
}

impl BufferCheck {
    /// Returns true when the whole buffer carries exactly the given color.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &self,
        ry: u8,
        gu: u8,
        bv: u8,
        alpha: u8,
        width: u32,
        height: u32,
        buf: &[u8],
        stride: i32,
    ) -> bool {
        use crate::fill_check::*;
        let w = width as usize;
        let h = height as usize;
        let s = stride as usize;
        match self.format.family() {
            Family::Rgb(layout) => check_rgb(layout, ry, gu, bv, alpha, w, h, buf, s),
            Family::Palettized(_) => unreachable!("filtered by the lookup"),
            Family::Packed422(order) => check_packed_422(order, ry, gu, bv, w, h, buf, s),
            Family::InterlacedUyvy => {
                check_packed_422(PackedY422Order::UYVY, ry, gu, bv, w, h, buf, s)
            }
            Family::Transparent422 => {
                let y = if alpha > 127 { ry | 0x01 } else { ry & 0xFE };
                check_packed_422(PackedY422Order::UYVY, y, gu, bv, w, h, buf, s)
            }
            Family::Planar(kind) => {
                check_planar(PlanarView::new(kind, w, h, s), ry, gu, bv, w, h, buf)
            }
            Family::Iyu1 => check_iyu1(ry, gu, bv, w, h, buf, s),
            Family::Iyu2 => check_iyu2(ry, gu, bv, w, h, buf, s),
            Family::Ayuv => check_ayuv(ry, gu, bv, alpha, w, h, buf, s),
            Family::Y41p | Family::InterlacedY41p => check_y41p(ry, gu, bv, w, h, buf, s),
            Family::Y41t => {
                let y = if alpha > 127 { ry | 0x01 } else { ry & 0xFE };
                check_y41p(y, gu, bv, w, h, buf, s)
            }
            Family::Cljr => check_cljr(ry, gu, bv, w, h, buf, s),
            Family::Grey8 => check_luma(ry, w, h, buf, s, false),
            Family::Grey16 => check_luma(ry, w, h, buf, s, true),
        }
    }
}

/// Single-pixel writer of one format.
#[derive(Debug, Copy, Clone)]
pub struct SetPixelTransform {
    pub format: PixelFormat,
}

/// Looks up the set-pixel routine; `None` for palettized and interlaced
/// formats.
pub fn find_set_pixel_transform(format: PixelFormat) -> Option<SetPixelTransform> {
    match format.family() {
        Family::Palettized(_) | Family::InterlacedUyvy | Family::InterlacedY41p => None,
        _ => Some(SetPixelTransform { format }),
    }
}

impl SetPixelTransform {
    /// Writes one pixel at `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &self,
        ry: u8,
        gu: u8,
        bv: u8,
        alpha: u8,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        buf: &mut [u8],
        stride: i32,
    ) {
        use crate::set_pixel::*;
        let (x, y) = (x as usize, y as usize);
        let w = width as usize;
        let s = stride as usize;
        match self.format.family() {
            Family::Rgb(layout) => set_pixel_rgb(layout, ry, gu, bv, alpha, x, y, w, buf, s),
            Family::Palettized(_) | Family::InterlacedUyvy | Family::InterlacedY41p => {
                unreachable!("filtered by the lookup")
            }
            Family::Packed422(order) => {
                set_pixel_packed_422(order, ry, gu, bv, x, y, w, buf, s)
            }
            Family::Transparent422 => set_pixel_y42t(ry, gu, bv, alpha, x, y, w, buf, s),
            Family::Planar(kind) => {
                let h = height as usize;
                set_pixel_planar(PlanarView::new(kind, w, h, s), ry, gu, bv, x, y, buf)
            }
            Family::Iyu1 => set_pixel_iyu1(ry, gu, bv, x, y, w, buf, s),
            Family::Iyu2 => set_pixel_iyu2(ry, gu, bv, x, y, w, buf, s),
            Family::Ayuv => set_pixel_ayuv(ry, gu, bv, alpha, x, y, w, buf, s),
            Family::Y41p => set_pixel_y41p(ry, gu, bv, x, y, w, buf, s),
            Family::Y41t => set_pixel_y41t(ry, gu, bv, alpha, x, y, w, buf, s),
            Family::Cljr => set_pixel_cljr(ry, gu, bv, x, y, w, buf, s),
            Family::Grey8 => set_pixel_luma(ry, x, y, w, buf, s, false),
            Family::Grey16 => set_pixel_luma(ry, x, y, w, buf, s, true),
        }
    }
}

/// In-place vertical flip of one format.
#[derive(Debug, Copy, Clone)]
pub struct FlipTransform {
    pub format: PixelFormat,
}

/// Looks up the vertical flip routine. Defined for every format.
pub fn find_flip_transform(format: PixelFormat) -> Option<FlipTransform> {
    Some(FlipTransform { format })
}

impl FlipTransform {
    /// Reverses the row order in place, per plane for multi-plane formats.
    pub fn run(&self, width: u32, height: u32, buf: &mut [u8], stride: i32) {
        crate::flip::flip_vertical(self.format, width, height, buf, stride);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pairs_resolve() {
        assert!(find_video_transform(PixelFormat::UYVY, PixelFormat::RGB32).is_some());
        assert!(find_video_transform(PixelFormat::RGB555, PixelFormat::RGBA).is_some());
        assert!(find_video_transform(PixelFormat::YUY2, PixelFormat::YV12).is_some());
        assert!(find_video_transform(PixelFormat::NV12, PixelFormat::IMC2).is_some());
        assert!(find_video_transform(PixelFormat::CLJR, PixelFormat::Y800).is_some());
        assert!(find_video_transform(PixelFormat::Y16, PixelFormat::AYUV).is_some());
    }

    #[test]
    fn unsupported_pairs_surface_as_typed_errors() {
        let err = Transform::between(PixelFormat::YUY2, PixelFormat::IUYV).unwrap_err();
        assert_eq!(
            err,
            crate::error::PixelFmtError::UnsupportedPair(PixelFormat::YUY2, PixelFormat::IUYV)
        );
        assert!(Transform::between(PixelFormat::YUY2, PixelFormat::NV12).is_ok());
    }

    #[test]
    fn palettized_targets_are_rejected() {
        assert!(find_video_transform(PixelFormat::RGB32, PixelFormat::RGB8).is_none());
        assert!(find_video_transform(PixelFormat::YUY2, PixelFormat::RGB4).is_none());
        // But palettized sources convert fine.
        assert!(find_video_transform(PixelFormat::RGB8, PixelFormat::RGB32).is_some());
        assert!(find_video_transform(PixelFormat::RGB8, PixelFormat::YUY2).is_some());
    }

    #[test]
    fn interlaced_formats_pair_only_with_their_partner() {
        assert!(find_video_transform(PixelFormat::UYVY, PixelFormat::IUYV).is_some());
        assert!(find_video_transform(PixelFormat::IUYV, PixelFormat::UYVY).is_some());
        assert!(find_video_transform(PixelFormat::Y41P, PixelFormat::IY41).is_some());
        assert!(find_video_transform(PixelFormat::YUY2, PixelFormat::IUYV).is_none());
        assert!(find_video_transform(PixelFormat::IUYV, PixelFormat::RGB32).is_none());
    }

    #[test]
    fn identity_pairs_are_supported_for_every_format() {
        for format in crate::formats::video_formats() {
            assert!(
                find_video_transform(format, format).is_some(),
                "{:?} identity",
                format
            );
        }
    }

    #[test]
    fn every_yuv_pair_has_a_kernel() {
        let yuv = [
            PixelFormat::YUY2,
            PixelFormat::UYVY,
            PixelFormat::YVYU,
            PixelFormat::VYUY,
            PixelFormat::IYUV,
            PixelFormat::YV12,
            PixelFormat::YUV9,
            PixelFormat::YVU9,
            PixelFormat::YV16,
            PixelFormat::NV12,
            PixelFormat::NV21,
            PixelFormat::IMC1,
            PixelFormat::IMC2,
            PixelFormat::IMC3,
            PixelFormat::IMC4,
            PixelFormat::IYU1,
            PixelFormat::IYU2,
            PixelFormat::AYUV,
            PixelFormat::Y41P,
            PixelFormat::Y800,
            PixelFormat::Y16,
            PixelFormat::Y42T,
            PixelFormat::Y41T,
            PixelFormat::CLJR,
        ];
        for &a in &yuv {
            for &b in &yuv {
                assert!(
                    find_video_transform(a, b).is_some(),
                    "missing {:?} -> {:?}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn hook_lookups_follow_format_capabilities() {
        assert!(find_fill_color_transform(PixelFormat::RGB8).is_none());
        assert!(find_fill_color_transform(PixelFormat::YUY2).is_some());
        assert!(find_set_pixel_transform(PixelFormat::IUYV).is_none());
        assert!(find_greyscale_transform(PixelFormat::CLJR).is_some());
        assert!(find_buffer_check(PixelFormat::NV21).is_some());
    }
}
