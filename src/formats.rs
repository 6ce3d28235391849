/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

use crate::error::PixelFmtError;
use crate::yuv_support::{PackedY422Order, PaletteDepth, PlanarKind, RgbLayout};
use std::fmt;
use std::str::FromStr;

/// A 32-bit format tag built from four ASCII bytes, e.g. `b"YUY2"`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FourCC(pub u32);

impl FourCC {
    pub const fn new(tag: &[u8; 4]) -> FourCC {
        FourCC(u32::from_le_bytes([tag[0], tag[1], tag[2], tag[3]]))
    }

    pub const fn bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.bytes() {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC({})", self)
    }
}

pub const FOURCC_YUY2: FourCC = FourCC::new(b"YUY2");
pub const FOURCC_YUYV: FourCC = FourCC::new(b"YUYV");
pub const FOURCC_YUNV: FourCC = FourCC::new(b"YUNV");
pub const FOURCC_V422: FourCC = FourCC::new(b"V422");
pub const FOURCC_UYVY: FourCC = FourCC::new(b"UYVY");
pub const FOURCC_UYNV: FourCC = FourCC::new(b"UYNV");
pub const FOURCC_CYUV: FourCC = FourCC::new(b"cyuv");
pub const FOURCC_Y422: FourCC = FourCC::new(b"Y422");
pub const FOURCC_YVYU: FourCC = FourCC::new(b"YVYU");
pub const FOURCC_VYUY: FourCC = FourCC::new(b"VYUY");
pub const FOURCC_IYUV: FourCC = FourCC::new(b"IYUV");
pub const FOURCC_I420: FourCC = FourCC::new(b"I420");
pub const FOURCC_P420: FourCC = FourCC::new(b"P420");
pub const FOURCC_YV12: FourCC = FourCC::new(b"YV12");
pub const FOURCC_YUV9: FourCC = FourCC::new(b"YUV9");
pub const FOURCC_YVU9: FourCC = FourCC::new(b"YVU9");
pub const FOURCC_YV16: FourCC = FourCC::new(b"YV16");
pub const FOURCC_NV12: FourCC = FourCC::new(b"NV12");
pub const FOURCC_NV21: FourCC = FourCC::new(b"NV21");
pub const FOURCC_IMC1: FourCC = FourCC::new(b"IMC1");
pub const FOURCC_IMC2: FourCC = FourCC::new(b"IMC2");
pub const FOURCC_IMC3: FourCC = FourCC::new(b"IMC3");
pub const FOURCC_IMC4: FourCC = FourCC::new(b"IMC4");
pub const FOURCC_IYU1: FourCC = FourCC::new(b"IYU1");
pub const FOURCC_Y411: FourCC = FourCC::new(b"Y411");
pub const FOURCC_IYU2: FourCC = FourCC::new(b"IYU2");
pub const FOURCC_Y444: FourCC = FourCC::new(b"Y444");
pub const FOURCC_AYUV: FourCC = FourCC::new(b"AYUV");
pub const FOURCC_Y41P: FourCC = FourCC::new(b"Y41P");
pub const FOURCC_Y800: FourCC = FourCC::new(b"Y800");
pub const FOURCC_Y8: FourCC = FourCC::new(b"Y8  ");
pub const FOURCC_GREY: FourCC = FourCC::new(b"GREY");
pub const FOURCC_Y16: FourCC = FourCC::new(b"Y16 ");
pub const FOURCC_Y42T: FourCC = FourCC::new(b"Y42T");
pub const FOURCC_Y41T: FourCC = FourCC::new(b"Y41T");
pub const FOURCC_IUYV: FourCC = FourCC::new(b"IUYV");
pub const FOURCC_IY41: FourCC = FourCC::new(b"IY41");
pub const FOURCC_CLJR: FourCC = FourCC::new(b"CLJR");
pub const FOURCC_RGBA: FourCC = FourCC::new(b"RGBA");
/// DIB rasters carry `BI_RGB` (zero); they are keyed by name, not tag.
pub const FOURCC_BI_RGB: FourCC = FourCC(0);

/// Every raster layout the crate can address.
///
/// Aliased fourccs (`YUYV`, `I420`, `GREY`, ...) resolve to the canonical
/// variant carrying their layout; there is one variant per distinct memory
/// layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum PixelFormat {
    RGBA,
    RGB32,
    RGB24,
    RGB565,
    RGB555,
    ARGB1555,
    RGB8,
    RGB4,
    RGB1,
    YUY2,
    UYVY,
    YVYU,
    VYUY,
    IYUV,
    YV12,
    YUV9,
    YVU9,
    YV16,
    NV12,
    NV21,
    IMC1,
    IMC2,
    IMC3,
    IMC4,
    IYU1,
    IYU2,
    AYUV,
    Y41P,
    Y800,
    Y16,
    Y42T,
    Y41T,
    IUYV,
    IY41,
    CLJR,
}

/// Colorspace/layout family of a format, carrying the parameters the
/// generic kernels dispatch on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Family {
    Rgb(RgbLayout),
    Palettized(PaletteDepth),
    Packed422(PackedY422Order),
    /// UYVY layout whose Y samples carry an opacity bit in bit 0.
    Transparent422,
    Planar(PlanarKind),
    Iyu1,
    Iyu2,
    Ayuv,
    Y41p,
    /// Y41P layout whose Y samples carry an opacity bit in bit 0.
    Y41t,
    Cljr,
    Grey8,
    Grey16,
    /// Field-interlaced row ordering of UYVY.
    InterlacedUyvy,
    /// Field-interlaced row ordering of Y41P.
    InterlacedY41p,
}

/// Static description of one pixel format.
#[derive(Debug, Copy, Clone)]
pub struct FormatInfo {
    pub format: PixelFormat,
    pub name: &'static str,
    pub fourcc: FourCC,
    /// Alias tags resolving to this format.
    pub aliases: &'static [FourCC],
    /// Average allocated bits per pixel.
    pub effective_bpp: u32,
    pub family: Family,
}

impl FormatInfo {
    /// Minimum bytes between vertically adjacent rows (of the luma plane for
    /// multi-plane formats).
    pub fn min_stride(&self, width: usize) -> usize {
        match self.format {
            PixelFormat::RGBA | PixelFormat::RGB32 | PixelFormat::AYUV => width * 4,
            PixelFormat::RGB24 | PixelFormat::IYU2 => width * 3,
            PixelFormat::RGB565
            | PixelFormat::RGB555
            | PixelFormat::ARGB1555
            | PixelFormat::YUY2
            | PixelFormat::UYVY
            | PixelFormat::YVYU
            | PixelFormat::VYUY
            | PixelFormat::Y42T
            | PixelFormat::IUYV
            | PixelFormat::Y16 => width * 2,
            PixelFormat::IYU1 => width * 12 / 8,
            PixelFormat::Y41P | PixelFormat::Y41T | PixelFormat::IY41 => width / 8 * 12,
            PixelFormat::RGB4 => width / 2,
            PixelFormat::RGB1 => width / 8,
            _ => width,
        }
    }
}

macro_rules! info {
    ($fmt:ident, $fourcc:expr, $aliases:expr, $bpp:expr, $family:expr) => {
        FormatInfo {
            format: PixelFormat::$fmt,
            name: stringify!($fmt),
            fourcc: $fourcc,
            aliases: $aliases,
            effective_bpp: $bpp,
            family: $family,
        }
    };
}

static REGISTRY: [FormatInfo; 35] = [
    info!(RGBA, FOURCC_RGBA, &[], 32, Family::Rgb(RgbLayout::Rgba)),
    info!(RGB32, FOURCC_BI_RGB, &[], 32, Family::Rgb(RgbLayout::Rgb32)),
    info!(RGB24, FOURCC_BI_RGB, &[], 24, Family::Rgb(RgbLayout::Rgb24)),
    info!(RGB565, FOURCC_BI_RGB, &[], 16, Family::Rgb(RgbLayout::Rgb565)),
    info!(RGB555, FOURCC_BI_RGB, &[], 16, Family::Rgb(RgbLayout::Rgb555)),
    info!(
        ARGB1555,
        FOURCC_BI_RGB,
        &[],
        16,
        Family::Rgb(RgbLayout::Argb1555)
    ),
    info!(
        RGB8,
        FOURCC_BI_RGB,
        &[],
        8,
        Family::Palettized(PaletteDepth::Bits8)
    ),
    info!(
        RGB4,
        FOURCC_BI_RGB,
        &[],
        4,
        Family::Palettized(PaletteDepth::Bits4)
    ),
    info!(
        RGB1,
        FOURCC_BI_RGB,
        &[],
        1,
        Family::Palettized(PaletteDepth::Bits1)
    ),
    info!(
        YUY2,
        FOURCC_YUY2,
        &[FOURCC_YUYV, FOURCC_YUNV, FOURCC_V422],
        16,
        Family::Packed422(PackedY422Order::YUY2)
    ),
    info!(
        UYVY,
        FOURCC_UYVY,
        &[FOURCC_UYNV, FOURCC_CYUV, FOURCC_Y422],
        16,
        Family::Packed422(PackedY422Order::UYVY)
    ),
    info!(
        YVYU,
        FOURCC_YVYU,
        &[],
        16,
        Family::Packed422(PackedY422Order::YVYU)
    ),
    info!(
        VYUY,
        FOURCC_VYUY,
        &[],
        16,
        Family::Packed422(PackedY422Order::VYUY)
    ),
    info!(
        IYUV,
        FOURCC_IYUV,
        &[FOURCC_I420, FOURCC_P420],
        12,
        Family::Planar(PlanarKind::Contiguous {
            decimation: 2,
            u_first: true
        })
    ),
    info!(
        YV12,
        FOURCC_YV12,
        &[],
        12,
        Family::Planar(PlanarKind::Contiguous {
            decimation: 2,
            u_first: false
        })
    ),
    info!(
        YUV9,
        FOURCC_YUV9,
        &[],
        9,
        Family::Planar(PlanarKind::Contiguous {
            decimation: 4,
            u_first: true
        })
    ),
    info!(
        YVU9,
        FOURCC_YVU9,
        &[],
        9,
        Family::Planar(PlanarKind::Contiguous {
            decimation: 4,
            u_first: false
        })
    ),
    info!(YV16, FOURCC_YV16, &[], 16, Family::Planar(PlanarKind::Yv16)),
    info!(
        NV12,
        FOURCC_NV12,
        &[],
        12,
        Family::Planar(PlanarKind::SemiPlanar { u_first: true })
    ),
    info!(
        NV21,
        FOURCC_NV21,
        &[],
        12,
        Family::Planar(PlanarKind::SemiPlanar { u_first: false })
    ),
    info!(
        IMC1,
        FOURCC_IMC1,
        &[],
        12,
        Family::Planar(PlanarKind::Imc {
            u_first: false,
            interlaced: false
        })
    ),
    info!(
        IMC2,
        FOURCC_IMC2,
        &[],
        12,
        Family::Planar(PlanarKind::Imc {
            u_first: false,
            interlaced: true
        })
    ),
    info!(
        IMC3,
        FOURCC_IMC3,
        &[],
        12,
        Family::Planar(PlanarKind::Imc {
            u_first: true,
            interlaced: false
        })
    ),
    info!(
        IMC4,
        FOURCC_IMC4,
        &[],
        12,
        Family::Planar(PlanarKind::Imc {
            u_first: true,
            interlaced: true
        })
    ),
    info!(IYU1, FOURCC_IYU1, &[FOURCC_Y411], 12, Family::Iyu1),
    info!(IYU2, FOURCC_IYU2, &[FOURCC_Y444], 24, Family::Iyu2),
    info!(AYUV, FOURCC_AYUV, &[], 32, Family::Ayuv),
    info!(Y41P, FOURCC_Y41P, &[], 12, Family::Y41p),
    info!(Y800, FOURCC_Y800, &[FOURCC_Y8, FOURCC_GREY], 8, Family::Grey8),
    info!(Y16, FOURCC_Y16, &[], 16, Family::Grey16),
    info!(Y42T, FOURCC_Y42T, &[], 16, Family::Transparent422),
    info!(Y41T, FOURCC_Y41T, &[], 12, Family::Y41t),
    info!(IUYV, FOURCC_IUYV, &[], 16, Family::InterlacedUyvy),
    info!(IY41, FOURCC_IY41, &[], 12, Family::InterlacedY41p),
    info!(CLJR, FOURCC_CLJR, &[], 8, Family::Cljr),
];

/// Returns the descriptor of a format.
pub fn get_video_format_info(format: PixelFormat) -> &'static FormatInfo {
    REGISTRY
        .iter()
        .find(|info| info.format == format)
        .expect("every enum variant is registered")
}

/// Resolves a fourcc tag, following aliases, to its canonical format.
///
/// DIB RGB rasters share the `BI_RGB` tag and cannot be resolved this way;
/// parse their names instead.
pub fn lookup_video_format(fourcc: FourCC) -> Result<PixelFormat, PixelFmtError> {
    if fourcc == FOURCC_BI_RGB {
        return Err(PixelFmtError::UnknownFormat(fourcc));
    }
    for info in REGISTRY.iter() {
        if info.fourcc == fourcc || info.aliases.contains(&fourcc) {
            return Ok(info.format);
        }
    }
    Err(PixelFmtError::UnknownFormat(fourcc))
}

/// All registered formats, in registry order.
pub fn video_formats() -> impl Iterator<Item = PixelFormat> {
    REGISTRY.iter().map(|info| info.format)
}

impl PixelFormat {
    #[inline]
    pub fn info(self) -> &'static FormatInfo {
        get_video_format_info(self)
    }

    #[inline]
    pub fn family(self) -> Family {
        self.info().family
    }

    #[inline]
    pub fn fourcc(self) -> FourCC {
        self.info().fourcc
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

impl FromStr for PixelFormat {
    type Err = PixelFmtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REGISTRY
            .iter()
            .find(|info| info.name.eq_ignore_ascii_case(s))
            .map(|info| info.format)
            .ok_or_else(|| {
                let mut tag = [b' '; 4];
                for (slot, byte) in tag.iter_mut().zip(s.bytes()) {
                    *slot = byte;
                }
                PixelFmtError::UnknownFormat(FourCC::new(&tag))
            })
    }
}
