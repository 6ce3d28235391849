/*
 * Copyright (c) the pixelfmt contributors. All rights reserved.
 *
 * Use of this source code is governed by the MIT license
 * that can be found in the LICENSE file.
 */

//! End-to-end scenarios and the byte-level properties: greyscale
//! idempotence, flip involution, buffer-size anchors.

use pixelfmt::{
    calculate_buffer_size, fast_yuv_to_rgb, find_buffer_check, find_fill_color_transform,
    find_greyscale_transform, find_set_pixel_transform, find_video_transform, flip_vertical,
    get_use_faster_looping, lookup_video_format, set_use_faster_looping, BgrQuad, FourCC,
    PixelFormat,
};
use rand::{Rng, SeedableRng};

fn alloc(format: PixelFormat, w: u32, h: u32) -> Vec<u8> {
    let (bytes, _) = calculate_buffer_size(format, w as usize, h as usize, 0);
    vec![0u8; bytes]
}

fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen()).collect()
}

#[test]
fn uyvy_grey_frame_decodes_to_uniform_rgb32() {
    // 16x16 UYVY filled with (Y,U,V) = (128,128,128).
    let mut src = alloc(PixelFormat::UYVY, 16, 16);
    find_fill_color_transform(PixelFormat::UYVY)
        .unwrap()
        .run(128, 128, 128, 255, 16, 16, &mut src, 0);

    let transform = find_video_transform(PixelFormat::UYVY, PixelFormat::RGB32);
    assert!(transform.is_some());
    let mut dst = alloc(PixelFormat::RGB32, 16, 16);
    transform
        .unwrap()
        .run(16, 16, &mut dst, 0, &src, 0, false, None);

    // The result is the fast-function image of mid grey (within the ±1
    // precision bound of ideal grey) with opaque alpha.
    let (r, g, b) = fast_yuv_to_rgb(128, 128, 128);
    assert!(find_buffer_check(PixelFormat::RGB32)
        .unwrap()
        .run(r, g, b, 255, 16, 16, &dst, 0));
    for px in dst.chunks_exact(4) {
        assert_eq!(px[3], 0xFF);
        assert!(px[0] == px[1] && px[1] == px[2]);
    }
}

#[test]
fn rgb555_white_expands_to_opaque_white_rgba() {
    let mut src = vec![0u8; 2 * 4 * 4];
    for px in src.chunks_exact_mut(2) {
        px.copy_from_slice(&0x7FFFu16.to_le_bytes());
    }
    let transform = find_video_transform(PixelFormat::RGB555, PixelFormat::RGBA);
    assert!(transform.is_some());
    let mut dst = vec![0u8; 4 * 4 * 4];
    transform.unwrap().run(4, 4, &mut dst, 0, &src, 0, false, None);
    for px in dst.chunks_exact(4) {
        assert_eq!(px, &[0xFF, 0xFF, 0xFF, 0xFF]);
    }
}

#[test]
fn buffer_size_anchors() {
    assert_eq!(
        calculate_buffer_size(PixelFormat::UYVY, 2592, 1944, 0).0,
        10_077_696
    );
    assert_eq!(
        calculate_buffer_size(PixelFormat::UYVY, 2592, 1944, 5500).0,
        5500 * 1944
    );
    assert_eq!(calculate_buffer_size(PixelFormat::IYU1, 12, 12, 0).0, 216);

    let saved = get_use_faster_looping();
    set_use_faster_looping(false);
    assert_eq!(calculate_buffer_size(PixelFormat::RGB24, 12, 12, 0).0, 432);
    set_use_faster_looping(true);
    assert_eq!(calculate_buffer_size(PixelFormat::RGB24, 12, 12, 0).0, 433);
    set_use_faster_looping(saved);
}

#[test]
fn uyvy_greyscale_zeroes_chroma_and_keeps_luma() {
    let mut buf = alloc(PixelFormat::UYVY, 16, 16);
    find_fill_color_transform(PixelFormat::UYVY)
        .unwrap()
        .run(100, 200, 50, 255, 16, 16, &mut buf, 0);
    find_greyscale_transform(PixelFormat::UYVY)
        .unwrap()
        .run(16, 16, &mut buf, 0, None);
    for px in buf.chunks_exact(4) {
        assert_eq!(px, &[0, 100, 0, 100]);
    }
}

#[test]
fn chroma_zeroing_greyscale_is_idempotent() {
    // YUV layouts grey out by zeroing chroma, which applying twice cannot
    // change. (The RGB forms re-quantize luma and are checked against the
    // conversion matrix instead.)
    for format in pixelfmt::video_formats() {
        if matches!(
            format.family(),
            pixelfmt::Family::Rgb(_) | pixelfmt::Family::Palettized(_)
        ) {
            continue;
        }
        let grey = find_greyscale_transform(format).unwrap();
        let (bytes, _) = calculate_buffer_size(format, 16, 16, 0);
        let mut buf = noise(bytes, format as u64 + 1);
        grey.run(16, 16, &mut buf, 0, None);
        let once = buf.clone();
        grey.run(16, 16, &mut buf, 0, None);
        assert_eq!(buf, once, "{:?} greyscale idempotence", format);
    }
}

#[test]
fn rgb_greyscale_writes_the_luma_triple() {
    use pixelfmt::fast_rgb_to_yuv;
    let colors = [
        (128u8, 128u8, 128u8),
        (255, 255, 255),
        (0, 0, 0),
        (255, 0, 0),
        (0, 255, 0),
        (0, 0, 255),
    ];
    for format in [PixelFormat::RGBA, PixelFormat::RGB32, PixelFormat::RGB24] {
        for &(r, g, b) in &colors {
            let mut buf = alloc(format, 16, 16);
            find_fill_color_transform(format)
                .unwrap()
                .run(r, g, b, 255, 16, 16, &mut buf, 0);
            find_greyscale_transform(format)
                .unwrap()
                .run(16, 16, &mut buf, 0, None);
            let (y, _, _) = fast_rgb_to_yuv(r, g, b);
            assert!(
                find_buffer_check(format)
                    .unwrap()
                    .run(y, y, y, 255, 16, 16, &buf, 0),
                "{:?} greyscale of ({},{},{})",
                format,
                r,
                g,
                b
            );
        }
    }
}

#[test]
fn palette_greyscale_mutates_the_palette_in_place() {
    let mut image = noise(16 * 16, 3);
    let untouched = image.clone();
    let mut palette = vec![BgrQuad::new(200, 100, 50); 256];
    find_greyscale_transform(PixelFormat::RGB8)
        .unwrap()
        .run(16, 16, &mut image, 0, Some(&mut palette));
    assert_eq!(image, untouched, "image bytes must not change");
    for entry in &palette {
        assert_eq!(entry.red, entry.green);
        assert_eq!(entry.green, entry.blue);
    }
}

#[test]
fn flip_is_an_involution_everywhere() {
    for format in pixelfmt::video_formats() {
        let (bytes, _) = calculate_buffer_size(format, 16, 16, 0);
        let original = noise(bytes, 42);
        let mut buf = original.clone();
        flip_vertical(format, 16, 16, &mut buf, 0);
        flip_vertical(format, 16, 16, &mut buf, 0);
        assert_eq!(buf, original, "{:?} flip involution", format);
    }
}

#[test]
fn fill_then_check_holds_for_every_format_with_hooks() {
    for format in pixelfmt::video_formats() {
        let fill = match find_fill_color_transform(format) {
            Some(f) => f,
            None => continue,
        };
        let check = find_buffer_check(format).unwrap();
        let mut buf = alloc(format, 16, 16);
        // Chroma on the CLJR lattice so the sub-byte formats hold exactly.
        fill.run(96, 64, 192, 255, 16, 16, &mut buf, 0);
        assert!(
            check.run(96, 64, 192, 255, 16, 16, &buf, 0),
            "{:?} fill/check mismatch",
            format
        );
        // CLJR quantizes 97 back onto 96; the transparent formats fold the
        // probe into the opacity bit. Everything else must reject it.
        let insensitive = matches!(
            format,
            PixelFormat::CLJR | PixelFormat::Y42T | PixelFormat::Y41T
        );
        assert!(
            insensitive || !check.run(97, 64, 192, 255, 16, 16, &buf, 0),
            "{:?} check does not discriminate",
            format
        );
    }
}

#[test]
fn set_pixel_agrees_with_fill() {
    for format in pixelfmt::video_formats() {
        let set = match find_set_pixel_transform(format) {
            Some(s) => s,
            None => continue,
        };
        let fill = match find_fill_color_transform(format) {
            Some(f) => f,
            None => continue,
        };
        let mut painted = alloc(format, 16, 16);
        for y in 0..16 {
            for x in 0..16 {
                set.run(96, 64, 192, 255, x, y, 16, 16, &mut painted, 0);
            }
        }
        let mut filled = alloc(format, 16, 16);
        fill.run(96, 64, 192, 255, 16, 16, &mut filled, 0);
        assert_eq!(painted, filled, "{:?} set_pixel vs fill", format);
    }
}

#[test]
fn fourcc_registry_scenarios() {
    assert_eq!(
        lookup_video_format(FourCC::new(b"YUNV")).unwrap(),
        PixelFormat::YUY2
    );
    assert_eq!(
        lookup_video_format(FourCC::new(b"I420")).unwrap(),
        PixelFormat::IYUV
    );
    assert!(lookup_video_format(FourCC::new(b"ZZZZ")).is_err());
    assert_eq!(PixelFormat::YUY2.fourcc().to_string(), "YUY2");
    let info = pixelfmt::get_video_format_info(PixelFormat::IYUV);
    assert_eq!(info.effective_bpp, 12);
}

#[test]
fn conversion_with_padded_strides_matches_tight_output() {
    // Convert once tightly packed and once with padded rows; the pixels
    // must agree.
    let w = 16u32;
    let h = 8u32;
    let src = noise(w as usize * h as usize * 2, 9);
    let t = find_video_transform(PixelFormat::YUY2, PixelFormat::UYVY).unwrap();

    let mut tight = vec![0u8; w as usize * h as usize * 2];
    t.run(w, h, &mut tight, 0, &src, 0, false, None);

    let padded_stride = w as usize * 2 + 12;
    let mut padded = vec![0u8; padded_stride * h as usize];
    t.run(w, h, &mut padded, padded_stride as i32, &src, 0, false, None);

    for y in 0..h as usize {
        assert_eq!(
            &padded[y * padded_stride..y * padded_stride + w as usize * 2],
            &tight[y * w as usize * 2..(y + 1) * w as usize * 2],
        );
    }
}
