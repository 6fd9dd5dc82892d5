use image::{GrayImage, Luma, Rgba, RgbaImage};

use inpainter::{AdaptiveConfig, DamageMask, InpaintError, adaptive_inpaint};

fn checker(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([200, 100, 0, 255])
        } else {
            Rgba([0, 100, 200, 255])
        }
    })
}

#[test]
fn only_damaged_pixels_change_and_become_opaque() {
    let mut src = checker(12, 9);
    let original = src.clone();
    let mask = DamageMask::from_gray(GrayImage::from_fn(12, 9, |x, y| {
        Luma([if (4..8).contains(&x) && (3..6).contains(&y) { 255 } else { 0 }])
    }));

    let report = adaptive_inpaint(&mut src, &mask, &AdaptiveConfig::default()).expect("fills");
    assert_eq!(report.filled_pixels, 12);
    assert_eq!(report.passes, 1);
    for (x, y, p) in src.enumerate_pixels() {
        if mask.is_damaged_at(x, y) {
            assert_eq!(p.0[3], 255);
            // a mean of the two checker colours stays between them
            assert!(p.0[0] <= 200 && p.0[2] <= 200);
            assert_eq!(p.0[1], 100);
        } else {
            assert_eq!(p, original.get_pixel(x, y));
        }
    }
}

#[test]
fn clear_mask_reports_nothing_filled() {
    let mut src = checker(5, 5);
    let before = src.clone();
    let report =
        adaptive_inpaint(&mut src, &DamageMask::new(5, 5), &AdaptiveConfig::default()).expect("ok");
    assert_eq!(report.filled_pixels, 0);
    assert_eq!(report.passes, 0);
    assert_eq!(src, before);
}

#[test]
fn mask_must_match_the_image() {
    let mut src = checker(6, 6);
    let err = adaptive_inpaint(&mut src, &DamageMask::new(6, 7), &AdaptiveConfig::default())
        .unwrap_err();
    assert!(err.is_precondition());
    assert!(matches!(err, InpaintError::DimensionMismatch { mask_height: 7, .. }));
}
