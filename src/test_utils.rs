//! Synthetic images and masks shared by the unit tests.

use image::{GrayImage, Luma, Rgba, RgbaImage};

use crate::ops::DamageMask;

pub(crate) fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(rgba))
}

/// Every pixel distinct, so copies can be traced back to their source.
pub(crate) fn numbered(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, (x * 7 + y * 13) as u8, 255]))
}

/// Vertical stripes, 2 px wide, alternating dark/bright.
pub(crate) fn stripes(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, _| {
        if (x / 2) % 2 == 0 {
            Rgba([20, 40, 60, 255])
        } else {
            Rgba([220, 200, 180, 255])
        }
    })
}

pub(crate) fn mask_with_points(w: u32, h: u32, points: &[(u32, u32)]) -> DamageMask {
    let mut flags = GrayImage::new(w, h);
    for &(x, y) in points {
        flags.put_pixel(x, y, Luma([255]));
    }
    DamageMask::from_gray(flags)
}

/// `rw` x `rh` damaged block with its top-left corner at `(x0, y0)`.
pub(crate) fn mask_with_rect(w: u32, h: u32, x0: u32, y0: u32, rw: u32, rh: u32) -> DamageMask {
    let flags = GrayImage::from_fn(w, h, |x, y| {
        let inside = x >= x0 && x < x0 + rw && y >= y0 && y < y0 + rh;
        Luma([if inside { 255 } else { 0 }])
    });
    DamageMask::from_gray(flags)
}
