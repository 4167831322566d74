use image::{GrayImage, ImageBuffer, Luma, Rgba, RgbaImage};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};

use crate::capture::region::CaptureRect;

/// Crops a rectangle given in absolute screen pixels.
///
/// The rectangle is clamped to the image bounds: parts that fall outside
/// the screen are dropped, and a rectangle entirely off-screen yields an
/// empty image.
pub fn crop_rect(img: &RgbaImage, rect: &CaptureRect) -> RgbaImage {
    let (w, h) = img.dimensions();

    let left = (rect.x as i64).clamp(0, w as i64);
    let top = (rect.y as i64).clamp(0, h as i64);
    let right = (rect.x as i64 + rect.width as i64).clamp(left, w as i64);
    let bottom = (rect.y as i64 + rect.height as i64).clamp(top, h as i64);

    image::imageops::crop_imm(
        img,
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    )
    .to_image()
}

/// Converts to 8-bit luma with the ITU-R BT.601 weights
/// (Y = 0.299*R + 0.587*G + 0.114*B).
pub fn to_grayscale(img: &ImageBuffer<Rgba<u8>, Vec<u8>>) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let r = pixel[0] as f32;
        let g = pixel[1] as f32;
        let b = pixel[2] as f32;
        let luma = (0.299 * r + 0.587 * g + 0.114 * b).round().min(255.0) as u8;
        output.put_pixel(x, y, Luma([luma]));
    }

    output
}

/// Grayscale, then inverse binarization at the Otsu level: pixels
/// brighter than the level become black, everything else white. Light
/// in-game text ends up dark on white, which Tesseract reads best.
pub fn binarize_for_ocr(img: &RgbaImage) -> GrayImage {
    let gray = to_grayscale(img);
    if gray.width() == 0 || gray.height() == 0 {
        return gray;
    }
    let level = otsu_level(&gray);
    threshold(&gray, level, ThresholdType::BinaryInverted)
}
