use image::RgbaImage;

/// Copy all of `src` into `canvas` with its top-left corner at (dx, dy).
/// Pixels are replaced, not blended; anything past the canvas edge is clipped.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) {
    let (cw, ch) = canvas.dimensions();
    let (sw, sh) = src.dimensions();
    let rw = sw.min(cw.saturating_sub(dx));
    let rh = sh.min(ch.saturating_sub(dy));
    for yy in 0..rh {
        for xx in 0..rw {
            let px = *src.get_pixel(xx, yy);
            canvas.put_pixel(dx + xx, dy + yy, px);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn clips_at_canvas_edge() {
        let src = RgbaImage::from_pixel(4, 4, Rgba([9, 8, 7, 255]));
        let mut canvas = RgbaImage::new(6, 6);
        blit_rgba(&src, &mut canvas, 4, 4);
        assert_eq!(canvas.get_pixel(5, 5), &Rgba([9, 8, 7, 255]));
        assert_eq!(canvas.get_pixel(3, 3), &Rgba([0, 0, 0, 0]));
    }
}
