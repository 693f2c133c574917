//! Aspect-preserving fit arithmetic, shared by the logo (letterbox) and the
//! photo (cover) paths. Pure functions over dimensions; no pixels involved.

/// Placement of an image letterbox-fitted into a box: the drawn size plus the
/// offsets that center the shortfall axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub width: f32,
    pub height: f32,
    pub x_offset: f32,
    pub y_offset: f32,
}

/// Scale so the whole image fits inside the box, one axis flush against it,
/// the other centered. Equal aspect ratios produce zero offset on both axes.
pub fn fit_letterbox(img_w: f32, img_h: f32, box_w: f32, box_h: f32) -> FitResult {
    let img_aspect = img_w / img_h;
    let box_aspect = box_w / box_h;

    if img_aspect > box_aspect {
        let height = box_w / img_aspect;
        FitResult {
            width: box_w,
            height,
            x_offset: 0.0,
            y_offset: (box_h - height) / 2.0,
        }
    } else {
        let width = box_h * img_aspect;
        FitResult {
            width,
            height: box_h,
            x_offset: (box_w - width) / 2.0,
            y_offset: 0.0,
        }
    }
}

/// Scaled size and centered crop window for a cover fit, in integer pixels.
/// The crop window is exactly `box_w` x `box_h`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    pub scaled_w: u32,
    pub scaled_h: u32,
    pub crop_x: u32,
    pub crop_y: u32,
}

/// Scale so the image fully covers the box, then center a crop of exactly the
/// box size. Scaled dimensions are rounded up so the crop never runs out of
/// pixels.
pub fn fit_cover(img_w: u32, img_h: u32, box_w: u32, box_h: u32) -> CoverFit {
    let scale = f64::max(
        box_w as f64 / img_w as f64,
        box_h as f64 / img_h as f64,
    );
    let scaled_w = (img_w as f64 * scale).ceil() as u32;
    let scaled_h = (img_h as f64 * scale).ceil() as u32;

    CoverFit {
        scaled_w,
        scaled_h,
        crop_x: (scaled_w - box_w) / 2,
        crop_y: (scaled_h - box_h) / 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    #[test]
    fn letterbox_wide_image_pads_vertically() {
        let fit = fit_letterbox(200.0, 100.0, 100.0, 100.0);
        assert_close(fit.width, 100.0);
        assert_close(fit.height, 50.0);
        assert_close(fit.x_offset, 0.0);
        assert_close(fit.y_offset, 25.0);
    }

    #[test]
    fn letterbox_tall_image_pads_horizontally() {
        let fit = fit_letterbox(50.0, 200.0, 100.0, 100.0);
        assert_close(fit.width, 25.0);
        assert_close(fit.height, 100.0);
        assert_close(fit.x_offset, 37.5);
        assert_close(fit.y_offset, 0.0);
    }

    #[test]
    fn letterbox_equal_aspect_has_no_offset() {
        let fit = fit_letterbox(640.0, 480.0, 160.0, 120.0);
        assert_close(fit.width, 160.0);
        assert_close(fit.height, 120.0);
        assert_close(fit.x_offset, 0.0);
        assert_close(fit.y_offset, 0.0);
    }

    #[test]
    fn letterbox_stays_inside_box_and_keeps_aspect() {
        let cases = [
            (123.0, 457.0, 300.0, 180.0),
            (1920.0, 1080.0, 90.0, 160.0),
            (10.0, 10.0, 37.0, 91.0),
            (3.0, 7.0, 7.0, 3.0),
        ];
        for (iw, ih, bw, bh) in cases {
            let fit = fit_letterbox(iw, ih, bw, bh);
            assert!(fit.width <= bw + EPS && fit.height <= bh + EPS);
            // Flush against the box on at least one axis.
            assert!((fit.width - bw).abs() < EPS || (fit.height - bh).abs() < EPS);
            assert_close(fit.width / fit.height, iw / ih);
            // Fully contained once offsets are applied.
            assert!(fit.x_offset >= -EPS && fit.x_offset + fit.width <= bw + EPS);
            assert!(fit.y_offset >= -EPS && fit.y_offset + fit.height <= bh + EPS);
        }
    }

    #[test]
    fn cover_crop_is_exactly_the_box() {
        let cases = [
            (200u32, 100u32, 80u32, 80u32),
            (100, 400, 90, 30),
            (33, 77, 640, 480),
            (640, 480, 640, 480),
        ];
        for (iw, ih, bw, bh) in cases {
            let cover = fit_cover(iw, ih, bw, bh);
            assert!(cover.scaled_w >= bw && cover.scaled_h >= bh);
            assert!(cover.crop_x + bw <= cover.scaled_w);
            assert!(cover.crop_y + bh <= cover.scaled_h);
        }
    }

    #[test]
    fn cover_crop_is_centered() {
        let cover = fit_cover(200, 100, 80, 80);
        // Scale 0.8 -> 160x80; overflow only on x.
        assert_eq!(cover.scaled_w, 160);
        assert_eq!(cover.scaled_h, 80);
        assert_eq!(cover.crop_y, 0);
        let left = cover.crop_x;
        let right = cover.scaled_w - 80 - cover.crop_x;
        assert!(left.abs_diff(right) <= 1);
    }
}
