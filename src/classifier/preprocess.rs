use image::imageops::FilterType;
use image::DynamicImage;
use ndarray::Array4;

/// Converts a decoded image into the tensor a predictor expects.
///
/// The image is resized to `width` x `height` (aspect ratio is not
/// preserved; the model was trained on squashed inputs), pixel intensities
/// are scaled from `0..=255` to `[0, 1]`, and a leading batch-of-one axis
/// is added. Output shape is exactly `(1, height, width, 3)`.
///
/// This function is total over any decodable image and deterministic for a
/// given input.
pub fn image_to_tensor(image: &DynamicImage, width: u32, height: u32) -> Array4<f32> {
    let resized = image::imageops::resize(&image.to_rgb8(), width, height, FilterType::CatmullRom);

    let mut tensor = Array4::<f32>::zeros((1, height as usize, width as usize, 3));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for (channel, &intensity) in pixel.0.iter().enumerate() {
            tensor[[0, y as usize, x as usize, channel]] = f32::from(intensity) / 255.0;
        }
    }
    tensor
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn output_shape_is_fixed_regardless_of_input_dimensions() {
        for (w, h) in [(1, 1), (50, 37), (224, 224), (640, 480), (1920, 1080)] {
            let tensor = image_to_tensor(&gradient_image(w, h), 224, 224);
            assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        }
    }

    #[test]
    fn values_stay_in_unit_interval() {
        let tensor = image_to_tensor(&gradient_image(300, 200), 224, 224);
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn extreme_intensities_map_to_interval_bounds() {
        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([255, 255, 255])));
        let tensor = image_to_tensor(&white, 32, 32);
        assert!(tensor.iter().all(|&v| (v - 1.0).abs() < f32::EPSILON));

        let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([0, 0, 0])));
        let tensor = image_to_tensor(&black, 32, 32);
        assert!(tensor.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn preprocessing_is_deterministic() {
        let image = gradient_image(123, 77);
        let a = image_to_tensor(&image, 224, 224);
        let b = image_to_tensor(&image, 224, 224);
        assert_eq!(a, b);
    }
}
