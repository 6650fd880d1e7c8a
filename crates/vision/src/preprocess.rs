//! Image preprocessing for the ingredient classifier
//!
//! Matches the transform the model was trained with: RGB, a 224x224 bilinear
//! resize, then per-channel ImageNet normalization laid out as a CHW tensor.

use image::imageops::{self, FilterType};

use crate::error::PredictionError;

pub const IMG_SIZE: u32 = 224;
pub const CHANNEL_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const CHANNEL_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Normalized float input, batch of one
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    /// `[batch, channels, height, width]`
    pub shape: [usize; 4],
    pub data: Vec<f32>,
}

/// Decode image bytes of any supported format into a model input tensor
pub fn preprocess(bytes: &[u8]) -> Result<ImageTensor, PredictionError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgb = decoded.to_rgb8();
    let resized = imageops::resize(&rgb, IMG_SIZE, IMG_SIZE, FilterType::Triangle);

    let side = IMG_SIZE as usize;
    let plane = side * side;
    let mut data = vec![0.0f32; 3 * plane];

    for (x, y, pixel) in resized.enumerate_pixels() {
        let offset = y as usize * side + x as usize;
        for channel in 0..3 {
            let value = f32::from(pixel.0[channel]) / 255.0;
            data[channel * plane + offset] = (value - CHANNEL_MEAN[channel]) / CHANNEL_STD[channel];
        }
    }

    Ok(ImageTensor {
        shape: [1, 3, side, side],
        data,
    })
}
