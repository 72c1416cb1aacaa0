//! Constants shared across the classification pipeline.
//!
//! The input geometry and normalization statistics form a contract with the
//! model artifact: changing any of them without retraining silently degrades
//! predictions.

/// Side length, in pixels, of the square model input.
pub const MODEL_INPUT_SIZE: u32 = 224;

/// Number of color channels fed to the model (RGB).
pub const MODEL_INPUT_CHANNELS: usize = 3;

/// The exact tensor shape the model accepts: `[batch, height, width, channels]`.
pub const MODEL_INPUT_SHAPE: [usize; 4] = [
    1,
    MODEL_INPUT_SIZE as usize,
    MODEL_INPUT_SIZE as usize,
    MODEL_INPUT_CHANNELS,
];

/// Scale applied to 8-bit pixel values before standardization.
pub const PIXEL_SCALE: f32 = 1.0 / 255.0;

/// ImageNet per-channel mean, in RGB order.
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// ImageNet per-channel standard deviation, in RGB order.
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];
