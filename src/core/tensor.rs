//! Tensor aliases used between pipeline components.

/// A 2-dimensional tensor, `[batch, classes]` for classifier output.
pub type Tensor2D = ndarray::Array2<f32>;

/// A 4-dimensional tensor, `[batch, height, width, channels]` for model input.
pub type Tensor4D = ndarray::Array4<f32>;

/// Per-class scores for a single image, indexed like the label table.
pub type ScoreVector = Vec<f32>;
