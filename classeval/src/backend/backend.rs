use super::BackendError;
use crate::raster::{InputShape, InputTensor};

/// Executes the network on a preprocessed input and returns the raw scores
/// of its output layer. Calls block until the result is available.
pub trait InferenceBackend {
    /// Spatial size the network expects; the preprocessor crops to it.
    fn input_shape(&self) -> InputShape;

    /// Number of scores every call to `infer` returns.
    fn output_channels(&self) -> usize;

    fn infer(
        &mut self,
        input: &InputTensor,
    ) -> Result<Box<[f32]>, BackendError>;

    /// Called in place of `infer` for a validation entry that failed before
    /// inference. Backends whose outputs follow list order drop that entry's
    /// output here.
    fn skip(&mut self) -> Result<(), BackendError> {
        Ok(())
    }

    /// Outputs left to serve, for backends holding a fixed set of them.
    fn remaining_outputs(&self) -> Option<usize> {
        None
    }
}

impl<B: InferenceBackend + ?Sized> InferenceBackend for Box<B> {
    fn input_shape(&self) -> InputShape {
        (**self).input_shape()
    }

    fn output_channels(&self) -> usize {
        (**self).output_channels()
    }

    fn infer(
        &mut self,
        input: &InputTensor,
    ) -> Result<Box<[f32]>, BackendError> {
        (**self).infer(input)
    }

    fn skip(&mut self) -> Result<(), BackendError> {
        (**self).skip()
    }

    fn remaining_outputs(&self) -> Option<usize> {
        (**self).remaining_outputs()
    }
}
