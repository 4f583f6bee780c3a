use std::{collections::VecDeque, path::Path};

use super::{BackendError, InferenceBackend};
use crate::raster::{InputShape, InputTensor};

/// Serves previously recorded output-layer scores, one row per validation
/// entry, in the order they were recorded. Every `infer` or `skip` call
/// consumes one row. The input tensor is checked for shape but otherwise
/// ignored.
pub struct ReplayBackend {
    input_shape: InputShape,
    output_channels: usize,
    rows: VecDeque<Box<[f32]>>,
    calls: usize,
}

impl ReplayBackend {
    pub fn new(
        input_shape: InputShape,
        output_channels: usize,
        rows: Vec<Box<[f32]>>,
    ) -> Self {
        Self {
            input_shape,
            output_channels,
            rows: rows.into(),
            calls: 0,
        }
    }

    /// One row per non-blank line, scores separated by whitespace or commas.
    pub fn parse(
        input_shape: InputShape,
        output_channels: usize,
        text: &str,
    ) -> Result<Self, BackendError> {
        let mut rows = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|field| !field.is_empty())
                .map(str::parse::<f32>)
                .collect::<Result<Box<[f32]>, _>>()
                .map_err(|_| BackendError::MalformedRecord {
                    line: index + 1,
                })?;
            rows.push(row);
        }
        Ok(Self::new(input_shape, output_channels, rows))
    }

    pub fn from_file(
        input_shape: InputShape,
        output_channels: usize,
        path: &Path,
    ) -> Result<Self, BackendError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(input_shape, output_channels, &text)
    }

    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    fn next_row(&mut self) -> Result<Box<[f32]>, BackendError> {
        self.calls += 1;
        self.rows.pop_front().ok_or(BackendError::Exhausted(self.calls))
    }
}

impl InferenceBackend for ReplayBackend {
    fn input_shape(&self) -> InputShape {
        self.input_shape
    }

    fn output_channels(&self) -> usize {
        self.output_channels
    }

    fn infer(
        &mut self,
        input: &InputTensor,
    ) -> Result<Box<[f32]>, BackendError> {
        let row = self.next_row()?;
        if input.shape() != self.input_shape {
            return Err(BackendError::InputShapeMismatch {
                expected: self.input_shape,
                actual: input.shape(),
            });
        }
        Ok(row)
    }

    fn skip(&mut self) -> Result<(), BackendError> {
        self.next_row().map(|_| ())
    }

    fn remaining_outputs(&self) -> Option<usize> {
        Some(self.rows.len())
    }
}
