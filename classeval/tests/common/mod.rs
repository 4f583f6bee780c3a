#![allow(dead_code)]
use std::{
    collections::{HashMap, VecDeque},
    path::PathBuf,
};

use classeval::{
    BackendError, EvaluationConfig, Image, InferenceBackend, InputShape,
    InputTensor,
    dataset::{ClassLabels, ImageLoadError, ImageSource},
    preprocessing::PreprocessConfig,
};

pub const CHANNELS: usize = 10;
pub const INPUT_SHAPE: InputShape = InputShape {
    width: 24,
    height: 24,
};

/// Serves one scripted output per validation entry, in list order, and
/// remembers the inputs it saw. A skipped entry drops its output.
pub struct MockBackend {
    pub input_shape: InputShape,
    pub channels: usize,
    pub outputs: VecDeque<Result<Box<[f32]>, BackendError>>,
    pub seen_shapes: Vec<InputShape>,
    pub skipped: usize,
}

impl MockBackend {
    pub fn new(outputs: Vec<Result<Box<[f32]>, BackendError>>) -> Self {
        Self {
            input_shape: INPUT_SHAPE,
            channels: CHANNELS,
            outputs: outputs.into(),
            seen_shapes: Vec::new(),
            skipped: 0,
        }
    }

    pub fn ranking(
        ground_truth: &[usize],
        rank: usize,
    ) -> Self {
        Self::new(
            ground_truth
                .iter()
                .map(|&class_id| Ok(scores_with_rank(CHANNELS, class_id, rank)))
                .collect(),
        )
    }
}

impl InferenceBackend for MockBackend {
    fn input_shape(&self) -> InputShape {
        self.input_shape
    }

    fn output_channels(&self) -> usize {
        self.channels
    }

    fn infer(
        &mut self,
        input: &InputTensor,
    ) -> Result<Box<[f32]>, BackendError> {
        self.seen_shapes.push(input.shape());
        self.outputs
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Custom("script ended".into())))
    }

    fn skip(&mut self) -> Result<(), BackendError> {
        self.skipped += 1;
        self.outputs.pop_front();
        Ok(())
    }
}

/// Raw scores over `channels` classes in which `class_id` is ranked at
/// `rank` (1-based). All scores are distinct.
pub fn scores_with_rank(
    channels: usize,
    class_id: usize,
    rank: usize,
) -> Box<[f32]> {
    let mut order: Vec<usize> =
        (0..channels).filter(|&id| id != class_id).collect();
    order.insert(rank - 1, class_id);

    let mut scores = vec![0.0f32; channels];
    for (position, &id) in order.iter().enumerate() {
        scores[id] = 5.0 - position as f32 * 0.5;
    }
    scores.into_boxed_slice()
}

pub struct MemoryImageSource {
    pub images: HashMap<String, Image>,
}

impl MemoryImageSource {
    pub fn with_names(names: &[String]) -> Self {
        let images = names
            .iter()
            .map(|name| (name.clone(), Image::uniform(40, 32, [90, 120, 140])))
            .collect();
        Self {
            images,
        }
    }

    pub fn without(
        mut self,
        name: &str,
    ) -> Self {
        self.images.remove(name);
        self
    }
}

impl ImageSource for MemoryImageSource {
    fn load(
        &self,
        name: &str,
    ) -> Result<Image, ImageLoadError> {
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| ImageLoadError::NotFound(PathBuf::from(name)))
    }
}

pub fn image_names(count: usize) -> Vec<String> {
    (0..count).map(|index| format!("val_{index:05}.png")).collect()
}

/// Ground-truth class ids cycling through every class.
pub fn ground_truth(count: usize) -> Vec<usize> {
    (0..count).map(|index| (index * 3) % CHANNELS).collect()
}

pub fn labels() -> ClassLabels {
    ClassLabels::new((0..CHANNELS).map(|index| format!("class label {index}")))
}

pub fn test_config() -> EvaluationConfig {
    EvaluationConfig::default()
        .preprocessing(PreprocessConfig::default().short_side(32))
}
