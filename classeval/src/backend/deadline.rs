use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use super::{BackendError, InferenceBackend};
use crate::raster::{InputShape, InputTensor};

enum Request {
    Infer(InputTensor),
    Skip,
}

type Response = Result<Option<Box<[f32]>>, BackendError>;

/// Runs another backend on a dedicated thread and gives up on a call after
/// `timeout`. A call that timed out may still be running on the worker, so
/// the wrapper refuses every later call.
pub struct DeadlineBackend {
    input_shape: InputShape,
    output_channels: usize,
    timeout: Duration,
    requests: Option<Sender<Request>>,
    responses: Receiver<Response>,
    worker: Option<JoinHandle<()>>,
    remaining_outputs: Option<usize>,
    poisoned: bool,
}

impl DeadlineBackend {
    pub fn new<B>(
        mut backend: B,
        timeout: Duration,
    ) -> Result<Self, BackendError>
    where
        B: InferenceBackend + Send + 'static,
    {
        let input_shape = backend.input_shape();
        let output_channels = backend.output_channels();
        let remaining_outputs = backend.remaining_outputs();
        let (request_sender, request_receiver) = mpsc::channel::<Request>();
        let (response_sender, response_receiver) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("inference-backend".to_string())
            .spawn(move || {
                for request in request_receiver {
                    let response = match request {
                        Request::Infer(input) => backend.infer(&input).map(Some),
                        Request::Skip => backend.skip().map(|()| None),
                    };
                    if response_sender.send(response).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            input_shape,
            output_channels,
            timeout,
            requests: Some(request_sender),
            responses: response_receiver,
            worker: Some(worker),
            remaining_outputs,
            poisoned: false,
        })
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    fn call(
        &mut self,
        request: Request,
    ) -> Response {
        if self.poisoned {
            return Err(BackendError::Poisoned);
        }
        let requests =
            self.requests.as_ref().ok_or(BackendError::WorkerStopped)?;
        requests.send(request).map_err(|_| BackendError::WorkerStopped)?;
        self.remaining_outputs =
            self.remaining_outputs.map(|remaining| remaining.saturating_sub(1));

        match self.responses.recv_timeout(self.timeout) {
            Ok(response) => response,
            Err(RecvTimeoutError::Timeout) => {
                self.poisoned = true;
                Err(BackendError::Timeout(self.timeout))
            },
            Err(RecvTimeoutError::Disconnected) => {
                Err(BackendError::WorkerStopped)
            },
        }
    }
}

impl InferenceBackend for DeadlineBackend {
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
        self.call(Request::Infer(input.clone()))?
            .ok_or(BackendError::WorkerStopped)
    }

    fn skip(&mut self) -> Result<(), BackendError> {
        self.call(Request::Skip).map(|_| ())
    }

    fn remaining_outputs(&self) -> Option<usize> {
        self.remaining_outputs
    }
}

impl Drop for DeadlineBackend {
    fn drop(&mut self) {
        self.requests.take();
        // A hung worker is detached instead of joined.
        if let Some(worker) = self.worker.take() {
            if !self.poisoned {
                let _ = worker.join();
            }
        }
    }
}
