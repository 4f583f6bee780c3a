mod error;
mod fan_out;
mod json_lines;
mod latency_file;
mod memory;
mod sink;

pub use error::SinkError;
pub use fan_out::FanOutSink;
pub use json_lines::JsonLinesSink;
pub use latency_file::LatencyFileSink;
pub use memory::MemorySink;
pub use sink::MetricsSink;

#[cfg(test)]
mod fixtures;
