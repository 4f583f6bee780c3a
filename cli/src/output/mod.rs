mod console_sink;
mod summary;

pub use console_sink::ConsoleSink;
pub use summary::summary_table;
