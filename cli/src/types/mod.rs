mod device;
mod run_report;

pub use device::Device;
pub use run_report::RunReport;
