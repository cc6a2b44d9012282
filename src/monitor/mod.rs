pub mod change_log;
pub mod maturation;
pub mod processor;
pub mod run;

pub use processor::AccountProcessor;
pub use run::{read_prior_statuses, run_report, PriorStatuses};
