//! Reader for the plot dumps written by the distribution simulation: a
//! sampled theoretical density followed by the empirical samples it is
//! compared against.
//!
//! ```no_run
//! use std::path::Path;
//! use plotdata::data::loader::load_file;
//!
//! let ds = load_file(Path::new("data/plot_data_3.1.1.txt")).unwrap();
//! println!("{}: {} curve points", ds.title(), ds.theoretical_len());
//! ```

pub mod batch;
pub mod composite;
pub mod data;
pub mod summary;
