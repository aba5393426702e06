/// Data layer: dataset model, plot dump format, loading and naming.
///
/// Architecture:
/// ```text
///  plot_data_<id>[_<role>].txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file, dispatch by extension
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  format   │  header + sentinel-switched body → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  title, declared counts, curve (x, y), samples
///   └──────────┘
/// ```
///
/// `writer` goes the other way, `naming` decodes the file-name convention and
/// `stats` summarises sample populations.

pub mod format;
pub mod loader;
pub mod model;
pub mod naming;
pub mod stats;
pub mod writer;
