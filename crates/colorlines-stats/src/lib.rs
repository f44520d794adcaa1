//! Statistics over per-game results.
//!
//! - [`descriptive`]: Mean, median, spread and extremes of a dataset
//! - [`percentiles`]: Nearest-rank percentiles
//!
//! # Examples
//!
//! ```
//! use colorlines_stats::descriptive::DescriptiveStats;
//!
//! let scores = [10.0, 40.0, 20.0, 30.0];
//! let stats = DescriptiveStats::new(scores).unwrap();
//! assert_eq!(stats.mean, 25.0);
//! assert_eq!(stats.median, 20.0); // lower middle
//! ```
//!
//! ```
//! use colorlines_stats::percentiles::Percentiles;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let percentiles = Percentiles::new(&values, &[25.0, 75.0]);
//! assert_eq!(percentiles.get(75.0), Some(4.0));
//! ```

pub mod descriptive;
pub mod percentiles;
