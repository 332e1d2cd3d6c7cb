pub mod analyzers;
pub mod dataset;
pub mod filter;
pub mod output;
pub mod quarter;
pub mod trend;
