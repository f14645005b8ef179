//! Data module - Dataset location, CSV loading and cleaning

pub mod dataset;
mod loader;
mod processor;
mod schema;

pub use dataset::{DatasetSource, FixedDir, KaggleHubCache};
pub use loader::{LoadedTable, LoaderError};
pub use processor::{AttendanceError, DataProcessor, ProcessorError, Tournament};
pub use schema::{resolve_column, PlayersSchema, TournamentSchema};
