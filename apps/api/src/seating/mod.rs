// Table & seating layout management.
// The engine is the only writer; the codec owns the persisted record format;
// the repository is the only code talking to the record store.

pub mod codec;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod store;
pub mod summary;

pub use engine::{SeatingEngine, SeatingError};
pub use repository::{MemorySheet, TableRepository};
pub use store::PgSheetRepository;
