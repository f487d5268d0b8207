pub mod artist;
pub mod ids;
pub mod row;

pub use artist::{ArtistRecord, Candidate};
pub use ids::ArtistId;
pub use row::{render_table, ResultRow, TABLE_COLUMNS};
