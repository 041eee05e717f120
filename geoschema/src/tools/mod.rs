pub mod check;
pub mod input;
pub mod schema;
pub mod wkt;
