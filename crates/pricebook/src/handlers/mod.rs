pub mod error;
pub mod health;
pub mod offers;
pub mod timetable;

pub use error::AppError;
