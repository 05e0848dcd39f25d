pub mod cars;
pub mod favorites;
pub mod reviews;
pub mod users;
