pub mod bounded;
pub mod db;
pub mod memory;
pub mod password;
