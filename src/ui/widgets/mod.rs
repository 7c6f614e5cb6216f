pub mod current;
pub mod daily;
pub mod header;
pub mod pollution;
pub mod search;
mod shared;
