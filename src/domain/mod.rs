pub mod forecast;
pub mod pollution;
pub mod weather;
