pub mod db;
pub mod entities;
pub mod principal;
pub mod services;
