#![allow(dead_code)]

pub mod fake_repository;
pub mod utils;
