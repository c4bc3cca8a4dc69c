#![allow(dead_code)]

pub mod media;
pub mod progress;
pub mod reporter;
pub mod socket_guard;
