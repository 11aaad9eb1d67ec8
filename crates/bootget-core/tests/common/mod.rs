#![allow(dead_code)]

pub mod body_server;
pub mod scripted_engine;
