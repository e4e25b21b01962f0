pub mod proto {
    tonic::include_proto!("food_rush");
}

pub mod config;
pub mod error;
pub mod game;
pub mod service;
