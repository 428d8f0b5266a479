//! The Entity-Component-System (ECS) module.
//!
//! This module contains the level's components, resources and the systems
//! run every frame.

pub mod audio;
pub mod camera;
pub mod components;
pub mod contact;
pub mod enemy;
pub mod input;
pub mod physics;
pub mod player;
pub mod stage;
