//! Pure game rules for Backroom.
//!
//! This crate contains the game logic that is independent of the ECS world,
//! rendering and input. Functions take plain data and return results, making
//! them unit-testable and reusable from the simulation crate and the headless
//! harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`cutscene`] | Scene playlists and the cutscene player |
//! | [`data`] | Recipe, ingredient, station and cutscene tables from `data/` |
//! | [`day`] | Day clock and end-of-day lose rule |
//! | [`geometry`] | 2D vectors |
//! | [`morality`] | Boss decisions and their consequences |
//! | [`orders`] | Docket line and big ticket |
//! | [`pathing`] | Two-leg NPC waypoint walking |
//! | [`recipes`] | Recipes, meal names, prices |
//! | [`scoring`] | Accuracy, time and completion scores, satisfaction and gold |
//! | [`timer`] | Cook/chop timers and ingredient states |
//! | [`upgrades`] | Extortion upgrade |

pub mod cutscene;
pub mod data;
pub mod day;
pub mod geometry;
pub mod morality;
pub mod orders;
pub mod pathing;
pub mod recipes;
pub mod scoring;
pub mod timer;
pub mod upgrades;
