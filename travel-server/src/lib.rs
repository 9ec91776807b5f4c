//! Travel order resolution server.
//!
//! Turns recognized entities from a request like "un train de Paris à Lyon
//! demain matin" into catalog station ids and an instant, then queries a
//! journey planner and normalizes its answer.

pub mod config;
pub mod domain;
pub mod navitia;
pub mod ner;
pub mod order;
pub mod stations;
pub mod text;
pub mod time;
pub mod web;
