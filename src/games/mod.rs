//! Game implementations.
//!
//! Every game is a [`RulesEngine`](crate::rules::RulesEngine). Two-player
//! games alternate `Side::First` and `Side::Second`; the solo puzzles
//! always report `Side::First` to move.

pub mod aadu_puli;
pub mod chakravyuha;
pub mod chaturanga;
pub mod moksha_patam;
pub mod pallanguzhi;
pub mod varna_vyuha;
