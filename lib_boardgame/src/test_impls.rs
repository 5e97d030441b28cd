//! Tiny game implementations for exercising game-agnostic code in tests.
pub mod take_away;
