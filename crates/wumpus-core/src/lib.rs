//! Decision policy, turn cycle, and game runner for the Wumpus World agent.
//!
//! This crate wires the reasoning layer in `wumpus-agents` to the physical
//! cave in `wumpus-world`. Each turn runs the same four phases:
//! Perceive, Observe, Decide, and Apply.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `wumpus-config.yaml` into
//!   strongly-typed structs.
//! - [`game`] -- [`Game`]: one cave, one agent, and the per-turn cycle.
//! - [`policy`] -- [`DecisionPolicy`] trait, the rule-based
//!   [`ExplorerPolicy`], and [`ScriptedPolicy`].
//! - [`runner`] -- Bounded game loop with end-of-game reporting.
//!
//! [`Game`]: game::Game
//! [`DecisionPolicy`]: policy::DecisionPolicy
//! [`ExplorerPolicy`]: policy::ExplorerPolicy
//! [`ScriptedPolicy`]: policy::ScriptedPolicy

pub mod config;
pub mod game;
pub mod policy;
pub mod runner;
