//! # lumihub-domain
//!
//! Pure domain model for the lumihub timer-scheduled-action daemon.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **scheduling plane**: monotonic time and deadlines (including
//!   the "never" sentinel used to park a timer)
//! - Define **Events** (named, payload-free bus records)
//! - Define **Commands** (typed control surface: trigger + backlight commands)
//! - Define **LED levels** (validated RGBW output values)
//! - Define **Script templates** (the value handed to the renderer port)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod command;
pub mod error;
pub mod event;
pub mod id;
pub mod led;
pub mod name;
pub mod script;
pub mod time;
