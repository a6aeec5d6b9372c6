//! BDD step definitions for the timelapse dashboard

pub mod session_steps;
