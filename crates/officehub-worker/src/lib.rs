//! Scheduled tasks for OfficeHub.
//!
//! The cron scheduler is a trigger producer: on every tick it submits a
//! timer refresh into the dashboard's trigger channel, the same channel
//! button presses and admin commands use.

pub mod scheduler;

pub use scheduler::CronScheduler;
