//! fxpulse Feed
//!
//! Simulated FX rate feed for a fixed currency pair, with a user-supplied
//! manual rate override and a bounded log of recent conversions.
//!
//! # Features
//!
//! - Bounded random-walk rate simulation with injectable seed
//! - Manual rate override with automatic drift-based revocation
//! - Conversion engine with explicit half-away-from-zero rounding
//! - Newest-first conversion history with fixed capacity
//! - Event-driven controller exposing read-only state snapshots
//!
//! # Example
//!
//! ```rust,ignore
//! use fxpulse_feed::{FeedConfig, RateFeed};
//!
//! let feed = RateFeed::spawn(FeedConfig::default())?;
//! feed.set_input_amount("100").await;
//! let snapshot = feed.snapshot().await;
//! println!("{} -> {:?}", snapshot.input_text, snapshot.output_text);
//! feed.stop().await?;
//! ```

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod history;
pub mod policy;
pub mod service;
pub mod simulator;

pub use config::FeedConfig;
pub use controller::{ConverterController, ConverterEvent, ConverterSnapshot};
pub use engine::{ConversionEngine, Direction};
pub use error::{FeedError, FeedResult};
pub use history::{ConversionRecord, HistoryLog};
pub use policy::{OverridePolicy, OverrideState};
pub use service::{FeedStats, RateFeed};
pub use simulator::RateSimulator;
