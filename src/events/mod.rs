//! # Events Module
//!
//! Event-driven progress reporting, kept GUI-ready.
//!
//! ## Design
//! The core emits events through a channel; any front end (CLI today, GUI
//! later) subscribes and renders them however it likes. This is also how
//! the engine surfaces its decision points - every skip, duplicate hit,
//! folder creation and move is observable.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Walk(WalkEvent::Progress(p)) => {
//!                 println!("{} directories", p.directories_entered)
//!             }
//!             Event::Move(MoveEvent::FileMoved { from, .. }) => {
//!                 println!("moved {}", from.display())
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//!
//! isolator.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
