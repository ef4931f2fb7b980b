//! # loginradius
//!
//! Client for the LoginRadius user profile API.
//!
//! A [`UserProfile`] is built from a user token and the site's API secret
//! (both GUIDs). Operations are declared as data in [`Operation`] and run
//! through one dispatcher: resolve the route from session fields, GET it,
//! follow a bounded redirect hop, normalize the JSON keys to snake_case and
//! store object fields on the session.
//!
//! ```no_run
//! use loginradius::{TransportMode, UserProfile};
//!
//! # fn main() -> loginradius::Result<()> {
//! let mut profile = UserProfile::new(
//!     "2bcd37ec-6ceb-4770-90ba-80ea2df53e7e",
//!     "1337670d-f7fd-4066-a2e3-e440aec071ee",
//!     TransportMode::Blocking,
//! )?;
//!
//! if profile.login()? {
//!     println!("{} via {:?}", profile.id().unwrap_or("-"), profile.provider());
//!     println!("{}", profile.contacts()?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Sessions built with [`TransportMode::EventDriven`] use the `_async`
//! variants and must be driven from inside a tokio runtime.

pub mod api;
pub mod error;
pub mod profile;

#[cfg(test)]
mod testing;

pub use api::{guid_valid, ClientConfig, Credentials, TransportMode};
pub use error::{LoginRadiusError, Result};
pub use profile::{Operation, Outcome, UserProfile};
