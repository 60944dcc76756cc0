//! `dn-rating` — raters consuming the delivnet event stream.
//!
//! A rater (the [`Rater`](dn_sim::Rater) trait lives in `dn-sim`, next to
//! the events) is a pure function of the per-tick event history it has
//! observed; it never reaches back into simulation state.  Attach raters
//! to a [`Simulation`](dn_sim::Simulation) and read their scores when the
//! run ends.
//!
//! | Module               | Contents                                      |
//! |----------------------|-----------------------------------------------|
//! | [`in_time`]          | `InTimeRater` — delivery-window punctuality   |
//! | [`amount_delivered`] | `AmountDeliveredRater` — completion fraction  |
//! | [`error`]            | `RatingError`, `RatingResult<T>`              |

pub mod amount_delivered;
pub mod error;
pub mod in_time;

#[cfg(test)]
mod tests;

pub use amount_delivered::AmountDeliveredRater;
pub use error::{RatingError, RatingResult};
pub use in_time::{InTimeRater, InTimeRaterBuilder};
