//! Matching core
//!
//! - `request`: typed request descriptor validated at the boundary
//! - `service`: validated association writes
//! - `resolver`: unmatched teams for a league pair
//! - `desk`: one operator page request, writes then reads

pub mod desk;
pub mod request;
pub mod resolver;
pub mod service;

pub use desk::{MatchDesk, PageView};
pub use request::{LeaguePair, Mode, PageRequest, PairSelection, RawPageParams};
pub use resolver::UnmatchedSetResolver;
pub use service::{MatchOutcome, MatchingService};
