pub mod aggregate;
pub mod apportionment;
pub mod driver;
pub mod error;
pub mod formats;
pub mod model;
pub mod reports;
pub mod threshold;
pub mod util;

pub use apportionment::{ApportionmentMethod, QuotaFormula, QuotientFormula};
pub use driver::{Driver, MethodOutcome, NamedMethod};
pub use error::{ApportionmentError, Result};
pub use model::election::{Category, ConstituencyId, Election, SeatAllocation, SeatTable, VoteTable};
pub use threshold::{ThresholdFilter, Thresholds};
