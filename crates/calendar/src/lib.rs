//! # reforce-calendar
//!
//! Calendar-month arithmetic for monthly reanalysis requests.
//!
//! ## Quick Start
//!
//! ```ignore
//! use reforce_calendar::{YearMonth, month_range, request_days, request_hours};
//!
//! let start: YearMonth = "2019-11".parse().unwrap();
//! let end: YearMonth = "2020-02".parse().unwrap();
//! for ym in month_range(start, end).unwrap() {
//!     let days = request_days(ym); // ["01", ..., "29"] for 2020-02
//!     let hours = request_hours(); // ["00:00", ..., "23:00"]
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `month` | `YearMonth` parsing, ordering and stepping |
//! | `range` | Inclusive month ranges |
//! | `request` | Day and hour lists for archive requests |
//! | `error` | Error types |

mod error;
mod month;
mod range;
mod request;

pub use error::CalendarError;
pub use month::YearMonth;
pub use range::month_range;
pub use request::{request_days, request_hours};
