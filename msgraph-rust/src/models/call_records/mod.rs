/*!
Call records of Teams and Skype for Business calls and online meetings.
*/

mod call_record;
mod network_info;

pub use call_record::*;
pub use network_info::*;
