/*!
Microsoft Graph models and enums.

Each model has an `*able` trait carrying its accessors. Bring the traits
into scope, for example through the [prelude](crate::prelude), to call
them.
*/

pub mod call_records;

mod delegated_admin;
mod entity;
mod organizational_branding;
mod windows_protection;
mod windows_update;

pub use delegated_admin::*;
pub use entity::*;
pub use organizational_branding::*;
pub use windows_protection::*;
pub use windows_update::*;
