mod assign;
mod audit;
mod catalog;
mod chooser;
mod constraint;
mod grid;
mod row;

pub use assign::*;
pub use audit::*;
pub use catalog::*;
pub use chooser::*;
pub use constraint::*;
pub use grid::*;
pub use row::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod command;
        mod query;
        mod session;

        pub use command::*;
        pub use query::*;
        pub use session::*;
    }
}
