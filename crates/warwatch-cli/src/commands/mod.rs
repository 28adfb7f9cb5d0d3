pub mod diff;
pub mod run;
pub mod state;
