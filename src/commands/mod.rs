//! Command implementations for the ausflug CLI

pub mod dispatch;

mod categories;
mod columns;
mod fav;
mod helpers;
mod list;
mod locate;
