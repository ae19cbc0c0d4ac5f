//! Menu-driven airline management console.
//!
//! Every screen talks to the database through a
//! [`TabularExecutor`](crate::executor::TabularExecutor).

mod app;
mod console;
mod customer;
mod input;
mod management;
mod menu;
mod pilot;
mod reservation;
mod role;
mod technician;

pub use app::{ACCESS_DENIED, AirlineApp, Session};
pub use console::Console;
pub use input::{parse_date, parse_id};
pub use menu::{Feature, MainChoice, write_main_menu, write_user_menu};
pub use reservation::ReservationIds;
pub use role::Role;
