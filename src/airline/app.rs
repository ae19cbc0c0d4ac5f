use std::io::{BufRead, Write};

use super::console::Console;
use super::menu::{Feature, MainChoice, write_main_menu, write_user_menu};
use super::reservation::ReservationIds;
use super::role::Role;
use crate::error::SqlConsoleError;
use crate::executor::TabularExecutor;
use crate::format::FixedTable;
use crate::statement::QueryAndParams;
use crate::types::RowValues;

pub const ACCESS_DENIED: &str = "Access denied. You do not have permission to perform this action.";

/// A logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub login: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuExit {
    LoggedOut,
    EndOfInput,
}

/// The airline console: menus on `console`, every statement through `executor`.
pub struct AirlineApp<X, R, W, E> {
    pub(super) executor: X,
    pub(super) console: Console<R, W, E>,
    pub(super) reservation_ids: ReservationIds,
}

impl<X, R, W, E> AirlineApp<X, R, W, E>
where
    X: TabularExecutor,
    R: BufRead,
    W: Write + Send,
    E: Write,
{
    pub fn new(executor: X, console: Console<R, W, E>) -> Self {
        Self {
            executor,
            console,
            reservation_ids: ReservationIds::new(),
        }
    }

    pub fn into_parts(self) -> (X, Console<R, W, E>) {
        (self.executor, self.console)
    }

    /// Run the start menu until EXIT or end of input.
    ///
    /// Failed statements are reported and the menu continues.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::Io` only if the terminal itself fails.
    pub async fn run(&mut self) -> Result<(), SqlConsoleError> {
        loop {
            write_main_menu(self.console.out())?;
            let Some(choice) = self.console.read_choice()? else {
                return Ok(());
            };
            match MainChoice::from_choice(choice) {
                Some(MainChoice::CreateUser) => self.create_user().await,
                Some(MainChoice::LogIn) => {
                    if let Some(session) = self.log_in().await
                        && self.user_menu(&session).await? == MenuExit::EndOfInput
                    {
                        return Ok(());
                    }
                }
                Some(MainChoice::Exit) => return Ok(()),
                None => self.console.say("Unrecognized choice!")?,
            }
        }
    }

    async fn create_user(&mut self) {
        if let Err(e) = self.try_create_user().await {
            self.console
                .report(&format!("Error during user creation: {e}"));
        }
    }

    async fn try_create_user(&mut self) -> Result<(), SqlConsoleError> {
        let login = self.console.prompt("Enter username: ")?;
        let password = self.console.prompt("Enter password: ")?;
        let user_type = self
            .console
            .prompt("Enter user role (Customer, Technician, Pilot, Management): ")?;
        self.executor
            .execute_update(QueryAndParams::new(
                "INSERT INTO Users (login, password, userType) VALUES ($1, $2, $3)",
                vec![
                    RowValues::Text(login),
                    RowValues::Text(password),
                    RowValues::Text(user_type),
                ],
            ))
            .await?;
        self.console.say("User created successfully!")?;
        Ok(())
    }

    /// Ask for credentials; `None` when they do not match or the lookup fails.
    async fn log_in(&mut self) -> Option<Session> {
        match self.try_log_in().await {
            Ok(session) => session,
            Err(e) => {
                self.console.report(&format!("Error during login: {e}"));
                None
            }
        }
    }

    async fn try_log_in(&mut self) -> Result<Option<Session>, SqlConsoleError> {
        let login = self.console.prompt("Enter username: ")?;
        let password = self.console.prompt("Enter password: ")?;
        let result = self
            .executor
            .execute_query_and_return_result(QueryAndParams::new(
                "SELECT userType FROM Users WHERE login = $1 AND password = $2",
                vec![RowValues::Text(login.clone()), RowValues::Text(password)],
            ))
            .await?;

        match result.scalar() {
            Some(user_type) => {
                let role = Role::parse(user_type);
                self.console
                    .say(&format!("Login successful. Role: {}", user_type.trim()))?;
                tracing::info!(%login, %role, "user logged in");
                Ok(Some(Session { login, role }))
            }
            None => {
                self.console
                    .say("Login failed. Check your username/password.")?;
                Ok(None)
            }
        }
    }

    async fn user_menu(&mut self, session: &Session) -> Result<MenuExit, SqlConsoleError> {
        loop {
            write_user_menu(self.console.out())?;
            let Some(choice) = self.console.read_choice()? else {
                return Ok(MenuExit::EndOfInput);
            };
            match Feature::from_choice(choice) {
                None => self.console.say("Unrecognized choice!")?,
                Some(Feature::LogOut) => return Ok(MenuExit::LoggedOut),
                Some(feature) if !session.role.permits(feature) => {
                    self.console.say(ACCESS_DENIED)?;
                }
                Some(feature) => {
                    tracing::debug!(login = %session.login, ?feature, "running feature");
                    if let Err(e) = self.run_feature(feature).await {
                        self.console
                            .report(&format!("{}{e}", feature.error_prefix()));
                    }
                }
            }
        }
    }

    async fn run_feature(&mut self, feature: Feature) -> Result<(), SqlConsoleError> {
        match feature {
            Feature::ViewFlights => self.view_flights().await,
            Feature::ViewFlightSchedule => self.view_flight_schedule().await,
            Feature::ViewFlightSeats => self.view_flight_seats().await,
            Feature::ViewFlightStatus => self.view_flight_status().await,
            Feature::ViewFlightsOfTheDay => self.view_flights_of_the_day().await,
            Feature::ViewFlightPassengers => self.view_flight_passengers().await,
            Feature::ViewTravelers => self.view_travelers().await,
            Feature::ViewPlaneStats => self.view_plane_stats().await,
            Feature::ViewTechnicianRepairs => self.view_technician_repairs().await,
            Feature::ViewFlightRepairs => self.view_flight_repairs().await,
            Feature::ViewFlightStats => self.view_flight_stats().await,
            Feature::SearchFlights => self.search_flights().await,
            Feature::ViewFlightCost => self.view_flight_cost().await,
            Feature::ViewPlaneType => self.view_plane_type().await,
            Feature::MakeReservation => self.make_reservation().await,
            Feature::MaintenanceRequest => self.maintenance_request().await,
            Feature::ShowRepairDates => self.show_repair_dates().await,
            Feature::ShowMaintenanceRequests => self.show_maintenance_requests().await,
            Feature::LogRepair => self.log_repair().await,
            Feature::LogOut => Ok(()),
        }
    }

    /// Fetch the rows of `stmt`, print them under `table`, then the row count.
    pub(super) async fn report(
        &mut self,
        table: FixedTable<'_>,
        stmt: QueryAndParams,
    ) -> Result<(), SqlConsoleError> {
        let result_set = self
            .executor
            .execute_query_and_return_result(stmt)
            .await?;
        let out = self.console.out();
        let rows = table.write_result_set(out, &result_set)?;
        writeln!(out, "total row(s): {rows}")?;
        Ok(())
    }

    /// Let the executor print `stmt` in its own layout, then `<footer>: <rows>`.
    pub(super) async fn print(
        &mut self,
        stmt: QueryAndParams,
        footer: &str,
    ) -> Result<(), SqlConsoleError> {
        let rows = self
            .executor
            .print_result_to(stmt, self.console.out())
            .await?;
        writeln!(self.console.out(), "{footer}: {rows}")?;
        Ok(())
    }

    /// `MAX(<column>) + 1` of `table`, or 1 for an empty table.
    pub(super) async fn next_key(
        &mut self,
        table: &str,
        column: &str,
    ) -> Result<i64, SqlConsoleError> {
        let result = self
            .executor
            .execute_query_and_return_result(format!("SELECT MAX({column}) FROM {table}"))
            .await?;
        match result.scalar() {
            Some(max) => super::input::column_int(Some(max), column).map(|max| max + 1),
            None => Ok(1),
        }
    }
}
