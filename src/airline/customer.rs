//! Flight search and booking for the `Customer` role.

use std::io::{BufRead, Write};

use super::app::AirlineApp;
use super::input::{column_int, parse_date, parse_id};
use crate::error::SqlConsoleError;
use crate::executor::TabularExecutor;
use crate::format::{Column, FixedTable};
use crate::statement::QueryAndParams;
use crate::types::RowValues;

const SEARCH: FixedTable<'static> = FixedTable::new(
    &[
        Column::new("FlightNumber", 15),
        Column::new("DepartureTime", 15),
        Column::new("ArrivalTime", 15),
        Column::new("NumOfStops", 15),
        Column::new("OnTimeDeparture(%)", 25),
        Column::new("OnTimeArrival(%)", 25),
    ],
    " ",
);

const PLANE_TYPE: FixedTable<'static> =
    FixedTable::new(&[Column::new("Make", 20), Column::new("Model", 20)], " ");

impl<X, R, W, E> AirlineApp<X, R, W, E>
where
    X: TabularExecutor,
    R: BufRead,
    W: Write + Send,
    E: Write,
{
    /// Flights between two cities scheduled on the weekday of the given date, with their
    /// historical on-time percentages.
    pub(super) async fn search_flights(&mut self) -> Result<(), SqlConsoleError> {
        let departure = self.console.prompt_trimmed("\tEnter departure city: ")?;
        let destination = self.console.prompt_trimmed("\tEnter destination city: ")?;
        let date = parse_date(&self.console.prompt_trimmed("\tEnter date (YYYY-MM-DD): ")?)?;
        let weekday = date.format("%A").to_string();
        self.report(
            SEARCH,
            QueryAndParams::new(
                "SELECT f.FlightNumber, s.DepartureTime, s.ArrivalTime, fi.NumOfStops, \
                     ROUND(AVG(CASE WHEN fi.DepartedOnTime THEN 1 ELSE 0 END) * 100, 2) \
                         AS OnTimeDeparturePercentage, \
                     ROUND(AVG(CASE WHEN fi.ArrivedOnTime THEN 1 ELSE 0 END) * 100, 2) \
                         AS OnTimeArrivalPercentage \
                 FROM Flight f \
                 JOIN FlightInstance fi ON f.FlightNumber = fi.FlightNumber \
                 JOIN Schedule s ON f.FlightNumber = s.FlightNumber \
                 WHERE f.DepartureCity = $1 AND f.ArrivalCity = $2 AND s.DayOfWeek = $3 \
                 GROUP BY f.FlightNumber, s.DepartureTime, s.ArrivalTime, fi.NumOfStops",
                vec![
                    RowValues::Text(departure),
                    RowValues::Text(destination),
                    RowValues::Text(weekday),
                ],
            ),
        )
        .await
    }

    pub(super) async fn view_flight_cost(&mut self) -> Result<(), SqlConsoleError> {
        let flight = self.console.prompt_trimmed("\tEnter flight number: ")?;
        self.print(
            QueryAndParams::new(
                "SELECT TicketCost FROM FlightInstance WHERE FlightNumber = $1",
                vec![RowValues::Text(flight)],
            ),
            "total row(s)",
        )
        .await
    }

    pub(super) async fn view_plane_type(&mut self) -> Result<(), SqlConsoleError> {
        let flight = self.console.prompt_trimmed("\tEnter flight number: ")?;
        self.report(
            PLANE_TYPE,
            QueryAndParams::new(
                "SELECT p.Make, p.Model \
                 FROM Flight f, Plane p \
                 WHERE f.PlaneID = p.PlaneID AND f.FlightNumber = $1",
                vec![RowValues::Text(flight)],
            ),
        )
        .await
    }

    /// Book a seat on a flight instance. The reservation is `reserved` while seats remain,
    /// otherwise `waitlist`.
    pub(super) async fn make_reservation(&mut self) -> Result<(), SqlConsoleError> {
        let flight = self.console.prompt("Enter flight number: ")?;
        let date = parse_date(&self.console.prompt("Enter flight date (YYYY-MM-DD): ")?)?;
        let customer = parse_id(&self.console.prompt("Enter customer ID: ")?, "customer ID")?;

        let instance = self
            .executor
            .execute_query_and_return_result(QueryAndParams::new(
                "SELECT FlightInstanceID, SeatsTotal, SeatsSold \
                 FROM FlightInstance \
                 WHERE FlightNumber = $1 AND FlightDate = $2",
                vec![RowValues::Text(flight.trim().to_string()), RowValues::Date(date)],
            ))
            .await?;
        let Some(row) = instance.rows().first() else {
            self.console.say("Flight instance not found.")?;
            return Ok(());
        };
        let instance_id = column_int(row.get("FlightInstanceID"), "FlightInstanceID")?;
        let seats_total = column_int(row.get("SeatsTotal"), "SeatsTotal")?;
        let seats_sold = column_int(row.get("SeatsSold"), "SeatsSold")?;

        let status = if seats_sold < seats_total {
            self.executor
                .execute_update(QueryAndParams::new(
                    "UPDATE FlightInstance SET SeatsSold = SeatsSold + 1 \
                     WHERE FlightInstanceID = $1",
                    vec![RowValues::Int(instance_id)],
                ))
                .await?;
            "reserved"
        } else {
            "waitlist"
        };

        let reservation_id = self.reservation_ids.next_id();
        self.executor
            .execute_update(QueryAndParams::new(
                "INSERT INTO Reservation (ReservationID, CustomerID, FlightInstanceID, Status) \
                 VALUES ($1, $2, $3, $4)",
                vec![
                    RowValues::Text(reservation_id.clone()),
                    RowValues::Int(customer),
                    RowValues::Int(instance_id),
                    RowValues::from(status),
                ],
            ))
            .await?;
        tracing::info!(%reservation_id, instance_id, customer, status, "reservation recorded");

        self.console
            .say(&format!("Reservation made with status: {status}"))?;
        self.console
            .say(&format!("Reservation number: {reservation_id}"))?;
        Ok(())
    }
}
