//! Reports available to the `Management` role.

use std::io::{BufRead, Write};

use super::app::AirlineApp;
use super::input::parse_date;
use crate::error::SqlConsoleError;
use crate::executor::TabularExecutor;
use crate::format::{Column, FixedTable};
use crate::statement::QueryAndParams;
use crate::types::RowValues;

const FLIGHTS: FixedTable<'static> = FixedTable::new(
    &[
        Column::new("FlightNumber", 15),
        Column::new("PlaneID", 10),
        Column::new("DepartureCity", 20),
        Column::new("ArrivalCity", 20),
    ],
    " ",
);

const SCHEDULE: FixedTable<'static> = FixedTable::new(
    &[
        Column::new("DayOfWeek", 15),
        Column::new("DepartureTime", 17),
        Column::new("ArrivalTime", 17),
    ],
    "",
);

const SEATS: FixedTable<'static> = FixedTable::new(
    &[
        Column::new("FlightNumber", 15),
        Column::new("FlightDate", 15),
        Column::new("SeatsSold", 15),
        Column::new("SeatsAvailable", 17),
    ],
    "",
);

const STATUS: FixedTable<'static> = FixedTable::new(
    &[
        Column::new("FlightNumber", 15),
        Column::new("FlightDate", 15),
        Column::new("DepartedOnTime", 18),
        Column::new("ArrivedOnTime", 18),
    ],
    "",
);

const FLIGHTS_OF_DAY: FixedTable<'static> = FixedTable::new(
    &[
        Column::new("FlightInstanceID", 18),
        Column::new("FlightNumber", 15),
        Column::new("FlightDate", 15),
        Column::new("DepartureCity", 18),
        Column::new("ArrivalCity", 18),
        Column::new("DepartedOnTime", 18),
        Column::new("ArrivedOnTime", 18),
    ],
    "",
);

const PASSENGERS: FixedTable<'static> = FixedTable::new(
    &[
        Column::new("CustomerID", 12),
        Column::new("FirstName", 12),
        Column::new("LastName", 12),
        Column::new("Status", 10),
        Column::new("FlightNumber", 14),
        Column::new("FlightDate", 12),
    ],
    " ",
);

const TRAVELERS: FixedTable<'static> = FixedTable::new(
    &[
        Column::new("ReservationID", 15),
        Column::new("CustomerID", 12),
        Column::new("FirstName", 12),
        Column::new("LastName", 12),
        Column::new("Gender", 8),
        Column::new("DOB", 12),
        Column::new("Address", 20),
        Column::new("Phone", 15),
        Column::new("Zip", 8),
        Column::new("Status", 10),
        Column::new("FlightInstanceID", 15),
    ],
    " ",
);

const PLANE_STATS: FixedTable<'static> = FixedTable::new(
    &[
        Column::new("PlaneID", 10),
        Column::new("Make", 15),
        Column::new("Model", 15),
        Column::new("LastRepairDate", 15),
    ],
    " ",
);

const TECHNICIAN_REPAIRS: FixedTable<'static> = FixedTable::new(
    &[
        Column::new("RepairID", 10),
        Column::new("PlaneID", 10),
        Column::new("Make", 15),
        Column::new("Model", 15),
        Column::new("RepairCode", 12),
        Column::new("RepairDate", 15),
    ],
    " ",
);

const FLIGHT_STATS: FixedTable<'static> = FixedTable::new(
    &[
        Column::new("NumDays", 10),
        Column::new("TotalTicketsSold", 20),
        Column::new("TotalTicketsUnsold", 20),
    ],
    " ",
);

impl<X, R, W, E> AirlineApp<X, R, W, E>
where
    X: TabularExecutor,
    R: BufRead,
    W: Write + Send,
    E: Write,
{
    pub(super) async fn view_flights(&mut self) -> Result<(), SqlConsoleError> {
        self.report(
            FLIGHTS,
            "SELECT FlightNumber, PlaneID, DepartureCity, ArrivalCity FROM Flight".into(),
        )
        .await
    }

    /// Weekly schedule of one flight, Sunday first.
    pub(super) async fn view_flight_schedule(&mut self) -> Result<(), SqlConsoleError> {
        let flight = self.console.prompt("\tEnter flight number: ")?;
        self.report(
            SCHEDULE,
            QueryAndParams::new(
                "SELECT s.DayOfWeek, s.DepartureTime, s.ArrivalTime \
                 FROM Schedule s \
                 WHERE s.FlightNumber = $1 \
                 ORDER BY CASE s.DayOfWeek \
                     WHEN 'Sunday' THEN 1 \
                     WHEN 'Monday' THEN 2 \
                     WHEN 'Tuesday' THEN 3 \
                     WHEN 'Wednesday' THEN 4 \
                     WHEN 'Thursday' THEN 5 \
                     WHEN 'Friday' THEN 6 \
                     WHEN 'Saturday' THEN 7 \
                 END",
                vec![RowValues::Text(flight)],
            ),
        )
        .await
    }

    pub(super) async fn view_flight_seats(&mut self) -> Result<(), SqlConsoleError> {
        let flight = self.console.prompt("\tEnter Flight Number: ")?;
        let date = parse_date(&self.console.prompt("\tEnter Date (YYYY-MM-DD): ")?)?;
        self.report(
            SEATS,
            QueryAndParams::new(
                "SELECT fi.FlightNumber, fi.FlightDate, fi.SeatsSold, \
                     (fi.SeatsTotal - fi.SeatsSold) AS SeatsAvailable \
                 FROM FlightInstance fi \
                 WHERE fi.FlightNumber = $1 AND fi.FlightDate = $2",
                vec![RowValues::Text(flight), RowValues::Date(date)],
            ),
        )
        .await
    }

    pub(super) async fn view_flight_status(&mut self) -> Result<(), SqlConsoleError> {
        let flight = self.console.prompt("\tEnter Flight Number: ")?;
        let date = parse_date(&self.console.prompt("\tEnter Date (YYYY-MM-DD): ")?)?;
        self.report(
            STATUS,
            QueryAndParams::new(
                "SELECT f.FlightNumber, fi.FlightDate, fi.DepartedOnTime, fi.ArrivedOnTime \
                 FROM FlightInstance fi \
                 JOIN Flight f ON fi.FlightNumber = f.FlightNumber \
                 WHERE f.FlightNumber = $1 AND fi.FlightDate = $2",
                vec![RowValues::Text(flight), RowValues::Date(date)],
            ),
        )
        .await
    }

    pub(super) async fn view_flights_of_the_day(&mut self) -> Result<(), SqlConsoleError> {
        let date = parse_date(&self.console.prompt("\tEnter Date (YYYY-MM-DD): ")?)?;
        self.report(
            FLIGHTS_OF_DAY,
            QueryAndParams::new(
                "SELECT fi.FlightInstanceID, fi.FlightNumber, fi.FlightDate, \
                     f.DepartureCity, f.ArrivalCity, fi.DepartedOnTime, fi.ArrivedOnTime \
                 FROM FlightInstance fi \
                 JOIN Flight f ON fi.FlightNumber = f.FlightNumber \
                 WHERE fi.FlightDate = $1 \
                 ORDER BY fi.FlightNumber",
                vec![RowValues::Date(date)],
            ),
        )
        .await
    }

    /// Reserved, waitlisted and flown passengers of one flight on one day.
    pub(super) async fn view_flight_passengers(&mut self) -> Result<(), SqlConsoleError> {
        let flight = self.console.prompt("\tEnter Flight Number: ")?;
        let date = parse_date(&self.console.prompt("\tEnter Date (YYYY-MM-DD): ")?)?;
        self.report(
            PASSENGERS,
            QueryAndParams::new(
                "SELECT c.CustomerID, c.FirstName, c.LastName, r.Status, \
                     fi.FlightNumber, fi.FlightDate \
                 FROM Reservation r \
                 JOIN Customer c ON r.CustomerID = c.CustomerID \
                 JOIN FlightInstance fi ON r.FlightInstanceID = fi.FlightInstanceID \
                 WHERE fi.FlightNumber = $1 AND fi.FlightDate = $2 \
                 ORDER BY r.Status, c.LastName, c.FirstName",
                vec![RowValues::Text(flight), RowValues::Date(date)],
            ),
        )
        .await
    }

    pub(super) async fn view_travelers(&mut self) -> Result<(), SqlConsoleError> {
        let reservation = self.console.prompt("\tEnter Reservation Number: ")?;
        self.report(
            TRAVELERS,
            QueryAndParams::new(
                "SELECT r.ReservationID, c.CustomerID, c.FirstName, c.LastName, c.Gender, \
                     c.DOB, c.Address, c.Phone, c.Zip, r.Status, r.FlightInstanceID \
                 FROM Reservation r \
                 JOIN Customer c ON r.CustomerID = c.CustomerID \
                 WHERE r.ReservationID = $1",
                vec![RowValues::Text(reservation)],
            ),
        )
        .await
    }

    pub(super) async fn view_plane_stats(&mut self) -> Result<(), SqlConsoleError> {
        let plane = self.console.prompt("\tEnter Plane Number: ")?;
        self.report(
            PLANE_STATS,
            QueryAndParams::new(
                "SELECT PlaneID, Make, Model, LastRepairDate FROM Plane WHERE PlaneID = $1",
                vec![RowValues::Text(plane)],
            ),
        )
        .await
    }

    pub(super) async fn view_technician_repairs(&mut self) -> Result<(), SqlConsoleError> {
        let technician = self.console.prompt("\tEnter Technician ID: ")?;
        self.report(
            TECHNICIAN_REPAIRS,
            QueryAndParams::new(
                "SELECT r.RepairID, r.PlaneID, p.Make, p.Model, r.RepairCode, r.RepairDate \
                 FROM Repair r \
                 JOIN Plane p ON r.PlaneID = p.PlaneID \
                 WHERE r.TechnicianID = $1",
                vec![RowValues::Text(technician)],
            ),
        )
        .await
    }

    /// Repairs of one plane in a date range, printed in the executor's own layout.
    pub(super) async fn view_flight_repairs(&mut self) -> Result<(), SqlConsoleError> {
        let plane = self.console.prompt("\tEnter Plane ID: ")?;
        let start = parse_date(&self.console.prompt("\tEnter Start Date (YYYY-MM-DD): ")?)?;
        let end = parse_date(&self.console.prompt("\tEnter End Date (YYYY-MM-DD): ")?)?;
        self.print(
            QueryAndParams::new(
                "SELECT RepairDate, RepairCode \
                 FROM Repair \
                 WHERE PlaneID = $1 AND RepairDate BETWEEN $2 AND $3 \
                 ORDER BY RepairDate",
                vec![
                    RowValues::Text(plane),
                    RowValues::Date(start),
                    RowValues::Date(end),
                ],
            ),
            "total row(s)",
        )
        .await
    }

    pub(super) async fn view_flight_stats(&mut self) -> Result<(), SqlConsoleError> {
        let flight = self.console.prompt("\tEnter Flight Number: ")?;
        let start = parse_date(&self.console.prompt("\tEnter Start Date (YYYY-MM-DD): ")?)?;
        let end = parse_date(&self.console.prompt("\tEnter End Date (YYYY-MM-DD): ")?)?;
        self.report(
            FLIGHT_STATS,
            QueryAndParams::new(
                "SELECT COUNT(*) AS NumDays, \
                     SUM(SeatsSold) AS TotalTicketsSold, \
                     SUM(SeatsTotal - SeatsSold) AS TotalTicketsUnsold \
                 FROM FlightInstance \
                 WHERE FlightNumber = $1 AND FlightDate BETWEEN $2 AND $3",
                vec![
                    RowValues::Text(flight),
                    RowValues::Date(start),
                    RowValues::Date(end),
                ],
            ),
        )
        .await
    }
}
