use std::io::{BufRead, Write};

use super::app::AirlineApp;
use super::input::parse_date;
use crate::error::SqlConsoleError;
use crate::executor::TabularExecutor;
use crate::format::{Column, FixedTable};
use crate::statement::QueryAndParams;
use crate::types::RowValues;

const MAINTENANCE_REQUESTS: FixedTable<'static> = FixedTable::new(
    &[
        Column::new("RequestID", 10),
        Column::new("PlaneID", 12),
        Column::new("RepairCode", 15),
        Column::new("RequestDate", 15),
        Column::new("PilotID", 10),
    ],
    "",
);

impl<X, R, W, E> AirlineApp<X, R, W, E>
where
    X: TabularExecutor,
    R: BufRead,
    W: Write + Send,
    E: Write,
{
    pub(super) async fn show_repair_dates(&mut self) -> Result<(), SqlConsoleError> {
        let plane = self.console.prompt_trimmed("\tEnter plane ID: ")?;
        let start = parse_date(&self.console.prompt_trimmed("\tEnter start date (YYYY-MM-DD): ")?)?;
        let end = parse_date(&self.console.prompt_trimmed("\tEnter end date (YYYY-MM-DD): ")?)?;
        self.print(
            QueryAndParams::new(
                "SELECT RepairDate, RepairCode \
                 FROM Repair \
                 WHERE PlaneID = $1 AND RepairDate BETWEEN $2 AND $3",
                vec![
                    RowValues::Text(plane),
                    RowValues::Date(start),
                    RowValues::Date(end),
                ],
            ),
            "Total row(s)",
        )
        .await
    }

    pub(super) async fn show_maintenance_requests(&mut self) -> Result<(), SqlConsoleError> {
        let pilot = self.console.prompt_trimmed("\tEnter pilot ID: ")?;
        self.report(
            MAINTENANCE_REQUESTS,
            QueryAndParams::new(
                "SELECT RequestID, PlaneID, RepairCode, RequestDate, PilotID \
                 FROM MaintenanceRequest \
                 WHERE PilotID = $1",
                vec![RowValues::Text(pilot)],
            ),
        )
        .await
    }

    /// Record a repair and print the stored row back.
    pub(super) async fn log_repair(&mut self) -> Result<(), SqlConsoleError> {
        let technician = self.console.prompt_trimmed("\tEnter technician ID: ")?;
        let plane = self.console.prompt_trimmed("\tEnter plane ID: ")?;
        let repair_code = self.console.prompt_trimmed("\tEnter repair code: ")?;
        let date = parse_date(&self.console.prompt_trimmed("\tEnter repair date (YYYY-MM-DD): ")?)?;

        let repair_id = self.next_key("Repair", "RepairID").await?;
        self.executor
            .execute_update(QueryAndParams::new(
                "INSERT INTO Repair (RepairID, TechnicianID, PlaneID, RepairCode, RepairDate) \
                 VALUES ($1, $2, $3, $4, $5)",
                vec![
                    RowValues::Int(repair_id),
                    RowValues::Text(technician),
                    RowValues::Text(plane),
                    RowValues::Text(repair_code),
                    RowValues::Date(date),
                ],
            ))
            .await?;

        let rows = self
            .executor
            .print_result_to(
                QueryAndParams::new(
                    "SELECT PlaneID, RepairCode, RepairDate FROM Repair WHERE RepairID = $1",
                    vec![RowValues::Int(repair_id)],
                ),
                self.console.out(),
            )
            .await?;
        let out = self.console.out();
        writeln!(out, "Repair logged successfully.")?;
        writeln!(out, "Total rows: {rows}")?;
        Ok(())
    }
}
