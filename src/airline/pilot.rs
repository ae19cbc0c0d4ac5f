use std::io::{BufRead, Write};

use super::app::AirlineApp;
use super::input::parse_date;
use crate::error::SqlConsoleError;
use crate::executor::TabularExecutor;
use crate::format::{Column, FixedTable};
use crate::statement::QueryAndParams;
use crate::types::RowValues;

const REQUEST_CONFIRMATION: FixedTable<'static> = FixedTable::new(
    &[
        Column::new("PlaneID", 12),
        Column::new("RepairCode", 15),
        Column::new("RequestDate", 15),
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
    /// File a maintenance request and echo the stored row back.
    pub(super) async fn maintenance_request(&mut self) -> Result<(), SqlConsoleError> {
        let pilot = self.console.prompt_trimmed("\tEnter your Pilot ID: ")?;
        let plane = self.console.prompt_trimmed("\tEnter plane ID: ")?;
        let repair_code = self.console.prompt_trimmed("\tEnter repair code: ")?;
        let date = self
            .console
            .prompt_trimmed("\tEnter date of request (YYYY-MM-DD): ")?;
        let date = parse_date(&date)?;

        let request_id = self.next_key("MaintenanceRequest", "RequestID").await?;
        self.executor
            .execute_update(QueryAndParams::new(
                "INSERT INTO MaintenanceRequest \
                 (RequestID, PlaneID, RepairCode, RequestDate, PilotID) \
                 VALUES ($1, $2, $3, $4, $5)",
                vec![
                    RowValues::Int(request_id),
                    RowValues::Text(plane),
                    RowValues::Text(repair_code),
                    RowValues::Date(date),
                    RowValues::Text(pilot),
                ],
            ))
            .await?;

        let confirmation = self
            .executor
            .execute_query_and_return_result(QueryAndParams::new(
                "SELECT PlaneID, RepairCode, RequestDate FROM MaintenanceRequest \
                 WHERE RequestID = $1",
                vec![RowValues::Int(request_id)],
            ))
            .await?;
        let out = self.console.out();
        let rows = REQUEST_CONFIRMATION.write_result_set(out, &confirmation)?;
        writeln!(out, "Maintenance request submitted.")?;
        writeln!(out, "Total rows: {rows}")?;
        Ok(())
    }
}
