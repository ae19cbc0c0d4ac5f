#![cfg(feature = "test-utils")]

use sql_console::prelude::*;
use sql_console::test_utils::airline::{AIRLINE_SCHEMA, run_scripted};
use sql_console::test_utils::postgres::setup_postgres_embedded;

#[test]
fn test03_postgres_executor_and_console() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let pg = rt.block_on(setup_postgres_embedded("airline_test"))?;
    let opts = pg.options.clone();

    rt.block_on(async move {
        let mut executor = QueryExecutor::connect(opts).await?;
        assert_eq!(executor.db_type(), DatabaseType::Postgres);
        executor.execute_batch(AIRLINE_SCHEMA).await?;

        // unbound statements come back as the server's own text
        let rs = executor
            .execute_query_and_return_result("SELECT 1 AS one, NULL AS nothing, true AS flag")
            .await?;
        assert_eq!(rs.column_names(), ["one", "nothing", "flag"]);
        assert_eq!(
            rs.clone().into_values(),
            vec![vec![Some("1".to_string()), None, Some("t".to_string())]]
        );

        // only the first result set of a multi-statement string is kept
        let rs = executor
            .execute_query_and_return_result("SELECT 'a' AS first; SELECT 'b' AS second")
            .await?;
        assert_eq!(rs.column_names(), ["first"]);
        assert_eq!(rs.scalar(), Some("a"));

        // bound statements decode by type and render the same way
        let rs = executor
            .execute_query_and_return_result(QueryAndParams::new(
                "SELECT FlightNumber, TicketCost, DepartedOnTime, FlightDate \
                 FROM FlightInstance WHERE FlightInstanceID = $1",
                vec![RowValues::Int(2)],
            ))
            .await?;
        assert_eq!(
            rs.column_names(),
            ["flightnumber", "ticketcost", "departedontime", "flightdate"]
        );
        let row = &rs.rows()[0];
        assert_eq!(row.get("FlightNumber"), Some("F100"));
        assert_eq!(row.get("TicketCost"), Some("325.50"));
        assert_eq!(row.get("DepartedOnTime"), Some("f"));
        assert_eq!(row.get("FlightDate"), Some("2025-06-02"));

        let updated = executor
            .execute_update(QueryAndParams::new(
                "UPDATE Plane SET Year = $1 WHERE Make = $2",
                vec![RowValues::Int(2013), RowValues::from("Boeing")],
            ))
            .await?;
        assert_eq!(updated, 1);
        assert_eq!(
            executor
                .execute_update("UPDATE FlightInstance SET NumOfStops = NumOfStops")
                .await?,
            4
        );
        assert_eq!(executor.execute_query("SELECT * FROM Reservation").await?, 3);

        let mut out = Vec::new();
        let printed = executor
            .print_result_to(
                "SELECT PlaneID, Year FROM Plane WHERE Year IS NULL",
                &mut out,
            )
            .await?;
        assert_eq!(printed, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "planeid\tyear\n");

        let err = executor
            .execute_query("SELECT * FROM NoSuchTable")
            .await
            .unwrap_err();
        assert!(err.is_execution());
        assert_eq!(executor.execute_query("SELECT * FROM Flight").await?, 2);

        // sequences: unknown and not-yet-used both read as -1
        executor
            .execute_batch("CREATE TABLE Counter (id SERIAL PRIMARY KEY, note TEXT);")
            .await?;
        assert_eq!(executor.current_sequence_value("no_such_seq").await?, NO_SEQUENCE_VALUE);
        assert_eq!(executor.current_sequence_value("counter_id_seq").await?, -1);
        executor
            .execute_update("INSERT INTO Counter (note) VALUES ('x'), ('y')")
            .await?;
        assert_eq!(executor.current_sequence_value("counter_id_seq").await?, 2);

        let transcript = run_scripted(
            executor,
            "2\nada\nsecret\n12\nRiverside\nSeattle\n2025-06-01\n15\nF200\n2025-06-01\n1\n20\n9\n",
        )
        .await?;
        assert!(transcript.stderr.is_empty(), "{}", transcript.stderr);
        assert_eq!(transcript.stdout.matches("66.67").count(), 2, "{}", transcript.stdout);
        assert!(transcript.stdout.contains("Reservation made with status: waitlist"));

        let mut executor = transcript.executor;
        let rs = executor
            .execute_query_and_return_result(
                "SELECT COUNT(*) FROM Reservation WHERE Status = 'waitlist'",
            )
            .await?;
        assert_eq!(rs.scalar(), Some("2"));

        // numeric, timestamptz and date parameters
        let updated = executor
            .execute_update(QueryAndParams::new(
                "UPDATE FlightInstance SET TicketCost = $1 WHERE FlightInstanceID = $2",
                vec![RowValues::Float(300.0), RowValues::Int(2)],
            ))
            .await?;
        assert_eq!(updated, 1);
        let rs = executor
            .execute_query_and_return_result(
                "SELECT TicketCost FROM FlightInstance WHERE FlightInstanceID = 2",
            )
            .await?;
        assert_eq!(rs.scalar(), Some("300.00"));
        let pricier = executor
            .execute_query(QueryAndParams::new(
                "SELECT * FROM FlightInstance WHERE TicketCost > $1",
                vec![RowValues::from("200")],
            ))
            .await?;
        assert_eq!(pricier, 3);

        let departure = chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let rs = executor
            .execute_query_and_return_result(QueryAndParams::new(
                "SELECT $1::timestamptz AS at",
                vec![RowValues::Timestamp(departure)],
            ))
            .await?;
        assert_eq!(rs.scalar(), Some("2025-06-01 08:30:00"));

        let rs = executor
            .execute_query_and_return_result(QueryAndParams::new(
                "SELECT COUNT(*) FROM FlightInstance WHERE FlightDate = $1",
                vec![RowValues::Date(departure.date())],
            ))
            .await?;
        assert_eq!(rs.scalar(), Some("2"));

        // types without a dedicated decoder read back the same bound or unbound
        let select = "SELECT INTERVAL '1 day' AS i, 'a'::\"char\" AS c, \
                      '00010203-0405-0607-0809-0a0b0c0d0e0f'::uuid AS u, \
                      ARRAY[1, NULL, 3] AS a";
        let unbound = executor.execute_query_and_return_result(select).await?;
        let bound = executor
            .execute_query_and_return_result(QueryAndParams::new(
                format!("{select} WHERE $1::int = 1"),
                vec![RowValues::Int(1)],
            ))
            .await?;
        assert_eq!(
            unbound.clone().into_values(),
            vec![vec![
                Some("1 day".to_string()),
                Some("a".to_string()),
                Some("00010203-0405-0607-0809-0a0b0c0d0e0f".to_string()),
                Some("{1,NULL,3}".to_string()),
            ]]
        );
        assert_eq!(bound, unbound);

        // updates refuse row-returning statements on either protocol
        let err = executor.execute_update("SELECT * FROM Plane").await.unwrap_err();
        assert!(err.is_execution(), "unexpected error: {err:?}");
        let err = executor
            .execute_update(QueryAndParams::new(
                "SELECT * FROM Plane WHERE Year > $1",
                vec![RowValues::Int(0)],
            ))
            .await
            .unwrap_err();
        assert!(err.is_execution(), "unexpected error: {err:?}");
        assert_eq!(executor.execute_query("SELECT * FROM Plane").await?, 2);

        executor.close().await?;
        Ok::<(), SqlConsoleError>(())
    })?;

    rt.block_on(pg.stop())?;
    Ok(())
}

#[test]
fn test03_postgres_rejects_incomplete_options() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let err = rt
        .block_on(QueryExecutor::connect(PostgresOptions::new("airline")))
        .unwrap_err();
    assert!(matches!(err, SqlConsoleError::ConfigError(_)));
}
