use std::io::{self, Write};

use super::role::Role;

/// Entries of the start menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    CreateUser,
    LogIn,
    Exit,
}

impl MainChoice {
    #[must_use]
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(MainChoice::CreateUser),
            2 => Some(MainChoice::LogIn),
            9 => Some(MainChoice::Exit),
            _ => None,
        }
    }
}

/// Entries of the menu shown after logging in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    ViewFlights,
    ViewFlightSchedule,
    ViewFlightSeats,
    ViewFlightStatus,
    ViewFlightsOfTheDay,
    ViewFlightPassengers,
    ViewTravelers,
    ViewPlaneStats,
    ViewTechnicianRepairs,
    ViewFlightRepairs,
    ViewFlightStats,
    SearchFlights,
    ViewFlightCost,
    ViewPlaneType,
    MakeReservation,
    MaintenanceRequest,
    ShowRepairDates,
    ShowMaintenanceRequests,
    LogRepair,
    LogOut,
}

impl Feature {
    pub const ALL: [Feature; 20] = [
        Feature::ViewFlights,
        Feature::ViewFlightSchedule,
        Feature::ViewFlightSeats,
        Feature::ViewFlightStatus,
        Feature::ViewFlightsOfTheDay,
        Feature::ViewFlightPassengers,
        Feature::ViewTravelers,
        Feature::ViewPlaneStats,
        Feature::ViewTechnicianRepairs,
        Feature::ViewFlightRepairs,
        Feature::ViewFlightStats,
        Feature::SearchFlights,
        Feature::ViewFlightCost,
        Feature::ViewPlaneType,
        Feature::MakeReservation,
        Feature::MaintenanceRequest,
        Feature::ShowRepairDates,
        Feature::ShowMaintenanceRequests,
        Feature::LogRepair,
        Feature::LogOut,
    ];

    /// Menu number, 1 through 20.
    #[must_use]
    pub fn number(self) -> i64 {
        Self::ALL
            .iter()
            .position(|f| *f == self)
            .and_then(|idx| i64::try_from(idx + 1).ok())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn from_choice(choice: i64) -> Option<Self> {
        let idx = usize::try_from(choice.checked_sub(1)?).ok()?;
        Self::ALL.get(idx).copied()
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Feature::ViewFlights => "View Flights",
            Feature::ViewFlightSchedule => "View Flight Schedule",
            Feature::ViewFlightSeats => "View Flight Seats",
            Feature::ViewFlightStatus => "View Flight Status",
            Feature::ViewFlightsOfTheDay => "View Flights of the Day",
            Feature::ViewFlightPassengers => "View Flight Passengers",
            Feature::ViewTravelers => "View Travelers Using Flight Reservation Number",
            Feature::ViewPlaneStats => "View Plane Stats",
            Feature::ViewTechnicianRepairs => "View Technician Repairs",
            Feature::ViewFlightRepairs => "View Flight Repairs",
            Feature::ViewFlightStats => "View Flight Stats",
            Feature::SearchFlights => "Search Flights",
            Feature::ViewFlightCost => "View Flight Cost",
            Feature::ViewPlaneType => "View Plane Type",
            Feature::MakeReservation => "Make a Reservation",
            Feature::MaintenanceRequest => "Maintenance Request",
            Feature::ShowRepairDates => "Show Repair Dates",
            Feature::ShowMaintenanceRequests => "Show Maintenance Requests",
            Feature::LogRepair => "Log Repair",
            Feature::LogOut => "Log out",
        }
    }

    /// The only role allowed to run this feature; `None` for entries open to everyone.
    #[must_use]
    pub fn required_role(self) -> Option<Role> {
        match self.number() {
            1..=11 => Some(Role::Management),
            12..=15 => Some(Role::Customer),
            16 => Some(Role::Pilot),
            17..=19 => Some(Role::Technician),
            _ => None,
        }
    }

    /// Prefix put in front of failure messages on the error stream.
    #[must_use]
    pub fn error_prefix(self) -> &'static str {
        match self {
            Feature::MakeReservation => "Error making reservation: ",
            Feature::ShowRepairDates | Feature::LogRepair => "Error: ",
            _ => "",
        }
    }
}

const SEPARATOR: &str = ".........................";

/// # Errors
/// Returns any error from `out`.
pub fn write_main_menu<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "MAIN MENU")?;
    writeln!(out, "---------")?;
    writeln!(out, "1. Create user")?;
    writeln!(out, "2. Log in")?;
    writeln!(out, "9. < EXIT")
}

/// Print every feature, grouped by the role that may use it.
///
/// # Errors
/// Returns any error from `out`.
pub fn write_user_menu<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "MAIN MENU")?;
    writeln!(out, "---------")?;
    let mut previous_role = Some(Role::Management);
    for feature in Feature::ALL {
        let role = feature.required_role();
        if role != previous_role {
            writeln!(out, "{SEPARATOR}")?;
            writeln!(out, "{SEPARATOR}")?;
            previous_role = role;
        }
        writeln!(out, "{}. {}", feature.number(), feature.title())?;
    }
    Ok(())
}
