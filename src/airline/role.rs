use std::fmt;

use super::menu::Feature;

/// Account type stored in `Users.userType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Management,
    Customer,
    Pilot,
    Technician,
    /// Any other stored value. Logs in, but is granted no features.
    Other(String),
}

impl Role {
    /// Parse a stored role. Case-insensitive; surrounding padding is ignored.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        [Role::Management, Role::Customer, Role::Pilot, Role::Technician]
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Role::Other(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Role::Management => "Management",
            Role::Customer => "Customer",
            Role::Pilot => "Pilot",
            Role::Technician => "Technician",
            Role::Other(name) => name,
        }
    }

    #[must_use]
    pub fn permits(&self, feature: Feature) -> bool {
        feature.required_role().is_none_or(|required| required == *self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_ignores_case_and_padding() {
        assert_eq!(Role::parse("management"), Role::Management);
        assert_eq!(Role::parse("  PILOT   "), Role::Pilot);
        assert_eq!(Role::parse("Technician"), Role::Technician);
        assert_eq!(Role::parse("Auditor"), Role::Other("Auditor".into()));
    }

    #[test]
    fn features_are_gated_by_role() {
        assert!(Role::Management.permits(Feature::ViewFlights));
        assert!(!Role::Customer.permits(Feature::ViewFlights));
        assert!(Role::Customer.permits(Feature::MakeReservation));
        assert!(Role::Pilot.permits(Feature::MaintenanceRequest));
        assert!(!Role::Technician.permits(Feature::MaintenanceRequest));
        assert!(Role::Technician.permits(Feature::LogRepair));
        assert!(!Role::Other("Auditor".into()).permits(Feature::SearchFlights));
        assert!(Role::Other("Auditor".into()).permits(Feature::LogOut));
    }
}
