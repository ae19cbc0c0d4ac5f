use chrono::Utc;

/// Hands out reservation numbers of the form `R<epoch millis>`.
///
/// Numbers are strictly increasing for the life of the generator, so two reservations made in
/// the same millisecond still get distinct numbers.
#[derive(Debug, Default)]
pub struct ReservationIds {
    last: i64,
}

impl ReservationIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.next_at(Utc::now().timestamp_millis())
    }

    fn next_at(&mut self, millis: i64) -> String {
        let value = millis.max(self.last.saturating_add(1));
        self.last = value;
        format!("R{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_millisecond_does_not_collide() {
        let mut ids = ReservationIds::new();
        assert_eq!(ids.next_at(1_700_000_000_000), "R1700000000000");
        assert_eq!(ids.next_at(1_700_000_000_000), "R1700000000001");
        assert_eq!(ids.next_at(1_699_999_999_999), "R1700000000002");
        assert_eq!(ids.next_at(1_700_000_000_500), "R1700000000500");
    }

    #[test]
    fn live_ids_are_strictly_increasing() {
        let mut ids = ReservationIds::new();
        let parsed: Vec<i64> = (0..100)
            .map(|_| ids.next_id()[1..].parse().unwrap())
            .collect();
        assert!(parsed.windows(2).all(|w| w[0] < w[1]));
    }
}
