use serde::Serialize;

use crate::model::Guest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportStatus {
    /// Arrival and departure both known.
    Scheduled,
    /// Only one leg known.
    Partial,
    Unscheduled,
}

impl std::fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Scheduled => "scheduled",
            Self::Partial => "partial",
            Self::Unscheduled => "unscheduled",
        })
    }
}

/// One line on the transportation-status board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransportEntry {
    pub guest_id: String,
    pub name: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub status: TransportStatus,
}

/// Arrival/departure board, one entry per guest in source order.
pub fn transport_board(guests: &[Guest]) -> Vec<TransportEntry> {
    guests
        .iter()
        .map(|guest| {
            let arrival = guest.arrival_time();
            let departure = guest.departure_time();
            let status = match (arrival.is_empty(), departure.is_empty()) {
                (false, false) => TransportStatus::Scheduled,
                (true, true) => TransportStatus::Unscheduled,
                _ => TransportStatus::Partial,
            };
            TransportEntry {
                guest_id: guest.id().to_string(),
                name: guest.name().to_string(),
                arrival_time: arrival.to_string(),
                departure_time: departure.to_string(),
                status,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn status_follows_known_legs() {
        let guests = vec![
            Guest([("id", "g1"), ("arrival_time", "09:00"), ("departure_time", "18:00")].into_iter().collect()),
            Guest([("id", "g2"), ("arrival_time", "09:00")].into_iter().collect()),
            Guest(Record::new()),
        ];
        let board = transport_board(&guests);
        assert_eq!(board.len(), 3);
        assert_eq!(board[0].status, TransportStatus::Scheduled);
        assert_eq!(board[1].status, TransportStatus::Partial);
        assert_eq!(board[1].departure_time, "");
        assert_eq!(board[2].status, TransportStatus::Unscheduled);
    }
}
