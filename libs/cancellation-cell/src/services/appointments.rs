// libs/cancellation-cell/src/services/appointments.rs
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, TimeZone};
use tracing::warn;

use shared_meevo::{BookedService, MeevoClient};

use crate::models::CancellableAppointment;

/// Parse a Meevo `startTime`. The API emits both offset-carrying RFC 3339
/// stamps and bare local-time stamps like `2026-09-01T10:00:00`; records with
/// unparseable stamps are dropped from consideration.
pub fn parse_start_time(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }

    raw.parse::<NaiveDateTime>()
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

/// An appointment is cancellable iff it is not already cancelled and it
/// starts after `now` or anywhere on the current calendar day. The second arm
/// keeps a same-day appointment whose start time has already passed
/// cancellable; do not collapse the disjunction.
pub fn is_cancellable(start: DateTime<Local>, is_cancelled: bool, now: DateTime<Local>) -> bool {
    if is_cancelled {
        return false;
    }

    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    let start_of_today = Local
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap_or(now);

    start > now || start >= start_of_today
}

/// Fetches a client's booked services and shapes them into cancellation
/// candidates. Fetch failures degrade to an empty list so that one broken
/// profile cannot abort resolution for the rest.
pub struct AppointmentService {
    meevo: Arc<MeevoClient>,
}

impl AppointmentService {
    pub fn new(meevo: Arc<MeevoClient>) -> Self {
        Self { meevo }
    }

    /// All of `client_id`'s upcoming, non-cancelled services. No ordering
    /// guarantee; the orchestrator sorts the combined list.
    pub async fn appointments_for(
        &self,
        token: &str,
        client_id: &str,
        client_name: &str,
    ) -> Vec<CancellableAppointment> {
        let services = match self.meevo.booked_services(token, client_id).await {
            Ok(services) => services,
            Err(e) => {
                warn!("Error getting appointments for {}: {}", client_name, e);
                return Vec::new();
            }
        };

        let now = Local::now();
        services
            .into_iter()
            .filter_map(|service| {
                let start = parse_start_time(&service.start_time)?;
                if !is_cancellable(start, service.is_cancelled, now) {
                    return None;
                }

                Some(CancellableAppointment {
                    appointment_id: service.appointment_id,
                    appointment_service_id: service.appointment_service_id,
                    start_time: start,
                    service_id: service.service_id,
                    stylist_id: service.employee_id,
                    concurrency_check: service.concurrency_check_digits,
                    client_id: client_id.to_string(),
                    client_name: client_name.to_string(),
                })
            })
            .collect()
    }

    /// Exact-id match against a client's booked services, with no date or
    /// cancelled filtering: the caller already named the service, so the only
    /// job is recovering its concurrency check. Errors absorb to `None`.
    pub async fn find_service_by_id(
        &self,
        token: &str,
        client_id: &str,
        appointment_service_id: &str,
    ) -> Option<BookedService> {
        match self.meevo.booked_services(token, client_id).await {
            Ok(services) => services
                .into_iter()
                .find(|service| service.appointment_service_id == appointment_service_id),
            Err(e) => {
                warn!("Error checking appointments for client {}: {}", client_id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn cancelled_flag_always_excludes() {
        let now = local(2026, 6, 15, 12, 0);
        assert!(!is_cancellable(now + Duration::days(3), true, now));
    }

    #[test]
    fn strictly_future_start_is_included() {
        let now = local(2026, 6, 15, 12, 0);
        assert!(is_cancellable(now + Duration::hours(5), false, now));
    }

    #[test]
    fn yesterday_is_excluded() {
        let now = local(2026, 6, 15, 12, 0);
        assert!(!is_cancellable(local(2026, 6, 14, 12, 0), false, now));
    }

    #[test]
    fn passed_same_day_start_is_still_included() {
        // 00:01 today with now at 23:00: the `start > now` arm fails but the
        // `start >= start_of_today` arm admits it.
        let now = local(2026, 6, 15, 23, 0);
        let start = local(2026, 6, 15, 0, 1);
        assert!(start <= now);
        assert!(is_cancellable(start, false, now));
    }

    #[test]
    fn exact_midnight_boundary_is_included() {
        let now = local(2026, 6, 15, 23, 0);
        assert!(is_cancellable(local(2026, 6, 15, 0, 0), false, now));
    }

    #[test]
    fn last_minute_of_yesterday_is_excluded() {
        let now = local(2026, 6, 15, 23, 0);
        assert!(!is_cancellable(local(2026, 6, 14, 23, 59), false, now));
    }

    #[test]
    fn parses_rfc3339_and_naive_stamps() {
        assert!(parse_start_time("2026-09-01T10:00:00Z").is_some());
        assert!(parse_start_time("2026-09-01T10:00:00-07:00").is_some());
        assert!(parse_start_time("2026-09-01T10:00:00").is_some());
    }

    #[test]
    fn unparseable_stamp_yields_none() {
        assert!(parse_start_time("").is_none());
        assert!(parse_start_time("next tuesday").is_none());
    }

    #[test]
    fn naive_stamp_is_read_as_local_time() {
        let parsed = parse_start_time("2026-09-01T10:30:00").unwrap();
        assert_eq!(parsed, local(2026, 9, 1, 10, 30));
    }
}
