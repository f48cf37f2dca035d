//! Daily refresh trigger

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use tokio::task::JoinHandle;

use super::refresh::RefreshService;

/// Run a refresh every day at `hour:minute` local time
pub fn spawn_daily_refresh(refresh: RefreshService, (hour, minute): (u32, u32)) -> JoinHandle<()> {
    tracing::info!("Daily refresh scheduled at {:02}:{:02}", hour, minute);

    tokio::spawn(async move {
        loop {
            let wait = until_next(Local::now().naive_local(), hour, minute);
            tracing::debug!("Next refresh in {} minutes", wait.num_minutes());
            tokio::time::sleep(wait.to_std().unwrap_or_default()).await;

            if let Err(e) = refresh.refresh().await {
                tracing::error!("Scheduled refresh failed: {}", e);
            }
        }
    })
}

/// Time from `now` until the next occurrence of `hour:minute`
fn until_next(now: NaiveDateTime, hour: u32, minute: u32) -> Duration {
    let at = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
    let mut next = now.date().and_time(at);
    if next <= now {
        next += Duration::days(1);
    }
    next - now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_later_today() {
        assert_eq!(until_next(at(1, 30), 4, 0), Duration::minutes(150));
    }

    #[test]
    fn test_tomorrow() {
        assert_eq!(until_next(at(4, 0), 4, 0), Duration::days(1));
        assert_eq!(until_next(at(23, 0), 4, 0), Duration::hours(5));
    }
}
