use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use rand::Rng;
use tokio::{sync::mpsc, time::sleep};

use crate::domain::weather::WeatherBundle;

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickRefresh,
    Input(Event),
    /// A fetch finished. Only the result of the latest generation is applied.
    FetchCompleted {
        generation: u64,
        bundle: Box<WeatherBundle>,
    },
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

/// Sends `TickRefresh` every `refresh_secs` (minimum 10s), jittered by ±10%.
pub fn start_refresh_task(tx: mpsc::Sender<AppEvent>, refresh_secs: u64) {
    tokio::spawn(async move {
        let base = refresh_secs.max(10);
        loop {
            sleep(jittered(base)).await;
            if tx.send(AppEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    });
}

fn jittered(base_secs: u64) -> Duration {
    let jitter = rand::rng().random_range(-0.1f32..0.1f32);
    Duration::from_secs_f32(((base_secs as f32) * (1.0 + jitter)).max(1.0))
}

#[cfg(test)]
mod tests {
    use super::jittered;

    #[test]
    fn jitter_stays_within_ten_percent() {
        for _ in 0..200 {
            let wait = jittered(600).as_secs_f32();
            assert!((540.0..=660.0).contains(&wait), "{wait}");
        }
    }

    #[test]
    fn jitter_never_drops_below_one_second() {
        assert!(jittered(0).as_secs_f32() >= 1.0);
    }
}
