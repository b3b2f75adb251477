use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

pub mod util {
    use dialoguer::{theme::ColorfulTheme, Confirm};
    use std::io;

    fn theme() -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn ask_confirm(prompt: &str, default: bool) -> io::Result<bool> {
        Confirm::with_theme(&theme())
            .with_prompt(prompt)
            .default(default)
            .interact()
    }
}

/// A spinner, or a hidden bar when nothing should reach the terminal.
pub fn spinner(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    ProgressBar::new_spinner().with_style(style)
}

pub trait SpinnerExt: Sized {
    const DEFAULT_TICK: Duration = Duration::from_millis(30);

    /// Ticks `self` every `interval` from a background task until it is finished.
    fn ticking_every(self, interval: Duration) -> Arc<Mutex<Self>>;

    fn with_ticking(self) -> Arc<Mutex<Self>> {
        self.ticking_every(Self::DEFAULT_TICK)
    }
}

impl SpinnerExt for ProgressBar {
    fn ticking_every(self, interval: Duration) -> Arc<Mutex<Self>> {
        let shared = Arc::new(Mutex::new(self));
        let bar = Arc::clone(&shared);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let bar = bar.lock().await;
                if bar.is_finished() {
                    break;
                }
                bar.tick();
            }
        });
        shared
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn ticker_stops_once_finished() {
        let bar = spinner(true).ticking_every(Duration::from_millis(5));
        assert_eq!(Arc::strong_count(&bar), 2);

        bar.lock().await.finish();
        for _ in 0..100 {
            if Arc::strong_count(&bar) == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(Arc::strong_count(&bar), 1);
    }
}
