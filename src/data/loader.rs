use std::sync::{
    Arc,
    mpsc::{self, Receiver, Sender},
};

#[cfg(not(target_arch = "wasm32"))]
use std::thread;

use crate::config::DF;
use crate::data::BarSource;
use crate::models::BarSeries;

/// Result of one load request, tagged with the request's generation.
#[derive(Debug)]
pub struct LoadOutcome {
    pub generation: u64,
    pub ticker: String,
    pub result: Result<BarSeries, String>,
}

/// Runs bar loads off the UI thread and hands back only the newest one.
///
/// Each `request` bumps the generation; results of older requests are
/// dropped in `poll`, so switching tickers quickly never shows stale bars.
pub struct BarLoader {
    source: Arc<dyn BarSource>,
    generation: u64,
    pending: Option<String>,
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
}

impl BarLoader {
    pub fn new(source: Arc<dyn BarSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            generation: 0,
            pending: None,
            tx,
            rx,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn request(&mut self, ticker: &str) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let ticker = ticker.trim().to_uppercase();
        self.pending = Some(ticker.clone());

        if DF.log_loader {
            log::info!(
                "Loading {} from {} source (generation {})",
                ticker,
                self.source.name(),
                generation
            );
        }

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let job = move || {
            let result = source.load(&ticker).map_err(|e| format!("{:#}", e));
            // Receiver gone means the app is shutting down
            let _ = tx.send(LoadOutcome {
                generation,
                ticker,
                result,
            });
        };

        #[cfg(not(target_arch = "wasm32"))]
        thread::spawn(job);

        #[cfg(target_arch = "wasm32")]
        job();

        generation
    }

    /// Latest finished load for the newest request, if it has arrived.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        let mut latest = None;
        while let Ok(outcome) = self.rx.try_recv() {
            if outcome.generation != self.generation {
                if DF.log_loader {
                    log::info!(
                        "Discarding stale load of {} (generation {} < {})",
                        outcome.ticker,
                        outcome.generation,
                        self.generation
                    );
                }
                continue;
            }
            latest = Some(outcome);
        }

        if latest.is_some() {
            self.pending = None;
        }
        latest
    }
}
