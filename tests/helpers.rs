// Shared test helpers: workbook fixtures, recording sinks and simulated geocoders.
//
// This module is included by several test files; not every file uses every helper.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rust_xlsxwriter::Workbook;
use sheet_geocoder::{Coordinates, CoordinateSink, GeocodeError, Geocoder};

/// Writes a single-sheet xlsx workbook; empty strings are left as blank cells.
pub fn write_workbook(path: &Path, sheet_name: &str, rows: &[Vec<&str>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .expect("Failed to name worksheet");
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet
                    .write_string(r as u32, c as u16, *value)
                    .expect("Failed to write cell");
            }
        }
    }
    workbook.save(path).expect("Failed to save workbook");
}

/// Builds a row `width` cells wide with `value` at column `index`.
pub fn row_with(width: usize, index: usize, value: &'static str) -> Vec<&'static str> {
    let mut row = vec![""; width];
    row[index] = value;
    row
}

/// Deterministic coordinates for an address, so tests can check routing.
pub fn coordinates_for(address: &str) -> Coordinates {
    let n: usize = address.bytes().map(usize::from).sum();
    Coordinates::new((n % 90) as f64 + 0.5, -((n % 180) as f64) - 0.25)
}

/// Sink that records every write.
#[derive(Default)]
pub struct RecordingSink {
    writes: Mutex<HashMap<usize, Vec<Coordinates>>>,
}

impl RecordingSink {
    pub fn written_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.writes.lock().unwrap().keys().copied().collect();
        rows.sort_unstable();
        rows
    }

    pub fn writes_for(&self, row_index: usize) -> Vec<Coordinates> {
        self.writes
            .lock()
            .unwrap()
            .get(&row_index)
            .cloned()
            .unwrap_or_default()
    }
}

impl CoordinateSink for RecordingSink {
    fn write(&self, row_index: usize, coordinates: Coordinates) {
        self.writes
            .lock()
            .unwrap()
            .entry(row_index)
            .or_default()
            .push(coordinates);
    }
}

/// Geocoder that fails for a fixed set of addresses and records every call.
#[derive(Default)]
pub struct ScriptedGeocoder {
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedGeocoder {
    pub fn failing_on(addresses: &[&str]) -> Self {
        ScriptedGeocoder {
            failing: addresses.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Geocoder for ScriptedGeocoder {
    async fn lookup(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        self.calls.lock().unwrap().push(address.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.iter().any(|a| a == address) {
            Err(GeocodeError::NoResult)
        } else {
            Ok(coordinates_for(address))
        }
    }
}

/// Geocoder that tracks how many lookups are in flight at once.
pub struct InstrumentedGeocoder {
    active: AtomicUsize,
    max_observed: AtomicUsize,
    total: AtomicUsize,
    delay: Duration,
}

impl InstrumentedGeocoder {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(InstrumentedGeocoder {
            active: AtomicUsize::new(0),
            max_observed: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            delay,
        })
    }

    pub fn max_observed(&self) -> usize {
        self.max_observed.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl Geocoder for InstrumentedGeocoder {
    async fn lookup(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let current = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_observed.fetch_max(current, Ordering::SeqCst);
        self.total.fetch_add(1, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(coordinates_for(address))
    }
}
