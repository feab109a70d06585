//! Per-map step progress with a batch bar for large runs

use std::path::Path;
use std::sync::LazyLock;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;

/// Display state of one map: name, steps applied, total steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MapState {
    name: String,
    step: usize,
    total: usize,
}

/// Coordinates progress display while rendering a batch of maps
///
/// Shows one step bar per map for the most recent maps, plus a batch bar once
/// the batch is too large to list individually
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    map_bars: Vec<ProgressBar>,
    maps: Vec<MapState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static STEP_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.green/white}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Maps: [{bar:40.green/white}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create an empty progress display
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            map_bars: Vec::new(),
            maps: Vec::new(),
        }
    }

    /// Prepare bars for a batch of `map_count` maps
    pub fn initialize(&mut self, map_count: usize) {
        if map_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(map_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..map_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(STEP_STYLE.clone());
            self.map_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Start tracking a map with `steps` operator steps
    pub fn start_map(&mut self, index: usize, path: &Path, steps: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.maps.len() {
            self.maps.resize(index + 1, MapState::default());
        }
        if let Some(state) = self.maps.get_mut(index) {
            *state = MapState {
                name,
                step: 0,
                total: steps,
            };
        }
        self.refresh();
    }

    /// Record that `step` steps of a map have started
    pub fn update_step(&mut self, index: usize, step: usize) {
        if let Some(state) = self.maps.get_mut(index) {
            state.step = step;
        }
        self.refresh();
    }

    /// Mark a map as rendered
    pub fn complete_map(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.maps.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.step = state.total;
        }
        self.refresh();
    }

    /// Remove every bar from the terminal
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All maps rendered");
        }
        let _ = self.multi_progress.clear();
    }

    /// Show the most recently started maps on the available bars
    fn refresh(&self) {
        let started: Vec<&MapState> = self.maps.iter().filter(|map| !map.name.is_empty()).collect();
        let first_visible = started.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = started.get(first_visible..).unwrap_or(&[]);

        for (bar, map) in self.map_bars.iter().zip(visible) {
            bar.set_length(map.total as u64);
            bar.set_position(map.step as u64);
            let width = map.total.to_string().len();
            bar.set_message(format!("{:>width$}/{}", map.step, map.total));
            bar.set_prefix(map.name.clone());
        }

        for bar in self.map_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
