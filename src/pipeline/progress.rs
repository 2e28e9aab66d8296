// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for document embedding
// reference: uses indicatif for progress bars and tracks embedding metrics

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub documents_indexed: usize,
    pub chunks_embedded: usize,
    pub batches_sent: usize,
    pub duration_secs: f64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunks_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.chunks_embedded as f64 / self.duration_secs
    }

    pub fn average_batch_size(&self) -> f64 {
        if self.batches_sent == 0 {
            return 0.0;
        }
        self.chunks_embedded as f64 / self.batches_sent as f64
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    documents_indexed: Arc<AtomicUsize>,
    chunks_embedded: Arc<AtomicUsize>,
    batches_sent: Arc<AtomicUsize>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn with_color(total_chunks: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_chunks as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self::from_bars(main_bar, detail_bar)
    }

    /// Counts without drawing; used when embedding runs behind the web UI.
    pub fn hidden(total_chunks: usize) -> Self {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let main_bar = multi_progress.add(ProgressBar::new(total_chunks as u64));
        let detail_bar = multi_progress.add(ProgressBar::new(0));
        Self::from_bars(main_bar, detail_bar)
    }

    fn from_bars(main_bar: ProgressBar, detail_bar: ProgressBar) -> Self {
        Self {
            main_bar,
            detail_bar,
            documents_indexed: Arc::new(AtomicUsize::new(0)),
            chunks_embedded: Arc::new(AtomicUsize::new(0)),
            batches_sent: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn set_total(&self, total_chunks: usize) {
        self.main_bar.set_length(total_chunks as u64);
    }

    pub fn inc_batch(&self, chunks: usize) {
        self.batches_sent.fetch_add(1, Ordering::SeqCst);
        self.chunks_embedded.fetch_add(chunks, Ordering::SeqCst);
        self.main_bar.inc(chunks as u64);
        self.update_detail_bar();
    }

    pub fn add_documents(&self, count: usize) {
        self.documents_indexed.fetch_add(count, Ordering::SeqCst);
        self.update_detail_bar();
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Embedding complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            documents_indexed: self.documents_indexed.load(Ordering::SeqCst),
            chunks_embedded: self.chunks_embedded.load(Ordering::SeqCst),
            batches_sent: self.batches_sent.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs_f64(),
        }
    }

    fn update_detail_bar(&self) {
        let documents = self.documents_indexed.load(Ordering::SeqCst);
        let batches = self.batches_sent.load(Ordering::SeqCst);

        let message = format!("Documents: {} | Batches: {}", documents, batches);

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({eta}) {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} chunks ({eta}) {msg}"
    };
    let progress_chars = if colored { "█▓▒░" } else { "=>-" };

    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        bar.set_style(style.progress_chars(progress_chars));
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stats_calculations() {
        let stats = PipelineStats {
            documents_indexed: 4,
            chunks_embedded: 100,
            batches_sent: 10,
            duration_secs: 10.0,
        };

        assert_eq!(stats.chunks_per_second(), 10.0);
        assert_eq!(stats.average_batch_size(), 10.0);
    }

    #[test]
    fn test_pipeline_stats_zero_duration() {
        let stats = PipelineStats::new();
        assert_eq!(stats.chunks_per_second(), 0.0);
        assert_eq!(stats.average_batch_size(), 0.0);
    }

    #[test]
    fn test_progress_tracker_counts() {
        let tracker = ProgressTracker::hidden(25);

        tracker.add_documents(2);
        tracker.inc_batch(10);
        tracker.inc_batch(10);
        tracker.inc_batch(5);

        let stats = tracker.get_stats();
        assert_eq!(stats.documents_indexed, 2);
        assert_eq!(stats.chunks_embedded, 25);
        assert_eq!(stats.batches_sent, 3);
    }
}
