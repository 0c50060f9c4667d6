use super::engine::{GrowthCallback, GrowthStats};
use super::tree::TickReport;

/// Logs a progress line every `interval` ticks
pub struct ConsoleGrowthCallback {
    interval: u64,
}

impl ConsoleGrowthCallback {
    pub fn new(interval: u64) -> Self {
        Self { interval: interval.max(1) }
    }
}

impl GrowthCallback for ConsoleGrowthCallback {
    fn on_tick(&mut self, report: &TickReport) {
        if report.tick % self.interval == 0 {
            log::info!(
                "Tick {}: {} branches (+{} this tick, {} stopped)",
                report.tick, report.branch_count, report.branches_spawned, report.branches_stopped
            );
        }
    }

    fn on_fully_grown(&mut self, stats: &GrowthStats) {
        log::info!(
            "Tree fully grown at tick {} with {} branches",
            stats.age, stats.branch_count
        );
    }

    fn on_run_complete(&mut self, stats: &GrowthStats) {
        log::info!(
            "Run complete: age {}, {} branches, total length {:.1}",
            stats.age, stats.branch_count, stats.total_length
        );
    }
}

// For a render loop on another thread
pub struct ChannelGrowthCallback {
    sender: std::sync::mpsc::Sender<GrowthMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GrowthMessage {
    Tick(TickReport),
    FullyGrown(GrowthStats),
    RunComplete(GrowthStats),
}

impl ChannelGrowthCallback {
    pub fn new(sender: std::sync::mpsc::Sender<GrowthMessage>) -> Self {
        Self { sender }
    }
}

impl GrowthCallback for ChannelGrowthCallback {
    fn on_tick(&mut self, report: &TickReport) {
        let _ = self.sender.send(GrowthMessage::Tick(*report));
    }

    fn on_fully_grown(&mut self, stats: &GrowthStats) {
        let _ = self.sender.send(GrowthMessage::FullyGrown(stats.clone()));
    }

    fn on_run_complete(&mut self, stats: &GrowthStats) {
        let _ = self.sender.send(GrowthMessage::RunComplete(stats.clone()));
    }
}
