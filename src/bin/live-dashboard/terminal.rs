use home_telemetry::chart::{ChartSeries, ChartSink};
use tracing::info;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Draws each series as a one-line sparkline in the log.
#[derive(Debug, Default)]
pub struct TerminalChart;

impl ChartSink for TerminalChart {
    fn render(&mut self, series: &ChartSeries) {
        let Some((min, max, last)) = series.stats() else {
            info!("{}: no data", series.metric.label());
            return;
        };

        let unit = series.metric.unit();
        info!(
            "{} {} last {last:.1}{unit} (min {min:.1}{unit} / max {max:.1}{unit}, {} points)",
            series.metric.label(),
            sparkline(&series.values, min, max),
            series.len()
        );
    }
}

fn sparkline(values: &[f64], min: f64, max: f64) -> String {
    let range = (max - min).max(f64::EPSILON);
    values
        .iter()
        .map(|v| {
            let level = ((v - min) / range * 7.0).round() as usize;
            BARS[level.min(7)]
        })
        .collect()
}
