//! Security activity chart rendered as sparkline rows

use crate::events::ActivityHistory;
use crate::simulation::StateView;

const HIGH: char = '█';
const LOW: char = '▁';

/// Render a 0/1 series as a sparkline, one character per sample
pub fn sparkline(values: impl IntoIterator<Item = u8>) -> String {
    values.into_iter().map(|value| if value > 0 { HIGH } else { LOW }).collect()
}

/// Motion and access rows over the chart history, oldest on the left
pub fn activity_chart(view: &StateView<'_>) -> String {
    render_history(view.activity)
}

fn render_history(history: &ActivityHistory) -> String {
    let mut chart = format!("Security Activity ({}/{})", history.len(), history.capacity());

    let (first, last) = match (history.iter().next(), history.latest()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            chart.push_str("\n  No activity recorded yet");
            return chart;
        }
    };

    chart.push_str(&format!("\n  Motion {}", sparkline(history.iter().map(|p| p.motion))));
    chart.push_str(&format!("\n  Access {}", sparkline(history.iter().map(|p| p.access))));
    chart.push_str(&format!("\n         {} .. {}", first.time, last.time));
    chart
}
