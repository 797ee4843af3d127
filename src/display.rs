//! Terminal chart rendering for energy profiles using crossterm.
//!
//! Draws the RMS energy curve as colored columns, overlays the detection
//! threshold as a dashed line and shades detected pause intervals in red.
//! Presentational only; detection never depends on this module.

use std::io::{self, Write};

use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};

use crate::energy::EnergyProfile;
use crate::pause_detector::PauseSegment;

const CHART_HEIGHT: usize = 12;
const LEFT_LABEL_WIDTH: usize = 10; // "  0.0150 |"

/// Downsample the RMS curve to `width` columns, keeping the maximum of each
/// bucket so short loud frames stay visible.
pub fn downsample_profile(profile: &EnergyProfile, width: usize) -> Vec<f32> {
    if profile.is_empty() || width == 0 {
        return Vec::new();
    }

    let len = profile.rms.len();
    let width = width.min(len);
    let mut columns = Vec::with_capacity(width);

    for col in 0..width {
        let start = col * len / width;
        let end = (((col + 1) * len / width).max(start + 1)).min(len);
        let max = profile.rms[start..end]
            .iter()
            .cloned()
            .fold(0.0_f32, f32::max);
        columns.push(max);
    }

    columns
}

/// Mark each chart column whose time range overlaps a pause segment.
pub fn pause_column_mask(
    profile: &EnergyProfile,
    width: usize,
    segments: &[PauseSegment],
) -> Vec<bool> {
    if profile.is_empty() || width == 0 {
        return Vec::new();
    }

    let len = profile.times.len();
    let width = width.min(len);
    let mut mask = vec![false; width];

    for col in 0..width {
        let start = col * len / width;
        let end = (((col + 1) * len / width).max(start + 1)).min(len);
        let t_start = profile.times[start];
        let t_end = profile.times[end - 1];

        mask[col] = segments
            .iter()
            .any(|s| s.start <= t_end && s.end >= t_start);
    }

    mask
}

/// Render the energy chart to stdout.
///
/// # Arguments
/// * `profile` - Energy profile to draw
/// * `threshold` - Detection threshold, drawn as a dashed horizontal line
/// * `segments` - Detected pauses, shaded in red
pub fn render_energy_chart(
    profile: &EnergyProfile,
    threshold: f32,
    segments: &[PauseSegment],
) -> Result<(), io::Error> {
    let mut stdout = io::stdout();

    if profile.is_empty() {
        println!("(no energy data to display)");
        return Ok(());
    }

    let (detected_width, _height) = terminal::size().unwrap_or((80, 24));
    let width = if detected_width < 80 { 80 } else { detected_width };
    let chart_width = (width as usize).saturating_sub(LEFT_LABEL_WIDTH + 1).max(40);

    let columns = downsample_profile(profile, chart_width);
    let mask = pause_column_mask(profile, chart_width, segments);
    let chart_width = columns.len();

    let peak = columns.iter().cloned().fold(threshold * 2.0, f32::max);
    let row_height = peak / CHART_HEIGHT as f32;
    let threshold_row = ((threshold / row_height) as usize).min(CHART_HEIGHT - 1);

    println!();
    println!("Energy profile (RMS)");

    for row in (0..CHART_HEIGHT).rev() {
        let level = row_height * row as f32;

        // Label the top row and the threshold row
        if row == CHART_HEIGHT - 1 {
            print!("{:8.4} |", peak);
        } else if row == threshold_row {
            print!("{:8.4} |", threshold);
        } else {
            print!("         |");
        }

        for (col, &value) in columns.iter().enumerate() {
            if value > level {
                let color = if mask[col] { Color::Red } else { Color::Green };
                execute!(stdout, SetForegroundColor(color), Print('█'), ResetColor)?;
            } else if row == threshold_row {
                execute!(stdout, SetForegroundColor(Color::Red), Print('-'), ResetColor)?;
            } else if mask[col] {
                execute!(stdout, SetForegroundColor(Color::DarkRed), Print('░'), ResetColor)?;
            } else {
                print!(" ");
            }
        }
        println!();
    }

    // Time axis
    print!("         +");
    for _ in 0..chart_width {
        print!("-");
    }
    println!();

    let duration = profile.times.last().copied().unwrap_or(0.0);
    let mid = duration / 2.0;
    let left = "0.00s".to_string();
    let mid_label = format!("{:.2}s", mid);
    let right = format!("{:.2}s", duration);
    let gap1 = (chart_width / 2).saturating_sub(left.len() + mid_label.len() / 2);
    let gap2 = chart_width
        .saturating_sub(chart_width / 2 + mid_label.len() - mid_label.len() / 2 + right.len());
    println!(
        "          {}{}{}{}{}",
        left,
        " ".repeat(gap1),
        mid_label,
        " ".repeat(gap2),
        right
    );

    println!();
    execute!(stdout, SetForegroundColor(Color::Green), Print("█"), ResetColor)?;
    print!(" energy  ");
    execute!(stdout, SetForegroundColor(Color::Red), Print("█"), ResetColor)?;
    print!(" pause  ");
    execute!(stdout, SetForegroundColor(Color::Red), Print("-"), ResetColor)?;
    println!(" threshold");

    stdout.flush()?;
    Ok(())
}
