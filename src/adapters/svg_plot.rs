//! SVG chart rendering of daily income and expense.

use crate::domain::config::{PLOT_PADDING, PlotConfig};
use crate::domain::error::LedgerError;
use crate::domain::summary::{DailyPoint, DailySeries};
use crate::ports::plot_port::PlotPort;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::fs;
use std::path::PathBuf;

const INCOME_COLOR: &str = "green";
const EXPENSE_COLOR: &str = "red";
const GRID_LINES: usize = 5;

pub struct SvgPlotAdapter {
    output: PathBuf,
    width: f64,
    height: f64,
    date_format: String,
}

impl SvgPlotAdapter {
    pub fn new(config: &PlotConfig, date_format: impl Into<String>) -> Self {
        Self {
            output: config.output.clone(),
            width: f64::from(config.width),
            height: f64::from(config.height),
            date_format: date_format.into(),
        }
    }

    /// Build the full SVG document for a series.
    pub fn render(&self, series: &DailySeries, title: &str) -> String {
        let width = self.width;
        let height = self.height;
        let padding = f64::from(PLOT_PADDING);

        let plot_width = width - 2.0 * padding;
        let plot_height = height - 2.0 * padding;

        let max_value = to_f64(series.max_value());
        let scale_y = if max_value > 0.0 {
            plot_height / max_value
        } else {
            1.0
        };
        let scale_x = if series.len() > 1 {
            plot_width / (series.len() - 1) as f64
        } else {
            0.0
        };
        // A single day is drawn in the middle of the x axis.
        let offset_x = if series.len() == 1 {
            plot_width / 2.0
        } else {
            0.0
        };

        let points = |value: fn(&DailyPoint) -> Decimal| -> String {
            series
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let x = padding + offset_x + i as f64 * scale_x;
                    let y = height - padding - to_f64(value(p)) * scale_y;
                    format!("{:.1},{:.1}", x, y)
                })
                .collect::<Vec<_>>()
                .join(" ")
        };
        let income_points = points(|p| p.income);
        let expense_points = points(|p| p.expense);

        let mut grid = String::new();
        for i in 0..=GRID_LINES {
            let frac = i as f64 / GRID_LINES as f64;
            let y = height - padding - frac * plot_height;
            grid.push_str(&format!(
                "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#dddddd\" />\n",
                padding,
                y,
                width - padding,
                y
            ));
            grid.push_str(&format!(
                "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"end\">{:.2}</text>\n",
                padding - 6.0,
                y + 3.0,
                max_value * frac
            ));
        }

        let first = series
            .points
            .first()
            .map(|p| p.date.format(&self.date_format).to_string())
            .unwrap_or_default();
        let last = series
            .points
            .last()
            .map(|p| p.date.format(&self.date_format).to_string())
            .unwrap_or_default();

        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
  <rect width="100%" height="100%" fill="white" />
  <text x="{cx:.1}" y="{title_y:.1}" font-size="16" text-anchor="middle">{title}</text>
{grid}  <line x1="{p:.1}" y1="{p:.1}" x2="{p:.1}" y2="{base:.1}" stroke="black" />
  <line x1="{p:.1}" y1="{base:.1}" x2="{right:.1}" y2="{base:.1}" stroke="black" />
  <text x="{p:.1}" y="{date_y:.1}" font-size="10" text-anchor="start">{first}</text>
  <text x="{right:.1}" y="{date_y:.1}" font-size="10" text-anchor="end">{last}</text>
  <text x="{cx:.1}" y="{xlabel_y:.1}" font-size="12" text-anchor="middle">Date</text>
  <text x="14" y="{cy:.1}" font-size="12" text-anchor="middle" transform="rotate(-90 14 {cy:.1})">Amount</text>
  <polyline fill="none" stroke="{income_color}" stroke-width="2" points="{income_points}" />
  <polyline fill="none" stroke="{expense_color}" stroke-width="2" points="{expense_points}" />
  <rect x="{legend_x:.1}" y="{legend_y:.1}" width="10" height="10" fill="{income_color}" />
  <text x="{legend_text_x:.1}" y="{legend_text_y:.1}" font-size="11">Income</text>
  <rect x="{legend_x:.1}" y="{legend_y2:.1}" width="10" height="10" fill="{expense_color}" />
  <text x="{legend_text_x:.1}" y="{legend_text_y2:.1}" font-size="11">Expense</text>
</svg>
"##,
            w = width,
            h = height,
            cx = width / 2.0,
            cy = height / 2.0,
            title_y = padding / 2.0,
            title = escape_xml(title),
            grid = grid,
            p = padding,
            base = height - padding,
            right = width - padding,
            date_y = height - padding + 16.0,
            xlabel_y = height - padding / 4.0,
            first = first,
            last = last,
            income_color = INCOME_COLOR,
            expense_color = EXPENSE_COLOR,
            income_points = income_points,
            expense_points = expense_points,
            legend_x = width - padding - 80.0,
            legend_y = padding,
            legend_y2 = padding + 16.0,
            legend_text_x = width - padding - 65.0,
            legend_text_y = padding + 9.0,
            legend_text_y2 = padding + 25.0,
        )
    }
}

impl PlotPort for SvgPlotAdapter {
    fn plot(&self, series: &DailySeries, title: &str) -> Result<PathBuf, LedgerError> {
        if series.is_empty() {
            return Err(LedgerError::NothingToPlot);
        }
        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.output, self.render(series, title))?;
        log::info!(
            "wrote plot of {} days to {}",
            series.len(),
            self.output.display()
        );
        Ok(self.output.clone())
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
