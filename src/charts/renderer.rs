//! Static Chart Renderer
//! Renders chart datasets to PNG bytes with plotters, for image export.
//! The layout mirrors the interactive cards: title, category x-axis,
//! currency y-axis.

use crate::charts::{ChartData, ChartKind};
use crate::fmt;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

const REVENUE: RGBColor = RGBColor(34, 197, 94);
const EXPENSE: RGBColor = RGBColor(239, 68, 68);
const PROFIT: RGBColor = RGBColor(59, 130, 246);

const PALETTE: [RGBColor; 10] = [
    RGBColor(59, 130, 246),
    RGBColor(239, 68, 68),
    RGBColor(16, 185, 129),
    RGBColor(245, 158, 11),
    RGBColor(139, 92, 246),
    RGBColor(236, 72, 153),
    RGBColor(6, 182, 212),
    RGBColor(132, 204, 22),
    RGBColor(249, 115, 22),
    RGBColor(99, 102, 241),
];

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Nothing to render for {0}")]
    EmptyChart(&'static str),
}

type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Renders chart datasets into static PNG images.
pub struct ChartRenderer;

impl ChartRenderer {
    /// Render a chart dataset to PNG bytes.
    pub fn render_to_png(
        data: &ChartData,
        symbol: &str,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        if data.is_empty() {
            return Err(RenderError::EmptyChart(data.kind.title()));
        }

        let mut buffer = vec![255u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            match data.kind {
                ChartKind::MonthlyOverview => Self::draw_monthly(&root, data, symbol)?,
                ChartKind::RevenueTrend => Self::draw_trend(&root, data, symbol)?,
                ChartKind::CustomerPerformance
                | ChartKind::PaymentStatus
                | ChartKind::ExpenseCategories => Self::draw_ranked_bars(&root, data, symbol)?,
            }

            root.present().map_err(draw_err)?;
        }

        let img = image::RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::Draw("pixel buffer size mismatch".to_string()))?;
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    fn draw_monthly(root: &Canvas, data: &ChartData, symbol: &str) -> Result<(), RenderError> {
        let months = &data.months;
        let labels: Vec<String> = months.iter().map(|m| m.label()).collect();

        let y_max = months
            .iter()
            .map(|m| m.revenue.max(m.expenses))
            .fold(1.0, f64::max)
            * 1.1;
        let y_min = months.iter().map(|m| m.profit().min(0.0)).fold(0.0, f64::min) * 1.1;
        let n = months.len() as f64;

        let mut chart = ChartBuilder::on(root)
            .caption(data.kind.title(), ("sans-serif", 26))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(90)
            .build_cartesian_2d(-0.5..n - 0.5, y_min..y_max)
            .map_err(draw_err)?;

        let symbol_owned = symbol.to_string();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(months.len())
            .x_label_formatter(&|x| index_label(*x, &labels))
            .y_label_formatter(&move |y| fmt::currency(&symbol_owned, *y))
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(months.iter().enumerate().map(|(i, m)| {
                Rectangle::new(
                    [(i as f64 - 0.35, 0.0), (i as f64 - 0.03, m.revenue)],
                    REVENUE.filled(),
                )
            }))
            .map_err(draw_err)?
            .label("Revenue")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], REVENUE.filled()));

        chart
            .draw_series(months.iter().enumerate().map(|(i, m)| {
                Rectangle::new(
                    [(i as f64 + 0.03, 0.0), (i as f64 + 0.35, m.expenses)],
                    EXPENSE.filled(),
                )
            }))
            .map_err(draw_err)?
            .label("Expenses")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], EXPENSE.filled()));

        chart
            .draw_series(LineSeries::new(
                months.iter().enumerate().map(|(i, m)| (i as f64, m.profit())),
                PROFIT.stroke_width(2),
            ))
            .map_err(draw_err)?
            .label("Net Profit")
            .legend(|(x, y)| {
                plotters::element::PathElement::new(vec![(x, y), (x + 12, y)], PROFIT.stroke_width(2))
            });

        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(draw_err)?;

        Ok(())
    }

    fn draw_trend(root: &Canvas, data: &ChartData, symbol: &str) -> Result<(), RenderError> {
        let months = &data.months;
        let labels: Vec<String> = months.iter().map(|m| m.label()).collect();
        let y_max = months.iter().map(|m| m.revenue).fold(1.0, f64::max) * 1.1;
        let n = months.len() as f64;

        let mut chart = ChartBuilder::on(root)
            .caption(data.kind.title(), ("sans-serif", 26))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(90)
            .build_cartesian_2d(-0.5..n - 0.5, 0.0..y_max)
            .map_err(draw_err)?;

        let symbol_owned = symbol.to_string();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(months.len())
            .x_label_formatter(&|x| index_label(*x, &labels))
            .y_label_formatter(&move |y| fmt::currency(&symbol_owned, *y))
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(AreaSeries::new(
                months.iter().enumerate().map(|(i, m)| (i as f64, m.revenue)),
                0.0,
                PROFIT.mix(0.2),
            ))
            .map_err(draw_err)?;

        chart
            .draw_series(LineSeries::new(
                months.iter().enumerate().map(|(i, m)| (i as f64, m.revenue)),
                PROFIT.stroke_width(2),
            ))
            .map_err(draw_err)?;

        Ok(())
    }

    fn draw_ranked_bars(root: &Canvas, data: &ChartData, symbol: &str) -> Result<(), RenderError> {
        let entries = &data.entries;
        let labels: Vec<String> = entries.iter().map(|e| e.label.clone()).collect();
        let y_max = entries.iter().map(|e| e.total).fold(1.0, f64::max) * 1.1;
        let n = entries.len() as f64;

        let mut chart = ChartBuilder::on(root)
            .caption(data.kind.title(), ("sans-serif", 26))
            .margin(15)
            .x_label_area_size(90)
            .y_label_area_size(90)
            .build_cartesian_2d(-0.5..n - 0.5, 0.0..y_max)
            .map_err(draw_err)?;

        let symbol_owned = symbol.to_string();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(entries.len())
            .x_label_formatter(&|x| index_label(*x, &labels))
            // Rotate long category/customer names so they stay readable.
            .x_label_style(
                ("sans-serif", 13)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_formatter(&move |y| fmt::currency(&symbol_owned, *y))
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(entries.iter().enumerate().map(|(i, e)| {
                Rectangle::new(
                    [(i as f64 - 0.3, 0.0), (i as f64 + 0.3, e.total)],
                    PALETTE[i % PALETTE.len()].filled(),
                )
            }))
            .map_err(draw_err)?;

        Ok(())
    }
}

/// Map a fractional axis position back to its category label.
fn index_label(x: f64, labels: &[String]) -> String {
    let idx = x.round();
    if idx < 0.0 || (idx - x).abs() > 1e-6 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::build_chart_data;
    use crate::data::records::SaleRecord;
    use chrono::NaiveDate;

    fn sample_charts() -> std::collections::HashMap<ChartKind, ChartData> {
        let sales = vec![
            SaleRecord {
                date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
                customer: "Ama".to_string(),
                total_amount: 150.0,
                payment_status: "Paid".to_string(),
                payment_method: "Cash".to_string(),
                total_trays: 5,
            },
            SaleRecord {
                date: NaiveDate::from_ymd_opt(2025, 2, 5).unwrap(),
                customer: "Kojo".to_string(),
                total_amount: 250.0,
                payment_status: "Pending".to_string(),
                payment_method: "Momo".to_string(),
                total_trays: 8,
            },
        ];
        build_chart_data(&sales, &[])
    }

    #[test]
    fn renders_valid_png_bytes() {
        let charts = sample_charts();
        let png =
            ChartRenderer::render_to_png(&charts[&ChartKind::MonthlyOverview], "₵", 640, 480)
                .unwrap();
        // PNG magic bytes
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let charts = build_chart_data(&[], &[]);
        let result =
            ChartRenderer::render_to_png(&charts[&ChartKind::ExpenseCategories], "₵", 640, 480);
        assert!(matches!(result, Err(RenderError::EmptyChart(_))));
    }
}
