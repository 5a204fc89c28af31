//! Widgets drawing dashboard views

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Map, MapResolution, Points};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph,
    Row, Table, Tabs, Wrap,
};
use ratatui::Frame;

use super::DashboardState;
use crate::view::{
    format_number, BarView, ChartView, MapView, Metric, Panel, SeriesKind, Tab, TableView,
    TextBlock, Tone,
};

const PALETTE: [Color; 7] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
    Color::White,
];

const ACCENT: Color = Color::Rgb(210, 105, 30);

fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(ACCENT))
}

pub fn render_header(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let filter = state.filter();
    let refresh = if state.timer().is_active() {
        format!("auto {}s", state.timer().interval().as_secs())
    } else {
        "auto off".to_string()
    };

    let line = Line::from(vec![
        Span::styled(
            " ANALYSE DE LA CONSOMMATION, IMPACTS ET STRATÉGIES DE PRÉVENTION ",
            Style::default().fg(Color::Gray),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Période {}-{}", filter.first_year(), filter.last_year()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("{} territoire(s)", filter.territories.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Dernière mise à jour: {}", state.last_refresh.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(" | "),
        Span::styled(refresh, Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Alcoolisme dans les DROM-COM - Dashboard stratégique ")
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .border_style(Style::default().fg(ACCENT));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

pub fn render_section_tabs(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let titles: Vec<Line> = state
        .sections()
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, s.title)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(state.section_index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

pub fn render_sub_tabs(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let titles: Vec<Line> = state
        .current_section()
        .map(|s| s.tabs.iter().map(|t| Line::from(t.title.clone())).collect())
        .unwrap_or_default();

    let tabs = Tabs::new(titles)
        .select(state.tab_index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED));
    frame.render_widget(tabs, area);
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Improving => Color::Green,
        Tone::Worsening => Color::Red,
        Tone::Neutral => Color::Gray,
    }
}

pub fn render_metrics(frame: &mut Frame, area: Rect, metrics: &[Metric]) {
    if metrics.is_empty() {
        return;
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, metrics.len() as u32); metrics.len()])
        .split(area);

    for (metric, column) in metrics.iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(Span::styled(
                metric.value.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                metric.delta.clone(),
                Style::default().fg(tone_color(metric.tone)),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(panel_block(&metric.label)),
            *column,
        );
    }
}

/// Panels of a tab laid out two per row
pub fn render_tab(frame: &mut Frame, area: Rect, tab: &Tab) {
    if tab.panels.is_empty() {
        return;
    }
    let rows: Vec<&[Panel]> = tab.panels.chunks(2).collect();
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows.len() as u32); rows.len()])
        .split(area);

    for (panels, row_area) in rows.iter().zip(row_areas.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, panels.len() as u32); panels.len()])
            .split(*row_area);
        for (panel, cell) in panels.iter().zip(cells.iter()) {
            render_panel(frame, *cell, panel);
        }
    }
}

pub fn render_panel(frame: &mut Frame, area: Rect, panel: &Panel) {
    match panel {
        Panel::Chart(chart) => render_chart(frame, area, chart),
        Panel::Bars(bars) => render_bars(frame, area, bars),
        Panel::Map(map) => render_map(frame, area, map),
        Panel::Table(table) => render_table(frame, area, table),
        Panel::Text(text) => render_text(frame, area, text),
    }
}

fn padded(bounds: [f64; 2]) -> [f64; 2] {
    let span = bounds[1] - bounds[0];
    if span == 0.0 {
        [bounds[0] - 1.0, bounds[1] + 1.0]
    } else {
        [bounds[0] - span * 0.05, bounds[1] + span * 0.05]
    }
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| Span::raw(format_number(*v)))
        .collect()
}

fn render_chart(frame: &mut Frame, area: Rect, chart: &ChartView) {
    let block = panel_block(&chart.title);
    let Some((x_bounds, y_bounds)) = chart.bounds() else {
        let empty = Paragraph::new("Aucune donnée sur la période").block(block);
        frame.render_widget(empty, area);
        return;
    };

    let mut y_bounds = padded(y_bounds);
    if chart.series.iter().any(|s| s.kind == SeriesKind::Area) {
        y_bounds[0] = 0.0;
    }
    let x_bounds = if x_bounds[0] == x_bounds[1] {
        padded(x_bounds)
    } else {
        x_bounds
    };

    let guide_points: Vec<(f64, f64)> = chart
        .guide
        .as_ref()
        .map(|g| vec![(x_bounds[0], g.value), (x_bounds[1], g.value)])
        .unwrap_or_default();

    let mut datasets: Vec<Dataset> = chart
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let (marker, graph_type) = match series.kind {
                SeriesKind::Line => (symbols::Marker::Braille, GraphType::Line),
                SeriesKind::Area => (symbols::Marker::HalfBlock, GraphType::Bar),
                SeriesKind::Scatter => (symbols::Marker::Dot, GraphType::Scatter),
            };
            Dataset::default()
                .name(series.name.clone())
                .marker(marker)
                .graph_type(graph_type)
                .style(Style::default().fg(PALETTE[i % PALETTE.len()]))
                .data(&series.points)
        })
        .collect();

    if let Some(guide) = &chart.guide {
        datasets.push(
            Dataset::default()
                .name(guide.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(&guide_points),
        );
    }

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(chart.x_label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(chart.y_label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );
    frame.render_widget(widget, area);
}

fn render_bars(frame: &mut Frame, area: Rect, view: &BarView) {
    // Bar heights are integers, so values are scaled to keep one decimal
    let bars: Vec<Bar> = view
        .bars
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            Bar::default()
                .value((value * 10.0).round().max(0.0) as u64)
                .text_value(format!("{} {}", format_number(*value), view.unit))
                .label(Line::from(label.clone()))
                .style(Style::default().fg(PALETTE[i % PALETTE.len()]))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel_block(&view.title))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn render_map(frame: &mut Frame, area: Rect, view: &MapView) {
    let max = view.markers.iter().map(|m| m.value).fold(0.0_f64, f64::max);

    let canvas = Canvas::default()
        .block(panel_block(&view.title))
        .marker(symbols::Marker::Braille)
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();
            for marker in &view.markers {
                // Red for the heaviest consumers, green for the lightest
                let color = if max > 0.0 && marker.value / max > 0.85 {
                    Color::Red
                } else if max > 0.0 && marker.value / max > 0.7 {
                    Color::Yellow
                } else {
                    Color::Green
                };
                ctx.draw(&Points {
                    coords: &[(marker.lon, marker.lat)],
                    color,
                });
                ctx.print(
                    marker.lon + 2.0,
                    marker.lat,
                    Line::from(Span::styled(
                        format!("{} {}", marker.label, format_number(marker.value)),
                        Style::default().fg(color),
                    )),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn render_table(frame: &mut Frame, area: Rect, view: &TableView) {
    let mut widths: Vec<u16> = view
        .headers
        .iter()
        .map(|h| h.chars().count() as u16)
        .collect();
    for row in &view.rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count() as u16);
        }
    }
    let constraints: Vec<Constraint> = widths.iter().map(|w| Constraint::Min(*w)).collect();

    let header = Row::new(view.headers.iter().map(|h| Cell::from(h.clone())))
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    let rows = view
        .rows
        .iter()
        .map(|row| Row::new(row.iter().map(|c| Cell::from(c.clone()))));

    let table = Table::new(rows, constraints)
        .header(header)
        .block(panel_block(&view.title))
        .column_spacing(2);
    frame.render_widget(table, area);
}

fn render_text(frame: &mut Frame, area: Rect, view: &TextBlock) {
    let mut lines = Vec::new();
    for section in &view.sections {
        lines.push(Line::from(Span::styled(
            section.heading.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )));
        for item in &section.items {
            lines.push(Line::from(format!("  • {}", item)));
        }
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel_block(&view.title))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

pub fn render_help(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let line = Line::from(vec![
        Span::styled(" ←/→", key),
        Span::raw(" section  "),
        Span::styled("↑/↓", key),
        Span::raw(" onglet  "),
        Span::styled("1-9", key),
        Span::raw(" aller à  "),
        Span::styled("r", key),
        Span::raw(" actualiser  "),
        Span::styled("a", key),
        Span::raw(" auto-actualisation  "),
        Span::styled("q", key),
        Span::raw(" quitter"),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DashboardFilter;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_padded_bounds() {
        assert_eq!(padded([5.0, 5.0]), [4.0, 6.0]);
        let p = padded([0.0, 100.0]);
        assert!((p[0] + 5.0).abs() < 1e-9 && (p[1] - 105.0).abs() < 1e-9);
    }

    #[test]
    fn test_every_tab_renders() {
        let mut state = DashboardState::new(DashboardFilter::default(), None).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();

        for _ in 0..state.sections().len() {
            let tabs = state.current_section().unwrap().tabs.len();
            for _ in 0..tabs {
                let tab = state.current_tab().unwrap().clone();
                terminal
                    .draw(|frame| {
                        let area = frame.area();
                        render_header(frame, Rect { height: 3, ..area }, &state);
                        render_tab(frame, Rect { y: 3, height: area.height - 3, ..area }, &tab);
                    })
                    .unwrap();
                state.next_tab();
            }
            state.next_section();
        }
    }

    #[test]
    fn test_metrics_render_values() {
        let state = DashboardState::new(DashboardFilter::default(), None).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(160, 4)).unwrap();
        terminal
            .draw(|frame| render_metrics(frame, frame.area(), state.metrics()))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("10.6L/pers/an"));
        assert!(text.contains("990"));
    }
}
