use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::ledger::YearMonth;
use crate::models::Category;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{bar_value, chart_value, compact_amount, format_amount, percent_of};
use crate::view::{Chart as ViewChart, ChartLayout, LegendOrientation, ViewMode};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Length(1), // View selector
            Constraint::Min(8),    // Active chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_view_tabs(f, chunks[1], app);
    render_chart(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    let s = &app.summary;
    render_card(f, cards[0], "Total Income", s.income, theme::GREEN);
    render_card(f, cards[1], "Total Expenses", s.expenses, theme::RED);
    render_card(f, cards[2], "Investments", s.investments, theme::MAUVE);
    render_card(f, cards[3], "Savings", s.savings, theme::YELLOW);
    render_card(
        f,
        cards[4],
        "Net Worth",
        s.net_worth,
        if s.net_worth >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_view_tabs(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(" View: ", theme::dim_style())];
    let visible = app.view.visibility();
    for (i, (mode, shown)) in ViewMode::all().iter().zip(visible).enumerate() {
        let label = format!("{}:{mode}", i + 1);
        if shown {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, theme::dim_style()));
        }
        spans.push(Span::raw("   "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn chart_block(layout: &ChartLayout) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {} ", layout.title), theme::title_style()))
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let layout = app.view.layout();
    if app.series.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No transactions yet", theme::dim_style())),
            Line::from(Span::styled(
                "Add one with :add today Income 1000 Salary",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(chart_block(&layout));
        f.render_widget(msg, area);
        return;
    }

    match app.view.chart(&app.series) {
        ViewChart::NetWorth(points) => render_net_worth(f, area, &layout, points),
        ViewChart::ExpensesByCategory(slices) => render_by_category(f, area, &layout, slices),
        ViewChart::IncomeExpenseByMonth { income, expenses } => {
            render_by_month(f, area, &layout, income, expenses)
        }
    }
}

fn render_net_worth(
    f: &mut Frame,
    area: Rect,
    layout: &ChartLayout,
    points: &BTreeMap<NaiveDate, Decimal>,
) {
    let (Some(first), Some(last)) = (points.keys().next(), points.keys().next_back()) else {
        return;
    };
    let origin = *first;
    let data: Vec<(f64, f64)> = points
        .iter()
        .map(|(date, value)| ((*date - origin).num_days() as f64, chart_value(*value)))
        .collect();

    let span_days = ((*last - origin).num_days() as f64).max(1.0);
    let (mut y_min, mut y_max) = data
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), (_, y)| (lo.min(*y), hi.max(*y)));
    if (y_max - y_min).abs() < f64::EPSILON {
        y_max += 1.0;
        y_min -= 1.0;
    }

    let dataset = Dataset::default()
        .name("Net Worth")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::ACCENT))
        .data(&data);

    let mut x_axis = Axis::default()
        .style(theme::dim_style())
        .bounds([0.0, span_days])
        .labels(vec![first.year().to_string(), last.year().to_string()]);
    if let Some(title) = layout.x_axis {
        x_axis = x_axis.title(title);
    }

    let mut y_axis = Axis::default()
        .style(theme::dim_style())
        .bounds([y_min, y_max])
        .labels(vec![
            compact_amount(y_min),
            compact_amount((y_min + y_max) / 2.0),
            compact_amount(y_max),
        ]);
    if let Some(title) = layout.y_axis {
        y_axis = y_axis.title(title);
    }

    let chart = Chart::new(vec![dataset])
        .block(chart_block(layout))
        .x_axis(x_axis)
        .y_axis(y_axis);
    f.render_widget(chart, area);
}

fn render_by_category(
    f: &mut Frame,
    area: Rect,
    layout: &ChartLayout,
    slices: &BTreeMap<Category, Decimal>,
) {
    let block = chart_block(layout);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let total: Decimal = slices.values().copied().sum();
    let legend: Vec<Span> = slices
        .iter()
        .flat_map(|(category, amount)| {
            [
                Span::styled("■ ", Style::default().fg(theme::category_color(*category))),
                Span::styled(
                    format!("{category} {}%   ", percent_of(*amount, total)),
                    theme::normal_style(),
                ),
            ]
        })
        .collect();

    let (legend_area, chart_area) = split_legend(inner, layout.legend);
    f.render_widget(Paragraph::new(Line::from(legend)), legend_area);

    let bars: Vec<Bar> = slices
        .iter()
        .map(|(category, amount)| {
            let color = theme::category_color(*category);
            Bar::default()
                .value(bar_value(*amount))
                .label(Line::from(category.as_str()))
                .text_value(format!(
                    "{} ({}%)",
                    format_amount(*amount),
                    percent_of(*amount, total)
                ))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1);
    f.render_widget(chart, chart_area);
}

fn render_by_month(
    f: &mut Frame,
    area: Rect,
    layout: &ChartLayout,
    income: &BTreeMap<YearMonth, Decimal>,
    expenses: &BTreeMap<YearMonth, Decimal>,
) {
    let block = chart_block(layout);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut caption = vec![
        Span::styled("■ ", theme::income_style()),
        Span::styled("Income   ", theme::normal_style()),
        Span::styled("■ ", theme::expense_style()),
        Span::styled("Expenses", theme::normal_style()),
    ];
    if let (Some(x), Some(y)) = (layout.x_axis, layout.y_axis) {
        caption.push(Span::styled(format!("      x: {x}  y: {y}"), theme::dim_style()));
    }
    let (caption_area, chart_area) = split_legend(inner, layout.legend);
    f.render_widget(Paragraph::new(Line::from(caption)), caption_area);

    let mut months: Vec<YearMonth> = income.keys().chain(expenses.keys()).copied().collect();
    months.sort();
    months.dedup();

    // Newest months win when the terminal is too narrow for all of them.
    let group_width = 2 * 5 + 2;
    let fit = (chart_area.width as usize / group_width).max(1);
    let skip = months.len().saturating_sub(fit);

    let mut chart = BarChart::default().bar_width(5).bar_gap(0).group_gap(2);
    for month in months.iter().skip(skip) {
        let bars = [
            month_bar(income.get(month), theme::income_style()),
            month_bar(expenses.get(month), theme::expense_style()),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(month.to_string()))
                .bars(&bars),
        );
    }
    f.render_widget(chart, chart_area);
}

fn month_bar(amount: Option<&Decimal>, style: Style) -> Bar<'static> {
    let amount = amount.copied().unwrap_or(Decimal::ZERO);
    Bar::default()
        .value(bar_value(amount))
        .text_value(compact_amount(chart_value(amount)))
        .style(style)
        .value_style(style.add_modifier(Modifier::REVERSED))
}

/// One row for the legend; above the chart when horizontal, below otherwise.
fn split_legend(area: Rect, orientation: LegendOrientation) -> (Rect, Rect) {
    let legend_first = orientation == LegendOrientation::Horizontal;
    let constraints = if legend_first {
        [Constraint::Length(1), Constraint::Min(1)]
    } else {
        [Constraint::Min(1), Constraint::Length(1)]
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    if legend_first {
        (rows[0], rows[1])
    } else {
        (rows[1], rows[0])
    }
}
