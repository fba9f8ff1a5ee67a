use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{BarChart, Block, Cell, Clear, Gauge, Paragraph, Row, Table, TableState, Tabs, Wrap},
};
use std::time::Duration;
use tracing::trace;

use crate::badge;
use crate::domain::{ERPConfig, HELP_TEXT};
use crate::model::{Focus, Modus, Model, SidebarEntry};
use crate::pages::{ModalForm, Progress, StatCard, Trend};

const SIDEBAR_WIDTH: u16 = 26;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 6;
const STATS_HEIGHT: u16 = 5;
const PROGRESS_HEIGHT: u16 = 3;
const CHARTS_HEIGHT: u16 = 12;
const COLUMN_SPACING: u16 = 2;

const ACCENT: Color = Color::Cyan;
const STATUS_MESSAGE_FADE: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub struct DashboardUI {
    max_column_width: usize,
}

impl DashboardUI {
    pub fn new(config: &ERPConfig) -> Self {
        Self {
            max_column_width: config.max_column_width.max(3),
        }
    }

    pub fn draw(&self, model: &Model, frame: &mut Frame) {
        let [header, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let sidebar_width = if model.sidebar().collapsed {
            SIDEBAR_COLLAPSED_WIDTH
        } else {
            SIDEBAR_WIDTH
        };
        let [sidebar, content] =
            Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(0)]).areas(body);

        self.draw_header(model, frame, header);
        self.draw_sidebar(model, frame, sidebar);
        self.draw_content(model, frame, content);
        self.draw_status(model, frame, status);

        match model.modus() {
            Modus::MODAL => {
                if let Some(form) = &model.content().modal {
                    self.draw_modal(form, frame);
                }
            }
            Modus::RECORD => self.draw_record(model, frame),
            Modus::POPUP => self.draw_help(frame),
            Modus::TABLE | Modus::SEARCH => {}
        }
    }

    fn draw_header(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let role = model.role();
        let left = Line::from(vec![
            " ERP Pro ".bold().fg(Color::Black).bg(ACCENT),
            Span::raw(" "),
            Span::raw(model.content().title.clone()),
        ]);
        let right = Line::from(vec![
            Span::styled(role.name(), Style::new().bold()),
            Span::styled(format!(" [{}] ", role.permissions().join(", ")), Style::new().dim()),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(left), area);
        frame.render_widget(Paragraph::new(right), area);
    }

    fn draw_sidebar(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let sidebar = model.sidebar();
        let focused = model.focus() == Focus::SIDEBAR;

        let lines: Vec<Line> = sidebar
            .entries()
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let text = match *entry {
                    SidebarEntry::Page(page) if sidebar.collapsed => page.short().to_string(),
                    SidebarEntry::Page(page) => {
                        let marker = if page.children().is_empty() {
                            " "
                        } else if sidebar.is_open(page) {
                            "▾"
                        } else {
                            "▸"
                        };
                        format!("{marker} {}", page.nav_title())
                    }
                    SidebarEntry::Child(page, tab) => {
                        let title = page
                            .children()
                            .iter()
                            .find(|&&(_, t)| t == tab)
                            .map(|&(title, _)| title)
                            .unwrap_or_default();
                        format!("   └ {title}")
                    }
                };

                let mut style = Style::new();
                let active = match *entry {
                    SidebarEntry::Page(page) => page == model.page(),
                    SidebarEntry::Child(page, tab) => page == model.page() && tab == model.active_tab(),
                };
                if active {
                    style = style.fg(ACCENT).bold();
                }
                if focused && idx == sidebar.curser {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Line::styled(text, style)
            })
            .collect();

        let title = if sidebar.collapsed { "" } else { " Navigation " };
        let block = Block::bordered()
            .title(title)
            .border_style(focus_style(focused));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_content(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let content = model.content();
        let stats_height = if content.stats.is_empty() { 0 } else { STATS_HEIGHT };
        let progress_height = if content.progress.is_some() { PROGRESS_HEIGHT } else { 0 };
        let charts_height = if content.charts.is_empty() { 0 } else { CHARTS_HEIGHT };
        let tabs_height = if content.tabs.len() > 1 { 1 } else { 0 };

        let [title, stats, progress, charts, tabs, search, table] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(stats_height),
            Constraint::Length(progress_height),
            Constraint::Length(charts_height),
            Constraint::Length(tabs_height),
            Constraint::Length(1),
            Constraint::Min(4),
        ])
        .areas(area);

        let heading = vec![
            Line::from(content.title.clone().bold()),
            Line::from(content.subtitle.clone().dim()),
        ];
        frame.render_widget(Paragraph::new(heading), title);

        if !content.stats.is_empty() {
            self.draw_stats(&content.stats, frame, stats);
        }
        if let Some(p) = &content.progress {
            self.draw_progress(p, frame, progress);
        }
        if !content.charts.is_empty() {
            let areas = Layout::horizontal(
                content.charts.iter().map(|_| Constraint::Ratio(1, content.charts.len() as u32)),
            )
            .split(charts);
            for (chart, &area) in content.charts.iter().zip(areas.iter()) {
                let data: Vec<(&str, u64)> = chart.bars.iter().map(|(l, v)| (l.as_str(), *v)).collect();
                let inner_width = area.width.saturating_sub(2) as usize;
                let nbars = data.len().max(1);
                let bar_width = (inner_width / nbars).saturating_sub(1).clamp(1, 12) as u16;
                let block = Block::bordered()
                    .title(Line::from(chart.title.clone().bold()))
                    .title_bottom(Line::from(chart.description.clone().dim()));
                let barchart = BarChart::default()
                    .block(block)
                    .data(data.as_slice())
                    .bar_width(bar_width)
                    .bar_gap(1)
                    .bar_style(Style::new().fg(ACCENT))
                    .value_style(Style::new().fg(Color::Black).bg(ACCENT));
                frame.render_widget(barchart, area);
            }
        }
        if content.tabs.len() > 1 {
            let titles = content.tabs.iter().map(|t| t.title.clone());
            let tab_bar = Tabs::new(titles)
                .select(model.active_tab())
                .highlight_style(Style::new().fg(ACCENT).bold().underlined());
            frame.render_widget(tab_bar, tabs);
        }

        self.draw_search_line(model, frame, search);
        self.draw_table(model, frame, table);
    }

    fn draw_progress(&self, progress: &Progress, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(Line::from(progress.title.clone().bold()))
            .title_bottom(Line::from(progress.description.clone().dim()));
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::new().fg(ACCENT))
            .ratio(progress.ratio())
            .label(progress.label());
        frame.render_widget(gauge, area);
    }

    fn draw_stats(&self, stats: &[StatCard], frame: &mut Frame, area: Rect) {
        let areas = Layout::horizontal(stats.iter().map(|_| Constraint::Ratio(1, stats.len() as u32)))
            .split(area);
        for (card, &area) in stats.iter().zip(areas.iter()) {
            let mut lines = vec![Line::from(card.value.clone().bold())];
            if let Some(change) = card.change_text() {
                let (arrow, color) = match card.trend() {
                    Some(Trend::Decrease) => ("▼", Color::Red),
                    _ => ("▲", Color::Green),
                };
                lines.push(Line::styled(format!("{arrow} {change}"), Style::new().fg(color)));
            }
            let block = Block::bordered().title(Line::from(card.title.clone().dim()));
            frame.render_widget(Paragraph::new(lines).block(block), area);
        }
    }

    fn draw_search_line(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let table = model.table();
        let Some(key) = table.get_search_key() else {
            return;
        };
        let prompt = format!(" Search {key}: ");
        let line = if model.modus() == Modus::SEARCH {
            let input = model.last_input();
            let x = area.x + (prompt.chars().count() + input.curser_pos) as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
            Line::from(vec![
                Span::styled(prompt, Style::new().fg(ACCENT).bold()),
                Span::raw(input.input.clone()),
            ])
        } else if !table.state().search_text.is_empty() {
            Line::from(vec![
                Span::styled(prompt, Style::new().fg(ACCENT)),
                Span::raw(table.state().search_text.clone()),
                Span::styled("  (Esc clears)", Style::new().dim()),
            ])
        } else {
            Line::styled(format!(" / to search by {key}"), Style::new().dim())
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_table(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let content = model.content();
        let tab = &content.tabs[model.active_tab()];
        let table = &tab.table;
        let focused = model.focus() == Focus::CONTENT;

        let (first, last, total) = table.page_range();
        let footer = format!(
            " Showing {first} to {last} of {total} · Page {}/{} ",
            table.current_page(),
            table.page_count()
        );
        let block = Block::bordered()
            .title(Line::from(vec![
                Span::styled(format!(" {} ", tab.title), Style::new().bold()),
                Span::styled(format!("{} ", tab.description), Style::new().dim()),
            ]))
            .title_bottom(Line::from(footer).right_aligned())
            .border_style(focus_style(focused));

        if table.filtered_len() == 0 {
            let empty = Paragraph::new("No results.").centered().block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(
            table
                .columns()
                .iter()
                .enumerate()
                .map(|(idx, c)| Cell::from(header_cell(idx, c.sortable, &table.header_text(c)))),
        )
        .style(Style::new().bold().fg(ACCENT));

        let page_rows = table.page_rows();
        let mut widths: Vec<usize> = table
            .columns()
            .iter()
            .map(|c| table.header_text(c).chars().count() + 2)
            .collect();
        let rows: Vec<Row> = page_rows
            .iter()
            .map(|record| {
                let cells = table.columns().iter().enumerate().map(|(idx, column)| {
                    let text = clip(&table.cell_text(record, column), self.max_column_width);
                    widths[idx] = widths[idx].max(text.chars().count());
                    if column.badge {
                        let color = badge::badge(&record.text(&column.key)).variant.color();
                        Cell::from(Span::styled(text, Style::new().fg(color)))
                    } else {
                        Cell::from(text)
                    }
                });
                Row::new(cells.collect::<Vec<Cell>>())
            })
            .collect();

        let constraints = widths
            .iter()
            .map(|&w| Constraint::Length(w.min(self.max_column_width) as u16));
        let highlight = if focused {
            Style::new().add_modifier(Modifier::REVERSED)
        } else {
            Style::new().add_modifier(Modifier::BOLD)
        };
        let widget = Table::new(rows, constraints)
            .header(header)
            .block(block)
            .column_spacing(COLUMN_SPACING)
            .row_highlight_style(highlight);

        let mut state = TableState::default().with_selected(Some(model.curser_row()));
        trace!("Draw table page {} row {}", table.current_page(), model.curser_row());
        frame.render_stateful_widget(widget, area, &mut state);
    }

    fn draw_status(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let modus = match model.modus() {
            Modus::TABLE => match model.focus() {
                Focus::SIDEBAR => "NAV",
                Focus::CONTENT => "TABLE",
            },
            Modus::SEARCH => "SEARCH",
            Modus::MODAL => "FORM",
            Modus::RECORD => "RECORD",
            Modus::POPUP => "HELP",
        };
        let message_style = if model.last_status_message_update().elapsed() > STATUS_MESSAGE_FADE {
            Style::new().dim()
        } else {
            Style::new()
        };
        let line = Line::from(vec![
            Span::styled(format!(" {modus} "), Style::new().fg(Color::Black).bg(ACCENT).bold()),
            Span::raw(" "),
            Span::styled(model.status_message().to_string(), message_style),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_modal(&self, form: &ModalForm, frame: &mut Frame) {
        let area = popup_area(frame.area(), 60, 70);
        let label_width = form.fields.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

        let mut lines = vec![Line::from(form.description.clone().dim()), Line::default()];
        for (label, placeholder) in &form.fields {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:>label_width$}: "), Style::new().bold()),
                Span::styled(format!("[{placeholder}]"), Style::new().dim()),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", form.submit), Style::new().fg(Color::Black).bg(ACCENT)),
            Span::raw("  Enter to submit, Esc to cancel"),
        ]));

        let block = Block::bordered()
            .title(Line::from(form.title.clone().bold()))
            .border_style(Style::new().fg(ACCENT));
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_record(&self, model: &Model, frame: &mut Frame) {
        let area = popup_area(frame.area(), 70, 80);
        let fields = model.record_fields();
        let view = model.record_view();
        let key_width = fields.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0) as u16;

        let rows = fields.iter().map(|(key, value)| {
            Row::new(vec![
                Cell::from(Span::styled(key.clone(), Style::new().bold())),
                Cell::from(value.clone()),
            ])
        });
        let block = Block::bordered()
            .title(format!(
                " Record {} of {} ",
                view.view_idx + 1,
                model.table().filtered_len()
            ))
            .title_bottom(Line::from(" ←/→ previous/next  y copy  Esc back ").right_aligned())
            .border_style(Style::new().fg(ACCENT));
        let widget = Table::new(rows, [Constraint::Length(key_width), Constraint::Fill(1)])
            .block(block)
            .column_spacing(COLUMN_SPACING)
            .row_highlight_style(Style::new().add_modifier(Modifier::REVERSED));

        let mut state = TableState::default().with_selected(Some(view.curser_row));
        frame.render_widget(Clear, area);
        frame.render_stateful_widget(widget, area, &mut state);
    }

    fn draw_help(&self, frame: &mut Frame) {
        let area = popup_area(frame.area(), 60, 80);
        let block = Block::bordered()
            .title(" Help ")
            .title_bottom(Line::from(" Esc to close ").right_aligned())
            .border_style(Style::new().fg(ACCENT));
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(HELP_TEXT).wrap(Wrap { trim: false }).block(block),
            area,
        );
    }
}

/// Sortable headers carry the number key that sorts them.
fn header_cell(idx: usize, sortable: bool, text: &str) -> String {
    if sortable && idx < 9 {
        format!("{}:{}", idx + 1, text)
    } else {
        text.to_string()
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::new().fg(ACCENT)
    } else {
        Style::new().fg(Color::DarkGray)
    }
}

/// Centered area taking the given percentage of `screen`.
fn popup_area(screen: Rect, percent_x: u16, percent_y: u16) -> Rect {
    // u32 so that wide terminals do not overflow before the division
    let scale = |len: u16, percent: u16| {
        let scaled = u32::from(len) * u32::from(percent.min(100)) / 100;
        u16::try_from(scaled).unwrap_or(len)
    };
    let width = scale(screen.width, percent_x).max(10).min(screen.width);
    let height = scale(screen.height, percent_y).max(3).min(screen.height);
    let x = screen.x + screen.width.saturating_sub(width) / 2;
    let y = screen.y + screen.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn clip(text: &str, width: usize) -> String {
    if width < 3 {
        return String::new();
    }
    if text.chars().count() > width {
        let mut clipped: String = text.chars().take(width - 3).collect();
        clipped.push_str("...");
        clipped
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Message;
    use crate::pages::Page;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(model: &Model) -> String {
        render_sized(model, 160, 60)
    }

    fn render_sized(model: &Model, width: u16, height: u16) -> String {
        let ui = DashboardUI::new(model.config());
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui.draw(model, f)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn model_on(page: Page) -> Model {
        let config = ERPConfig {
            start_page: page,
            ..ERPConfig::default()
        };
        Model::init(&config)
    }

    #[test]
    fn clip_shortens_long_values() {
        assert_eq!(clip("Wireless Bluetooth Headphones", 10), "Wireless...");
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("abc", 2), "");
    }

    #[test]
    fn popup_area_is_centered_and_inside_screen() {
        let screen = Rect::new(0, 0, 100, 40);
        let area = popup_area(screen, 60, 50);
        assert_eq!(area, Rect::new(20, 10, 60, 20));
        let tiny = popup_area(Rect::new(0, 0, 8, 2), 50, 50);
        assert!(tiny.width <= 8 && tiny.height <= 2);
    }

    #[test]
    fn popup_area_handles_wide_screens() {
        let screen = Rect::new(0, 0, 1000, 40);
        let area = popup_area(screen, 70, 80);
        assert_eq!(area, Rect::new(150, 4, 700, 32));
        let widest = popup_area(Rect::new(0, 0, u16::MAX, 50), 100, 100);
        assert_eq!(widest.width, u16::MAX);
    }

    #[test]
    fn help_overlay_draws_on_a_wide_terminal() {
        let mut model = model_on(Page::Hr);
        model.update(Some(Message::Help)).unwrap();
        let screen = render_sized(&model, 1200, 50);
        assert!(screen.contains("switch focus between sidebar and content"));
    }

    #[test]
    fn dashboard_shows_header_stats_and_orders() {
        let model = model_on(Page::Dashboard);
        let screen = render(&model);
        assert!(screen.contains("ERP Pro"));
        assert!(screen.contains("Super Admin"));
        assert!(screen.contains("Total Employees"));
        assert!(screen.contains("+12%"));
        assert!(screen.contains("Recent Orders"));
        assert!(screen.contains("ORD-001"));
        assert!(screen.contains("Showing 1 to 5 of 5"));
    }

    #[test]
    fn hr_page_lists_employees_with_pagination_footer() {
        let model = model_on(Page::Hr);
        let screen = render(&model);
        assert!(screen.contains("Sarah Johnson"));
        assert!(screen.contains("$95,000"));
        assert!(screen.contains("On Leave"));
        assert!(screen.contains("Showing 1 to 8 of 8 · Page 1/1"));
        assert!(screen.contains("/ to search by name"));
    }

    #[test]
    fn search_without_matches_shows_no_results() {
        let mut model = model_on(Page::Hr);
        model.update(Some(Message::Search)).unwrap();
        for c in "zzz".chars() {
            let key = ratatui::crossterm::event::KeyEvent::from(ratatui::crossterm::event::KeyCode::Char(c));
            model.update(Some(Message::RawKey(key))).unwrap();
        }
        let screen = render(&model);
        assert!(screen.contains("No results."));
        assert!(screen.contains("Search name: zzz"));
        assert!(screen.contains("Showing 0 to 0 of 0"));
    }

    #[test]
    fn overlays_render_on_top() {
        let mut model = model_on(Page::Inventory);
        model.update(Some(Message::OpenModal)).unwrap();
        let screen = render(&model);
        assert!(screen.contains("Add New Product"));
        assert!(screen.contains("Selling Price"));

        model.update(Some(Message::Exit)).unwrap();
        model.update(Some(Message::Help)).unwrap();
        assert!(render(&model).contains("switch focus between sidebar and content"));

        model.update(Some(Message::Exit)).unwrap();
        model.update(Some(Message::Enter)).unwrap();
        let screen = render(&model);
        assert!(screen.contains("Record 1 of 8"));
        assert!(screen.contains("selling_price"));
    }

    #[test]
    fn projects_page_shows_progress_and_task_board() {
        let screen = render(&model_on(Page::Projects));
        assert!(screen.contains("Project Progress"));
        assert!(screen.contains("1 of 6 tasks completed (17%)"));
        assert!(screen.contains("Task Board"));
        assert!(screen.contains("Team Members"));
    }

    #[test]
    fn collapsed_sidebar_uses_short_labels() {
        let config = ERPConfig {
            sidebar_collapsed: true,
            ..ERPConfig::default()
        };
        let model = Model::init(&config);
        let screen = render(&model);
        assert!(screen.contains("PY"));
        assert!(!screen.contains("HR Management"));
    }
}
