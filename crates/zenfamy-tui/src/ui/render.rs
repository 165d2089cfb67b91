use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use zenfamy_core::profile::{ProfileField, ViewMode};
use zenfamy_core::utils::truncate_string;
use zenfamy_core::Route;

use crate::app::{App, AppState, LoginFocus, StatusKind};

use super::styles;

/// Width of the label column on the profile view
const LABEL_WIDTH: usize = 12;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    match app.route {
        Route::Login => render_login(frame, app, chunks[1]),
        Route::Profile => render_profile(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn logo_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "          ╔═╗ ╔═╗ ╔╗╔ ╔═╗ ╔═╗ ╔╦╗ ╦ ╦",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "          ╔═╝ ║╣  ║║║ ╠╣  ╠═╣ ║║║ ╚╦╝",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "          ╚═╝ ╚═╝ ╝╚╝ ╚   ╩ ╩ ╩ ╩  ╩ ",
            styles::title_style(),
        )),
    ]
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("  Zenfamy · {}", app.route.title());
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title.clone(), styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.chars().count() + help_hint.len() + 4),
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Login
// ============================================================================

fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    // Fixed size dialog - compact
    let height = if app.login_error.is_some() { 14 } else { 12 };
    let area = centered_rect_fixed(56, height, area);

    frame.render_widget(Clear, area);

    let mut lines = logo_lines();
    lines.push(Line::from(""));

    // Email field
    let email_focused = app.login_focus == LoginFocus::Email;
    let email_display = format!("{:<28}", truncate_string(&app.login_email, 28));
    lines.push(input_line("   Email:    [", email_display, email_focused));

    // Password field
    let password_focused = app.login_focus == LoginFocus::Password;
    let password_masked: String = "*".repeat(app.login_password.chars().count().min(28));
    let password_display = format!("{:<28}", password_masked);
    lines.push(input_line("   Password: [", password_display, password_focused));

    // Login button
    let button_focused = app.login_focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let button_label = if button_focused { " ▶ Login ◀ " } else { "   Login   " };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("                    ["),
        Span::styled(button_label, button_style),
        Span::raw("]"),
    ]));

    // Error message
    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn input_line(label: &'static str, value: String, focused: bool) -> Line<'static> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::styled(label, styles::muted_style()),
        Span::styled(format!("{}{}", value, cursor), style),
        Span::styled("]", styles::muted_style()),
    ])
}

// ============================================================================
// Profile
// ============================================================================

fn render_profile(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.profile;
    let area = centered_rect_fixed(60, 18, area);
    let editing = view.mode() == ViewMode::Editing;

    let mut lines = vec![Line::from("")];

    match view.profile() {
        None if view.is_loading() => {
            lines.push(Line::from(Span::styled("  Loading...", styles::muted_style())));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "  No profile loaded. Press [r] to retry.",
                styles::muted_style(),
            )));
        }
        Some(profile) => {
            lines.push(read_only_line("User ID", profile.display_id()));

            for field in [ProfileField::FirstName, ProfileField::LastName] {
                lines.push(editable_line(app, field, editing));
            }
            lines.push(read_only_line("Email", profile.display_email()));
            lines.push(read_only_line("Role", profile.display_role()));
            for field in [ProfileField::Country, ProfileField::Language] {
                lines.push(editable_line(app, field, editing));
            }
        }
    }

    if let Some(error) = view.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            styles::error_style(),
        )));
    }

    lines.push(Line::from(""));
    let actions = if editing {
        "  [Enter] Save   [Esc] Cancel   [Tab] Next field"
    } else {
        "  [e] Edit info   [r] Reload   [l] Logout"
    };
    lines.push(Line::from(Span::styled(actions, styles::muted_style())));

    let title = match view.profile() {
        Some(profile) => format!(" {} ", truncate_string(&profile.display_name(), 40)),
        None => " User Profile ".to_string(),
    };
    let block = Block::default()
        .title(Span::styled(title, styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(editing));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn read_only_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<width$}", label, width = LABEL_WIDTH), styles::label_style()),
        Span::styled(value, styles::list_item_style()),
    ])
}

fn editable_line(app: &App, field: ProfileField, editing: bool) -> Line<'static> {
    let view = &app.profile;
    let label = Span::styled(
        format!("  {:<width$}", field.label(), width = LABEL_WIDTH),
        styles::label_style(),
    );

    match (editing, view.draft()) {
        (true, Some(draft)) => {
            let focused = view.focus == Some(field);
            let value = format!("{:<30}", draft.get(field));
            let style = if focused {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            let cursor = if focused { "▌" } else { "" };
            Line::from(vec![
                label,
                Span::styled("[", styles::muted_style()),
                Span::styled(format!("{}{}", value, cursor), style),
                Span::styled("]", styles::muted_style()),
            ])
        }
        _ => {
            let value = view
                .profile()
                .map(|p| match field {
                    ProfileField::FirstName => p.display_first_name(),
                    ProfileField::LastName => p.display_last_name(),
                    ProfileField::Country => p.display_country(),
                    ProfileField::Language => p.display_language(),
                })
                .unwrap_or_default();
            Line::from(vec![label, Span::styled(value, styles::list_item_style())])
        }
    }
}

// ============================================================================
// Status bar and overlays
// ============================================================================

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.route {
        Route::Login => "[Tab] next field | [Esc] quit",
        Route::Profile => "[?] help | [q]uit",
    };

    let (left_text, left_style) = match app.status_message {
        Some(ref msg) => (format!(" {} ", msg.text), status_style(msg.kind)),
        None => match app.signed_in_as() {
            Some(identity) => (format!(" Signed in as {} ", identity), styles::muted_style()),
            None => (" Not signed in ".to_string(), styles::muted_style()),
        },
    };

    let right_text = format!(" {} ", shortcuts);
    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn status_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Info => styles::muted_style(),
        StatusKind::Success => styles::success_style(),
    }
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(56, 20, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let mut help_text = logo_lines();
    help_text.push(Line::from(Span::styled(
        format!("                  version {}", version),
        styles::muted_style(),
    )));
    help_text.push(Line::from(""));

    let sections: [(&str, &[(&str, &str)]); 2] = [
        (
            " Profile",
            &[
                ("  e         ", "Edit first/last name, country, language"),
                ("  r         ", "Reload from server"),
                ("  l         ", "Logout"),
                ("  q         ", "Quit"),
            ],
        ),
        (
            " Editing",
            &[
                ("  Tab/↑/↓   ", "Move between fields"),
                ("  Enter     ", "Save"),
                ("  Esc       ", "Cancel and reload"),
            ],
        ),
    ];

    for (title, keys) in sections {
        help_text.push(Line::from(Span::styled(title, styles::highlight_style())));
        for (key, desc) in keys {
            help_text.push(Line::from(vec![
                Span::styled(*key, styles::help_key_style()),
                Span::styled(*desc, styles::help_desc_style()),
            ]));
        }
        help_text.push(Line::from(""));
    }

    help_text.push(Line::from(vec![
        Span::styled("          Press ", styles::muted_style()),
        Span::styled("?", styles::help_key_style()),
        Span::styled(" or ", styles::muted_style()),
        Span::styled("Esc", styles::help_key_style()),
        Span::styled(" to close", styles::muted_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    // Fixed size dialog matching login screen
    let area = centered_rect_fixed(56, 10, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = logo_lines();
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "        Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("        Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect_fixed(56, 10, outer);
        assert_eq!(inner, Rect::new(22, 15, 56, 10));
    }

    #[test]
    fn test_status_style_follows_kind() {
        assert_eq!(status_style(StatusKind::Success), styles::success_style());
        assert_eq!(status_style(StatusKind::Info), styles::muted_style());
    }

    #[test]
    fn test_centered_rect_fixed_clamps_to_small_area() {
        let outer = Rect::new(5, 5, 30, 8);
        let inner = centered_rect_fixed(56, 10, outer);
        assert_eq!(inner, Rect::new(5, 5, 30, 8));
    }
}
