//! Presentation adapter: projects [`AdminState`] onto terminal text.

use std::fmt::Write as _;

use client_core::{pagination_controls, PageControl, PageControlKind};
use shared::domain::{Product, SortDirection, SortField, SortSpec};

use crate::controller::reducer::{AdminState, LoadStatus};
use crate::ui::forms::{Alert, AlertKind, FormField, FormState};

const ID_WIDTH: usize = 6;
const TITLE_WIDTH: usize = 36;
const PRICE_WIDTH: usize = 10;
const CATEGORY_WIDTH: usize = 16;
const IMAGE_WIDTH: usize = 40;

/// One rendered table row; `tooltip` carries the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub title: String,
    pub price: String,
    pub category: String,
    pub thumbnail: String,
    pub tooltip: String,
}

impl TableRow {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: format!("${}", product.price),
            category: product.category_name().to_string(),
            thumbnail: product.first_image().unwrap_or_default().to_string(),
            tooltip: product.description.clone(),
        }
    }
}

pub fn pagination_info(total: usize, page: usize, total_pages: usize) -> String {
    format!("Total {total} items • Page {page}/{total_pages}")
}

pub fn sort_label(field: SortField, sort: Option<SortSpec>) -> String {
    let active = sort.filter(|spec| spec.field == field).map(|spec| spec.direction);
    match (field, active) {
        (SortField::Title, None) => "Sort by Title".to_string(),
        (SortField::Title, Some(SortDirection::Ascending)) => "Sorted: Title (A→Z)".to_string(),
        (SortField::Title, Some(SortDirection::Descending)) => "Sorted: Title (Z→A)".to_string(),
        (SortField::Price, None) => "Sort by Price".to_string(),
        (SortField::Price, Some(SortDirection::Ascending)) => {
            "Sorted: Price (Low→High)".to_string()
        }
        (SortField::Price, Some(SortDirection::Descending)) => {
            "Sorted: Price (High→Low)".to_string()
        }
    }
}

/// Enabled controls in brackets, disabled ones in parentheses, the current page between stars.
pub fn control_label(control: &PageControl) -> String {
    let text = match control.kind {
        PageControlKind::First => "«".to_string(),
        PageControlKind::Previous => "‹".to_string(),
        PageControlKind::Number(page) => page.to_string(),
        PageControlKind::Next => "›".to_string(),
        PageControlKind::Last => "»".to_string(),
    };
    if control.active {
        format!("*{text}*")
    } else if control.disabled {
        format!("({text})")
    } else {
        format!("[{text}]")
    }
}

pub fn render_pagination(state: &AdminState) -> String {
    let view = state.view();
    pagination_controls(view.current_page, view.total_pages)
        .iter()
        .map(control_label)
        .collect::<Vec<_>>()
        .join(" ")
}

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text:<width$}")
    } else {
        let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}

fn table_line(cells: [&str; 5]) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        fit(cells[0], ID_WIDTH),
        fit(cells[1], TITLE_WIDTH),
        fit(cells[2], PRICE_WIDTH),
        fit(cells[3], CATEGORY_WIDTH),
        fit(cells[4], IMAGE_WIDTH),
    )
    .trim_end()
    .to_string()
}

fn table_width() -> usize {
    ID_WIDTH + TITLE_WIDTH + PRICE_WIDTH + CATEGORY_WIDTH + IMAGE_WIDTH + 12
}

pub fn render_table(state: &AdminState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", table_line(["ID", "Title", "Price", "Category", "Image"]));
    let _ = writeln!(out, "{}", "-".repeat(table_width()));

    match &state.load {
        LoadStatus::Loading => {
            let _ = writeln!(out, "{:^width$}", "Loading…", width = table_width());
        }
        LoadStatus::Failed(err) => {
            let _ = writeln!(out, "{:^width$}", format!("! {}", err.message()), width = table_width());
        }
        LoadStatus::Ready if state.page_items().is_empty() => {
            let _ = writeln!(out, "{:^width$}", "No products", width = table_width());
        }
        LoadStatus::Ready => {
            for row in state.page_items().iter().map(TableRow::from_product) {
                let _ = writeln!(
                    out,
                    "{}",
                    table_line([&row.id, &row.title, &row.price, &row.category, &row.thumbnail])
                );
            }
        }
    }
    out
}

fn render_alert(alert: &Alert) -> String {
    match alert.kind {
        AlertKind::Success => format!("  [ok] {}", alert.message),
        AlertKind::Failure => format!("  [error] {}", alert.message),
    }
}

fn render_form(out: &mut String, heading: &str, form: &FormState) {
    let _ = writeln!(out, "{heading}");
    for field in FormField::ALL {
        let _ = writeln!(out, "  {:<12} {}", field.label(), form.fields.field(field));
    }
    if form.in_flight {
        let _ = writeln!(out, "  … request in progress");
    }
    if let Some(alert) = &form.alert {
        let _ = writeln!(out, "{}", render_alert(alert));
    }
}

pub fn render_screen(state: &AdminState) -> String {
    let params = state.params();
    let view = state.view();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Search: \"{}\" | Page size: {} | {} | {}",
        params.search,
        params.page_size,
        sort_label(SortField::Title, params.sort),
        sort_label(SortField::Price, params.sort),
    );
    out.push_str(&render_table(state));
    let _ = writeln!(out, "{}", pagination_info(view.total(), view.current_page, view.total_pages));
    let _ = writeln!(out, "{}", render_pagination(state));

    if state.detail.open {
        let heading = match state.selected_product().map(TableRow::from_product) {
            Some(row) => format!("\nProduct #{}: {}", row.id, fit(&row.tooltip, 60).trim_end()),
            None => "\nProduct".to_string(),
        };
        render_form(&mut out, &heading, &state.detail);
    }
    if state.create.open {
        render_form(&mut out, "\nNew product", &state.create);
    }
    if let Some(notice) = &state.notice {
        let _ = writeln!(out, "\n{notice}");
    }
    out
}
