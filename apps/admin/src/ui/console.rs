//! Line commands typed at the prompt, mapped onto intents and page controls.

use client_core::PageControlKind;
use shared::domain::{ProductId, SortField};

use crate::controller::events::Intent;
use crate::ui::forms::{FormField, FormKind};

pub const HELP: &str = "\
Commands:
  search [text]                      filter by title (no text clears)
  size <n>                           rows per page
  page <n> | first | prev | next | last
  sort title|price                   toggle sort
  open <id>                          open a visible product in the detail form
  new                                open the create form
  set detail|create <field> <value>  fields: title price description categoryId images
  update                             submit the detail form
  create                             submit the create form
  export                             write the visible page to products_page_<n>.csv
  close | show | help | quit
Pagination: [x] enabled, (x) disabled, *n* current page";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Intent(Intent),
    /// Resolved against the rendered pagination controls.
    Navigate(PageControlKind),
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "" | "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "search" => Command::Intent(Intent::SetSearch(rest.to_string())),
        "size" => Command::Intent(Intent::SetPageSize(parse_number(rest, "page size")?)),
        "page" => Command::Intent(Intent::SetPage(parse_number(rest, "page")?)),
        "first" => Command::Navigate(PageControlKind::First),
        "prev" => Command::Navigate(PageControlKind::Previous),
        "next" => Command::Navigate(PageControlKind::Next),
        "last" => Command::Navigate(PageControlKind::Last),
        "sort" => Command::Intent(Intent::ToggleSort(parse_sort_field(rest)?)),
        "open" => Command::Intent(Intent::SelectRow(ProductId(parse_number(rest, "id")?))),
        "new" => Command::Intent(Intent::OpenCreate),
        "set" => Command::Intent(parse_edit(rest)?),
        "update" => Command::Intent(Intent::RequestUpdate),
        "create" => Command::Intent(Intent::RequestCreate),
        "export" => Command::Intent(Intent::RequestExport),
        "close" => Command::Intent(Intent::CloseForms),
        other => return Err(format!("Unknown command '{other}', type 'help'")),
    };
    Ok(command)
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("Expected a number for {what}, got '{raw}'"))
}

fn parse_sort_field(raw: &str) -> Result<SortField, String> {
    match raw.to_ascii_lowercase().as_str() {
        "title" => Ok(SortField::Title),
        "price" => Ok(SortField::Price),
        other => Err(format!("Can only sort by title or price, got '{other}'")),
    }
}

fn parse_edit(rest: &str) -> Result<Intent, String> {
    let mut parts = rest.splitn(3, char::is_whitespace);
    let form = parts
        .next()
        .and_then(FormKind::parse)
        .ok_or("Usage: set detail|create <field> <value>")?;
    let field_name = parts.next().unwrap_or_default();
    let field = FormField::parse(field_name).ok_or_else(|| format!("Unknown field '{field_name}'"))?;
    let value = parts.next().unwrap_or_default().trim().to_string();
    Ok(Intent::EditField { form, field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_view_commands() {
        assert_eq!(
            parse_command("search  red shirt "),
            Ok(Command::Intent(Intent::SetSearch("red shirt".to_string())))
        );
        assert_eq!(
            parse_command("search"),
            Ok(Command::Intent(Intent::SetSearch(String::new())))
        );
        assert_eq!(parse_command("size 5"), Ok(Command::Intent(Intent::SetPageSize(5))));
        assert_eq!(
            parse_command("sort PRICE"),
            Ok(Command::Intent(Intent::ToggleSort(SortField::Price)))
        );
        assert_eq!(parse_command("next"), Ok(Command::Navigate(PageControlKind::Next)));
        assert_eq!(parse_command(""), Ok(Command::Show));
    }

    #[test]
    fn parses_form_edits_with_spaces_in_value() {
        assert_eq!(
            parse_command("set detail title Soft cotton tee"),
            Ok(Command::Intent(Intent::EditField {
                form: FormKind::Detail,
                field: FormField::Title,
                value: "Soft cotton tee".to_string(),
            }))
        );
        assert_eq!(
            parse_command("set create images"),
            Ok(Command::Intent(Intent::EditField {
                form: FormKind::Create,
                field: FormField::Images,
                value: String::new(),
            }))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("page two").is_err());
        assert!(parse_command("sort slug").is_err());
        assert!(parse_command("set other title x").is_err());
        assert!(parse_command("set detail slug x").is_err());
        assert!(parse_command("dance").is_err());
    }
}
