use lookloader_api::{LookCatalog, LookEntry, PlugState};
use lookloader_core::LookStandin;
use lookloader_core::util::file_name;
use nu_ansi_term::Color;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// One standin in `list` output
#[derive(Tabled)]
pub struct StandinRow {
    #[tabled(rename = "Object")]
    pub object: String,
    #[tabled(rename = "Asset")]
    pub asset: String,
    #[tabled(rename = "Variant")]
    pub variant: String,
    #[tabled(rename = "Looks")]
    pub looks: usize,
    #[tabled(rename = "Looks status")]
    pub looks_status: String,
    #[tabled(rename = "UV status")]
    pub uv_status: String,
}

impl StandinRow {
    /// `uv_up_to_date` is `None` for variants without UV tracking.
    pub fn from_standin(standin: &LookStandin, uv_up_to_date: Option<bool>) -> Self {
        Self {
            object: standin.object_name().to_string(),
            asset: standin.asset_name().to_string(),
            variant: standin.profile().kind.to_string(),
            looks: standin.catalog().len(),
            looks_status: status_label(standin.is_looks_up_to_date()),
            uv_status: uv_up_to_date.map_or_else(|| "-".to_string(), status_label),
        }
    }
}

/// One catalog entry in `looks` output
#[derive(Tabled)]
pub struct LookRow {
    #[tabled(rename = "Look")]
    pub name: String,
    #[tabled(rename = "State")]
    pub state: String,
    #[tabled(rename = "File")]
    pub file: String,
}

impl LookRow {
    pub fn from_entry(entry: &LookEntry) -> Self {
        let state = entry.plug_state().to_string();
        let state = match entry.plug_state() {
            PlugState::AlreadyPlugged => Color::Cyan.paint(state).to_string(),
            PlugState::AnteriorVersionPlugged => Color::Yellow.paint(state).to_string(),
            PlugState::NotPlugged => state,
        };

        Self {
            name: entry.name().to_string(),
            state,
            file: file_name(entry.path()).to_string(),
        }
    }
}

fn status_label(up_to_date: bool) -> String {
    if up_to_date {
        Color::Green.paint("up to date").to_string()
    } else {
        Color::Yellow.paint("outdated").to_string()
    }
}

pub fn render_catalog(catalog: &LookCatalog) -> String {
    let rows: Vec<LookRow> = catalog.entries().map(LookRow::from_entry).collect();
    Table::new(rows).with(Style::psql()).to_string()
}

pub fn render_standins(rows: Vec<StandinRow>) -> String {
    Table::new(rows).with(Style::psql()).to_string()
}
