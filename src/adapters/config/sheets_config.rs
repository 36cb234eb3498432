use crate::domain::sheets::a1_notation::A1Range;

pub const DEFAULT_SPREADSHEET_ID: &str = "1EDLv6f8ehprYBno9sRBrXvDXk07N_06KNM2c_VmxoYM";
pub const DEFAULT_RANGE: &str = "rekap!A2:L";

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: Box<str>,
    pub range: A1Range,
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.into(),
            range: DEFAULT_RANGE
                .parse()
                .expect("default range is valid A1 notation"),
        }
    }
}
